//! # Blockwork Editor
//!
//! Editing engine for Blockwork page layouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ dragdrop: pointer gesture → Mutation        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Workspace state machine             │
//! │  - working vs persisted documents per page  │
//! │  - apply mutations with validation          │
//! │  - derived dirty flags, never stored        │
//! │  - save/reset protocol with stale-response  │
//! │    matching                                 │
//! │  - unsaved-changes leave guard              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: document → render tree (canvas)     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **`working` is the only document the editor mutates**: `persisted` is
//!    overwritten only by a successful save or reset response
//! 2. **Dirty is derived**: recomputed as structural difference on every
//!    read, so a stored flag can never drift from reality
//! 3. **Saved means sent**: a save response installs the document that was
//!    actually sent, never whatever `working` has become since
//! 4. **Responses match their slot**: every ticket carries the slot
//!    generation it was issued for; stale completions are dropped
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockwork_editor::{Mutation, Workspace, PageKind};
//!
//! let mut workspace = Workspace::new(registry, page_store, theme_store);
//! workspace.open_page(PageKind::Landing).await?;
//!
//! workspace.apply(PageKind::Landing, &Mutation::InsertBlock {
//!     type_id: "hero".to_string(),
//!     at: 0,
//! })?;
//!
//! workspace.save_page(PageKind::Landing).await?;
//! ```

mod dragdrop;
mod errors;
mod guard;
mod ids;
mod mutations;
mod slot;
mod stores;
mod theme;
mod tracked;
mod workspace;

pub use dragdrop::{DragSession, DragSource, RowBounds};
pub use errors::EditorError;
pub use guard::{assess, LeaveCheck, LeaveResolution, UnsavedWarning};
pub use ids::IdAllocator;
pub use mutations::{Applied, EntryPatch, Mutation, MutationError};
pub use slot::{PageKind, PageSlot};
pub use stores::{PageStore, StoreError, ThemeStore};
pub use theme::ThemeState;
pub use tracked::{Completion, ResetTicket, SaveTicket, SlotError, SlotState};
pub use workspace::Workspace;
