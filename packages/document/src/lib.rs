//! # Blockwork Document Model
//!
//! The persisted data model shared by the editor and the public renderer.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: LayoutDocument + ThemeDocument    │
//! │  - ordered Component Entries                │
//! │  - wire format (serde round-trip)           │
//! │  - structural equality (dirty derivation)   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: Registry + pipeline → render tree   │
//! │ editor: Workspace mutations on a document   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The document is the source of truth**: render trees and dirty flags
//!    are derived views, never stored alongside it
//! 2. **Order is meaning**: entries render top to bottom in sequence order
//! 3. **Settings are untrusted**: arbitrary JSON validated downstream by the
//!    registry's schemas, never assumed well-formed here
//! 4. **Lossless wire format**: `save` then `fetch` must round-trip the
//!    document byte-for-byte at the structural level

mod entry;
mod error;
mod layout;
mod theme;

pub use entry::{ComponentEntry, EntryId, Settings};
pub use error::DocumentError;
pub use layout::LayoutDocument;
pub use theme::ThemeDocument;
