//! # Blockwork Render
//!
//! Turns an untrusted Layout Document into a validated render tree.
//!
//! ## Purpose
//!
//! The registry maps component-type identifiers to their contracts (schema,
//! per-variant defaults, renderer capability, palette category). The
//! pipeline walks a document entry by entry: resolve the type, pick the
//! effective variant, merge defaults under the entry's settings, validate
//! the merged object, then hand it to the type's renderer.
//!
//! ## Determinism Contract
//!
//! **INVARIANT: Rendering is fully deterministic.**
//!
//! For any Document + Theme + Registry, `render_document()` MUST produce
//! identical output on every invocation and in every host:
//!
//! - Same document → same render tree (structurally identical)
//! - Ordered maps throughout (no hash-iteration-order leaks)
//! - No time/random/environment dependence
//!
//! This is the compatibility contract between the editor canvas and the
//! public renderer: given the same three inputs, both must reproduce the
//! identical visual result.
//!
//! ## Error Recovery Boundaries
//!
//! Failures are contained per entry, never per document:
//!
//! - unknown type → `Placeholder(UnknownType)` naming the type
//! - variant not offered → soft fallback to the default variant, no error
//! - merged settings fail the schema → `Placeholder(InvalidSettings)`
//!   naming the offending fields (raw diagnostics gated behind dev mode)
//!
//! One broken block must never blank the whole page. The three failure
//! states are distinct, user-legible node shapes - the editor tells the
//! author specifically what to fix.

mod builtin;
mod pipeline;
mod registry;
mod rnode;
mod schema;

pub use builtin::BuiltinCatalog;
pub use pipeline::Renderer;
pub use registry::{
    BlockRenderer, CatalogSource, ComponentSpec, Registry, RegistryError, RenderContext,
    VariantSpec,
};
pub use rnode::{PlaceholderKind, RenderNode, RenderTree};
pub use schema::{FieldSpec, SettingKind, SettingsSchema, Violation, ViolationReason};
