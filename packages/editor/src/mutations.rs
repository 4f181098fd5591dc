//! # Layout Mutations
//!
//! High-level semantic operations on a working Layout Document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation is one author action
//! 2. **Validated**: structural constraints checked before any splice
//! 3. **No-op aware**: structural no-ops (move to own index, patch that
//!    changes nothing) are filtered *before* mutation so they can never
//!    flip the dirty flag
//!
//! ## Mutation Semantics
//!
//! ### InsertBlock
//! - Synthesizes a fresh, never-reused id
//! - New entry gets the type's default variant and that variant's defaults
//! - Index clamped to `[0, len]`
//!
//! ### MoveBlock
//! - Remove-then-insert; both indices positions in the pre-move list
//! - `from == to` is a no-op, filtered before mutation
//!
//! ### RemoveBlock
//! - Removing the last entry leaves a valid empty document (the canvas
//!   shows its "empty, offer restore-default" state, not an error)
//!
//! ### UpdateBlock
//! - Variant switches apply field carryover: keys present in both the old
//!   and new variant's schema keep their current values, keys unique to
//!   the new variant take its defaults, keys the new variant does not
//!   declare are dropped
//! - Settings patches merge shallowly; a `null` value removes the key

use crate::IdAllocator;
use blockwork_document::{ComponentEntry, EntryId, LayoutDocument, Settings};
use blockwork_render::Registry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations of a page layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new block of `type_id` at `at` (clamped).
    InsertBlock { type_id: String, at: usize },

    /// Relocate the block at `from` to `to`.
    MoveBlock { from: usize, to: usize },

    /// Remove the block with `id`.
    RemoveBlock { id: EntryId },

    /// Patch variant and/or settings of the block with `id`.
    UpdateBlock { id: EntryId, patch: EntryPatch },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl EntryPatch {
    pub fn variant(name: impl Into<String>) -> Self {
        Self {
            variant: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn settings(settings: Settings) -> Self {
        Self {
            settings: Some(settings),
            ..Default::default()
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Unknown component type: {0}")]
    UnknownType(String),

    #[error("Type {type_id} does not offer variant {variant}")]
    UnknownVariant { type_id: String, variant: String },

    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Whether applying a mutation actually changed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Noop,
}

impl Mutation {
    /// Apply to a working document. The registry supplies defaults and
    /// variant schemas; the allocator supplies fresh ids.
    pub fn apply(
        &self,
        doc: &mut LayoutDocument,
        registry: &Registry,
        ids: &mut IdAllocator,
    ) -> Result<Applied, MutationError> {
        match self {
            Mutation::InsertBlock { type_id, at } => Self::apply_insert(doc, registry, ids, type_id, *at),
            Mutation::MoveBlock { from, to } => Self::apply_move(doc, *from, *to),
            Mutation::RemoveBlock { id } => Self::apply_remove(doc, id),
            Mutation::UpdateBlock { id, patch } => Self::apply_update(doc, registry, id, patch),
        }
    }

    fn apply_insert(
        doc: &mut LayoutDocument,
        registry: &Registry,
        ids: &mut IdAllocator,
        type_id: &str,
        at: usize,
    ) -> Result<Applied, MutationError> {
        let spec = registry
            .resolve(type_id)
            .ok_or_else(|| MutationError::UnknownType(type_id.to_string()))?;
        let variant = spec
            .effective_variant(&spec.default_variant)
            .ok_or_else(|| MutationError::UnknownType(type_id.to_string()))?;

        let mut entry = ComponentEntry::new(ids.allocate(doc), type_id, variant.name.clone());
        entry.settings = variant.defaults.clone();
        doc.insert(at, entry);
        Ok(Applied::Changed)
    }

    fn apply_move(doc: &mut LayoutDocument, from: usize, to: usize) -> Result<Applied, MutationError> {
        let len = doc.len();
        if from >= len {
            return Err(MutationError::IndexOutOfRange { index: from, len });
        }
        let to = to.min(len - 1);
        if from == to {
            // Filtered before mutation: a no-op drop must not flip dirty.
            return Ok(Applied::Noop);
        }
        doc.relocate(from, to);
        Ok(Applied::Changed)
    }

    fn apply_remove(doc: &mut LayoutDocument, id: &EntryId) -> Result<Applied, MutationError> {
        doc.remove(id)
            .map(|_| Applied::Changed)
            .ok_or_else(|| MutationError::EntryNotFound(id.clone()))
    }

    fn apply_update(
        doc: &mut LayoutDocument,
        registry: &Registry,
        id: &EntryId,
        patch: &EntryPatch,
    ) -> Result<Applied, MutationError> {
        let entry = doc
            .get_mut(id)
            .ok_or_else(|| MutationError::EntryNotFound(id.clone()))?;
        let before = entry.clone();

        if let Some(new_variant) = &patch.variant {
            if new_variant != &entry.variant {
                Self::switch_variant(entry, registry, new_variant)?;
            }
        }

        if let Some(settings) = &patch.settings {
            for (key, value) in settings {
                if value.is_null() {
                    entry.settings.remove(key);
                } else {
                    entry.settings.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(if *entry == before {
            Applied::Noop
        } else {
            Applied::Changed
        })
    }

    /// Field carryover on a variant switch. A cosmetic switch must not
    /// silently discard authored content: everything both variants declare
    /// survives verbatim.
    fn switch_variant(
        entry: &mut ComponentEntry,
        registry: &Registry,
        new_variant: &str,
    ) -> Result<(), MutationError> {
        let spec = registry
            .resolve(&entry.type_id)
            .ok_or_else(|| MutationError::UnknownType(entry.type_id.clone()))?;
        let new = spec
            .variant(new_variant)
            .ok_or_else(|| MutationError::UnknownVariant {
                type_id: entry.type_id.clone(),
                variant: new_variant.to_string(),
            })?;
        // The entry's current variant may itself be stale; carry over from
        // whatever the renderer would have used.
        let old_schema = spec
            .effective_variant(&entry.variant)
            .map(|v| v.schema.clone())
            .unwrap_or_default();

        let mut next = Settings::new();
        for field in new.schema.field_names() {
            if old_schema.has_field(field) {
                if let Some(current) = entry.settings.get(field) {
                    next.insert(field.to_string(), current.clone());
                    continue;
                }
            }
            if let Some(default) = new.defaults.get(field) {
                next.insert(field.to_string(), default.clone());
            }
        }

        entry.variant = new.name.clone();
        entry.settings = next;
        Ok(())
    }
}
