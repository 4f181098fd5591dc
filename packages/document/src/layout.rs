//! # Layout Document
//!
//! An ordered sequence of Component Entries for one page. Order is
//! semantically meaningful (top-to-bottom render order) and is exactly what
//! reordering mutates. An empty document is valid: it renders an "empty
//! canvas" state, which is distinct from "not yet loaded".

use crate::{ComponentEntry, DocumentError, EntryId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of Component Entries; the unit persisted and diffed.
///
/// Serializes transparently as a JSON array of entry records - the wire and
/// storage format shared with the page store and the public renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutDocument {
    entries: Vec<ComponentEntry>,
}

impl LayoutDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries, rejecting duplicate ids.
    pub fn from_entries(entries: Vec<ComponentEntry>) -> Result<Self, DocumentError> {
        let doc = Self { entries };
        doc.validate_ids()?;
        Ok(doc)
    }

    /// Check the unique-id invariant. Documents fetched from the store are
    /// untrusted and must pass through this before editing.
    pub fn validate_ids(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(&entry.id) {
                return Err(DocumentError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[ComponentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    pub fn get(&self, id: &EntryId) -> Option<&ComponentEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &EntryId) -> Option<&mut ComponentEntry> {
        self.entries.iter_mut().find(|e| &e.id == id)
    }

    /// Insert at `index`, clamped to `[0, len]`.
    pub fn insert(&mut self, index: usize, entry: ComponentEntry) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// Remove the entry with `id`, returning it if present.
    pub fn remove(&mut self, id: &EntryId) -> Option<ComponentEntry> {
        let index = self.index_of(id)?;
        Some(self.entries.remove(index))
    }

    /// Relocate the entry at `from` to `to` (remove-then-insert semantics;
    /// both indices are positions in the pre-move list truncated to bounds).
    /// Returns false when `from` is out of range.
    pub fn relocate(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() {
            return false;
        }
        let entry = self.entries.remove(from);
        let to = to.min(self.entries.len());
        self.entries.insert(to, entry);
        true
    }
}

impl FromIterator<ComponentEntry> for LayoutDocument {
    fn from_iter<I: IntoIterator<Item = ComponentEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
