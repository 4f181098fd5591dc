//! # Theme State
//!
//! The global style document's working/persisted pair. Same dirty
//! derivation and save/reset protocol as page slots, but the theme is a
//! flat settings object: no structural mutations, only per-key `set` and
//! whole-document save/reset. Saved independently of any page.

use crate::tracked::Tracked;
use crate::{Completion, ResetTicket, SaveTicket, SlotError, SlotState, StoreError};
use blockwork_document::ThemeDocument;

#[derive(Debug)]
pub struct ThemeState {
    inner: Tracked<ThemeDocument>,
}

impl ThemeState {
    pub fn new() -> Self {
        Self {
            inner: Tracked::new("theme"),
        }
    }

    pub fn state(&self) -> SlotState {
        self.inner.state()
    }

    pub fn working(&self) -> &ThemeDocument {
        self.inner.working()
    }

    pub fn persisted(&self) -> &ThemeDocument {
        self.inner.persisted()
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    pub fn complete_load(&mut self, theme: ThemeDocument) {
        self.inner.complete_load(theme);
    }

    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) -> Result<(), SlotError> {
        self.inner.working_mut()?.set(key, value);
        Ok(())
    }

    pub fn discard(&mut self) {
        self.inner.discard();
    }

    pub fn begin_save(&mut self) -> Result<SaveTicket<ThemeDocument>, SlotError> {
        self.inner.begin_save()
    }

    pub fn complete_save(
        &mut self,
        ticket: SaveTicket<ThemeDocument>,
        outcome: Result<ThemeDocument, StoreError>,
    ) -> Result<Completion, StoreError> {
        self.inner.complete_save(ticket, outcome)
    }

    pub fn begin_reset(&mut self) -> Result<ResetTicket, SlotError> {
        self.inner.begin_reset()
    }

    pub fn complete_reset(
        &mut self,
        ticket: ResetTicket,
        outcome: Result<ThemeDocument, StoreError>,
    ) -> Result<Completion, StoreError> {
        self.inner.complete_reset(ticket, outcome)
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new()
    }
}
