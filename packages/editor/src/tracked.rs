//! # Tracked Documents
//!
//! The working/persisted pair underlying both page slots and the theme
//! state, with the save/reset protocol both share.
//!
//! ## Protocol
//!
//! Save and reset are two-phase: `begin_*` captures what is being sent and
//! marks the transient state, the caller performs the store I/O, and
//! `complete_*` applies the outcome. Splitting the phases keeps the state
//! machine synchronous and deterministic while `working` stays freely
//! editable between the two calls.
//!
//! ```text
//! Loading → Ready ⇄ (Saving | Resetting) → Ready
//! ```
//!
//! Every ticket carries the generation of the slot content it was issued
//! for. Loads and resets bump the generation, so a response that arrives
//! after the slot's identity changed is dropped instead of clobbering the
//! newer content.

use crate::StoreError;
use thiserror::Error;
use tracing::{debug, warn};

/// Lifecycle state of a tracked document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Initial fetch not completed; nothing to edit yet. Distinct from an
    /// empty document.
    Loading,
    Ready,
    /// Save in flight. `working` stays editable; a second save is rejected.
    Saving,
    /// Reset in flight.
    Resetting,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Document is not loaded yet")]
    NotLoaded,

    #[error("A save or reset is already in flight")]
    OperationPending,
}

/// Capture of a begin_save: the document actually sent, and the slot
/// generation it belongs to.
#[derive(Debug, Clone)]
pub struct SaveTicket<D> {
    pub(crate) generation: u64,
    pub sent: D,
}

/// Capture of a begin_reset.
#[derive(Debug, Clone)]
pub struct ResetTicket {
    pub(crate) generation: u64,
}

/// How a completion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The response belonged to an earlier slot generation and was dropped.
    Stale,
}

/// Working/persisted pair with derived dirty flag and the two-phase
/// save/reset protocol.
#[derive(Debug)]
pub(crate) struct Tracked<D> {
    state: SlotState,
    generation: u64,
    working: D,
    persisted: D,
    /// Human-readable label for log lines ("page landing", "theme").
    label: String,
}

impl<D: Clone + PartialEq + Default> Tracked<D> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: SlotState::Loading,
            generation: 0,
            working: D::default(),
            persisted: D::default(),
            label: label.into(),
        }
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn working(&self) -> &D {
        &self.working
    }

    pub fn persisted(&self) -> &D {
        &self.persisted
    }

    /// Dirty is never stored: it is recomputed as structural difference so
    /// it cannot drift from reality. Mutate-then-revert goes back to clean.
    pub fn is_dirty(&self) -> bool {
        self.state != SlotState::Loading && self.working != self.persisted
    }

    /// Install fetched content; both sides become the fetched value.
    pub fn complete_load(&mut self, doc: D) {
        self.generation += 1;
        self.working = doc.clone();
        self.persisted = doc;
        self.state = SlotState::Ready;
        debug!(slot = %self.label, generation = self.generation, "loaded");
    }

    /// Mutable access to `working`, guarded by state: edits are allowed
    /// while Ready or Saving (the spec keeps the document editable under an
    /// in-flight save), rejected before load and during a reset.
    pub fn working_mut(&mut self) -> Result<&mut D, SlotError> {
        match self.state {
            SlotState::Loading => Err(SlotError::NotLoaded),
            SlotState::Resetting => Err(SlotError::OperationPending),
            SlotState::Ready | SlotState::Saving => Ok(&mut self.working),
        }
    }

    /// Discard edits: `working := persisted`. Used by the leave guard.
    pub fn discard(&mut self) {
        if self.state != SlotState::Loading {
            self.working = self.persisted.clone();
        }
    }

    pub fn begin_save(&mut self) -> Result<SaveTicket<D>, SlotError> {
        match self.state {
            SlotState::Loading => Err(SlotError::NotLoaded),
            SlotState::Saving | SlotState::Resetting => Err(SlotError::OperationPending),
            SlotState::Ready => {
                self.state = SlotState::Saving;
                Ok(SaveTicket {
                    generation: self.generation,
                    sent: self.working.clone(),
                })
            }
        }
    }

    /// Apply a save outcome. On success `persisted` becomes the document
    /// that was actually sent - never `working`, which may have moved on
    /// while the request was in flight. On failure `working` is untouched
    /// and the error propagates as a retryable condition.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket<D>,
        outcome: Result<D, StoreError>,
    ) -> Result<Completion, StoreError> {
        if ticket.generation != self.generation {
            warn!(slot = %self.label, "dropping save response for a replaced slot");
            return Ok(Completion::Stale);
        }
        self.state = SlotState::Ready;
        match outcome {
            Ok(echo) => {
                if echo != ticket.sent {
                    debug!(slot = %self.label, "store echoed a different document than sent");
                }
                self.persisted = ticket.sent;
                Ok(Completion::Applied)
            }
            Err(err) => Err(err),
        }
    }

    pub fn begin_reset(&mut self) -> Result<ResetTicket, SlotError> {
        match self.state {
            SlotState::Loading => Err(SlotError::NotLoaded),
            SlotState::Saving | SlotState::Resetting => Err(SlotError::OperationPending),
            SlotState::Ready => {
                self.state = SlotState::Resetting;
                Ok(ResetTicket {
                    generation: self.generation,
                })
            }
        }
    }

    /// Apply a reset outcome: the store's canonical default replaces both
    /// sides (not a reload of `persisted` - the product default may differ
    /// from whatever was last saved). Network failure leaves state
    /// unchanged.
    pub fn complete_reset(
        &mut self,
        ticket: ResetTicket,
        outcome: Result<D, StoreError>,
    ) -> Result<Completion, StoreError> {
        if ticket.generation != self.generation {
            warn!(slot = %self.label, "dropping reset response for a replaced slot");
            return Ok(Completion::Stale);
        }
        self.state = SlotState::Ready;
        match outcome {
            Ok(default_doc) => {
                self.generation += 1;
                self.working = default_doc.clone();
                self.persisted = default_doc;
                Ok(Completion::Applied)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(value: &str) -> Tracked<String> {
        let mut t = Tracked::new("test");
        t.complete_load(value.to_string());
        t
    }

    #[test]
    fn loading_is_distinct_from_empty() {
        let t: Tracked<String> = Tracked::new("test");
        assert_eq!(t.state(), SlotState::Loading);
        assert!(!t.is_dirty());
    }

    #[test]
    fn dirty_is_structural_and_reversible() {
        let mut t = loaded("original");
        *t.working_mut().unwrap() = "edited".to_string();
        assert!(t.is_dirty());
        *t.working_mut().unwrap() = "original".to_string();
        assert!(!t.is_dirty());
    }

    #[test]
    fn save_installs_the_sent_value_not_the_current_one() {
        let mut t = loaded("a");
        *t.working_mut().unwrap() = "b".to_string();
        let ticket = t.begin_save().unwrap();

        // User keeps editing while the request is in flight.
        *t.working_mut().unwrap() = "c".to_string();

        let completion = t.complete_save(ticket, Ok("b".to_string())).unwrap();
        assert_eq!(completion, Completion::Applied);
        assert_eq!(t.persisted(), "b");
        assert_eq!(t.working(), "c");
        assert!(t.is_dirty());
    }

    #[test]
    fn second_save_is_rejected_not_queued() {
        let mut t = loaded("a");
        let _ticket = t.begin_save().unwrap();
        assert_eq!(t.begin_save().unwrap_err(), SlotError::OperationPending);
    }

    #[test]
    fn failed_save_keeps_working_and_dirty() {
        let mut t = loaded("a");
        *t.working_mut().unwrap() = "b".to_string();
        let ticket = t.begin_save().unwrap();
        let err = t
            .complete_save(ticket, Err(StoreError::Network("offline".into())))
            .unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(t.working(), "b");
        assert_eq!(t.persisted(), "a");
        assert!(t.is_dirty());
        assert_eq!(t.state(), SlotState::Ready);
    }

    #[test]
    fn stale_save_response_is_dropped() {
        let mut t = loaded("a");
        let ticket = t.begin_save().unwrap();

        // Slot identity changes while the request is in flight.
        t.complete_load("reloaded".to_string());

        let completion = t.complete_save(ticket, Ok("a".to_string())).unwrap();
        assert_eq!(completion, Completion::Stale);
        assert_eq!(t.working(), "reloaded");
        assert_eq!(t.persisted(), "reloaded");
    }

    #[test]
    fn reset_installs_canonical_default_on_both_sides() {
        let mut t = loaded("a");
        *t.working_mut().unwrap() = "edited".to_string();
        let ticket = t.begin_reset().unwrap();
        t.complete_reset(ticket, Ok("default".to_string())).unwrap();
        assert_eq!(t.working(), "default");
        assert_eq!(t.persisted(), "default");
        assert!(!t.is_dirty());
    }

    #[test]
    fn failed_reset_leaves_state_unchanged() {
        let mut t = loaded("a");
        *t.working_mut().unwrap() = "edited".to_string();
        let ticket = t.begin_reset().unwrap();
        let _ = t.complete_reset(ticket, Err(StoreError::Network("offline".into())));
        assert_eq!(t.working(), "edited");
        assert_eq!(t.persisted(), "a");
        assert!(t.is_dirty());
    }
}
