//! Error types for the editor

use crate::{MutationError, PageKind, SlotError, StoreError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Page {0} is not open in this workspace")]
    PageNotOpen(PageKind),

    #[error("Slot error: {0}")]
    Slot(#[from] SlotError),

    #[error("Mutation rejected: {0}")]
    Mutation(#[from] MutationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EditorError {
    /// I/O failures are surfaced to the user as retryable notifications;
    /// everything else is a programming or state error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EditorError::Store(e) if e.is_retryable())
    }
}
