//! Error types for the document model

use crate::EntryId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Duplicate entry id: {0}")]
    DuplicateId(EntryId),
}
