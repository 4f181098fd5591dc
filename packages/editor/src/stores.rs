//! External store contracts: the page and theme persistence services the
//! editor talks to. Implementations live outside this crate (HTTP client,
//! test double...); the editor only depends on these seams.

use crate::PageKind;
use blockwork_document::{LayoutDocument, ThemeDocument};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Transport-level failure; worth retrying.
    #[error("Network error: {0}")]
    Network(String),

    /// The server refused the payload; retrying the same request is
    /// pointless.
    #[error("Rejected by server: {0}")]
    Rejected(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Network(_))
    }
}

/// Persists layout documents by page kind. Timeouts and transport policy
/// belong to the implementation, not this layer.
pub trait PageStore {
    fn fetch(
        &self,
        kind: PageKind,
    ) -> impl std::future::Future<Output = Result<LayoutDocument, StoreError>> + Send;

    /// Persist the document; echoes the stored result.
    fn save(
        &self,
        kind: PageKind,
        doc: &LayoutDocument,
    ) -> impl std::future::Future<Output = Result<LayoutDocument, StoreError>> + Send;

    /// The canonical product default for this page kind - not necessarily
    /// empty, and not necessarily what was last persisted.
    fn reset_to_default(
        &self,
        kind: PageKind,
    ) -> impl std::future::Future<Output = Result<LayoutDocument, StoreError>> + Send;
}

/// Persists the single global theme document.
pub trait ThemeStore {
    fn fetch(&self) -> impl std::future::Future<Output = Result<ThemeDocument, StoreError>> + Send;

    fn save(
        &self,
        theme: &ThemeDocument,
    ) -> impl std::future::Future<Output = Result<ThemeDocument, StoreError>> + Send;

    fn reset_to_default(
        &self,
    ) -> impl std::future::Future<Output = Result<ThemeDocument, StoreError>> + Send;
}
