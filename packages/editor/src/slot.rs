//! # Page Slots
//!
//! One slot per editable page kind: the working/persisted document pair,
//! the id allocator, and the save/reset protocol scoped to that page.

use crate::tracked::Tracked;
use crate::{
    Applied, Completion, EditorError, IdAllocator, Mutation, MutationError, ResetTicket,
    SaveTicket, SlotError, SlotState, StoreError,
};
use blockwork_document::LayoutDocument;
use blockwork_render::Registry;
use serde::{Deserialize, Serialize};

/// The pages a site offers for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Landing,
    About,
    Services,
    Contact,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::Landing,
        PageKind::About,
        PageKind::Services,
        PageKind::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Landing => "landing",
            PageKind::About => "about",
            PageKind::Services => "services",
            PageKind::Contact => "contact",
        }
    }
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editing state of one page.
#[derive(Debug)]
pub struct PageSlot {
    kind: PageKind,
    inner: Tracked<LayoutDocument>,
    ids: IdAllocator,
}

impl PageSlot {
    pub fn new(kind: PageKind) -> Self {
        Self {
            kind,
            inner: Tracked::new(format!("page {kind}")),
            ids: IdAllocator::new(),
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn state(&self) -> SlotState {
        self.inner.state()
    }

    pub fn working(&self) -> &LayoutDocument {
        self.inner.working()
    }

    pub fn persisted(&self) -> &LayoutDocument {
        self.inner.persisted()
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    /// The canvas "empty, offer restore-default" state: loaded and no
    /// entries. Distinct from Loading.
    pub fn is_empty_canvas(&self) -> bool {
        self.state() != SlotState::Loading && self.working().is_empty()
    }

    pub fn complete_load(&mut self, doc: LayoutDocument) {
        self.inner.complete_load(doc);
    }

    /// Apply a mutation to the working document.
    ///
    /// A stale UI can still target an entry or index that no longer exists
    /// (the races are unavoidable); those degrade to a logged no-op. A
    /// mutation naming a type or variant the registry does not know is a
    /// real fault and propagates.
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        registry: &Registry,
    ) -> Result<Applied, EditorError> {
        let ids = &mut self.ids;
        let doc = self.inner.working_mut()?;
        match mutation.apply(doc, registry, ids) {
            Ok(applied) => Ok(applied),
            Err(
                err @ (MutationError::EntryNotFound(_) | MutationError::IndexOutOfRange { .. }),
            ) => {
                warn_mutation(self.kind, mutation, &err);
                Ok(Applied::Noop)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Discard edits (`working := persisted`). Used by the leave guard.
    pub fn discard(&mut self) {
        self.inner.discard();
    }

    pub fn begin_save(&mut self) -> Result<SaveTicket<LayoutDocument>, SlotError> {
        self.inner.begin_save()
    }

    pub fn complete_save(
        &mut self,
        ticket: SaveTicket<LayoutDocument>,
        outcome: Result<LayoutDocument, StoreError>,
    ) -> Result<Completion, StoreError> {
        self.inner.complete_save(ticket, outcome)
    }

    /// Begin a reset. Destructive: callers must have confirmed with the
    /// user before getting here.
    pub fn begin_reset(&mut self) -> Result<ResetTicket, SlotError> {
        self.inner.begin_reset()
    }

    pub fn complete_reset(
        &mut self,
        ticket: ResetTicket,
        outcome: Result<LayoutDocument, StoreError>,
    ) -> Result<Completion, StoreError> {
        self.inner.complete_reset(ticket, outcome)
    }
}

fn warn_mutation(kind: PageKind, mutation: &Mutation, err: &MutationError) {
    tracing::warn!(page = %kind, ?mutation, %err, "mutation degraded to no-op");
}
