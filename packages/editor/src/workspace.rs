//! # Workspace
//!
//! Owns every page slot, the theme state, the stores and the registry; the
//! single entry point a host UI drives.
//!
//! The async `save_*`/`reset_*`/`open_*` methods are thin drivers over the
//! slots' two-phase protocol: begin, perform store I/O, complete. Hosts
//! that interleave editing with in-flight requests (the normal UI case)
//! call the two-phase methods on [`PageSlot`] and [`ThemeState`] directly
//! and perform the I/O on their own scheduler; the slot machinery
//! guarantees stale responses are dropped either way.

use crate::{
    assess, Applied, EditorError, LeaveCheck, LeaveResolution, Mutation, PageKind, PageSlot,
    PageStore, ThemeState, ThemeStore,
};
use blockwork_render::{Registry, RenderTree, Renderer};
use std::collections::HashMap;
use tracing::debug;

pub struct Workspace<P, T> {
    registry: Registry,
    page_store: P,
    theme_store: T,
    slots: HashMap<PageKind, PageSlot>,
    theme: ThemeState,
}

impl<P: PageStore, T: ThemeStore> Workspace<P, T> {
    pub fn new(registry: Registry, page_store: P, theme_store: T) -> Self {
        Self {
            registry,
            page_store,
            theme_store,
            slots: HashMap::new(),
            theme: ThemeState::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn slot(&self, kind: PageKind) -> Option<&PageSlot> {
        self.slots.get(&kind)
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeState {
        &mut self.theme
    }

    /// Mutable slot access for hosts driving the two-phase save/reset
    /// protocol on their own scheduler.
    pub fn slot_mut(&mut self, kind: PageKind) -> Result<&mut PageSlot, EditorError> {
        self.slots
            .get_mut(&kind)
            .ok_or(EditorError::PageNotOpen(kind))
    }

    /// Open a page for editing: fetch its layout and install it. Re-opening
    /// an already-open page re-fetches; the generation bump makes any
    /// in-flight save for the old content stale. Callers are expected to
    /// have passed the leave guard first when switching away from a dirty
    /// page.
    pub async fn open_page(&mut self, kind: PageKind) -> Result<(), EditorError> {
        let doc = self.page_store.fetch(kind).await?;
        let slot = self.slots.entry(kind).or_insert_with(|| PageSlot::new(kind));
        slot.complete_load(doc);
        debug!(page = %kind, "page opened");
        Ok(())
    }

    /// Fetch and install the global theme.
    pub async fn load_theme(&mut self) -> Result<(), EditorError> {
        let theme = self.theme_store.fetch().await?;
        self.theme.complete_load(theme);
        Ok(())
    }

    /// Apply one mutation to a page's working document.
    pub fn apply(&mut self, kind: PageKind, mutation: &Mutation) -> Result<Applied, EditorError> {
        let registry = &self.registry;
        let slot = self
            .slots
            .get_mut(&kind)
            .ok_or(EditorError::PageNotOpen(kind))?;
        slot.apply(mutation, registry)
    }

    /// Render a page's working document with the working theme - the
    /// editor canvas view. `None` until the page is open.
    pub fn render(&self, kind: PageKind) -> Option<RenderTree> {
        let slot = self.slots.get(&kind)?;
        let theme = self.theme.working();
        Some(Renderer::new(&self.registry).render_document(slot.working(), theme))
    }

    pub async fn save_page(&mut self, kind: PageKind) -> Result<(), EditorError> {
        let ticket = self.slot_mut(kind)?.begin_save()?;
        let outcome = self.page_store.save(kind, &ticket.sent).await;
        self.slot_mut(kind)?.complete_save(ticket, outcome)?;
        Ok(())
    }

    /// Replace the page with the store's canonical default. Destructive:
    /// the host confirms with the user before calling.
    pub async fn reset_page(&mut self, kind: PageKind) -> Result<(), EditorError> {
        let ticket = self.slot_mut(kind)?.begin_reset()?;
        let outcome = self.page_store.reset_to_default(kind).await;
        self.slot_mut(kind)?.complete_reset(ticket, outcome)?;
        Ok(())
    }

    pub async fn save_theme(&mut self) -> Result<(), EditorError> {
        let ticket = self.theme.begin_save()?;
        let outcome = self.theme_store.save(&ticket.sent).await;
        self.theme.complete_save(ticket, outcome)?;
        Ok(())
    }

    pub async fn reset_theme(&mut self) -> Result<(), EditorError> {
        let ticket = self.theme.begin_reset()?;
        let outcome = self.theme_store.reset_to_default().await;
        self.theme.complete_reset(ticket, outcome)?;
        Ok(())
    }

    fn any_page_dirty(&self) -> bool {
        self.slots.values().any(PageSlot::is_dirty)
    }

    /// Consult the unsaved-changes coordinator before any leaving action
    /// (switching the edited page, opening the preview, signing out,
    /// closing the editor).
    pub fn check_leave(&self) -> LeaveCheck {
        match assess(self.any_page_dirty(), self.theme.is_dirty()) {
            None => LeaveCheck::Proceed,
            Some(warning) => LeaveCheck::Blocked(warning),
        }
    }

    /// Resolve a blocked leave. Returns whether the leave proceeds.
    /// Discarding is all-or-nothing: every dirty slot and the theme go back
    /// to their persisted state.
    pub fn resolve_leave(&mut self, resolution: LeaveResolution) -> bool {
        match resolution {
            LeaveResolution::Stay => false,
            LeaveResolution::DiscardAndLeave => {
                for slot in self.slots.values_mut() {
                    slot.discard();
                }
                self.theme.discard();
                true
            }
        }
    }
}
