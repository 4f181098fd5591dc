//! End-to-end workspace scenarios against in-memory stores

use anyhow::Result;
use blockwork_document::{ComponentEntry, EntryId, LayoutDocument, ThemeDocument};
use blockwork_editor::{
    EntryPatch, LeaveCheck, LeaveResolution, Mutation, PageKind, PageStore, StoreError, ThemeStore,
    UnsavedWarning, Workspace,
};
use blockwork_render::{BuiltinCatalog, Registry};
use serde_json::json;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct InMemoryPageStore {
    inner: Arc<PageStoreInner>,
}

struct PageStoreInner {
    docs: Mutex<HashMap<PageKind, LayoutDocument>>,
    default_doc: LayoutDocument,
    fail_saves: AtomicBool,
}

impl InMemoryPageStore {
    fn new(seed: HashMap<PageKind, LayoutDocument>, default_doc: LayoutDocument) -> Self {
        Self {
            inner: Arc::new(PageStoreInner {
                docs: Mutex::new(seed),
                default_doc,
                fail_saves: AtomicBool::new(false),
            }),
        }
    }

    fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn stored(&self, kind: PageKind) -> Option<LayoutDocument> {
        self.inner.docs.lock().unwrap().get(&kind).cloned()
    }
}

impl PageStore for InMemoryPageStore {
    fn fetch(
        &self,
        kind: PageKind,
    ) -> impl Future<Output = Result<LayoutDocument, StoreError>> + Send {
        async move {
            Ok(self
                .inner
                .docs
                .lock()
                .unwrap()
                .get(&kind)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn save(
        &self,
        kind: PageKind,
        doc: &LayoutDocument,
    ) -> impl Future<Output = Result<LayoutDocument, StoreError>> + Send {
        let doc = doc.clone();
        async move {
            if self.inner.fail_saves.load(Ordering::SeqCst) {
                return Err(StoreError::Network("connection reset".to_string()));
            }
            self.inner.docs.lock().unwrap().insert(kind, doc.clone());
            Ok(doc)
        }
    }

    fn reset_to_default(
        &self,
        kind: PageKind,
    ) -> impl Future<Output = Result<LayoutDocument, StoreError>> + Send {
        async move {
            let default_doc = self.inner.default_doc.clone();
            self.inner
                .docs
                .lock()
                .unwrap()
                .insert(kind, default_doc.clone());
            Ok(default_doc)
        }
    }
}

#[derive(Clone)]
struct InMemoryThemeStore {
    theme: Arc<Mutex<ThemeDocument>>,
}

impl InMemoryThemeStore {
    fn new(theme: ThemeDocument) -> Self {
        Self {
            theme: Arc::new(Mutex::new(theme)),
        }
    }
}

impl ThemeStore for InMemoryThemeStore {
    fn fetch(&self) -> impl Future<Output = Result<ThemeDocument, StoreError>> + Send {
        async move { Ok(self.theme.lock().unwrap().clone()) }
    }

    fn save(
        &self,
        theme: &ThemeDocument,
    ) -> impl Future<Output = Result<ThemeDocument, StoreError>> + Send {
        let theme = theme.clone();
        async move {
            *self.theme.lock().unwrap() = theme.clone();
            Ok(theme)
        }
    }

    fn reset_to_default(&self) -> impl Future<Output = Result<ThemeDocument, StoreError>> + Send {
        async move {
            let default_theme = ThemeDocument::new().with("primaryColor", json!("#1d4ed8"));
            *self.theme.lock().unwrap() = default_theme.clone();
            Ok(default_theme)
        }
    }
}

fn entry(id: &str, type_id: &str) -> ComponentEntry {
    ComponentEntry::new(EntryId::new(id), type_id, "plain")
}

fn seeded_landing() -> LayoutDocument {
    LayoutDocument::from_entries(vec![
        entry("a", "hero").with_setting("headline", json!("A")),
        entry("b", "text-section"),
        entry("c", "footer"),
    ])
    .unwrap()
}

fn canonical_default() -> LayoutDocument {
    LayoutDocument::from_entries(vec![
        entry("default-hero", "hero"),
        entry("default-cta", "contact-cta"),
    ])
    .unwrap()
}

fn fixture() -> (Workspace<InMemoryPageStore, InMemoryThemeStore>, InMemoryPageStore) {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let registry = Registry::from_source(&BuiltinCatalog).unwrap();
    let mut seed = HashMap::new();
    seed.insert(PageKind::Landing, seeded_landing());
    let page_store = InMemoryPageStore::new(seed, canonical_default());
    let theme_store = InMemoryThemeStore::new(ThemeDocument::new());
    let workspace = Workspace::new(registry, page_store.clone(), theme_store);
    (workspace, page_store)
}

fn order(doc: &LayoutDocument) -> Vec<&str> {
    doc.entries().iter().map(|e| e.id.as_str()).collect()
}

#[tokio::test]
async fn move_then_reset_installs_canonical_default() -> Result<()> {
    let (mut ws, _) = fixture();
    ws.open_page(PageKind::Landing).await?;

    ws.apply(PageKind::Landing, &Mutation::MoveBlock { from: 2, to: 0 })?;
    let slot = ws.slot(PageKind::Landing).unwrap();
    assert_eq!(order(slot.working()), vec!["c", "a", "b"]);
    assert!(slot.is_dirty());

    ws.reset_page(PageKind::Landing).await?;
    let slot = ws.slot(PageKind::Landing).unwrap();
    // The canonical default, not the previously persisted [a, b, c].
    assert_eq!(slot.working(), &canonical_default());
    assert_eq!(slot.persisted(), &canonical_default());
    assert!(!slot.is_dirty());
    Ok(())
}

#[tokio::test]
async fn save_round_trips_through_the_store() -> Result<()> {
    let (mut ws, store) = fixture();
    ws.open_page(PageKind::Landing).await?;

    ws.apply(
        PageKind::Landing,
        &Mutation::InsertBlock {
            type_id: "contact-cta".to_string(),
            at: 1,
        },
    )?;
    let at_save_time = ws.slot(PageKind::Landing).unwrap().working().clone();

    ws.save_page(PageKind::Landing).await?;
    assert!(!ws.slot(PageKind::Landing).unwrap().is_dirty());
    assert_eq!(store.stored(PageKind::Landing).unwrap(), at_save_time);

    // A fresh fetch yields a structurally equal document.
    ws.open_page(PageKind::Landing).await?;
    assert_eq!(ws.slot(PageKind::Landing).unwrap().working(), &at_save_time);
    Ok(())
}

#[tokio::test]
async fn failed_save_keeps_edits_and_surfaces_retryable_error() -> Result<()> {
    let (mut ws, store) = fixture();
    ws.open_page(PageKind::Landing).await?;

    ws.apply(PageKind::Landing, &Mutation::MoveBlock { from: 0, to: 2 })?;
    let edited = ws.slot(PageKind::Landing).unwrap().working().clone();

    store.fail_saves(true);
    let err = ws.save_page(PageKind::Landing).await.unwrap_err();
    assert!(err.is_retryable());

    let slot = ws.slot(PageKind::Landing).unwrap();
    assert_eq!(slot.working(), &edited);
    assert!(slot.is_dirty());

    // Retry succeeds once the network is back.
    store.fail_saves(false);
    ws.save_page(PageKind::Landing).await?;
    assert!(!ws.slot(PageKind::Landing).unwrap().is_dirty());
    Ok(())
}

#[tokio::test]
async fn leave_guard_blocks_on_dirty_page_only() -> Result<()> {
    let (mut ws, _) = fixture();
    ws.open_page(PageKind::Landing).await?;
    ws.load_theme().await?;
    assert_eq!(ws.check_leave(), LeaveCheck::Proceed);

    ws.apply(PageKind::Landing, &Mutation::MoveBlock { from: 0, to: 1 })?;
    let check = ws.check_leave();
    assert_eq!(check, LeaveCheck::Blocked(UnsavedWarning::Page));
    match check {
        LeaveCheck::Blocked(warning) => {
            assert_eq!(warning.to_string(), "unsaved page changes");
        }
        LeaveCheck::Proceed => unreachable!(),
    }

    // Stay: nothing changes.
    let edited = ws.slot(PageKind::Landing).unwrap().working().clone();
    assert!(!ws.resolve_leave(LeaveResolution::Stay));
    assert_eq!(ws.slot(PageKind::Landing).unwrap().working(), &edited);
    assert!(ws.slot(PageKind::Landing).unwrap().is_dirty());

    // Discard-and-leave: working goes back to persisted.
    assert!(ws.resolve_leave(LeaveResolution::DiscardAndLeave));
    let slot = ws.slot(PageKind::Landing).unwrap();
    assert_eq!(slot.working(), slot.persisted());
    assert!(!slot.is_dirty());
    assert_eq!(ws.check_leave(), LeaveCheck::Proceed);
    Ok(())
}

#[tokio::test]
async fn leave_guard_combines_page_and_theme() -> Result<()> {
    let (mut ws, _) = fixture();
    ws.open_page(PageKind::Landing).await?;
    ws.load_theme().await?;

    ws.theme_mut().set("primaryColor", json!("#f00"))?;
    assert_eq!(ws.check_leave(), LeaveCheck::Blocked(UnsavedWarning::Theme));

    ws.apply(PageKind::Landing, &Mutation::MoveBlock { from: 0, to: 1 })?;
    match ws.check_leave() {
        LeaveCheck::Blocked(warning) => assert_eq!(
            warning.to_string(),
            "unsaved page changes and theme settings"
        ),
        LeaveCheck::Proceed => unreachable!(),
    }

    assert!(ws.resolve_leave(LeaveResolution::DiscardAndLeave));
    assert!(!ws.theme().is_dirty());
    assert_eq!(ws.check_leave(), LeaveCheck::Proceed);
    Ok(())
}

#[tokio::test]
async fn theme_saves_independently_of_pages() -> Result<()> {
    let (mut ws, _) = fixture();
    ws.open_page(PageKind::Landing).await?;
    ws.load_theme().await?;

    ws.apply(PageKind::Landing, &Mutation::MoveBlock { from: 0, to: 1 })?;
    ws.theme_mut().set("fontFamily", json!("Inter"))?;

    ws.save_theme().await?;
    assert!(!ws.theme().is_dirty());
    // The page's unsaved edits are untouched by a theme save.
    assert!(ws.slot(PageKind::Landing).unwrap().is_dirty());
    Ok(())
}

#[tokio::test]
async fn second_save_is_rejected_while_one_is_pending() -> Result<()> {
    let (mut ws, _) = fixture();
    ws.open_page(PageKind::Landing).await?;

    let slot = ws.slot_mut(PageKind::Landing)?;
    let ticket = slot.begin_save()?;
    assert!(slot.begin_save().is_err());

    let sent = ticket.sent.clone();
    slot.complete_save(ticket, Ok(sent))?;
    assert!(slot.begin_save().is_ok());
    Ok(())
}

#[tokio::test]
async fn stale_save_response_does_not_clobber_a_reopened_page() -> Result<()> {
    let (mut ws, _) = fixture();
    ws.open_page(PageKind::Landing).await?;

    ws.apply(PageKind::Landing, &Mutation::MoveBlock { from: 0, to: 2 })?;
    let ticket = ws.slot_mut(PageKind::Landing)?.begin_save()?;
    let sent = ticket.sent.clone();

    // The page is reopened (identity change) while the save is in flight.
    ws.open_page(PageKind::Landing).await?;
    let reloaded = ws.slot(PageKind::Landing).unwrap().working().clone();

    let completion = ws
        .slot_mut(PageKind::Landing)?
        .complete_save(ticket, Ok(sent))?;
    assert_eq!(completion, blockwork_editor::Completion::Stale);
    let slot = ws.slot(PageKind::Landing).unwrap();
    assert_eq!(slot.working(), &reloaded);
    assert_eq!(slot.persisted(), &reloaded);
    Ok(())
}

#[tokio::test]
async fn canvas_renders_working_document_with_working_theme() -> Result<()> {
    let (mut ws, _) = fixture();
    ws.open_page(PageKind::Landing).await?;
    ws.load_theme().await?;

    let tree = ws.render(PageKind::Landing).unwrap();
    assert_eq!(tree.nodes.len(), 3);

    // Field edits show up in the canvas before any save.
    let id = ws.slot(PageKind::Landing).unwrap().working().entries()[0]
        .id
        .clone();
    let mut patch = blockwork_document::Settings::new();
    patch.insert("headline".to_string(), json!("Edited live"));
    ws.apply(
        PageKind::Landing,
        &Mutation::UpdateBlock {
            id,
            patch: EntryPatch::settings(patch),
        },
    )?;

    let tree = ws.render(PageKind::Landing).unwrap();
    let rendered = serde_json::to_string(&tree)?;
    assert!(rendered.contains("Edited live"));
    Ok(())
}
