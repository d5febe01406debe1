mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use catalog_common::backend::{CatalogStore, IdentityProvider};
use catalog_common::dialog::{DialogEffect, DialogKind};
use catalog_common::error::{ActionError, CatalogError, SessionError, StoreError, ValidationError};
use catalog_common::memory::{MemoryIdentity, MemoryStore};
use catalog_common::session::{AdminView, FormStatus};
use catalog_common::state::{AppState, StateCell};
use catalog_common::sync;
use catalog_common::types::{Identity, Program, ProgramFields};
use futures::channel::oneshot;
use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;

fn seeded() -> MemoryStore {
    MemoryStore::with_programs(["Burp Suite", "Wireshark", "Nmap"].map(fixtures::fields))
}

fn signed_in_cell() -> RefCell<AppState> {
    let cell = RefCell::new(AppState::default());
    cell.update(|s| s.apply_identity(Some(Identity::new("admin@example.com"))));
    cell
}

fn fill_form(cell: &RefCell<AppState>, title: &str) {
    let f = fixtures::fields(title);
    cell.update(|s| {
        s.session.form.title = f.title;
        s.session.form.description = f.description;
        s.session.form.platform = f.platform;
        s.session.form.file_url = f.file_url;
        s.session.form.icon_url = f.icon_url;
    });
}

fn titles(cell: &RefCell<AppState>) -> Vec<String> {
    cell.read(|s| s.catalog.programs().iter().map(|p| p.title.clone()).collect())
}

#[test]
fn bootstrap_loads_newest_first() {
    let store = seeded();
    let cell = RefCell::new(AppState::default());
    let effects = block_on(sync::bootstrap(&cell, &store, None));
    assert!(effects.is_empty());
    assert_eq!(titles(&cell), vec!["Nmap", "Wireshark", "Burp Suite"]);
}

#[test]
fn bootstrap_with_load_error_starts_empty() {
    let store = seeded();
    store.set_offline(true);
    let cell = RefCell::new(AppState::default());
    let effects = block_on(sync::bootstrap(&cell, &store, Some("mem-1")));
    assert!(effects.is_empty());
    assert!(cell.read(|s| s.catalog.is_empty()));
}

#[test]
fn bootstrap_opens_deep_linked_program() {
    let store = seeded();
    let cell = RefCell::new(AppState::default());
    let effects = block_on(sync::bootstrap(&cell, &store, Some("mem-2")));
    assert_eq!(
        effects,
        vec![
            DialogEffect::ScrollIntoView("mem-2".into()),
            DialogEffect::SetProgramParam("mem-2".into()),
        ]
    );
    assert_eq!(
        cell.read(|s| s.detail_program().map(|p| p.title.clone())),
        Some("Wireshark".into())
    );
}

#[test]
fn create_reloads_full_list() {
    let store = seeded();
    let cell = signed_in_cell();
    block_on(sync::refresh(&cell, &store)).unwrap();
    fill_form(&cell, "Ghidra");

    block_on(sync::submit_program_form(&cell, &store)).unwrap();

    let calls = store.calls();
    assert_eq!(calls.insert, 1);
    assert_eq!(calls.list, 2);
    assert_eq!(titles(&cell), vec!["Ghidra", "Nmap", "Wireshark", "Burp Suite"]);

    // Mirror equals exactly one fresh fetch.
    let fresh = block_on(store.list_all()).unwrap();
    assert_eq!(cell.read(|s| s.catalog.programs().to_vec()), fresh);
    cell.read(|s| {
        assert_eq!(s.session.status(), &FormStatus::Published);
        assert!(s.session.form.is_empty());
    });
}

#[test]
fn edit_submit_updates_in_place() {
    let store = seeded();
    let cell = signed_in_cell();
    block_on(sync::refresh(&cell, &store)).unwrap();

    cell.update(|s| s.edit_program("mem-3"));
    cell.update(|s| s.session.form.title = "Nmap 8".into());
    block_on(sync::submit_program_form(&cell, &store)).unwrap();

    assert_eq!(store.calls().replace, 1);
    assert_eq!(store.calls().insert, 0);
    assert_eq!(titles(&cell), vec!["Nmap 8", "Wireshark", "Burp Suite"]);
    cell.read(|s| {
        assert_eq!(s.session.editing_program_id(), None);
        let updated = s.catalog.get("mem-3").unwrap();
        assert_ne!(updated.created_at, updated.updated_at);
    });
}

#[test]
fn empty_file_url_makes_no_remote_calls() {
    let store = seeded();
    let cell = signed_in_cell();
    fill_form(&cell, "Ghidra");
    cell.update(|s| s.session.form.file_url.clear());

    let err = block_on(sync::submit_program_form(&cell, &store)).unwrap_err();
    assert_eq!(
        err,
        ActionError::Session(SessionError::Validation(ValidationError::MissingFileUrl))
    );
    assert_eq!(store.calls().total(), 0);
}

#[test]
fn failed_write_leaves_mirror_untouched() {
    let store = seeded();
    let cell = signed_in_cell();
    block_on(sync::refresh(&cell, &store)).unwrap();
    let before = cell.read(|s| s.catalog.programs().to_vec());

    store.set_offline(true);
    fill_form(&cell, "Ghidra");
    let err = block_on(sync::submit_program_form(&cell, &store)).unwrap_err();

    assert!(matches!(err, ActionError::Catalog(CatalogError::Write(_))));
    assert_eq!(store.calls().list, 1);
    assert_eq!(cell.read(|s| s.catalog.programs().to_vec()), before);
    assert!(cell.read(|s| matches!(s.session.status(), FormStatus::Error(_))));
}

#[test]
fn delete_removes_record_from_every_query() {
    let store = seeded();
    let cell = signed_in_cell();
    block_on(sync::refresh(&cell, &store)).unwrap();

    block_on(sync::delete_program(&cell, &store, "mem-3")).unwrap();

    assert_eq!(store.calls().remove, 1);
    for query in ["", "nmap", "NMAP", "map", "linux"] {
        cell.update(|s| s.set_search_query(query));
        assert!(cell.read(|s| s.visible_programs().iter().all(|p| p.id != "mem-3")));
    }
    assert!(!cell.read(|s| s.session.is_deleting("mem-3")));
}

#[test]
fn failed_delete_keeps_record() {
    let store = seeded();
    let cell = signed_in_cell();
    block_on(sync::refresh(&cell, &store)).unwrap();
    store.set_offline(true);

    let err = block_on(sync::delete_program(&cell, &store, "mem-3")).unwrap_err();
    assert!(matches!(err, ActionError::Catalog(CatalogError::Delete(_))));
    assert!(cell.read(|s| s.catalog.get("mem-3").is_some()));
    assert!(!cell.read(|s| s.session.is_deleting("mem-3")));
}

#[test]
fn failed_delete_keeps_edit_in_progress() {
    let store = seeded();
    let cell = signed_in_cell();
    block_on(sync::refresh(&cell, &store)).unwrap();
    cell.update(|s| s.edit_program("mem-3"));
    cell.update(|s| s.session.form.title = "Nmap 8 beta".into());
    store.set_offline(true);

    let err = block_on(sync::delete_program(&cell, &store, "mem-3")).unwrap_err();

    assert!(matches!(err, ActionError::Catalog(CatalogError::Delete(_))));
    cell.read(|s| {
        assert_eq!(s.session.editing_program_id(), Some("mem-3"));
        assert_eq!(s.session.form.title, "Nmap 8 beta");
        assert!(!s.session.is_deleting("mem-3"));
    });
}

#[test]
fn delete_of_edited_record_returns_to_create_mode() {
    let store = seeded();
    let cell = signed_in_cell();
    block_on(sync::refresh(&cell, &store)).unwrap();
    cell.update(|s| s.edit_program("mem-3"));

    block_on(sync::delete_program(&cell, &store, "mem-3")).unwrap();

    cell.read(|s| {
        assert_eq!(s.session.editing_program_id(), None);
        assert!(s.session.form.is_empty());
    });
}

#[test]
fn sign_in_flows_through_subscription() {
    let provider = MemoryIdentity::new().with_account("admin@example.com", "hunter2");
    let cell = Rc::new(RefCell::new(AppState::default()));
    sync::watch_identity(cell.clone(), &provider).detach();

    cell.update(|s| s.open_admin()).unwrap();
    assert_eq!(cell.read(|s| s.session.view()), AdminView::Login);

    cell.update(|s| {
        s.session.login.email = "admin@example.com".into();
        s.session.login.password = "hunter2".into();
    });
    block_on(sync::sign_in(&cell, &provider)).unwrap();
    assert_eq!(
        cell.read(|s| s.session.view()),
        AdminView::Manage {
            email: "admin@example.com".into()
        }
    );

    block_on(sync::sign_out(&cell, &provider)).unwrap();
    assert_eq!(cell.read(|s| s.session.view()), AdminView::Login);
}

#[test]
fn bad_credentials_leave_session_unchanged() {
    let provider = MemoryIdentity::new().with_account("admin@example.com", "hunter2");
    let cell = Rc::new(RefCell::new(AppState::default()));
    sync::watch_identity(cell.clone(), &provider).detach();
    cell.update(|s| {
        s.session.login.email = "admin@example.com".into();
        s.session.login.password = "wrong".into();
    });

    let err = block_on(sync::sign_in(&cell, &provider)).unwrap_err();
    assert!(matches!(err, ActionError::Auth(_)));
    assert!(cell.read(|s| s.session.identity().is_none()));
    assert!(cell.read(|s| s.session.login.error.is_some()));
}

#[test]
fn identity_lost_while_admin_open_renders_login() {
    let provider = MemoryIdentity::new().with_account("admin@example.com", "pw");
    block_on(provider.sign_in("admin@example.com", "pw")).unwrap();
    let cell = Rc::new(RefCell::new(AppState::default()));
    sync::watch_identity(cell.clone(), &provider).detach();
    cell.update(|s| s.open_admin()).unwrap();
    assert!(matches!(
        catalog_common::view::admin_body(&cell.borrow()),
        Some(AdminView::Manage { .. })
    ));

    block_on(provider.sign_out()).unwrap();
    assert_eq!(
        catalog_common::view::admin_body(&cell.borrow()),
        Some(AdminView::Login)
    );
    assert!(cell.read(|s| s.dialog.is_open(DialogKind::Admin)));
}

/// Store whose inserts wait until the test releases them.
struct GatedStore {
    inner: MemoryStore,
    gates: RefCell<Vec<oneshot::Receiver<()>>>,
}

impl GatedStore {
    fn new() -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let store = GatedStore {
            inner: MemoryStore::new(),
            gates: RefCell::new(vec![rx]),
        };
        (store, tx)
    }
}

#[async_trait(?Send)]
impl CatalogStore for GatedStore {
    async fn list_all(&self) -> Result<Vec<Program>, StoreError> {
        self.inner.list_all().await
    }

    async fn insert(&self, fields: &ProgramFields) -> Result<String, StoreError> {
        let gate = self.gates.borrow_mut().pop();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.insert(fields).await
    }

    async fn replace(&self, id: &str, fields: &ProgramFields) -> Result<(), StoreError> {
        self.inner.replace(id, fields).await
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.inner.remove(id).await
    }
}

#[test]
fn double_submit_issues_one_insert() {
    let (store, release) = GatedStore::new();
    let store = Rc::new(store);
    let cell = Rc::new(signed_in_cell());
    fill_form(&cell, "Ghidra");

    let mut pool = LocalPool::new();
    let first = {
        let cell = cell.clone();
        let store = store.clone();
        pool.spawner()
            .spawn_local_with_handle(async move {
                sync::submit_program_form(&cell, &*store).await
            })
            .unwrap()
    };
    pool.run_until_stalled();
    assert!(cell.read(|s| s.session.is_submitting()));

    let second = pool.run_until(sync::submit_program_form(&cell, &*store));
    assert_eq!(second, Err(ActionError::Session(SessionError::Busy)));

    release.send(()).unwrap();
    pool.run_until(first).unwrap();
    assert_eq!(store.inner.calls().insert, 1);
    assert_eq!(cell.read(|s| s.catalog.len()), 1);
}
