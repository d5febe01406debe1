//! In-process backend used when no hosted project is configured, and in tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::backend::{CatalogStore, IdentityProvider, IdentityWatchers, Subscription};
use crate::error::{AuthError, StoreError};
use crate::types::{Identity, Program, ProgramFields, Timestamp};

/// Number of calls each store operation received.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list: usize,
    pub insert: usize,
    pub replace: usize,
    pub remove: usize,
}

impl CallCounts {
    pub fn writes(&self) -> usize {
        self.insert + self.replace + self.remove
    }

    pub fn total(&self) -> usize {
        self.list + self.writes()
    }
}

#[derive(Default)]
struct MemoryInner {
    /// Insertion order, oldest first.
    records: Vec<Program>,
    next_id: u64,
    clock: u64,
    calls: CallCounts,
}

impl MemoryInner {
    fn tick(&mut self) -> Timestamp {
        self.clock += 1;
        Timestamp(format!("{:020}", self.clock))
    }
}

/// Program collection held in memory, ordered like the hosted store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RefCell<MemoryInner>,
    offline: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `seed`, oldest first.
    pub fn with_programs(seed: impl IntoIterator<Item = ProgramFields>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.borrow_mut();
            for fields in seed {
                let program = new_record(&mut inner, &fields);
                inner.records.push(program);
            }
        }
        store
    }

    /// Make every call fail with a transport error until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn calls(&self) -> CallCounts {
        self.inner.borrow().calls
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.get() {
            Err(StoreError::Transport("store unreachable".into()))
        } else {
            Ok(())
        }
    }
}

fn new_record(inner: &mut MemoryInner, fields: &ProgramFields) -> Program {
    inner.next_id += 1;
    let id = format!("mem-{}", inner.next_id);
    let now = inner.tick();
    Program {
        id,
        title: fields.title.clone(),
        description: fields.description.clone(),
        platform: fields.platform.clone(),
        version: Some(fields.version.clone()),
        file_url: fields.file_url.clone(),
        icon_url: fields.icon_url.clone(),
        created_at: Some(now.clone()),
        updated_at: Some(now),
    }
}

#[async_trait(?Send)]
impl CatalogStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Program>, StoreError> {
        self.inner.borrow_mut().calls.list += 1;
        self.check_online()?;
        let inner = self.inner.borrow();
        Ok(inner.records.iter().rev().cloned().collect())
    }

    async fn insert(&self, fields: &ProgramFields) -> Result<String, StoreError> {
        self.inner.borrow_mut().calls.insert += 1;
        self.check_online()?;
        let mut inner = self.inner.borrow_mut();
        let program = new_record(&mut inner, fields);
        let id = program.id.clone();
        inner.records.push(program);
        Ok(id)
    }

    async fn replace(&self, id: &str, fields: &ProgramFields) -> Result<(), StoreError> {
        self.inner.borrow_mut().calls.replace += 1;
        self.check_online()?;
        let mut inner = self.inner.borrow_mut();
        let now = inner.tick();
        let Some(record) = inner.records.iter_mut().find(|p| p.id == id) else {
            return Err(StoreError::Status {
                status: 404,
                message: format!("no document {id}"),
            });
        };
        record.title = fields.title.clone();
        record.description = fields.description.clone();
        record.platform = fields.platform.clone();
        record.version = Some(fields.version.clone());
        record.file_url = fields.file_url.clone();
        record.icon_url = fields.icon_url.clone();
        record.updated_at = Some(now);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().calls.remove += 1;
        self.check_online()?;
        self.inner.borrow_mut().records.retain(|p| p.id != id);
        Ok(())
    }
}

/// Identity provider with a fixed set of email/password accounts.
#[derive(Default)]
pub struct MemoryIdentity {
    accounts: Vec<(String, String)>,
    current: RefCell<Option<Identity>>,
    watchers: IdentityWatchers,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts.push((email.to_string(), password.to_string()));
        self
    }

    pub fn current(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    fn set_current(&self, identity: Option<Identity>) {
        *self.current.borrow_mut() = identity.clone();
        self.watchers.notify(identity);
    }
}

#[async_trait(?Send)]
impl IdentityProvider for MemoryIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let known = self
            .accounts
            .iter()
            .any(|(e, p)| e.eq_ignore_ascii_case(email) && p == password);
        if !known {
            return Err(AuthError::InvalidCredentials);
        }
        let identity = Identity::new(email.to_ascii_lowercase());
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_current(None);
        Ok(())
    }

    fn on_identity_change(&self, handler: crate::backend::IdentityHandler) -> Subscription {
        self.watchers.subscribe(handler, self.current())
    }
}
