//! Interfaces of the two hosted services the site talks to.
//!
//! Both run on a single-threaded event loop (the browser), so futures are
//! not required to be `Send`.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::{AuthError, StoreError};
use crate::types::{Identity, Program, ProgramFields};

/// Remote collection of program records.
#[async_trait(?Send)]
pub trait CatalogStore {
    /// Every record, newest first.
    async fn list_all(&self) -> Result<Vec<Program>, StoreError>;

    /// Create a record; the store assigns id and timestamps. Returns the new id.
    async fn insert(&self, fields: &ProgramFields) -> Result<String, StoreError>;

    /// Overwrite every editable field of `id` and refresh its update time.
    async fn replace(&self, id: &str, fields: &ProgramFields) -> Result<(), StoreError>;

    async fn remove(&self, id: &str) -> Result<(), StoreError>;
}

pub type IdentityHandler = Box<dyn FnMut(Option<Identity>)>;

/// Email/password sign-in with change notifications.
#[async_trait(?Send)]
pub trait IdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register `handler`. It runs once right away with the current identity
    /// and again on every change until the subscription is dropped.
    fn on_identity_change(&self, handler: IdentityHandler) -> Subscription;
}

/// Registration handle. Dropping it unregisters the handler.
#[must_use = "dropping a Subscription unregisters the handler"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the handler registered for the rest of the program.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Default)]
struct WatcherList {
    next_id: u64,
    handlers: Vec<(u64, IdentityHandler)>,
    notifying: bool,
    cancelled: Vec<u64>,
}

/// Handler registry shared by identity provider implementations.
#[derive(Clone, Default)]
pub struct IdentityWatchers {
    inner: Rc<RefCell<WatcherList>>,
}

impl IdentityWatchers {
    pub fn subscribe(&self, mut handler: IdentityHandler, current: Option<Identity>) -> Subscription {
        handler(current);

        let id = {
            let mut list = self.inner.borrow_mut();
            list.next_id += 1;
            let id = list.next_id;
            list.handlers.push((id, handler));
            id
        };

        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                let mut list = inner.borrow_mut();
                list.handlers.retain(|(h, _)| *h != id);
                if list.notifying {
                    list.cancelled.push(id);
                }
            }
        })
    }

    pub fn notify(&self, identity: Option<Identity>) {
        // Handlers run without the list borrowed so they may subscribe or unsubscribe.
        let mut running = {
            let mut list = self.inner.borrow_mut();
            list.notifying = true;
            std::mem::take(&mut list.handlers)
        };
        for (_, handler) in running.iter_mut() {
            handler(identity.clone());
        }
        let mut list = self.inner.borrow_mut();
        list.notifying = false;
        let cancelled = std::mem::take(&mut list.cancelled);
        running.retain(|(id, _)| !cancelled.contains(id));
        let added = std::mem::take(&mut list.handlers);
        list.handlers = running;
        list.handlers.extend(added);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
