use std::cell::RefCell;

use async_trait::async_trait;
use catalog_common::backend::{IdentityHandler, IdentityProvider, IdentityWatchers, Subscription};
use catalog_common::error::AuthError;
use catalog_common::types::Identity;
use catalog_common::wire::auth::{self, StoredSession};

use super::http;
use crate::browser::{local_storage, now_ms};

const STORAGE_KEY: &str = "catalog_admin_session";

/// Email/password sign-in against the hosted identity service.
///
/// The session survives reloads in localStorage until its token expires.
pub struct FirebaseAuth {
    api_key: String,
    session: RefCell<Option<StoredSession>>,
    watchers: IdentityWatchers,
}

impl FirebaseAuth {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            session: RefCell::new(load_session()),
            watchers: IdentityWatchers::default(),
        }
    }

    /// Bearer token of a live session.
    pub fn id_token(&self) -> Option<String> {
        self.live_session().map(|s| s.id_token)
    }

    fn live_session(&self) -> Option<StoredSession> {
        let session = self.session.borrow().clone()?;
        if session.is_expired(now_ms()) {
            tracing::info!("Admin session expired");
            self.set_session(None);
            return None;
        }
        Some(session)
    }

    fn set_session(&self, session: Option<StoredSession>) {
        let identity = session.as_ref().map(StoredSession::identity);
        save_session(session.as_ref());
        *self.session.borrow_mut() = session;
        self.watchers.notify(identity);
    }
}

fn load_session() -> Option<StoredSession> {
    let storage = local_storage()?;
    let json = storage.get_item(STORAGE_KEY).ok().flatten()?;
    match serde_json::from_str::<StoredSession>(&json) {
        Ok(s) if !s.is_expired(now_ms()) => Some(s),
        _ => {
            let _ = storage.remove_item(STORAGE_KEY);
            None
        }
    }
}

fn save_session(session: Option<&StoredSession>) {
    let Some(storage) = local_storage() else {
        return;
    };
    match session.map(serde_json::to_string) {
        Some(Ok(json)) => {
            let _ = storage.set_item(STORAGE_KEY, &json);
        }
        Some(Err(e)) => tracing::error!("Failed to persist session: {}", e),
        None => {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let body = auth::sign_in_body(email, password);
        let resp = http::send("POST", &auth::sign_in_url(&self.api_key), Some(&body), None)
            .await
            .map_err(|e| AuthError::Transport(http::describe(&e)))?;
        if !resp.ok() {
            return Err(auth::decode_sign_in_error(&resp.body));
        }
        let session = auth::decode_sign_in(&resp.body, now_ms())?;
        let identity = session.identity();
        self.set_session(Some(session));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_session(None);
        Ok(())
    }

    fn on_identity_change(&self, handler: IdentityHandler) -> Subscription {
        let current = self.live_session().map(|s| s.identity());
        self.watchers.subscribe(handler, current)
    }
}
