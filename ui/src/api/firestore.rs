use std::rc::Rc;

use async_trait::async_trait;
use catalog_common::backend::CatalogStore;
use catalog_common::error::StoreError;
use catalog_common::types::{Program, ProgramFields};
use catalog_common::wire::error_message;
use catalog_common::wire::firestore::{self, CollectionPath};
use serde_json::Value;

use super::auth::FirebaseAuth;
use super::http::{self, HttpResponse};

/// Program collection in a hosted Firestore database, over its REST API.
pub struct FirestoreStore {
    path: CollectionPath,
    auth: Rc<FirebaseAuth>,
}

impl FirestoreStore {
    pub fn new(path: CollectionPath, auth: Rc<FirebaseAuth>) -> Self {
        Self { path, auth }
    }

    async fn call(&self, method: &str, url: &str, body: Option<&Value>) -> Result<String, StoreError> {
        let token = self.auth.id_token();
        let resp = http::send(method, url, body, token.as_deref())
            .await
            .map_err(|e| StoreError::Transport(http::describe(&e)))?;
        check(resp)
    }

    async fn commit(&self, body: &Value) -> Result<(), StoreError> {
        if self.auth.id_token().is_none() {
            return Err(StoreError::Unauthenticated);
        }
        self.call("POST", &self.path.commit_url(), Some(body)).await?;
        Ok(())
    }
}

fn check(resp: HttpResponse) -> Result<String, StoreError> {
    if resp.ok() {
        Ok(resp.body)
    } else {
        Err(StoreError::Status {
            status: resp.status,
            message: error_message(&resp.body),
        })
    }
}

#[async_trait(?Send)]
impl CatalogStore for FirestoreStore {
    async fn list_all(&self) -> Result<Vec<Program>, StoreError> {
        let query = firestore::list_query(&self.path);
        let body = self
            .call("POST", &self.path.run_query_url(), Some(&query))
            .await?;
        firestore::decode_query_response(&body)
    }

    async fn insert(&self, fields: &ProgramFields) -> Result<String, StoreError> {
        let id = firestore::auto_id(&mut rand::thread_rng());
        self.commit(&firestore::insert_commit(&self.path, &id, fields))
            .await?;
        Ok(id)
    }

    async fn replace(&self, id: &str, fields: &ProgramFields) -> Result<(), StoreError> {
        self.commit(&firestore::replace_commit(&self.path, id, fields))
            .await
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        if self.auth.id_token().is_none() {
            return Err(StoreError::Unauthenticated);
        }
        // Uploaded files are not removed; only the catalog entry goes away.
        self.call("DELETE", &self.path.document_url(id), None).await?;
        Ok(())
    }
}
