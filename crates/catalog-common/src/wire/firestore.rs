use std::collections::BTreeMap;

use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::StoreError;
use crate::types::{Program, ProgramFields, Timestamp};

const API_BASE: &str = "https://firestore.googleapis.com/v1";
const AUTO_ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const AUTO_ID_LEN: usize = 20;

const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";
const EDITABLE_FIELDS: [&str; 6] = [
    "title",
    "description",
    "platform",
    "version",
    "fileUrl",
    "iconUrl",
];

/// Location of the program collection in a project's default database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionPath {
    pub project_id: String,
    pub collection: String,
}

impl CollectionPath {
    pub fn new(project_id: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection: collection.into(),
        }
    }

    /// Resource name of the database's document root.
    pub fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    pub fn document_name(&self, id: &str) -> String {
        format!("{}/{}/{}", self.documents_root(), self.collection, id)
    }

    pub fn run_query_url(&self) -> String {
        format!("{}/{}:runQuery", API_BASE, self.documents_root())
    }

    pub fn commit_url(&self) -> String {
        format!("{}/{}:commit", API_BASE, self.documents_root())
    }

    pub fn document_url(&self, id: &str) -> String {
        format!("{}/{}", API_BASE, self.document_name(id))
    }
}

/// Client-side document id in the same alphabet and length the official SDKs use.
pub fn auto_id<R: Rng>(rng: &mut R) -> String {
    (0..AUTO_ID_LEN)
        .map(|_| AUTO_ID_CHARS[rng.gen_range(0..AUTO_ID_CHARS.len())] as char)
        .collect()
}

/// Query for the whole collection, newest first.
pub fn list_query(path: &CollectionPath) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": path.collection }],
            "orderBy": [{
                "field": { "fieldPath": CREATED_AT },
                "direction": "DESCENDING"
            }]
        }
    })
}

fn encode_fields(fields: &ProgramFields) -> Value {
    json!({
        "title": { "stringValue": fields.title },
        "description": { "stringValue": fields.description },
        "platform": { "stringValue": fields.platform },
        "version": { "stringValue": fields.version },
        "fileUrl": { "stringValue": fields.file_url },
        "iconUrl": { "stringValue": fields.icon_url },
    })
}

fn server_time(field: &str) -> Value {
    json!({ "fieldPath": field, "setToServerValue": "REQUEST_TIME" })
}

/// Commit that creates document `id` with both timestamps set by the server.
pub fn insert_commit(path: &CollectionPath, id: &str, fields: &ProgramFields) -> Value {
    json!({
        "writes": [{
            "update": {
                "name": path.document_name(id),
                "fields": encode_fields(fields)
            },
            "currentDocument": { "exists": false },
            "updateTransforms": [server_time(CREATED_AT), server_time(UPDATED_AT)]
        }]
    })
}

/// Commit that overwrites the editable fields of an existing document and
/// refreshes its update time.
pub fn replace_commit(path: &CollectionPath, id: &str, fields: &ProgramFields) -> Value {
    json!({
        "writes": [{
            "update": {
                "name": path.document_name(id),
                "fields": encode_fields(fields)
            },
            "updateMask": { "fieldPaths": EDITABLE_FIELDS },
            "currentDocument": { "exists": true },
            "updateTransforms": [server_time(UPDATED_AT)]
        }]
    })
}

#[derive(Deserialize)]
struct QueryRow {
    document: Option<Document>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, Value>,
    create_time: Option<String>,
    update_time: Option<String>,
}

fn string_field(fields: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

fn timestamp_field(fields: &BTreeMap<String, Value>, key: &str) -> Option<Timestamp> {
    fields
        .get(key)?
        .get("timestampValue")?
        .as_str()
        .map(|t| Timestamp(t.to_string()))
}

fn decode_document(doc: Document) -> Result<Program, StoreError> {
    let id = doc
        .name
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StoreError::Decode(format!("bad document name {}", doc.name)))?
        .to_string();

    let required = |key: &str| {
        string_field(&doc.fields, key)
            .ok_or_else(|| StoreError::Decode(format!("document {id} lacks {key}")))
    };

    Ok(Program {
        title: required("title")?,
        description: required("description")?,
        platform: required("platform")?,
        version: string_field(&doc.fields, "version"),
        file_url: required("fileUrl")?,
        icon_url: required("iconUrl")?,
        created_at: timestamp_field(&doc.fields, CREATED_AT)
            .or_else(|| doc.create_time.clone().map(Timestamp)),
        updated_at: timestamp_field(&doc.fields, UPDATED_AT)
            .or_else(|| doc.update_time.clone().map(Timestamp)),
        id,
    })
}

/// Decode a `runQuery` response, keeping the store's order.
///
/// Documents missing a required field are skipped with a warning.
pub fn decode_query_response(body: &str) -> Result<Vec<Program>, StoreError> {
    let rows: Vec<QueryRow> = serde_json::from_str(body)?;
    let programs = rows
        .into_iter()
        .filter_map(|row| row.document)
        .filter_map(|doc| match decode_document(doc) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!("Skipping malformed program: {}", e);
                None
            }
        })
        .collect();
    Ok(programs)
}
