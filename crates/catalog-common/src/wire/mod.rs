//! JSON wire formats of the hosted document store and identity service.
//!
//! Only request bodies, URLs and response decoding live here; the HTTP calls
//! themselves are made by the web front end.

pub mod auth;
pub mod firestore;

use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// `error.message` of a Google API error response, or the raw body.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
