//! Error taxonomy for catalog operations.
//!
//! The `Display` form of each error is the diagnostic text that gets logged.
//! `user_message()` is the short sentence shown on the page.

use thiserror::Error;

/// Failure reported by a [`CatalogStore`](crate::backend::CatalogStore).
///
/// The core never interprets these beyond logging them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("store rejected request (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("malformed store response: {0}")]
    Decode(String),

    #[error("not signed in")]
    Unauthenticated,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

/// Failure of a catalog read or write.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("failed to load programs: {0}")]
    Load(StoreError),

    #[error("failed to write program: {0}")]
    Write(StoreError),

    #[error("failed to delete program: {0}")]
    Delete(StoreError),
}

impl CatalogError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::Load(_) => "Could not load programs. Please reload the page.",
            CatalogError::Write(_) => "Failed to publish program. Please try again later.",
            CatalogError::Delete(_) => "Delete failed. Check Firestore rules and try again.",
        }
    }
}

/// A required form field was empty after trimming.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("file URL is required")]
    MissingFileUrl,

    #[error("icon URL is required")]
    MissingIconUrl,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        "Please provide both file URL and icon URL."
    }
}

/// Failure reported by an [`IdentityProvider`](crate::backend::IdentityProvider).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("identity service error: {0}")]
    Transport(String),
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        "Failed to sign in. Please check your credentials."
    }
}

/// A dialog transition was requested from a state that does not allow it.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("another dialog is already open")]
    AlreadyOpen,

    #[error("no program with that id")]
    UnknownProgram,
}

/// An admin action was refused before reaching the store.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("admin action requires a signed-in identity")]
    NotSignedIn,

    #[error("a previous request for this action is still pending")]
    Busy,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Anything a user-triggered catalog action can fail with.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Dialog(#[from] DialogError),
}

impl ActionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ActionError::Session(SessionError::Validation(v)) => v.user_message(),
            ActionError::Session(SessionError::NotSignedIn) => "Please sign in first.",
            ActionError::Session(SessionError::Busy) => "Please wait for the previous request.",
            ActionError::Catalog(c) => c.user_message(),
            ActionError::Auth(a) => a.user_message(),
            ActionError::Dialog(_) => "Close the open dialog first.",
        }
    }
}
