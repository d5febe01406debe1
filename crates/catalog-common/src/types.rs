use serde::{Deserialize, Serialize};

/// Server-assigned timestamp. Opaque to the client: only the store orders by it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Timestamp(pub String);

/// A single downloadable program in the catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub title: String,
    pub description: String,
    pub platform: String,
    #[serde(default)]
    pub version: Option<String>,
    pub file_url: String,
    pub icon_url: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Program {
    /// Version string when present and non-empty.
    pub fn display_version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }
}

/// The user-editable fields of a program, as written on create and update.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramFields {
    pub title: String,
    pub description: String,
    pub platform: String,
    /// Empty when the admin left the version blank.
    pub version: String,
    pub file_url: String,
    pub icon_url: String,
}

impl ProgramFields {
    pub fn from_program(program: &Program) -> Self {
        Self {
            title: program.title.clone(),
            description: program.description.clone(),
            platform: program.platform.clone(),
            version: program.version.clone().unwrap_or_default(),
            file_url: program.file_url.clone(),
            icon_url: program.icon_url.clone(),
        }
    }
}

/// Snapshot of the signed-in admin.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
