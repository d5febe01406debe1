//! Signed-in admin, the create/edit form, and the re-entrancy guards for admin actions.

use std::collections::BTreeSet;

use crate::error::{AuthError, CatalogError, SessionError, ValidationError};
use crate::types::{Identity, Program, ProgramFields};

/// Raw text of the create/edit form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramForm {
    pub title: String,
    pub description: String,
    pub platform: String,
    pub version: String,
    pub file_url: String,
    pub icon_url: String,
}

impl ProgramForm {
    pub fn from_program(program: &Program) -> Self {
        let fields = ProgramFields::from_program(program);
        Self {
            title: fields.title,
            description: fields.description,
            platform: fields.platform,
            version: fields.version,
            file_url: fields.file_url,
            icon_url: fields.icon_url,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Trimmed field values, or the first missing required URL.
    pub fn to_fields(&self) -> Result<ProgramFields, ValidationError> {
        let file_url = self.file_url.trim();
        if file_url.is_empty() {
            return Err(ValidationError::MissingFileUrl);
        }
        let icon_url = self.icon_url.trim();
        if icon_url.is_empty() {
            return Err(ValidationError::MissingIconUrl);
        }
        Ok(ProgramFields {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            platform: self.platform.trim().to_string(),
            version: self.version.trim().to_string(),
            file_url: file_url.to_string(),
            icon_url: icon_url.to_string(),
        })
    }
}

/// Feedback line under the program form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Error(String),
    Published,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pending: bool,
}

impl LoginForm {
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// What the admin dialog body should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminView {
    Login,
    Manage { email: String },
}

/// A validated form submission, ready for the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitPlan {
    /// `Some` updates that record, `None` creates a new one.
    pub target: Option<String>,
    pub fields: ProgramFields,
}

#[derive(Clone, Debug, Default)]
pub struct AdminSession {
    identity: Option<Identity>,
    editing: Option<String>,
    pub form: ProgramForm,
    status: FormStatus,
    submitting: bool,
    pending_deletes: BTreeSet<String>,
    pub login: LoginForm,
}

impl AdminSession {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn editing_program_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.pending_deletes.contains(id)
    }

    pub fn view(&self) -> AdminView {
        match &self.identity {
            Some(identity) => AdminView::Manage {
                email: identity.email.clone(),
            },
            None => AdminView::Login,
        }
    }

    /// Record a notification from the identity provider.
    ///
    /// When the admin dialog is open its body is rebuilt, which drops any
    /// half-finished edit.
    pub fn on_identity_change(&mut self, identity: Option<Identity>, admin_open: bool) {
        match &identity {
            Some(i) => tracing::info!("Signed in as {}", i.email),
            None => tracing::info!("No signed-in identity"),
        }
        self.identity = identity;
        if admin_open {
            self.reset_admin_body();
        }
    }

    /// The admin dialog was just opened: start from a fresh create form.
    pub fn on_admin_opened(&mut self) {
        self.reset_admin_body();
    }

    /// Bind the form to `program`, or return to create mode with `None`.
    pub fn enter_edit_mode(&mut self, program: Option<&Program>) {
        match program {
            Some(p) => {
                self.editing = Some(p.id.clone());
                self.form = ProgramForm::from_program(p);
            }
            None => {
                self.editing = None;
                self.form = ProgramForm::default();
            }
        }
        self.status = FormStatus::Idle;
    }

    /// Validate the form and mark a submit as in flight.
    pub fn begin_submit(&mut self) -> Result<SubmitPlan, SessionError> {
        if self.identity.is_none() {
            return Err(SessionError::NotSignedIn);
        }
        if self.submitting {
            return Err(SessionError::Busy);
        }
        let fields = match self.form.to_fields() {
            Ok(fields) => fields,
            Err(e) => {
                self.status = FormStatus::Error(e.user_message().to_string());
                return Err(e.into());
            }
        };
        self.submitting = true;
        self.status = FormStatus::Idle;
        Ok(SubmitPlan {
            target: self.editing.clone(),
            fields,
        })
    }

    /// Record the outcome of the write started by `begin_submit`.
    ///
    /// A reload failure after a successful write still counts as published.
    pub fn finish_submit(&mut self, outcome: &Result<(), CatalogError>) {
        self.submitting = false;
        match outcome {
            Ok(()) | Err(CatalogError::Load(_)) => {
                self.editing = None;
                self.form = ProgramForm::default();
                self.status = FormStatus::Published;
            }
            Err(e) => {
                self.status = FormStatus::Error(e.user_message().to_string());
            }
        }
    }

    pub fn begin_delete(&mut self, id: &str) -> Result<(), SessionError> {
        if self.identity.is_none() {
            return Err(SessionError::NotSignedIn);
        }
        if !self.pending_deletes.insert(id.to_string()) {
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    /// Release the delete guard for `id`.
    ///
    /// Only a successful remove ends an edit of that record, even when the
    /// reload after it failed. After a failed remove the record still exists
    /// and the form is kept as typed.
    pub fn finish_delete(&mut self, id: &str, outcome: &Result<(), CatalogError>) {
        self.pending_deletes.remove(id);
        let removed = matches!(outcome, Ok(()) | Err(CatalogError::Load(_)));
        if removed && self.editing.as_deref() == Some(id) {
            self.enter_edit_mode(None);
        }
    }

    /// Take the credentials from the login form and mark sign-in as in flight.
    pub fn begin_sign_in(&mut self) -> Result<(String, String), SessionError> {
        if self.login.pending {
            return Err(SessionError::Busy);
        }
        self.login.pending = true;
        self.login.error = None;
        Ok((
            self.login.email.trim().to_string(),
            self.login.password.clone(),
        ))
    }

    /// The identity itself arrives through the provider's notification.
    pub fn finish_sign_in(&mut self, outcome: &Result<Identity, AuthError>) {
        self.login.pending = false;
        match outcome {
            Ok(_) => self.login = LoginForm::default(),
            Err(e) => self.login.error = Some(e.user_message().to_string()),
        }
    }

    fn reset_admin_body(&mut self) {
        self.editing = None;
        self.form = ProgramForm::default();
        self.status = FormStatus::Idle;
        // An in-flight sign-in keeps its guard until it completes.
        self.login = LoginForm {
            pending: self.login.pending,
            ..LoginForm::default()
        };
    }
}
