//! Text and structure the page derives from [`AppState`].
//!
//! Pure projections: the web components call these on every render and
//! never keep derived state of their own.

use crate::session::{AdminSession, AdminView};
use crate::state::AppState;
use crate::types::{Identity, Program};

pub const EMPTY_STATE_MESSAGE: &str = "No programs found. Try changing your search.";
pub const NO_PROGRAMS_YET: &str = "No programs yet.";
pub const PUBLISHED_MESSAGE: &str = "Program published successfully.";
pub const LINK_COPIED: &str = "Link copied!";
pub const COPY_PROMPT: &str = "Copy this link:";

/// "N item(s)" with singular for exactly one.
pub fn count_label(n: usize) -> String {
    let plural = if n == 1 { "" } else { "s" };
    format!("{n} item{plural}")
}

pub fn trust_label(file_url: &str) -> &'static str {
    if file_url.to_lowercase().contains("github.com") {
        "Source: GitHub · No ads / installers"
    } else {
        "Direct download · No ads / installers"
    }
}

/// "vX" tag, only for a non-empty version.
pub fn version_tag(program: &Program) -> Option<String> {
    program.display_version().map(|v| format!("v{v}"))
}

/// "platform · vX" line of an admin management row.
pub fn admin_row_meta(program: &Program) -> String {
    match program.display_version() {
        Some(v) => format!("{} · v{}", program.platform, v),
        None => program.platform.clone(),
    }
}

/// CSS selector for the grid card of `id`.
pub fn card_selector(id: &str) -> String {
    let quoted = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!(".program-card[data-id=\"{quoted}\"]")
}

pub fn delete_confirmation(program: &Program) -> String {
    format!("Delete \"{}\" from the site list?", program.title)
}

pub fn admin_button_label(identity: Option<&Identity>) -> &'static str {
    if identity.is_some() {
        "Admin (online)"
    } else {
        "Admin"
    }
}

/// The program grid.
#[derive(Debug, PartialEq, Eq)]
pub struct GridView<'a> {
    pub count_label: String,
    /// Set when nothing matches.
    pub empty_message: Option<&'static str>,
    pub cards: Vec<&'a Program>,
}

pub fn grid(state: &AppState) -> GridView<'_> {
    let cards = state.visible_programs();
    GridView {
        count_label: count_label(cards.len()),
        empty_message: cards.is_empty().then_some(EMPTY_STATE_MESSAGE),
        cards,
    }
}

/// Heading, submit label and cancel visibility of the program form.
#[derive(Debug, PartialEq, Eq)]
pub struct FormChrome {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub show_cancel: bool,
}

pub fn form_chrome(session: &AdminSession) -> FormChrome {
    if session.editing_program_id().is_some() {
        FormChrome {
            heading: "Edit program",
            submit_label: "Save changes",
            show_cancel: true,
        }
    } else {
        FormChrome {
            heading: "Publish new program",
            submit_label: "Publish",
            show_cancel: false,
        }
    }
}

/// Body of the admin dialog, or `None` while it is closed.
pub fn admin_body(state: &AppState) -> Option<AdminView> {
    state
        .dialog
        .is_open(crate::dialog::DialogKind::Admin)
        .then(|| state.session.view())
}
