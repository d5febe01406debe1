//! Which modal is open, and the two-phase close that lets the hide animation run.
//!
//! The logical state (`active`) changes immediately on open and close. Each
//! dialog element also has a presentational "shown" flag that stays set until
//! the close animation finishes. Close returns a [`HideToken`]; the caller
//! schedules a timer and hands the token back to [`DialogController::finish_hide`].
//! Reopening in the meantime invalidates the token.

use crate::catalog::CatalogState;
use crate::error::DialogError;
use crate::types::Program;

/// Delay between close intent and hiding the element from layout.
pub const CLOSE_ANIMATION_MS: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Admin,
    Detail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveDialog {
    #[default]
    None,
    Admin,
    Detail { program_id: String },
}

impl ActiveDialog {
    pub fn kind(&self) -> Option<DialogKind> {
        match self {
            ActiveDialog::None => None,
            ActiveDialog::Admin => Some(DialogKind::Admin),
            ActiveDialog::Detail { .. } => Some(DialogKind::Detail),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HideToken {
    kind: DialogKind,
    seq: u64,
}

impl HideToken {
    pub fn kind(&self) -> DialogKind {
        self.kind
    }
}

/// Side effects the browser layer must perform after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogEffect {
    /// Write the program id into the page URL.
    SetProgramParam(String),
    /// Remove the program id from the page URL.
    ClearProgramParam,
    /// Scroll the grid card with this id into view.
    ScrollIntoView(String),
    /// Call `finish_hide(token)` after `delay_ms`.
    ScheduleHide { token: HideToken, delay_ms: u32 },
}

#[derive(Clone, Copy, Debug, Default)]
struct Presentation {
    shown: bool,
    seq: u64,
}

#[derive(Clone, Debug, Default)]
pub struct DialogController {
    active: ActiveDialog,
    admin: Presentation,
    detail: Presentation,
    /// Program kept in the detail body until its hide completes.
    shown_detail: Option<String>,
}

impl DialogController {
    pub fn active(&self) -> &ActiveDialog {
        &self.active
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.active.kind() == Some(kind)
    }

    /// Id of the program in the open detail dialog.
    pub fn detail_program_id(&self) -> Option<&str> {
        match &self.active {
            ActiveDialog::Detail { program_id } => Some(program_id),
            _ => None,
        }
    }

    /// Program the detail element displays, including during its close animation.
    pub fn shown_detail_id(&self) -> Option<&str> {
        self.shown_detail.as_deref()
    }

    /// Whether the element is still in layout (open, or animating closed).
    pub fn is_shown(&self, kind: DialogKind) -> bool {
        self.presentation(kind).shown
    }

    /// Backdrop stays up while any dialog is shown.
    pub fn overlay_shown(&self) -> bool {
        self.admin.shown || self.detail.shown
    }

    pub fn open_admin(&mut self) -> Result<Vec<DialogEffect>, DialogError> {
        self.ensure_closed()?;
        self.active = ActiveDialog::Admin;
        self.show(DialogKind::Admin);
        Ok(Vec::new())
    }

    pub fn open_detail(&mut self, program: &Program) -> Result<Vec<DialogEffect>, DialogError> {
        self.ensure_closed()?;
        self.active = ActiveDialog::Detail {
            program_id: program.id.clone(),
        };
        self.shown_detail = Some(program.id.clone());
        self.show(DialogKind::Detail);
        Ok(vec![DialogEffect::SetProgramParam(program.id.clone())])
    }

    /// Close whatever is open. Closing when nothing is open is a no-op.
    pub fn close(&mut self) -> Vec<DialogEffect> {
        let Some(kind) = self.active.kind() else {
            return Vec::new();
        };
        self.active = ActiveDialog::None;

        let presentation = self.presentation_mut(kind);
        presentation.seq += 1;
        let token = HideToken {
            kind,
            seq: presentation.seq,
        };

        let mut effects = Vec::with_capacity(2);
        effects.push(DialogEffect::ScheduleHide {
            token,
            delay_ms: CLOSE_ANIMATION_MS,
        });
        if kind == DialogKind::Detail {
            effects.push(DialogEffect::ClearProgramParam);
        }
        effects
    }

    /// Hide the element once its close animation elapsed.
    ///
    /// Returns false when the token was superseded by a reopen.
    pub fn finish_hide(&mut self, token: HideToken) -> bool {
        let still_open = self.is_open(token.kind);
        let presentation = self.presentation_mut(token.kind);
        if presentation.seq != token.seq || still_open {
            return false;
        }
        presentation.shown = false;
        if token.kind == DialogKind::Detail {
            self.shown_detail = None;
        }
        true
    }

    /// Open the detail dialog for a deep-linked program id read at startup.
    ///
    /// Unknown ids are ignored.
    pub fn restore_from_link(
        &mut self,
        program_id: Option<&str>,
        catalog: &CatalogState,
    ) -> Result<Vec<DialogEffect>, DialogError> {
        let Some(program) = program_id.and_then(|id| catalog.get(id)) else {
            return Ok(Vec::new());
        };
        let mut effects = vec![DialogEffect::ScrollIntoView(program.id.clone())];
        effects.extend(self.open_detail(program)?);
        Ok(effects)
    }

    fn ensure_closed(&self) -> Result<(), DialogError> {
        if self.active == ActiveDialog::None {
            Ok(())
        } else {
            tracing::warn!("Rejected dialog open while {:?} is open", self.active);
            Err(DialogError::AlreadyOpen)
        }
    }

    fn show(&mut self, kind: DialogKind) {
        let presentation = self.presentation_mut(kind);
        presentation.shown = true;
        // Invalidate any hide timer still pending from a previous close.
        presentation.seq += 1;
    }

    fn presentation(&self, kind: DialogKind) -> &Presentation {
        match kind {
            DialogKind::Admin => &self.admin,
            DialogKind::Detail => &self.detail,
        }
    }

    fn presentation_mut(&mut self, kind: DialogKind) -> &mut Presentation {
        match kind {
            DialogKind::Admin => &mut self.admin,
            DialogKind::Detail => &mut self.detail,
        }
    }
}
