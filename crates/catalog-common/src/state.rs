//! The single owned application state and the handle used to mutate it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::catalog::CatalogState;
use crate::dialog::{DialogController, DialogEffect, DialogKind, HideToken};
use crate::error::DialogError;
use crate::search;
use crate::session::AdminSession;
use crate::types::{Identity, Program};

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub catalog: CatalogState,
    pub search_query: String,
    pub dialog: DialogController,
    pub session: AdminSession,
}

impl AppState {
    /// Programs matching the current query, in catalog order.
    pub fn visible_programs(&self) -> Vec<&Program> {
        search::filter(self.catalog.programs(), &self.search_query)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn open_admin(&mut self) -> Result<Vec<DialogEffect>, DialogError> {
        let effects = self.dialog.open_admin()?;
        self.session.on_admin_opened();
        Ok(effects)
    }

    pub fn open_detail(&mut self, program_id: &str) -> Result<Vec<DialogEffect>, DialogError> {
        let program = self
            .catalog
            .get(program_id)
            .ok_or(DialogError::UnknownProgram)?;
        self.dialog.open_detail(program)
    }

    /// Program shown in the detail dialog, if it is open and still in the catalog.
    pub fn detail_program(&self) -> Option<&Program> {
        self.dialog
            .detail_program_id()
            .and_then(|id| self.catalog.get(id))
    }

    /// Program rendered in the detail element while it is shown.
    pub fn shown_detail_program(&self) -> Option<&Program> {
        self.dialog
            .shown_detail_id()
            .and_then(|id| self.catalog.get(id))
    }

    pub fn close_dialog(&mut self) -> Vec<DialogEffect> {
        self.dialog.close()
    }

    pub fn finish_hide(&mut self, token: HideToken) -> bool {
        self.dialog.finish_hide(token)
    }

    pub fn apply_identity(&mut self, identity: Option<Identity>) {
        let admin_open = self.dialog.is_open(DialogKind::Admin);
        self.session.on_identity_change(identity, admin_open);
    }

    /// Bind the admin form to the catalog record `id`; unknown ids are ignored.
    pub fn edit_program(&mut self, id: &str) {
        if let Some(program) = self.catalog.get(id) {
            let program = program.clone();
            self.session.enter_edit_mode(Some(&program));
        }
    }
}

/// Shared handle to the [`AppState`].
///
/// Every mutation goes through `update` so the owner can re-render after it.
/// Closures must not await; async work borrows the state only between
/// suspension points.
pub trait StateCell {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R;

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R;
}

impl StateCell for RefCell<AppState> {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

impl<C: StateCell> StateCell for Rc<C> {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        (**self).read(f)
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        (**self).update(f)
    }
}
