use catalog_common::state::{AppState, StateCell};
use dioxus::prelude::*;

/// The whole page state. Components read it; mutations go through [`AppSignal`].
pub static APP: GlobalSignal<AppState> = Global::new(AppState::default);

/// Handle that routes catalog operations to the [`APP`] signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct AppSignal;

impl StateCell for AppSignal {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&APP.read())
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut APP.write())
    }
}
