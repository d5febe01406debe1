//! Event handlers: each applies one named state operation, then any effects.

use catalog_common::error::{ActionError, SessionError};
use catalog_common::state::StateCell;
use catalog_common::{sync, view};

use crate::api;
use crate::browser;
use crate::state::AppSignal;

pub fn open_program(id: &str) {
    match AppSignal.update(|s| s.open_detail(id)) {
        Ok(effects) => browser::apply_effects(effects),
        Err(e) => tracing::warn!("Cannot open program {}: {}", id, e),
    }
}

pub fn open_admin() {
    match AppSignal.update(|s| s.open_admin()) {
        Ok(effects) => browser::apply_effects(effects),
        Err(e) => tracing::warn!("Cannot open admin panel: {}", e),
    }
}

pub fn close_dialog() {
    let effects = AppSignal.update(|s| s.close_dialog());
    browser::apply_effects(effects);
}

pub fn submit_program_form() {
    let Some(backend) = api::backend() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        match sync::submit_program_form(&AppSignal, &*backend.store).await {
            Ok(()) => {}
            Err(ActionError::Session(SessionError::Busy)) => {
                tracing::debug!("Ignoring submit while one is pending");
            }
            Err(e) => tracing::debug!("Submit failed: {}", e),
        }
    });
}

pub fn delete_program(id: String) {
    let Some(program) = AppSignal.read(|s| s.catalog.get(&id).cloned()) else {
        return;
    };
    if !browser::confirm(&view::delete_confirmation(&program)) {
        return;
    }
    let Some(backend) = api::backend() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        match sync::delete_program(&AppSignal, &*backend.store, &id).await {
            Ok(()) | Err(ActionError::Session(SessionError::Busy)) => {}
            Err(e) => browser::alert(e.user_message()),
        }
    });
}

pub fn sign_in() {
    let Some(backend) = api::backend() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = sync::sign_in(&AppSignal, &*backend.identity).await {
            tracing::debug!("Sign-in not completed: {}", e);
        }
    });
}

pub fn sign_out() {
    let Some(backend) = api::backend() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = sync::sign_out(&AppSignal, &*backend.identity).await {
            browser::alert(e.user_message());
        }
    });
}

/// Copy the current page URL, which carries the open program's id.
pub fn copy_link() {
    let Some(href) = browser::current_href() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        match browser::copy_to_clipboard(&href).await {
            Ok(()) => browser::alert(view::LINK_COPIED),
            Err(e) => {
                tracing::error!("Clipboard write failed: {:?}", e);
                browser::prompt(view::COPY_PROMPT, &href);
            }
        }
    });
}
