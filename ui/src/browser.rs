//! Thin wrappers over the browser APIs the page needs.

use catalog_common::dialog::DialogEffect;
use catalog_common::{link, view};
use catalog_common::state::StateCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::state::AppSignal;

pub fn current_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

/// Swap the address bar URL without adding a history entry.
fn replace_url(url: &str) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(url)) {
        tracing::error!("Failed to update URL: {:?}", e);
    }
}

pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        ms as i32,
    ) {
        tracing::error!("Failed to schedule timer: {:?}", e);
    }
}

fn scroll_to_card(id: &str) {
    let selector = view::card_selector(id);
    let card = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(&selector).ok().flatten());
    if let Some(card) = card {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Center);
        card.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

/// Perform the side effects of a dialog transition.
pub fn apply_effects(effects: Vec<DialogEffect>) {
    for effect in effects {
        match effect {
            DialogEffect::SetProgramParam(id) => {
                if let Some(href) = current_href() {
                    replace_url(&link::with_program_param(&href, &id));
                }
            }
            DialogEffect::ClearProgramParam => {
                if let Some(href) = current_href() {
                    replace_url(&link::without_program_param(&href));
                }
            }
            DialogEffect::ScrollIntoView(id) => {
                // The grid renders on the next frame.
                set_timeout(0, move || scroll_to_card(&id));
            }
            DialogEffect::ScheduleHide { token, delay_ms } => {
                set_timeout(delay_ms, move || {
                    AppSignal.update(|s| s.finish_hide(token));
                });
            }
        }
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn prompt(message: &str, default: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.prompt_with_message_and_default(message, default);
    }
}

pub async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(JsValue::from_str("no window"))?;
    JsFuture::from(window.navigator().clipboard().write_text(text)).await?;
    Ok(())
}

pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
