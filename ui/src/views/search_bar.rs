#![allow(non_snake_case)]

use catalog_common::state::StateCell;
use dioxus::prelude::*;

use crate::state::{AppSignal, APP};

#[component]
pub fn SearchBar() -> Element {
    let query = APP.read().search_query.clone();

    rsx! {
        div { class: "search-wrapper",
            input {
                id: "search-input",
                class: "search-input",
                r#type: "text",
                placeholder: "Search programs...",
                value: "{query}",
                oninput: move |e| {
                    AppSignal.update(|s| s.set_search_query(e.value()));
                },
            }
            if !query.is_empty() {
                button {
                    class: "search-clear",
                    aria_label: "Clear search",
                    onclick: move |_| {
                        AppSignal.update(|s| s.set_search_query(String::new()));
                    },
                    "\u{00d7}"
                }
            }
        }
    }
}
