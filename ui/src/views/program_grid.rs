#![allow(non_snake_case)]

use catalog_common::view;
use dioxus::prelude::*;

use super::program_card::ProgramCard;
use crate::state::APP;

#[component]
pub fn ProgramGrid() -> Element {
    let state = APP.read();
    let grid = view::grid(&state);
    let cards: Vec<_> = grid.cards.iter().map(|p| (*p).clone()).collect();

    rsx! {
        section {
            div { class: "section-header",
                h2 { class: "section-title", "Programs" }
                span { id: "program-count", class: "section-meta", "{grid.count_label}" }
            }
            div { id: "program-grid", class: "program-grid",
                for program in cards {
                    ProgramCard { key: "{program.id}", program: program.clone() }
                }
            }
            if let Some(message) = grid.empty_message {
                div { id: "empty-state", class: "empty-state",
                    p { id: "empty-text", "{message}" }
                }
            }
        }
    }
}
