#![allow(non_snake_case)]

use catalog_common::types::Program;
use catalog_common::view;
use dioxus::prelude::*;

use crate::actions;

#[component]
pub fn ProgramCard(program: Program) -> Element {
    let trust = view::trust_label(&program.file_url);
    let version = view::version_tag(&program);
    let id_click = program.id.clone();
    let id_key = program.id.clone();

    rsx! {
        article {
            class: "program-card",
            tabindex: "0",
            "data-id": "{program.id}",
            onclick: move |_| actions::open_program(&id_click),
            onkeydown: move |e: KeyboardEvent| {
                let activate = match e.key() {
                    Key::Enter => true,
                    Key::Character(c) => c == " ",
                    _ => false,
                };
                if activate {
                    e.prevent_default();
                    actions::open_program(&id_key);
                }
            },

            div { class: "banner",
                img {
                    src: "{program.icon_url}",
                    alt: "{program.title} banner",
                    class: "program-banner-img",
                }
            }
            div { class: "program-card-main",
                div { class: "program-info",
                    h3 { class: "program-title", "{program.title}" }
                    p { class: "program-description clamp", "{program.description}" }
                }
            }
            div { class: "program-footer",
                div { class: "program-meta",
                    span { class: "program-tag", "{program.platform}" }
                    if let Some(v) = version {
                        span { class: "program-tag subtle", "{v}" }
                    }
                }
                div { class: "program-actions",
                    a {
                        href: "{program.file_url}",
                        class: "btn primary",
                        target: "_blank",
                        rel: "noopener",
                        // Downloading must not also open the detail dialog.
                        onclick: move |e: MouseEvent| e.stop_propagation(),
                        "Download"
                    }
                }
            }
            div { class: "program-trust", "{trust}" }
        }
    }
}
