#![allow(non_snake_case)]

use catalog_common::dialog::DialogKind;
use catalog_common::view;
use dioxus::prelude::*;

use super::dialog_class;
use crate::actions;
use crate::state::APP;

#[component]
pub fn ProgramModal() -> Element {
    let state = APP.read();
    let shown = state.dialog.is_shown(DialogKind::Detail);
    let open = state.dialog.is_open(DialogKind::Detail);
    let program = state.shown_detail_program().cloned();
    drop(state);

    let class = dialog_class("modal", open);
    let title = program
        .as_ref()
        .map(|p| p.title.clone())
        .unwrap_or_else(|| "Program".to_string());

    rsx! {
        div { id: "program-modal", class: "{class}", hidden: !shown,
            div { class: "panel-header",
                h2 { id: "program-modal-title", class: "panel-title", "{title}" }
                button {
                    id: "program-modal-close",
                    class: "icon-button",
                    aria_label: "Close dialog",
                    onclick: move |_| actions::close_dialog(),
                    "\u{2715}"
                }
            }
            div { id: "program-modal-content", class: "panel-content",
                if let Some(p) = program {
                    div { class: "banner banner--modal",
                        img {
                            src: "{p.icon_url}",
                            alt: "{p.title} banner",
                            class: "modal-banner-img",
                        }
                    }
                    p { class: "modal-description", "{p.description}" }
                    div { class: "modal-footer",
                        div { class: "program-meta",
                            span { class: "program-tag", "{p.platform}" }
                            if let Some(v) = view::version_tag(&p) {
                                span { class: "program-tag subtle", "{v}" }
                            }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn ghost",
                                id: "copy-program-link",
                                r#type: "button",
                                onclick: move |_| actions::copy_link(),
                                "Copy link"
                            }
                            a {
                                class: "btn primary",
                                href: "{p.file_url}",
                                target: "_blank",
                                rel: "noopener",
                                "Download"
                            }
                        }
                    }
                } else if shown {
                    p { class: "form-text", "This program is no longer available." }
                }
            }
        }
    }
}
