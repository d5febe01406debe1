#![allow(non_snake_case)]

use catalog_common::view;
use dioxus::prelude::*;

mod actions;
mod api;
mod browser;
mod state;
mod views;

use state::APP;
use views::admin_panel::AdminPanel;
use views::program_grid::ProgramGrid;
use views::program_modal::ProgramModal;
use views::search_bar::SearchBar;

fn main() {
    dioxus::logger::initialize_default();
    launch(App);
}

#[component]
fn App() -> Element {
    use_effect(|| {
        api::init();
    });

    let state = APP.read();
    let admin_label = view::admin_button_label(state.session.identity());
    let overlay_shown = state.dialog.overlay_shown();
    drop(state);

    rsx! {
        document::Stylesheet { href: asset!("/assets/main.css") }

        div { class: "page",
            header { class: "header",
                div { class: "header-left",
                    div { class: "logo-circle",
                        div { class: "logo-mark",
                            span { class: "logo-mark-inner" }
                        }
                    }
                    div { class: "brand",
                        span { class: "brand-title", "DarkByte Arsenal" }
                        span { class: "brand-subtitle", "Share your own tools with everyone" }
                    }
                }
                div { class: "header-right",
                    SearchBar {}
                    button {
                        id: "admin-button",
                        class: "btn ghost",
                        onclick: move |_| actions::open_admin(),
                        "{admin_label}"
                    }
                }
            }

            main { class: "content",
                section { class: "info-banner",
                    div { class: "info-banner-left",
                        p { class: "info-eyebrow", "Welcome to DarkByte Arsenal" }
                        h1 { class: "hero-title", "Download my tools for free" }
                        p { class: "hero-text",
                            "A focused library of utilities and clients I personally use. "
                            "No registration, no ads, no installers. Just clean direct downloads."
                        }
                    }
                    div { class: "info-banner-right",
                        div { class: "info-pill", "Free · No ads · Direct download" }
                    }
                }
                ProgramGrid {}
            }

            footer { class: "footer",
                div { class: "disclaimer",
                    strong { "Disclaimer. " }
                    "All tools are provided \u{201c}as is\u{201d} without any warranties. "
                    "You use them at your own risk, and I am not responsible for any damage "
                    "or violations caused by their usage."
                }
                span { "Made by me for free distribution of my own software." }
            }

            div {
                id: "overlay",
                class: "overlay",
                hidden: !overlay_shown,
                onclick: move |_| actions::close_dialog(),
            }

            ProgramModal {}
            AdminPanel {}
        }
    }
}
