#![allow(non_snake_case)]

use catalog_common::dialog::DialogKind;
use catalog_common::session::{AdminView, FormStatus};
use catalog_common::state::StateCell;
use catalog_common::view;
use dioxus::prelude::*;

use super::dialog_class;
use crate::actions;
use crate::state::{AppSignal, APP};

#[component]
pub fn AdminPanel() -> Element {
    let state = APP.read();
    let shown = state.dialog.is_shown(DialogKind::Admin);
    let open = state.dialog.is_open(DialogKind::Admin);
    let body = state.session.view();
    drop(state);

    let class = dialog_class("panel", open);

    rsx! {
        div { id: "admin-panel", class: "{class}", hidden: !shown,
            div { class: "panel-header",
                h2 { class: "panel-title", "Admin area" }
                button {
                    id: "panel-close",
                    class: "icon-button",
                    aria_label: "Close panel",
                    onclick: move |_| actions::close_dialog(),
                    "\u{2715}"
                }
            }
            div { id: "admin-content", class: "panel-content",
                if shown {
                    {match body {
                        AdminView::Login => rsx! { LoginForm {} },
                        AdminView::Manage { email } => rsx! { ManagePanel { email } },
                    }}
                }
            }
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let login = APP.read().session.login.clone();

    rsx! {
        form {
            id: "login-form",
            class: "form",
            onsubmit: move |e: FormEvent| {
                e.prevent_default();
                actions::sign_in();
            },
            p { class: "form-text",
                "Sign in with your admin email and password to upload new programs."
            }
            label { class: "field",
                span { class: "field-label", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    class: "field-input",
                    required: true,
                    value: "{login.email}",
                    oninput: move |e| AppSignal.update(|s| s.session.login.email = e.value()),
                }
            }
            label { class: "field",
                span { class: "field-label", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    class: "field-input",
                    required: true,
                    value: "{login.password}",
                    oninput: move |e| AppSignal.update(|s| s.session.login.password = e.value()),
                }
            }
            div { class: "form-actions",
                button {
                    r#type: "submit",
                    class: "btn primary",
                    disabled: login.is_pending(),
                    "Sign in"
                }
            }
            if let Some(ref error) = login.error {
                p { id: "login-error", class: "form-error", "{error}" }
            }
        }
    }
}

#[component]
fn ManagePanel(email: String) -> Element {
    rsx! {
        div { class: "admin-header",
            p { class: "form-text",
                "Signed in as "
                strong { "{email}" }
            }
            button {
                id: "sign-out",
                class: "btn ghost small",
                onclick: move |_| actions::sign_out(),
                "Sign out"
            }
        }
        ProgramForm {}
        div { class: "admin-divider" }
        ManageList {}
    }
}

#[component]
fn ProgramForm() -> Element {
    let state = APP.read();
    let form = state.session.form.clone();
    let status = state.session.status().clone();
    let submitting = state.session.is_submitting();
    let chrome = view::form_chrome(&state.session);
    drop(state);

    rsx! {
        form {
            id: "upload-form",
            class: "form",
            onsubmit: move |e: FormEvent| {
                e.prevent_default();
                actions::submit_program_form();
            },
            h3 { id: "upload-form-title", class: "form-title", "{chrome.heading}" }
            label { class: "field",
                span { class: "field-label", "Program name" }
                input {
                    id: "program-title",
                    r#type: "text",
                    class: "field-input",
                    required: true,
                    value: "{form.title}",
                    oninput: move |e| AppSignal.update(|s| s.session.form.title = e.value()),
                }
            }
            label { class: "field",
                span { class: "field-label", "Short description" }
                textarea {
                    id: "program-description",
                    class: "field-input",
                    rows: "3",
                    required: true,
                    value: "{form.description}",
                    oninput: move |e| AppSignal.update(|s| s.session.form.description = e.value()),
                }
            }
            div { class: "field-row",
                label { class: "field",
                    span { class: "field-label", "Platform / type" }
                    input {
                        id: "program-platform",
                        r#type: "text",
                        class: "field-input",
                        placeholder: "Windows, Android, CLI...",
                        required: true,
                        value: "{form.platform}",
                        oninput: move |e| AppSignal.update(|s| s.session.form.platform = e.value()),
                    }
                }
                label { class: "field",
                    span { class: "field-label", "Version (optional)" }
                    input {
                        id: "program-version",
                        r#type: "text",
                        class: "field-input",
                        placeholder: "1.0.0",
                        value: "{form.version}",
                        oninput: move |e| AppSignal.update(|s| s.session.form.version = e.value()),
                    }
                }
            }
            label { class: "field",
                span { class: "field-label", "Program file URL" }
                input {
                    id: "program-file-url",
                    r#type: "url",
                    class: "field-input",
                    placeholder: "https://github.com/you/repo/releases/...",
                    value: "{form.file_url}",
                    oninput: move |e| AppSignal.update(|s| s.session.form.file_url = e.value()),
                }
            }
            label { class: "field",
                span { class: "field-label", "Banner image URL" }
                input {
                    id: "program-icon-url",
                    r#type: "url",
                    class: "field-input",
                    placeholder: "https://raw.githubusercontent.com/you/repo/...",
                    value: "{form.icon_url}",
                    oninput: move |e| AppSignal.update(|s| s.session.form.icon_url = e.value()),
                }
            }
            div { class: "form-actions",
                if chrome.show_cancel {
                    button {
                        id: "edit-cancel",
                        r#type: "button",
                        class: "btn ghost",
                        onclick: move |_| AppSignal.update(|s| s.session.enter_edit_mode(None)),
                        "Cancel"
                    }
                }
                button {
                    id: "upload-submit",
                    r#type: "submit",
                    class: "btn primary",
                    disabled: submitting,
                    "{chrome.submit_label}"
                }
            }
            {match status {
                FormStatus::Idle => rsx! {},
                FormStatus::Error(message) => rsx! {
                    p { id: "upload-error", class: "form-error", "{message}" }
                },
                FormStatus::Published => rsx! {
                    p { id: "upload-success", class: "form-success", "{view::PUBLISHED_MESSAGE}" }
                },
            }}
        }
    }
}

#[component]
fn ManageList() -> Element {
    let state = APP.read();
    let rows: Vec<_> = state
        .catalog
        .programs()
        .iter()
        .map(|p| {
            (
                p.id.clone(),
                p.title.clone(),
                view::admin_row_meta(p),
                state.session.is_deleting(&p.id),
            )
        })
        .collect();
    drop(state);

    rsx! {
        div { class: "admin-list",
            div { class: "section-header",
                h3 { class: "section-title", "Manage programs" }
                span { class: "section-meta", "Delete removes it from the site list" }
            }
            div { id: "admin-programs", class: "admin-programs",
                if rows.is_empty() {
                    p { class: "form-text", "{view::NO_PROGRAMS_YET}" }
                }
                for (id, title, meta, deleting) in rows {
                    div { key: "{id}", class: "admin-program-row",
                        div { class: "admin-program-main",
                            span { class: "admin-program-title", title: "{title}", "{title}" }
                            span { class: "admin-program-meta", "{meta}" }
                        }
                        div { class: "admin-program-actions",
                            button {
                                class: "btn ghost small admin-edit",
                                "data-id": "{id}",
                                r#type: "button",
                                onclick: {
                                    let id = id.clone();
                                    move |_| AppSignal.update(|s| s.edit_program(&id))
                                },
                                "Edit"
                            }
                            button {
                                class: "btn ghost small admin-delete",
                                "data-id": "{id}",
                                r#type: "button",
                                disabled: deleting,
                                onclick: {
                                    let id = id.clone();
                                    move |_| actions::delete_program(id.clone())
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}
