mod fixtures;

use catalog_common::error::{AuthError, CatalogError, SessionError, StoreError, ValidationError};
use catalog_common::session::*;
use catalog_common::types::Identity;
use fixtures::program;

fn signed_in() -> AdminSession {
    let mut session = AdminSession::default();
    session.on_identity_change(Some(Identity::new("admin@example.com")), false);
    session
}

fn fill(form: &mut ProgramForm) {
    form.title = "  Tool ".into();
    form.description = "Does things".into();
    form.platform = "CLI".into();
    form.file_url = " https://example.com/tool.zip ".into();
    form.icon_url = "https://example.com/tool.png".into();
}

#[test]
fn edit_then_cancel_clears_everything() {
    let mut session = signed_in();
    let mut p = program("abc", "Nmap");
    p.version = Some("7.94".into());

    session.enter_edit_mode(Some(&p));
    assert_eq!(session.editing_program_id(), Some("abc"));
    assert_eq!(session.form.title, "Nmap");
    assert_eq!(session.form.version, "7.94");

    session.enter_edit_mode(None);
    assert_eq!(session.editing_program_id(), None);
    assert!(session.form.is_empty());
}

#[test]
fn missing_file_url_fails_validation() {
    let mut session = signed_in();
    fill(&mut session.form);
    session.form.file_url = "   ".into();

    let err = session.begin_submit().unwrap_err();
    assert_eq!(err, SessionError::Validation(ValidationError::MissingFileUrl));
    assert!(!session.is_submitting());
    assert_eq!(
        session.status(),
        &FormStatus::Error("Please provide both file URL and icon URL.".into())
    );
}

#[test]
fn missing_icon_url_fails_validation() {
    let mut session = signed_in();
    fill(&mut session.form);
    session.form.icon_url.clear();
    assert_eq!(
        session.begin_submit(),
        Err(SessionError::Validation(ValidationError::MissingIconUrl))
    );
}

#[test]
fn submit_plan_trims_and_targets_edit() {
    let mut session = signed_in();
    session.enter_edit_mode(Some(&program("abc", "Old")));
    fill(&mut session.form);

    let plan = session.begin_submit().unwrap();
    assert_eq!(plan.target.as_deref(), Some("abc"));
    assert_eq!(plan.fields.title, "Tool");
    assert_eq!(plan.fields.file_url, "https://example.com/tool.zip");
    assert_eq!(plan.fields.version, "");
}

#[test]
fn create_mode_has_no_target() {
    let mut session = signed_in();
    fill(&mut session.form);
    assert_eq!(session.begin_submit().unwrap().target, None);
}

#[test]
fn second_submit_while_pending_is_busy() {
    let mut session = signed_in();
    fill(&mut session.form);
    session.begin_submit().unwrap();
    assert_eq!(session.begin_submit(), Err(SessionError::Busy));
}

#[test]
fn submit_requires_identity() {
    let mut session = AdminSession::default();
    fill(&mut session.form);
    assert_eq!(session.begin_submit(), Err(SessionError::NotSignedIn));
}

#[test]
fn successful_submit_returns_to_create_mode() {
    let mut session = signed_in();
    session.enter_edit_mode(Some(&program("abc", "Old")));
    fill(&mut session.form);
    session.begin_submit().unwrap();

    session.finish_submit(&Ok(()));
    assert!(!session.is_submitting());
    assert_eq!(session.editing_program_id(), None);
    assert!(session.form.is_empty());
    assert_eq!(session.status(), &FormStatus::Published);
}

#[test]
fn failed_write_keeps_the_form() {
    let mut session = signed_in();
    session.enter_edit_mode(Some(&program("abc", "Old")));
    fill(&mut session.form);
    session.begin_submit().unwrap();

    session.finish_submit(&Err(CatalogError::Write(StoreError::Transport("x".into()))));
    assert_eq!(session.editing_program_id(), Some("abc"));
    assert_eq!(session.form.title, "  Tool ");
    assert_eq!(
        session.status(),
        &FormStatus::Error("Failed to publish program. Please try again later.".into())
    );
    // Guard released, the admin can retry.
    assert!(session.begin_submit().is_ok());
}

#[test]
fn reload_failure_after_write_still_counts_as_published() {
    let mut session = signed_in();
    fill(&mut session.form);
    session.begin_submit().unwrap();
    session.finish_submit(&Err(CatalogError::Load(StoreError::Transport("x".into()))));
    assert_eq!(session.status(), &FormStatus::Published);
    assert!(session.form.is_empty());
}

#[test]
fn sign_out_while_admin_open_shows_login_and_drops_edit() {
    let mut session = signed_in();
    session.enter_edit_mode(Some(&program("abc", "Old")));

    session.on_identity_change(None, true);
    assert_eq!(session.view(), AdminView::Login);
    assert_eq!(session.editing_program_id(), None);
    assert!(session.form.is_empty());
}

#[test]
fn identity_change_while_closed_keeps_form() {
    let mut session = signed_in();
    session.enter_edit_mode(Some(&program("abc", "Old")));
    session.on_identity_change(Some(Identity::new("other@example.com")), false);
    assert_eq!(session.editing_program_id(), Some("abc"));
    assert_eq!(
        session.view(),
        AdminView::Manage {
            email: "other@example.com".into()
        }
    );
}

#[test]
fn delete_guard_is_per_id() {
    let mut session = signed_in();
    session.begin_delete("a").unwrap();
    assert_eq!(session.begin_delete("a"), Err(SessionError::Busy));
    assert!(session.begin_delete("b").is_ok());
    session.finish_delete("a", &Ok(()));
    assert!(!session.is_deleting("a"));
    assert!(session.begin_delete("a").is_ok());
}

#[test]
fn deleting_the_edited_record_leaves_edit_mode() {
    let mut session = signed_in();
    session.enter_edit_mode(Some(&program("abc", "Old")));
    session.begin_delete("abc").unwrap();
    session.finish_delete("abc", &Ok(()));
    assert_eq!(session.editing_program_id(), None);
}

#[test]
fn failed_delete_keeps_edit_of_that_record() {
    let mut session = signed_in();
    session.enter_edit_mode(Some(&program("abc", "Old")));
    session.form.title = "Renamed".into();
    session.begin_delete("abc").unwrap();

    let failed = Err(CatalogError::Delete(StoreError::Transport("offline".into())));
    session.finish_delete("abc", &failed);

    assert!(!session.is_deleting("abc"));
    assert_eq!(session.editing_program_id(), Some("abc"));
    assert_eq!(session.form.title, "Renamed");
}

#[test]
fn identity_change_during_sign_in_keeps_busy_guard() {
    let mut session = AdminSession::default();
    session.login.email = "admin@example.com".into();
    session.login.password = "pw".into();
    session.begin_sign_in().unwrap();

    // Session expiry notification arrives while the admin dialog is open.
    session.on_identity_change(None, true);

    assert!(session.login.is_pending());
    assert_eq!(session.login.email, "");
    assert_eq!(session.begin_sign_in(), Err(SessionError::Busy));

    session.finish_sign_in(&Err(AuthError::InvalidCredentials));
    assert!(!session.login.is_pending());
}

#[test]
fn sign_in_trims_email_only() {
    let mut session = AdminSession::default();
    session.login.email = " admin@example.com ".into();
    session.login.password = " secret ".into();
    let (email, password) = session.begin_sign_in().unwrap();
    assert_eq!(email, "admin@example.com");
    assert_eq!(password, " secret ");
    assert!(session.login.is_pending());
    assert_eq!(session.begin_sign_in(), Err(SessionError::Busy));
}

#[test]
fn failed_sign_in_shows_inline_error_and_keeps_identity() {
    let mut session = AdminSession::default();
    session.login.email = "admin@example.com".into();
    session.begin_sign_in().unwrap();
    session.finish_sign_in(&Err(AuthError::InvalidCredentials));

    assert!(session.identity().is_none());
    assert!(!session.login.is_pending());
    assert_eq!(
        session.login.error.as_deref(),
        Some("Failed to sign in. Please check your credentials.")
    );
    assert_eq!(session.login.email, "admin@example.com");
}
