use super::*;
use crate::net::auth::AuthService;
use crate::net::fake::{FakeHttp, server_error};
use crate::net::http::Method;
use crate::net::session::MemoryStore;
use futures::executor::block_on;
use serde_json::json;

#[test]
fn validate_email_input_trims_and_requires_at_sign() {
    assert_eq!(validate_email_input("  a@b.com  "), Ok("a@b.com".to_owned()));
    assert_eq!(validate_email_input("   "), Err("Enter a valid email address."));
    assert_eq!(validate_email_input("not-an-email"), Err("Enter a valid email address."));
}

#[test]
fn submit_forgot_password_posts_trimmed_email() {
    let http = FakeHttp::new();
    let auth = AuthService::new(http.clone(), MemoryStore::new());

    let message = block_on(submit_forgot_password(&auth, " a@b.com ")).unwrap();

    assert_eq!(message, "If an account exists for a@b.com, a reset link is on its way.");
    let calls = http.calls();
    assert_eq!(calls[0].path, "/auth/forgot-password");
    assert_eq!(calls[0].body, Some(json!({ "email": "a@b.com" })));
}

#[test]
fn submit_forgot_password_reports_failure() {
    let http = FakeHttp::new();
    http.respond(Method::Post, "/auth/forgot-password", Err(server_error("mailer down")));
    let auth = AuthService::new(http, MemoryStore::new());

    assert_eq!(
        block_on(submit_forgot_password(&auth, "a@b.com")),
        Err("Request failed: mailer down".to_owned())
    );
}
