use fake::{Fake, faker::name::en::FirstName};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::spawn_app;

fn signup_body(username: &str, email: &str) -> Value {
    let first_name: String = FirstName().fake();
    json!({
        "username": username,
        "password": "password123",
        "confirmPassword": "password123",
        "firstName": first_name,
        "lastName": "Tester",
        "email": email,
        "phoneNumber": "555-0100",
        "address": "1 Test Street",
    })
}

fn random_username() -> String {
    format!("user{}", Uuid::new_v4().simple())
}

#[tokio::test]
async fn the_seeded_super_admin_can_log_in() {
    let app = spawn_app().await;

    let response = app.login("superadmin", "superadmin123").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["username"], "superadmin");
    assert_eq!(body["role"], "SUPER_ADMIN");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn bad_credentials_never_reveal_whether_the_username_exists() {
    let app = spawn_app().await;

    let wrong_password = app.login("superadmin", "not-the-password").await;
    assert_eq!(wrong_password.status(), 400);
    let wrong_password: Value = wrong_password.json().await.unwrap();

    let unknown_user = app.login("no-such-user", "whatever").await;
    assert_eq!(unknown_user.status(), 400);
    let unknown_user: Value = unknown_user.json().await.unwrap();

    assert_eq!(wrong_password["message"], "Invalid username or password");
    assert_eq!(wrong_password["message"], unknown_user["message"]);
    assert_eq!(wrong_password["success"], false);
    assert!(wrong_password["token"].is_null());
}

#[tokio::test]
async fn signup_requires_email_verification_before_login() {
    let app = spawn_app().await;
    let username = random_username();
    let email = format!("{username}@example.com");

    let response = app
        .post("/api/auth/signup", &signup_body(&username, &email))
        .await;
    assert_eq!(response.status(), 200);

    // Not verified yet: login is refused with the fixed message.
    let refused = app.login(&username, "password123").await;
    assert_eq!(refused.status(), 400);
    let refused: Value = refused.json().await.unwrap();
    assert_eq!(
        refused["message"],
        "Please verify your email address before logging in"
    );

    // Verify with the mailed token, then login succeeds.
    let token = app.last_emailed_token().await;
    let verified = app
        .post("/api/auth/verify-email", &json!({ "token": token }))
        .await;
    assert_eq!(verified.status(), 200);

    let login = app.login(&username, "password123").await;
    assert_eq!(login.status(), 200);
}

#[tokio::test]
async fn a_verification_token_only_works_once() {
    let app = spawn_app().await;
    let username = random_username();

    app.post(
        "/api/auth/signup",
        &signup_body(&username, &format!("{username}@example.com")),
    )
    .await;
    let token = app.last_emailed_token().await;

    let first = app
        .post("/api/auth/verify-email", &json!({ "token": token }))
        .await;
    assert_eq!(first.status(), 200);

    let second = app
        .post("/api/auth/verify-email", &json!({ "token": token }))
        .await;
    assert_eq!(second.status(), 400);
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = spawn_app().await;
    let username = random_username();
    let email = format!("{username}@example.com");

    app.post("/api/auth/signup", &signup_body(&username, &email))
        .await;

    let duplicate = app
        .post("/api/auth/signup", &signup_body(&username, &email))
        .await;
    assert_eq!(duplicate.status(), 400);
    let body: Value = duplicate.json().await.unwrap();
    assert_eq!(body["message"], "Username already exists");
}

#[tokio::test]
async fn logout_revokes_the_token_exactly_once() {
    let app = spawn_app().await;
    let token = app.super_admin_token().await;

    let first = app
        .post_authed("/api/auth/logout", &token, &json!({}))
        .await;
    assert_eq!(first.status(), 200);

    let second = app
        .post_authed("/api/auth/logout", &token, &json!({}))
        .await;
    assert_eq!(second.status(), 400);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn a_revoked_token_no_longer_authorizes_protected_calls() {
    let app = spawn_app().await;
    let token = app.super_admin_token().await;

    app.post_authed("/api/auth/logout", &token, &json!({}))
        .await;

    let response = app.get_authed("/api/users", &token).await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn change_password_requires_the_current_password() {
    let app = spawn_app().await;
    let token = app.super_admin_token().await;

    let rejected = app
        .put_authed(
            "/api/auth/change-password",
            &token,
            &json!({
                "currentPassword": "wrong",
                "newPassword": "brand-new-pw",
                "confirmPassword": "brand-new-pw",
            }),
        )
        .await;
    assert_eq!(rejected.status(), 400);
    let body: Value = rejected.json().await.unwrap();
    assert_eq!(body["message"], "Current password is incorrect");

    let accepted = app
        .put_authed(
            "/api/auth/change-password",
            &token,
            &json!({
                "currentPassword": "superadmin123",
                "newPassword": "brand-new-pw",
                "confirmPassword": "brand-new-pw",
            }),
        )
        .await;
    assert_eq!(accepted.status(), 200);

    // The old password is gone, the new one works.
    assert_eq!(app.login("superadmin", "superadmin123").await.status(), 400);
    assert_eq!(app.login("superadmin", "brand-new-pw").await.status(), 200);
}

#[tokio::test]
async fn forgot_password_answers_identically_for_unknown_emails() {
    let app = spawn_app().await;

    let known = app
        .post(
            "/api/auth/forgot-password",
            &json!({ "email": "superadmin@example.com" }),
        )
        .await;
    assert_eq!(known.status(), 200);
    let known: Value = known.json().await.unwrap();

    let unknown = app
        .post(
            "/api/auth/forgot-password",
            &json!({ "email": "nobody@example.com" }),
        )
        .await;
    assert_eq!(unknown.status(), 200);
    let unknown: Value = unknown.json().await.unwrap();

    assert_eq!(known["message"], unknown["message"]);
}

#[tokio::test]
async fn a_reset_token_sets_a_new_password() {
    let app = spawn_app().await;

    app.post(
        "/api/auth/forgot-password",
        &json!({ "email": "superadmin@example.com" }),
    )
    .await;
    let reset_token = app.last_emailed_token().await;

    let response = app
        .post(
            "/api/auth/reset-password",
            &json!({
                "token": reset_token,
                "newPassword": "after-reset-pw",
                "confirmPassword": "after-reset-pw",
            }),
        )
        .await;
    assert_eq!(response.status(), 200);

    assert_eq!(app.login("superadmin", "after-reset-pw").await.status(), 200);
}
