use serde_json::{Value, json};

use crate::helpers::{TestApp, spawn_app};

#[tokio::test]
async fn admin_routes_reject_requests_without_an_authorization_header() {
    let app = spawn_app().await;

    let response = app
        .post(
            "/api/admin/users",
            &TestApp::admin_create_user_body("bob", "USER"),
        )
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Authorization header missing or invalid");
}

#[tokio::test]
async fn admin_routes_reject_unknown_tokens() {
    let app = spawn_app().await;

    let response = app
        .post_authed(
            "/api/admin/users",
            "TOKEN_forged_0_0",
            &TestApp::admin_create_user_body("bob", "USER"),
        )
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn creating_a_user_publishes_a_user_created_event() {
    let app = spawn_app().await;
    let token = app.super_admin_token().await;

    let response = app
        .post_authed(
            "/api/admin/users",
            &token,
            &TestApp::admin_create_user_body("bob", "USER"),
        )
        .await;
    assert_eq!(response.status(), 200);

    let records = app.transport.sent_to("user-events");
    assert_eq!(records.len(), 1);
    let event: Value = serde_json::from_str(&records[0].payload).unwrap();
    assert_eq!(event["eventType"], "USER_CREATED");
    assert_eq!(event["username"], "bob");
    assert_eq!(event["createdBy"], "superadmin");
    assert_eq!(event["source"], "user-management-service");
    assert_eq!(event["version"], "1.0");
    // The record key is the stringified subject id.
    assert_eq!(records[0].key, event["userId"].to_string());

    // Admin-created accounts are pre-verified and can log in at once.
    assert_eq!(app.login("bob", "password123").await.status(), 200);
}

#[tokio::test]
async fn creating_an_admin_publishes_to_the_admin_topic() {
    let app = spawn_app().await;
    let token = app.super_admin_token().await;

    let response = app
        .post_authed(
            "/api/admin/users/admin",
            &token,
            &TestApp::admin_create_user_body("carol", "USER"),
        )
        .await;
    assert_eq!(response.status(), 200);

    let records = app.transport.sent_to("admin-events");
    assert_eq!(records.len(), 1);
    let event: Value = serde_json::from_str(&records[0].payload).unwrap();
    assert_eq!(event["eventType"], "ADMIN_CREATED");
    assert_eq!(event["username"], "carol");
    assert_eq!(event["role"], "ADMIN");
    assert_eq!(event["createdBy"], "superadmin");
    assert_eq!(event["createdByRole"], "SUPER_ADMIN");
    assert_eq!(records[0].key, event["adminId"].to_string());

    assert!(app.transport.sent_to("user-events").is_empty());
}

#[tokio::test]
async fn a_plain_user_gets_forbidden_from_admin_routes() {
    let app = spawn_app().await;
    let super_token = app.super_admin_token().await;

    app.post_authed(
        "/api/admin/users",
        &super_token,
        &TestApp::admin_create_user_body("dave", "USER"),
    )
    .await;
    let user_token = app.login_token("dave", "password123").await;

    let response = app
        .post_authed(
            "/api/admin/users",
            &user_token,
            &TestApp::admin_create_user_body("eve", "USER"),
        )
        .await;

    // The only 403 in the API: a valid principal with the wrong role.
    assert_eq!(response.status(), 403);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Insufficient permissions");
}

#[tokio::test]
async fn an_admin_cannot_use_the_super_admin_only_routes() {
    let app = spawn_app().await;
    let super_token = app.super_admin_token().await;

    app.post_authed(
        "/api/admin/users/admin",
        &super_token,
        &TestApp::admin_create_user_body("carol", "USER"),
    )
    .await;
    let admin_token = app.login_token("carol", "password123").await;

    // Role sets are exact membership; ADMIN is not listed on this route.
    let response = app
        .post_authed(
            "/api/admin/users/admin",
            &admin_token,
            &TestApp::admin_create_user_body("frank", "USER"),
        )
        .await;
    assert_eq!(response.status(), 403);

    // But the shared create-user route lists ADMIN explicitly.
    let response = app
        .post_authed(
            "/api/admin/users",
            &admin_token,
            &TestApp::admin_create_user_body("frank", "USER"),
        )
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn an_admin_cannot_create_another_admin_even_past_the_role_gate() {
    let app = spawn_app().await;
    let super_token = app.super_admin_token().await;

    app.post_authed(
        "/api/admin/users/admin",
        &super_token,
        &TestApp::admin_create_user_body("carol", "USER"),
    )
    .await;
    let admin_token = app.login_token("carol", "password123").await;

    // The shared route admits ADMIN, but the business rule still refuses
    // admin creation by a non-super-admin.
    let response = app
        .post_authed(
            "/api/admin/users",
            &admin_token,
            &TestApp::admin_create_user_body("grace", "ADMIN"),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Only Super Admin can create Admin users");
}

#[tokio::test]
async fn changing_a_role_publishes_the_previous_and_new_role() {
    let app = spawn_app().await;
    let token = app.super_admin_token().await;

    app.post_authed(
        "/api/admin/users",
        &token,
        &TestApp::admin_create_user_body("bob", "USER"),
    )
    .await;

    let response = app
        .put_authed(
            "/api/admin/users/role",
            &token,
            &json!({ "username": "bob", "role": "ADMIN" }),
        )
        .await;
    assert_eq!(response.status(), 200);

    let records = app.transport.sent_to("user-events");
    // First the creation event, then the role change, in send order.
    assert_eq!(records.len(), 2);
    let event: Value = serde_json::from_str(&records[1].payload).unwrap();
    assert_eq!(event["eventType"], "USER_ROLE_CHANGED");
    assert_eq!(event["username"], "bob");
    assert_eq!(event["previousRole"], "USER");
    assert_eq!(event["newRole"], "ADMIN");
    assert_eq!(event["changedBy"], "superadmin");
    assert_eq!(records[1].key, event["userId"].to_string());
    assert!(records[1].offset > records[0].offset);
}

#[tokio::test]
async fn nobody_can_be_promoted_to_super_admin() {
    let app = spawn_app().await;
    let token = app.super_admin_token().await;

    app.post_authed(
        "/api/admin/users",
        &token,
        &TestApp::admin_create_user_body("bob", "USER"),
    )
    .await;

    let response = app
        .put_authed(
            "/api/admin/users/role",
            &token,
            &json!({ "username": "bob", "role": "SUPER_ADMIN" }),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Cannot promote users to Super Admin");
    assert_eq!(app.transport.sent_to("user-events").len(), 1);
}
