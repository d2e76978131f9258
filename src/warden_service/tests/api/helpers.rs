use secrecy::Secret;
use serde_json::{Value, json};

use warden_adapters::{
    Argon2PasswordHasher, InMemoryEventTransport, InMemorySessionStore, InMemoryUserStore,
    InMemoryVerificationTokenStore, MockEmailClient,
};
use warden_application::EventTopics;
use warden_service::{seed_super_admin, UserManagementService};

pub const SUPER_ADMIN_PASSWORD: &str = "superadmin123";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub email: MockEmailClient,
    pub transport: InMemoryEventTransport,
}

pub async fn spawn_app() -> TestApp {
    let users = InMemoryUserStore::new();
    let sessions = InMemorySessionStore::new();
    let verification_tokens = InMemoryVerificationTokenStore::new();
    let email = MockEmailClient::new();
    let transport = InMemoryEventTransport::new();
    let hasher = Argon2PasswordHasher::new();

    seed_super_admin(
        &users,
        &hasher,
        &Secret::from(SUPER_ADMIN_PASSWORD.to_string()),
    )
    .await
    .expect("failed to seed super admin");

    let service = UserManagementService::new(
        users,
        sessions,
        verification_tokens,
        email.clone(),
        hasher,
        transport.clone(),
        EventTopics::default(),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let address = format!("http://{}", listener.local_addr().unwrap());
    let router = service.into_router(None);

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("server task failed");
    });

    TestApp {
        address,
        client: reqwest::Client::new(),
        email,
        transport,
    }
}

impl TestApp {
    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.address))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_authed(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.address))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn put_authed(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}{path}", self.address))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get_authed(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post(
            "/api/auth/login",
            &json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Logs in and returns the issued bearer token.
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), 200, "login failed for {username}");
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().expect("missing token").to_owned()
    }

    pub async fn super_admin_token(&self) -> String {
        self.login_token("superadmin", SUPER_ADMIN_PASSWORD).await
    }

    /// The verification emails put the token alone on the final line.
    pub async fn last_emailed_token(&self) -> String {
        let sent = self.email.sent().await;
        let last = sent.last().expect("no email was sent");
        last.content
            .lines()
            .last()
            .expect("email had no content")
            .trim()
            .to_owned()
    }

    pub fn admin_create_user_body(username: &str, role: &str) -> Value {
        json!({
            "username": username,
            "password": "password123",
            "firstName": "Managed",
            "lastName": "Account",
            "email": format!("{username}@example.com"),
            "phoneNumber": "555-0100",
            "address": "1 Test Street",
            "role": role,
        })
    }
}
