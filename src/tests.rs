// Handler tests for the Auth API
// Drive the full router over an in-memory user store

use super::*;
use crate::auth::{password::fast_password_service, repository::InMemoryUserStore, TokenService};
use axum::{
    body::Bytes,
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
};
use axum_test::TestServer;
use serde_json::{json, Value};

// ============================================================================
// Test Helpers
// ============================================================================

const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

fn create_test_app(users_list_requires_auth: bool) -> TestServer {
    let auth_service = AuthService::new(
        Arc::new(InMemoryUserStore::default()),
        fast_password_service(),
        TokenService::new(TEST_SECRET),
    );
    let state = AppState {
        auth_service: Arc::new(auth_service),
    };

    TestServer::new(create_router(state, users_list_requires_auth)).unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

async fn register(server: &TestServer, email: &str, password: &str) -> axum_test::TestResponse {
    server
        .post("/auth/register")
        .json(&json!({ "email": email, "password": password }))
        .await
}

async fn login(server: &TestServer, email: &str, password: &str) -> axum_test::TestResponse {
    server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await
}

// ============================================================================
// POST /auth/register
// ============================================================================

#[tokio::test]
async fn test_register_returns_public_projection() {
    let server = create_test_app(false);

    let response = register(&server, "a@x.com", "pw1").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body, json!({ "id": 1, "email": "a@x.com" }));
}

#[tokio::test]
async fn test_register_duplicate_email_is_generic_400() {
    let server = create_test_app(false);
    register(&server, "a@x.com", "pw1").await;

    let response = register(&server, "a@x.com", "pw2").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Email already exists");
    assert_eq!(body["error_code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let server = create_test_app(false);

    let response = register(&server, "not-an-email", "pw1").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_register_rejects_empty_password() {
    let server = create_test_app(false);

    let response = register(&server, "a@x.com", "").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_missing_field_uses_error_contract() {
    let server = create_test_app(false);

    let response = server
        .post("/auth/register")
        .json(&json!({ "email": "a@x.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("password"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_register_wrong_field_type_uses_error_contract() {
    let server = create_test_app(false);

    let response = server
        .post("/auth/register")
        .json(&json!({ "email": "a@x.com", "password": 42 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "BAD_REQUEST");
}

// ============================================================================
// POST /auth/login
// ============================================================================

#[tokio::test]
async fn test_login_malformed_json_uses_error_contract() {
    let server = create_test_app(false);

    let response = server
        .post("/auth/login")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"email\": \"a@x.com\","))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "BAD_REQUEST");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_login_without_json_content_type_uses_error_contract() {
    let server = create_test_app(false);

    let response = server
        .post("/auth/login")
        .text(r#"{"email":"a@x.com","password":"pw1"}"#)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error_code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_login_returns_verifiable_token() {
    let server = create_test_app(false);
    register(&server, "a@x.com", "pw1").await;

    let response = login(&server, "a@x.com", "pw1").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let token = body["access_token"].as_str().expect("access_token missing");

    let claims = TokenService::new(TEST_SECRET).validate_access_token(token).unwrap();
    assert_eq!(claims.sub, 1);
    assert_eq!(claims.exp - claims.iat, 86_400);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = create_test_app(false);
    register(&server, "a@x.com", "pw1").await;

    let wrong_password = login(&server, "a@x.com", "wrong").await;
    let unknown_email = login(&server, "nobody@x.com", "pw1").await;

    assert_eq!(wrong_password.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status_code(), StatusCode::BAD_REQUEST);

    let a: Value = wrong_password.json();
    let b: Value = unknown_email.json();
    assert_eq!(a["message"], "Invalid credentials");
    assert_eq!(a["message"], b["message"]);
    assert_eq!(a["error_code"], b["error_code"]);
}

// ============================================================================
// GET /auth/users
// ============================================================================

#[tokio::test]
async fn test_open_user_list_never_exposes_hashes() {
    let server = create_test_app(false);
    register(&server, "a@x.com", "pw1").await;
    register(&server, "b@x.com", "pw2").await;

    let response = server.get("/auth/users").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!([
            { "id": 1, "email": "a@x.com" },
            { "id": 2, "email": "b@x.com" }
        ])
    );
}

#[tokio::test]
async fn test_gated_user_list_requires_token() {
    let server = create_test_app(true);
    register(&server, "a@x.com", "pw1").await;

    let response = server.get("/auth/users").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/auth/users")
        .add_header(AUTHORIZATION, bearer("garbage"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gated_user_list_accepts_login_token() {
    let server = create_test_app(true);
    register(&server, "a@x.com", "pw1").await;

    let body: Value = login(&server, "a@x.com", "pw1").await.json();
    let token = body["access_token"].as_str().unwrap().to_string();

    let response = server
        .get("/auth/users")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!([{ "id": 1, "email": "a@x.com" }]));
}

#[tokio::test]
async fn test_gated_user_list_rejects_foreign_signature() {
    let server = create_test_app(true);
    register(&server, "a@x.com", "pw1").await;

    let forged = TokenService::new("some_other_secret")
        .generate_access_token(1, "a@x.com")
        .unwrap();

    let response = server
        .get("/auth/users")
        .add_header(AUTHORIZATION, bearer(&forged))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// End-to-end
// ============================================================================

#[tokio::test]
async fn test_reference_scenario_over_http() {
    let server = create_test_app(false);

    let first = register(&server, "a@x.com", "pw1").await;
    assert_eq!(first.status_code(), StatusCode::CREATED);
    assert_eq!(first.json::<Value>(), json!({ "id": 1, "email": "a@x.com" }));

    let second = register(&server, "a@x.com", "pw2").await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);

    let ok = login(&server, "a@x.com", "pw1").await;
    assert_eq!(ok.status_code(), StatusCode::CREATED);
    assert!(ok.json::<Value>()["access_token"].is_string());

    let bad = login(&server, "a@x.com", "wrong").await;
    assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);

    let users = server.get("/auth/users").await;
    assert_eq!(users.json::<Value>(), json!([{ "id": 1, "email": "a@x.com" }]));
}

#[tokio::test]
async fn test_openapi_document_lists_auth_routes() {
    let server = create_test_app(false);

    let response = server.get("/api-docs/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let doc: Value = response.json();
    for path in ["/auth/register", "/auth/login", "/auth/users"] {
        assert!(doc["paths"].get(path).is_some(), "missing {}", path);
    }
}
