//! End-to-end API tests.
//!
//! Each test drives the complete router against a fresh temporary data
//! directory, so every request goes through routing, extractors, the auth
//! services, and the file-backed store.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use bookshelf_core::Email;
use bookshelf_server::app;
use bookshelf_server::config::Config;
use bookshelf_server::services::TokenService;
use bookshelf_server::state::AppState;
use bookshelf_server::store::Store;

const SECRET: &str = "test-signing-secret";

fn test_state(data_dir: &std::path::Path, secret: &str) -> AppState {
    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        data_dir: data_dir.to_path_buf(),
        jwt_secret: SecretString::from(secret.to_owned()),
        hash_time_cost: 1,
    };
    let store = Store::new(&config);
    AppState::new(config, store)
}

fn test_app(data_dir: &std::path::Path) -> Router {
    app(test_state(data_dir, SECRET))
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    auth: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = auth {
        builder = builder.header(header::AUTHORIZATION, token);
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn signup(app: &Router, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/auth/user/signup",
        Some(json!({"name": name, "email": email, "password": password})),
        None,
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/auth/user/login",
        Some(json!({"email": email, "password": password})),
        None,
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_created() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) = signup(&app, "A", "a@x.com", "p1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "CREATED");
    assert_eq!(body["message"], "User created successfully");
}

#[tokio::test]
async fn test_signup_duplicate_email_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    signup(&app, "A", "a@x.com", "p1").await;
    let (status, body) = signup(&app, "A again", "a@x.com", "p2").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_login_unknown_user_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) = login(&app, "ghost@x.com", "p1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "User Not Found");
}

#[tokio::test]
async fn test_login_wrong_password_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    signup(&app, "A", "a@x.com", "p1").await;
    let (status, body) = login(&app, "a@x.com", "p2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "Password Mismatch");
}

#[tokio::test]
async fn test_signup_login_add_product_list_users_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, _) = signup(&app, "A", "a@x.com", "p1").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(&app, "a@x.com", "p1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "OK");
    assert_eq!(body["success"], true);
    assert_eq!(body["username"], "a@x.com");
    let token = body["encryptedId"].as_str().unwrap().to_owned();
    assert!(!token.is_empty());

    let (status, body) = send(
        &app,
        "POST",
        "/api/user/add-product",
        Some(json!({"title": "B", "author": "C", "price": 9, "genre": "D"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "CREATED");
    assert_eq!(body["addedBY"], "a@x.com");

    // The product landed on disk, attributed to the verified account
    let raw = std::fs::read_to_string(dir.path().join("products.json")).unwrap();
    let products: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(products[0]["addedBy"], "a@x.com");
    assert_eq!(products[0]["title"], "B");

    let (status, body) = send(&app, "GET", "/auth/user/get-users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "OK");
    assert_eq!(body["data"][0]["email"], "a@x.com");

    // The stored hash is not the plaintext password
    let stored_hash = body["data"][0]["passwordHash"].as_str().unwrap();
    assert_ne!(stored_hash, "p1");
    assert!(stored_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_login_appends_credential_record() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    signup(&app, "A", "a@x.com", "p1").await;
    let (_, body) = login(&app, "a@x.com", "p1").await;
    let token = body["encryptedId"].as_str().unwrap();

    let raw = std::fs::read_to_string(dir.path().join("client.json")).unwrap();
    let log: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(log[0]["email"], "a@x.com");
    assert_eq!(log[0]["token"], token);

    // A second login appends; nothing is superseded
    login(&app, "a@x.com", "p1").await;
    let raw = std::fs::read_to_string(dir.path().join("client.json")).unwrap();
    let log: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(log.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_users_absent_store_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) = send(&app, "GET", "/auth/user/get-users", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "DATA_NOT_FOUND");
    assert_eq!(body["message"], "User file not found. Add a user first");
}

#[tokio::test]
async fn test_list_users_empty_store_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("users.json"), "[]").unwrap();
    let app = test_app(dir.path());

    let (status, body) = send(&app, "GET", "/auth/user/get-users", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "DATA_NOT_FOUND");
    assert_eq!(body["message"], "No users found");
}

#[tokio::test]
async fn test_add_product_rejects_bad_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());
    signup(&app, "A", "a@x.com", "p1").await;

    let product = json!({"title": "B", "author": "C", "price": 9, "genre": "D"});

    // Absent header
    let (status, body) = send(
        &app,
        "POST",
        "/api/user/add-product",
        Some(product.clone()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Invalid access token");

    // Garbage token
    let (status, _) = send(
        &app,
        "POST",
        "/api/user/add-product",
        Some(product.clone()),
        Some("garbage"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Token signed with a different secret
    let foreign = TokenService::new(SecretString::from("some-other-secret"))
        .issue(&Email::parse("a@x.com").unwrap())
        .unwrap();
    let (status, _) = send(
        &app,
        "POST",
        "/api/user/add-product",
        Some(product.clone()),
        Some(&foreign),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Validly signed token for an email with no user record
    let ghost = TokenService::new(SecretString::from(SECRET))
        .issue(&Email::parse("ghost@x.com").unwrap())
        .unwrap();
    let (status, _) = send(
        &app,
        "POST",
        "/api/user/add-product",
        Some(product),
        Some(&ghost),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // None of the rejected requests wrote anything
    assert!(!dir.path().join("products.json").exists());
}
