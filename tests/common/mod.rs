//! Shared helpers for the integration tests.
//!
//! Every test gets its own in-memory SQLite database, so tests never see
//! each other's users or tasks.

#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, App};
use chrono::Duration;
use serde_json::{json, Value};
use zadania::{auth::JwtKeys, db, routes, AppState};

pub const TEST_SECRET: &str = "integration_test_secret";

pub fn test_keys() -> JwtKeys {
    JwtKeys::new(TEST_SECRET, Duration::days(7))
}

/// Builds the full application on a fresh in-memory database.
pub async fn spawn_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let pool = db::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    let state = AppState::new(pool, test_keys());

    test::init_service(
        App::new()
            .wrap(Logger::default())
            .configure(routes::config(state)),
    )
    .await
}

/// Sends a request and returns its status and JSON body (`Value::Null` when empty).
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&body).into_owned())
        })
    };
    (status, json)
}

pub fn with_token(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
}

pub async fn register(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": username, "password": password }));
    if let Some(token) = token {
        req = with_token(req, token);
    }
    send(app, req).await
}

/// Logs in and returns the token, panicking if the login fails.
pub async fn login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Login failed. Body: {}", body);
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

/// Registers the bootstrap admin and returns its token.
pub async fn bootstrap_admin(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    let (status, body) = register(app, username, password, None).await;
    assert_eq!(status, StatusCode::OK, "Bootstrap failed. Body: {}", body);
    login(app, username, password).await
}

pub async fn create_task(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    token: &str,
    title: &str,
) -> Value {
    let req = with_token(
        test::TestRequest::post()
            .uri("/api/zadania")
            .set_json(json!({ "tytul": title, "tresc": "body", "status": "open" })),
        token,
    );
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "Create failed. Body: {}", body);
    body
}
