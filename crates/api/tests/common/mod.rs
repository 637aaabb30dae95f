#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use glocal_api::auth::jwt::{generate_token, JwtConfig};
use glocal_api::auth::password::hash_password;
use glocal_api::config::ServerConfig;
use glocal_api::router::build_app_router;
use glocal_api::state::AppState;
use glocal_core::roles::Role;
use glocal_db::models::user::{CreateUser, User};
use glocal_db::repositories::UserRepo;

/// Plaintext password of every user seeded through [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the application router exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a user directly, bypassing the register endpoint.
pub async fn create_user(pool: &PgPool, email: &str, role: Role) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            first_name: "Test".to_string(),
            last_name: role.as_str().to_lowercase(),
            role,
            avatar: None,
        },
    )
    .await
    .expect("user creation should succeed")
}

pub fn token_for(user: &User) -> String {
    generate_token(user.id, &user.email, user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Seed a user with the given role and return it with a bearer token.
pub async fn user_with_token(pool: &PgPool, role: Role) -> (User, String) {
    let email = format!("{}@test.com", role.as_str().to_lowercase());
    let user = create_user(pool, &email, role).await;
    let token = token_for(&user);
    (user, token)
}

/// Create a content item through the API as the given user; returns `data`.
pub async fn create_content(pool: &PgPool, token: &str, body: Value) -> Value {
    let response = post_json_auth(build_test_app(pool.clone()), "/api/v1/contents", token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
