mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{spawn, spawn_with, test_config};

#[tokio::test]
async fn register_same_username_twice_conflicts() {
    let app = spawn().await;
    let body = json!({ "username": "alice", "password": "secret1" });

    let (status, profile) = app
        .send("POST", "/api/auth/register", None, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(profile["username"], "alice");
    assert_eq!(profile["role"], "user");
    assert!(profile.get("password_hash").is_none());

    let (status, err) = app
        .send("POST", "/api/auth/register", None, Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["message"], "user already exists");
}

#[tokio::test]
async fn register_enforces_length_limits() {
    let app = spawn().await;

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "al", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "alice", "password": "12345" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "a".repeat(65), "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_look_identical() {
    let app = spawn().await;
    app.user_token("alice").await;

    let wrong_password = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "not-it" })),
        )
        .await;
    let unknown_user = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "nobody", "password": "not-it" })),
        )
        .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn login_returns_token_with_day_lifetime() {
    let app = spawn().await;
    app.user_token("alice").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["expires_in"], 86_400);
}

#[tokio::test]
async fn protected_routes_need_a_valid_bearer_token() {
    let app = spawn().await;

    let (status, _) = app.send("GET", "/api/activities", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send("GET", "/api/activities", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("GET", "/api/favorites", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_reflects_token_identity() {
    let app = spawn().await;
    let token = app.admin_token().await;

    let (status, me) = app.send("GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "admin");
    assert_eq!(me["role"], "admin");
}

#[tokio::test]
async fn auth_endpoints_are_rate_limited() {
    let config = moodpick_api::config::Config {
        auth_rate_limit_max: 2,
        ..test_config()
    };
    let app = spawn_with(config).await;
    let creds = json!({ "username": "nobody", "password": "whatever" });

    for _ in 0..2 {
        let (status, _) = app
            .send("POST", "/api/auth/login", None, Some(creds.clone()))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, _) = app
        .send("POST", "/api/auth/login", None, Some(creds))
        .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = spawn().await;

    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.send("GET", "/readyz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "ok");
}

#[tokio::test]
async fn missing_password_is_bad_request() {
    let app = spawn().await;

    for uri in ["/api/auth/register", "/api/auth/login"] {
        let (status, body) = app
            .send("POST", uri, None, Some(json!({ "username": "bob" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"]["code"], 400, "{uri}");
    }
}
