#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use moodpick_api::config::Config;
use moodpick_api::db::{seed, MemoryStore};
use moodpick_api::AppState;

pub const ADMIN_PASSWORD: &str = "admin-test-pass";

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        jwt_secret: "integration-secret".into(),
        jwt_ttl_secs: 24 * 60 * 60,
        admin_password: ADMIN_PASSWORD.into(),
        auth_rate_limit_max: 1_000,
        auth_rate_limit_window_secs: 60,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub async fn spawn() -> TestApp {
    spawn_with(test_config()).await
}

/// Seeded store (admin + starter catalog) behind the full router.
pub async fn spawn_with(config: Config) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    seed::seed(store.as_ref(), &config.admin_password)
        .await
        .expect("seed");

    let state = AppState::new(store.clone(), config);
    let router = moodpick_api::router(state)
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

    TestApp { router, store }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Registers a regular user and returns a token for it.
    pub async fn user_token(&self, username: &str) -> String {
        let (status, _) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({ "username": username, "password": "secret1" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        self.login(username, "secret1").await
    }

    pub async fn admin_token(&self) -> String {
        self.login("admin", ADMIN_PASSWORD).await
    }

    /// Id of a live activity by name.
    pub async fn activity_id(&self, token: &str, name: &str) -> String {
        let (_, list) = self.send("GET", "/api/activities", Some(token), None).await;
        list.as_array()
            .unwrap()
            .iter()
            .find(|a| a["name"] == name)
            .unwrap_or_else(|| panic!("no activity named {name}"))["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect()
}
