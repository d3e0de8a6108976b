use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;

use auth::rate_limit::RateLimitState;
use config::Config;
use db::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        let rate_limiter = RateLimitState::new(
            config.auth_rate_limit_max,
            config.auth_rate_limit_window_secs,
        );
        Self {
            store,
            config: Arc::new(config),
            rate_limiter,
        }
    }
}

/// Full application router. Auth routes read the peer address, so serve it
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(auth_routes);

    let catalog_edit_routes = Router::new()
        .route(
            "/api/activities",
            post(handlers::activities::create_activity),
        )
        .route(
            "/api/activities/:id",
            put(handlers::activities::update_activity)
                .delete(handlers::activities::delete_activity),
        )
        .route_layer(middleware::from_fn(auth::middleware::require_catalog_editor));

    // Catalog edits go in first so the read routes added below keep the
    // unguarded method fallback.
    let protected_routes = Router::new()
        .merge(catalog_edit_routes)
        .route("/api/users/me", get(handlers::auth::me))
        // Activities
        .route(
            "/api/activities",
            get(handlers::activities::list_activities),
        )
        .route(
            "/api/activities/:id",
            get(handlers::activities::get_activity),
        )
        // Favorites
        .route("/api/favorites", get(handlers::favorites::list_favorites))
        .route(
            "/api/favorites/:activity_id",
            post(handlers::favorites::add_favorite).delete(handlers::favorites::remove_favorite),
        )
        // History
        .route("/api/history", get(handlers::history::list_history))
        .route(
            "/api/history/:activity_id",
            post(handlers::history::add_history),
        )
        // Mood stats
        .route("/api/mood-stats", post(handlers::mood_stats::save_mood_stat))
        .route(
            "/api/users/me/mood-stats",
            get(handlers::mood_stats::list_mood_stats),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let allowed_origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allow_credentials(true);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
