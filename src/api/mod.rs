use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use time;

use crate::state::AppState;

pub mod auth;
mod error;
mod recipes;
mod status;
mod types;

pub use error::ApiError;
pub use types::*;

/// Build the HTTP application. Sessions are persisted next to the app data in
/// SQLite, so a restart does not sign everyone out.
pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let session_store = SqliteStore::new(state.store.sqlite_pool());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.server.session_ttl_minutes,
        )));

    let cors_origins = &state.config.server.cors_allowed_origins;
    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let app = Router::new()
        .merge(create_protected_router(state.clone()))
        .route("/", get(recipes::list_recipes))
        .route("/recipe/{id}", get(recipes::recipe_detail))
        .route("/login", get(auth::session_state).post(auth::login))
        .route("/register", get(auth::session_state).post(auth::register))
        .fallback(not_found)
        .layer(session_layer)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/update-recipe-status", post(status::update_recipe_status))
        .route("/logout", post(auth::logout))
        .route_layer(middleware::from_fn_with_state(state, auth::require_auth))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
