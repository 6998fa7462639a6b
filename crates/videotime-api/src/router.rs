//! Route definitions for the Video Time HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router without the outer middleware layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(session_routes())
        .merge(module_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Player calls during playback
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(handlers::sessions::create_session))
        .route("/sessions/{id}/tick", post(handlers::sessions::tick))
        .route("/sessions/{id}/position", post(handlers::sessions::position))
        .route("/sessions/{id}/finish", post(handlers::sessions::finish))
        .route("/sessions/{id}/seek", post(handlers::sessions::seek))
}

/// Per-instance progress, tabs and configuration
fn module_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/modules/{id}",
            get(handlers::modules::get_module)
                .put(handlers::modules::upsert_module)
                .delete(handlers::modules::delete_module),
        )
        .route("/modules/{id}/resume", get(handlers::modules::resume))
        .route("/modules/{id}/view", post(handlers::modules::view))
        .route("/modules/{id}/completion", get(handlers::modules::completion))
        .route("/modules/{id}/summary", get(handlers::modules::summary))
        .route("/modules/{id}/tabs", get(handlers::modules::tabs))
        .route(
            "/modules/{id}/sessions",
            get(handlers::modules::list_sessions)
                .delete(handlers::modules::erase_module_sessions),
        )
        .route(
            "/modules/{id}/users/{user_id}/sessions",
            axum::routing::delete(handlers::modules::erase_module_user_sessions),
        )
}

/// Privacy erasure
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/{id}/sessions",
        axum::routing::delete(handlers::users::erase_sessions),
    )
}

/// Liveness and database reachability
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
