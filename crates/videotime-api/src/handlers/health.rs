//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use videotime_core::config::StoreBackend;
use videotime_core::error::AppError;

use crate::error::{ApiError, ApiResult};
use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Reports `503` when the configured database cannot be reached.
pub async fn health(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    let store = match state.config.tracker.store {
        StoreBackend::Postgres => "postgres",
        StoreBackend::Memory => "memory",
    };

    let database = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(true) => Some("connected".to_string()),
            Ok(false) | Err(_) => {
                warn!("Database health check failed");
                return Err(ApiError::from(AppError::service_unavailable(
                    "Database unreachable",
                )));
            }
        },
        None => None,
    };

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        store: store.to_string(),
        database,
    })))
}
