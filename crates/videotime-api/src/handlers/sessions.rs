//! Watch session handlers: the calls the player makes while a video plays.

use axum::Json;
use axum::extract::{Path, State};

use videotime_core::types::id::WatchSessionId;
use videotime_service::SeekDecision;

use crate::error::ApiResult;
use crate::dto::request::{
    CreateSessionRequest, FinishRequest, PositionRequest, SeekRequest, TickRequest,
};
use crate::dto::response::{ApiResponse, SessionResponse};
use crate::extractors::path::parse_id;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateSessionRequest>,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let session = state
        .tracker
        .get_or_create_session(req.module_id, auth.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(session.into())))
}

/// POST /api/sessions/{id}/tick
pub async fn tick(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<TickRequest>,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let id: WatchSessionId = parse_id(&id)?;
    let session = state
        .tracker
        .record_tick(&auth, id, req.elapsed_seconds)
        .await?;
    Ok(Json(ApiResponse::ok(session.into())))
}

/// POST /api/sessions/{id}/position
pub async fn position(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<PositionRequest>,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let id: WatchSessionId = parse_id(&id)?;
    let session = state
        .tracker
        .record_position(&auth, id, req.percent, req.current_time)
        .await?;
    Ok(Json(ApiResponse::ok(session.into())))
}

/// POST /api/sessions/{id}/finish
pub async fn finish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<FinishRequest>,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let id: WatchSessionId = parse_id(&id)?;
    let session = state
        .tracker
        .record_finish(&auth, id, req.final_percent, req.final_time)
        .await?;
    Ok(Json(ApiResponse::ok(session.into())))
}

/// POST /api/sessions/{id}/seek
pub async fn seek(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<SeekRequest>,
) -> ApiResult<Json<ApiResponse<SeekDecision>>> {
    let id: WatchSessionId = parse_id(&id)?;
    let decision = state.tracker.check_seek(&auth, id, req.percent).await?;
    Ok(Json(ApiResponse::ok(decision)))
}
