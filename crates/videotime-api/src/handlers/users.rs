//! Per-user administration.

use axum::Json;
use axum::extract::{Path, State};

use videotime_core::types::id::UserId;

use crate::error::ApiResult;
use crate::dto::response::{ApiResponse, ErasureResponse};
use crate::extractors::AuthUser;
use crate::extractors::path::parse_id;
use crate::state::AppState;

/// DELETE /api/users/{id}/sessions
pub async fn erase_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ErasureResponse>>> {
    let user_id: UserId = parse_id(&id)?;
    let deleted = state.privacy.erase_user(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(ErasureResponse { deleted })))
}
