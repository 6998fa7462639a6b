//! Video instance handlers: resume, progress, completion, tabs and
//! configuration.

use axum::Json;
use axum::extract::{Path, Query, State};

use videotime_core::error::AppError;
use videotime_core::result::AppResult;
use videotime_core::types::completion::CompletionStatus;
use videotime_core::types::id::{ModuleId, UserId};
use videotime_core::types::pagination::PageResponse;
use videotime_entity::instance::{EffectiveSettings, VideoInstance};
use videotime_entity::user::UserRole;
use videotime_entity::watch::{WatchSession, WatchSummary};
use videotime_plugin::{PlayerEmbed, RenderedTab, TabContext};

use crate::error::{ApiError, ApiResult};
use crate::dto::request::{ProgressQuery, ResumeQuery, UpsertInstanceRequest};
use crate::dto::response::{ApiResponse, ErasureResponse, InstanceResponse, ResumeResponse};
use crate::extractors::path::parse_id;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// GET /api/modules/{id}/resume?duration=
pub async fn resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<ResumeQuery>,
) -> ApiResult<Json<ApiResponse<ResumeResponse>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let seconds = state
        .tracker
        .compute_resume_time(module_id, auth.user_id, query.duration)
        .await?;
    Ok(Json(ApiResponse::ok(ResumeResponse { seconds })))
}

/// POST /api/modules/{id}/view
pub async fn view(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let module_id: ModuleId = parse_id(&id)?;
    state.tracker.log_viewed(module_id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// GET /api/modules/{id}/completion
pub async fn completion(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<ProgressQuery>,
) -> ApiResult<Json<ApiResponse<CompletionStatus>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let user_id = progress_subject(&auth, &query)?;
    let status = state.tracker.completion_status(module_id, user_id).await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// GET /api/modules/{id}/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<ProgressQuery>,
) -> ApiResult<Json<ApiResponse<WatchSummary>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let user_id = progress_subject(&auth, &query)?;
    let summary = state.tracker.summarize(module_id, user_id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/modules/{id}/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<WatchSession>>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let page = state
        .tracker
        .list_sessions(&auth, module_id, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/modules/{id}/tabs
pub async fn tabs(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<RenderedTab>>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let settings = state.instances.effective(module_id).await?;
    let name = state
        .instances
        .get(module_id)
        .await?
        .map(|i| i.name)
        .unwrap_or_default();
    let player = embed_for(&state, &settings).await?;

    let ctx = TabContext {
        name: &name,
        settings: &settings,
        player: player.as_ref(),
    };
    let tabs = state.plugins.plugin_registry().render_tabs(&ctx).await;
    Ok(Json(ApiResponse::ok(tabs)))
}

/// GET /api/modules/{id}
pub async fn get_module(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<InstanceResponse>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let instance = state.instances.get(module_id).await?;
    let effective = state.instances.effective(module_id).await?;
    let player = embed_for(&state, &effective).await?;
    Ok(Json(ApiResponse::ok(InstanceResponse {
        instance,
        effective,
        player,
    })))
}

/// PUT /api/modules/{id}
pub async fn upsert_module(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpsertInstanceRequest>,
) -> ApiResult<Json<ApiResponse<VideoInstance>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let data = req.into_upsert(state.instances.defaults());
    let instance = state.instances.upsert(&auth, module_id, data).await?;
    Ok(Json(ApiResponse::ok(instance)))
}

/// DELETE /api/modules/{id}
pub async fn delete_module(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let module_id: ModuleId = parse_id(&id)?;
    if !state.instances.delete(&auth, module_id).await? {
        return Err(ApiError::from(AppError::not_found(format!(
            "Video instance {module_id} is not configured"
        ))));
    }
    Ok(Json(ApiResponse::ok(())))
}

/// DELETE /api/modules/{id}/sessions
pub async fn erase_module_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ErasureResponse>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let deleted = state.privacy.erase_module(&auth, module_id).await?;
    Ok(Json(ApiResponse::ok(ErasureResponse { deleted })))
}

/// DELETE /api/modules/{id}/users/{user_id}/sessions
pub async fn erase_module_user_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<ErasureResponse>>> {
    let module_id: ModuleId = parse_id(&id)?;
    let user_id: UserId = parse_id(&user_id)?;
    let deleted = state
        .privacy
        .erase_module_user(&auth, module_id, user_id)
        .await?;
    Ok(Json(ApiResponse::ok(ErasureResponse { deleted })))
}

/// The user whose progress is read. Reading someone else's needs teacher role.
fn progress_subject(auth: &AuthUser, query: &ProgressQuery) -> AppResult<UserId> {
    match query.user_id {
        Some(user_id) if user_id != auth.user_id => {
            auth.require_role(UserRole::Teacher)?;
            Ok(user_id)
        }
        _ => Ok(auth.user_id),
    }
}

/// Embed data from the first player that supports the instance's URL.
async fn embed_for(state: &AppState, settings: &EffectiveSettings) -> AppResult<Option<PlayerEmbed>> {
    if settings.video_url.is_empty() {
        return Ok(None);
    }
    match state
        .plugins
        .plugin_registry()
        .player_for(&settings.video_url)
        .await
    {
        Some(player) => player.embed(settings).map(Some),
        None => Ok(None),
    }
}
