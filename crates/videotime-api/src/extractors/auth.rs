//! `AuthUser` extractor: reads the identity asserted by the LMS gateway.
//!
//! Authentication happens upstream. The gateway forwards the caller as
//! `x-user-id` (UUID) and `x-user-role` (`admin`, `teacher` or
//! `student`); a missing role means `student`.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use videotime_core::error::AppError;
use videotime_core::types::id::UserId;
use videotime_entity::user::UserRole;
use videotime_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's user ID.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extracted caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuthUser(context_from_headers(&parts.headers)?))
    }
}

/// Build a request context from gateway headers.
pub fn context_from_headers(headers: &HeaderMap) -> Result<RequestContext, AppError> {
    let user_id = header_str(headers, USER_ID_HEADER)?
        .ok_or_else(|| AppError::authentication("Missing x-user-id header"))?;
    let user_id: UserId = user_id
        .parse()
        .map_err(|_| AppError::authentication(format!("Invalid x-user-id header: {user_id}")))?;

    let role = match header_str(headers, USER_ROLE_HEADER)? {
        Some(role) => role.parse::<UserRole>()?,
        None => UserRole::Student,
    };

    Ok(RequestContext::new(user_id, role))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, AppError> {
    headers
        .get(name)
        .map(|v| {
            v.to_str()
                .map(str::trim)
                .map_err(|_| AppError::authentication(format!("Header {name} is not valid ASCII")))
        })
        .transpose()
}
