//! Request context carrying the calling user and their role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use videotime_core::error::AppError;
use videotime_core::types::id::UserId;
use videotime_entity::user::UserRole;

/// Context for the current request.
///
/// Built from the identity the LMS gateway asserts and passed into
/// service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The calling user's ID.
    pub user_id: UserId,
    /// The caller's role.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self {
            user_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Context for administrative tooling running outside a request.
    /// The acting user is the nil UUID.
    pub fn system() -> Self {
        Self::new(UserId::from_uuid(Default::default()), UserRole::Admin)
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Fails unless the caller holds at least `role`.
    pub fn require_role(&self, role: UserRole) -> Result<(), AppError> {
        if self.role.has_at_least(&role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Requires {role} role, caller is {}",
                self.role
            )))
        }
    }

    /// Fails unless the caller is `owner` or an admin.
    pub fn require_owner_or_admin(&self, owner: UserId) -> Result<(), AppError> {
        if self.user_id == owner || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Watch sessions can only be changed by their owner",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_requirements() {
        let student = RequestContext::new(UserId::new(), UserRole::Student);
        assert!(student.require_role(UserRole::Student).is_ok());
        assert!(student.require_role(UserRole::Teacher).is_err());
        assert!(RequestContext::system().require_role(UserRole::Admin).is_ok());
    }

    #[test]
    fn test_owner_or_admin() {
        let owner = UserId::new();
        let student = RequestContext::new(owner, UserRole::Student);
        assert!(student.require_owner_or_admin(owner).is_ok());
        assert!(student.require_owner_or_admin(UserId::new()).is_err());

        let admin = RequestContext::new(UserId::new(), UserRole::Admin);
        assert!(admin.require_owner_or_admin(owner).is_ok());
    }
}
