//! Deletes watch sessions on request. Admin only.

use std::sync::Arc;

use tracing::info;

use videotime_core::result::AppResult;
use videotime_core::types::id::{ModuleId, UserId};
use videotime_database::WatchSessionStore;
use videotime_entity::user::UserRole;

use crate::context::RequestContext;

/// Erases watch sessions for users, instances, or both.
#[derive(Debug, Clone)]
pub struct PrivacyService {
    sessions: Arc<dyn WatchSessionStore>,
}

impl PrivacyService {
    /// Creates a new privacy service.
    pub fn new(sessions: Arc<dyn WatchSessionStore>) -> Self {
        Self { sessions }
    }

    /// Delete every session of a user. Returns the number deleted.
    pub async fn erase_user(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<u64> {
        ctx.require_role(UserRole::Admin)?;
        let deleted = self.sessions.delete_for_user(user_id).await?;
        info!(user_id = %user_id, actor_id = %ctx.user_id, deleted, "Erased user watch data");
        Ok(deleted)
    }

    /// Delete a user's sessions on one instance.
    pub async fn erase_module_user(
        &self,
        ctx: &RequestContext,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<u64> {
        ctx.require_role(UserRole::Admin)?;
        let deleted = self
            .sessions
            .delete_for_module_user(module_id, user_id)
            .await?;
        info!(
            module_id = %module_id,
            user_id = %user_id,
            actor_id = %ctx.user_id,
            deleted,
            "Erased user watch data on module"
        );
        Ok(deleted)
    }

    /// Delete every session on an instance.
    pub async fn erase_module(&self, ctx: &RequestContext, module_id: ModuleId) -> AppResult<u64> {
        ctx.require_role(UserRole::Admin)?;
        let deleted = self.sessions.delete_for_module(module_id).await?;
        info!(module_id = %module_id, actor_id = %ctx.user_id, deleted, "Erased module watch data");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use videotime_core::error::ErrorKind;
    use videotime_database::memory::MemoryWatchSessionStore;

    use super::*;

    #[tokio::test]
    async fn test_erasure_is_admin_only_and_counts() {
        let store = Arc::new(MemoryWatchSessionStore::new());
        let (m1, m2) = (ModuleId::new(), ModuleId::new());
        let user_id = UserId::new();
        store.get_or_create_open(m1, user_id).await.unwrap();
        store.get_or_create_open(m2, user_id).await.unwrap();
        store.get_or_create_open(m2, UserId::new()).await.unwrap();

        let privacy = PrivacyService::new(store.clone());

        let teacher = RequestContext::new(UserId::new(), UserRole::Teacher);
        let err = privacy.erase_user(&teacher, user_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let admin = RequestContext::system();
        assert_eq!(privacy.erase_module_user(&admin, m1, user_id).await.unwrap(), 1);
        assert_eq!(privacy.erase_user(&admin, user_id).await.unwrap(), 1);
        assert_eq!(privacy.erase_module(&admin, m2).await.unwrap(), 1);
        assert!(store.is_empty());
    }
}
