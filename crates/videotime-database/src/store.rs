//! Storage traits for watch sessions and instance settings.

use async_trait::async_trait;

use videotime_core::result::AppResult;
use videotime_core::types::id::{ModuleId, UserId, WatchSessionId};
use videotime_core::types::pagination::{PageRequest, PageResponse};
use videotime_entity::instance::{UpsertVideoInstance, VideoInstance};
use videotime_entity::watch::WatchSession;

/// Persistence for watch sessions.
///
/// Every mutating method is a single atomic read-modify-write: concurrent
/// calls for the same session never lose an update, and the monotonic
/// rules of [`WatchSession`] hold regardless of arrival order. Mutations
/// return `None` when the session does not exist.
#[async_trait]
pub trait WatchSessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a session by ID.
    async fn find_by_id(&self, id: WatchSessionId) -> AppResult<Option<WatchSession>>;

    /// Find the most recently started session for a user on an instance.
    async fn find_latest(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<Option<WatchSession>>;

    /// All sessions of a user on an instance, oldest first.
    async fn find_all_for(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<Vec<WatchSession>>;

    /// Sessions on an instance, most recent first.
    async fn list_by_module(
        &self,
        module_id: ModuleId,
        page: PageRequest,
    ) -> AppResult<PageResponse<WatchSession>>;

    /// Return the open session for the pair, creating it if none exists.
    ///
    /// The flag is `true` when this call created the session. Concurrent
    /// callers for the same pair receive the same session.
    async fn get_or_create_open(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<(WatchSession, bool)>;

    /// Add watched seconds.
    async fn add_watch_time(
        &self,
        id: WatchSessionId,
        elapsed_seconds: f64,
    ) -> AppResult<Option<WatchSession>>;

    /// Raise the furthest percent and set the current position.
    async fn record_position(
        &self,
        id: WatchSessionId,
        percent: f64,
        current_time: f64,
    ) -> AppResult<Option<WatchSession>>;

    /// Mark the session finished.
    ///
    /// The flag is `true` only for the call that moved the session out of
    /// `in_progress`; repeated or concurrent finishes get `false`.
    async fn record_finish(
        &self,
        id: WatchSessionId,
        final_percent: f64,
        final_time: f64,
    ) -> AppResult<Option<(WatchSession, bool)>>;

    /// Delete every session of a user. Returns the number removed.
    async fn delete_for_user(&self, user_id: UserId) -> AppResult<u64>;

    /// Delete every session on an instance. Returns the number removed.
    async fn delete_for_module(&self, module_id: ModuleId) -> AppResult<u64>;

    /// Delete a user's sessions on one instance. Returns the number removed.
    async fn delete_for_module_user(&self, module_id: ModuleId, user_id: UserId)
    -> AppResult<u64>;
}

/// Persistence for video instance settings.
#[async_trait]
pub trait InstanceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an instance by ID.
    async fn find(&self, id: ModuleId) -> AppResult<Option<VideoInstance>>;

    /// Create or replace an instance's settings.
    async fn upsert(&self, id: ModuleId, data: &UpsertVideoInstance) -> AppResult<VideoInstance>;

    /// Delete an instance. Returns `true` if it existed.
    async fn delete(&self, id: ModuleId) -> AppResult<bool>;
}
