//! In-memory watch session store backed by `DashMap`.
//!
//! Mutations go through `get_mut`, which holds the shard lock for the
//! whole read-modify-write. The open-session index is only ever locked
//! before the session map, never after.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use videotime_core::result::AppResult;
use videotime_core::types::id::{ModuleId, UserId, WatchSessionId};
use videotime_core::types::pagination::{PageRequest, PageResponse};
use videotime_entity::watch::WatchSession;

use crate::store::WatchSessionStore;

/// In-memory watch session store.
///
/// Suitable for single-node deployments only.
#[derive(Debug, Default)]
pub struct MemoryWatchSessionStore {
    /// Session ID → session
    sessions: DashMap<WatchSessionId, WatchSession>,
    /// (module, user) → ID of the open session
    open: DashMap<(ModuleId, UserId), WatchSessionId>,
}

impl MemoryWatchSessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn mutate<F>(&self, id: WatchSessionId, apply: F) -> Option<WatchSession>
    where
        F: FnOnce(&mut WatchSession),
    {
        let mut entry = self.sessions.get_mut(&id)?;
        apply(entry.value_mut());
        Some(entry.value().clone())
    }

    fn open_session(&self, module_id: ModuleId, user_id: UserId) -> WatchSession {
        let session = WatchSession::start(module_id, user_id);
        self.sessions.insert(session.id, session.clone());
        debug!(session_id = %session.id, module_id = %module_id, user_id = %user_id, "Session opened");
        session
    }

    fn prune_open_index(&self) {
        self.open
            .retain(|_, id| self.sessions.get(id).is_some_and(|s| !s.is_finished()));
    }
}

#[async_trait]
impl WatchSessionStore for MemoryWatchSessionStore {
    async fn find_by_id(&self, id: WatchSessionId) -> AppResult<Option<WatchSession>> {
        Ok(self.sessions.get(&id).map(|r| r.value().clone()))
    }

    async fn find_latest(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<Option<WatchSession>> {
        Ok(self
            .sessions
            .iter()
            .filter(|r| r.module_id == module_id && r.user_id == user_id)
            .max_by_key(|r| (r.started_at, r.id))
            .map(|r| r.value().clone()))
    }

    async fn find_all_for(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<Vec<WatchSession>> {
        let mut sessions: Vec<WatchSession> = self
            .sessions
            .iter()
            .filter(|r| r.module_id == module_id && r.user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        sessions.sort_by_key(|s| (s.started_at, s.id));
        Ok(sessions)
    }

    async fn list_by_module(
        &self,
        module_id: ModuleId,
        page: PageRequest,
    ) -> AppResult<PageResponse<WatchSession>> {
        let mut sessions: Vec<WatchSession> = self
            .sessions
            .iter()
            .filter(|r| r.module_id == module_id)
            .map(|r| r.value().clone())
            .collect();
        sessions.sort_by(|a, b| (b.started_at, b.id).cmp(&(a.started_at, a.id)));

        let total = sessions.len() as u64;
        let items = sessions
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page, total))
    }

    async fn get_or_create_open(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<(WatchSession, bool)> {
        match self.open.entry((module_id, user_id)) {
            Entry::Occupied(mut entry) => {
                let current = self
                    .sessions
                    .get(entry.get())
                    .filter(|s| !s.is_finished())
                    .map(|s| s.value().clone());

                if let Some(session) = current {
                    return Ok((session, false));
                }

                let session = self.open_session(module_id, user_id);
                entry.insert(session.id);
                Ok((session, true))
            }
            Entry::Vacant(entry) => {
                let session = self.open_session(module_id, user_id);
                entry.insert(session.id);
                Ok((session, true))
            }
        }
    }

    async fn add_watch_time(
        &self,
        id: WatchSessionId,
        elapsed_seconds: f64,
    ) -> AppResult<Option<WatchSession>> {
        Ok(self.mutate(id, |s| s.apply_tick(elapsed_seconds)))
    }

    async fn record_position(
        &self,
        id: WatchSessionId,
        percent: f64,
        current_time: f64,
    ) -> AppResult<Option<WatchSession>> {
        Ok(self.mutate(id, |s| s.apply_position(percent, current_time)))
    }

    async fn record_finish(
        &self,
        id: WatchSessionId,
        final_percent: f64,
        final_time: f64,
    ) -> AppResult<Option<(WatchSession, bool)>> {
        let finished = self.sessions.get_mut(&id).map(|mut entry| {
            let transitioned = !entry.is_finished();
            entry.apply_finish(final_percent, final_time);
            (entry.value().clone(), transitioned)
        });

        if let Some((session, _)) = &finished {
            self.open
                .remove_if(&(session.module_id, session.user_id), |_, open_id| *open_id == id);
        }

        Ok(finished)
    }

    async fn delete_for_user(&self, user_id: UserId) -> AppResult<u64> {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.user_id != user_id);
        self.prune_open_index();
        Ok(before.saturating_sub(self.sessions.len()) as u64)
    }

    async fn delete_for_module(&self, module_id: ModuleId) -> AppResult<u64> {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.module_id != module_id);
        self.prune_open_index();
        Ok(before.saturating_sub(self.sessions.len()) as u64)
    }

    async fn delete_for_module_user(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<u64> {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, s| !(s.module_id == module_id && s.user_id == user_id));
        self.prune_open_index();
        Ok(before.saturating_sub(self.sessions.len()) as u64)
    }
}
