//! Watch session repository implementation.
//!
//! Each mutation is a single `UPDATE ... RETURNING *`: additive for watch
//! time, `GREATEST` for percent, so concurrent ticks converge without
//! explicit locking.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Row};
use tracing::{debug, warn};

use videotime_core::error::{AppError, ErrorKind};
use videotime_core::result::AppResult;
use videotime_core::types::id::{ModuleId, UserId, WatchSessionId};
use videotime_core::types::pagination::{PageRequest, PageResponse};
use videotime_entity::watch::WatchSession;

use crate::store::WatchSessionStore;

/// Attempts at get-or-create before giving up. A retry is only needed when
/// the open session is finished between the insert and the select.
const OPEN_SESSION_ATTEMPTS: usize = 3;

/// Repository for watch session persistence in PostgreSQL.
#[derive(Debug, Clone)]
pub struct WatchSessionRepository {
    pool: PgPool,
}

impl WatchSessionRepository {
    /// Create a new watch session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_open(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<Option<WatchSession>> {
        sqlx::query_as::<_, WatchSession>(
            "SELECT * FROM watch_sessions \
             WHERE module_id = $1 AND user_id = $2 AND state = 'in_progress'",
        )
        .bind(module_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find open session", e))
    }

    async fn delete_where(&self, sql: &str, binds: &[uuid::Uuid], what: &str) -> AppResult<u64> {
        let mut query = sqlx::query(sql);
        for bind in binds {
            query = query.bind(*bind);
        }
        let result = query.execute(&self.pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to delete sessions for {what}"),
                e,
            )
        })?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl WatchSessionStore for WatchSessionRepository {
    async fn find_by_id(&self, id: WatchSessionId) -> AppResult<Option<WatchSession>> {
        sqlx::query_as::<_, WatchSession>("SELECT * FROM watch_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    async fn find_latest(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<Option<WatchSession>> {
        sqlx::query_as::<_, WatchSession>(
            "SELECT * FROM watch_sessions WHERE module_id = $1 AND user_id = $2 \
             ORDER BY started_at DESC, id DESC LIMIT 1",
        )
        .bind(module_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find latest session", e)
        })
    }

    async fn find_all_for(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<Vec<WatchSession>> {
        sqlx::query_as::<_, WatchSession>(
            "SELECT * FROM watch_sessions WHERE module_id = $1 AND user_id = $2 \
             ORDER BY started_at ASC, id ASC",
        )
        .bind(module_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))
    }

    async fn list_by_module(
        &self,
        module_id: ModuleId,
        page: PageRequest,
    ) -> AppResult<PageResponse<WatchSession>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM watch_sessions WHERE module_id = $1")
                .bind(module_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count sessions", e)
                })?;

        let sessions = sqlx::query_as::<_, WatchSession>(
            "SELECT * FROM watch_sessions WHERE module_id = $1 \
             ORDER BY started_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(module_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))?;

        Ok(PageResponse::new(sessions, page, total.max(0) as u64))
    }

    async fn get_or_create_open(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<(WatchSession, bool)> {
        for attempt in 1..=OPEN_SESSION_ATTEMPTS {
            let candidate = WatchSession::start(module_id, user_id);

            let inserted = sqlx::query_as::<_, WatchSession>(
                "INSERT INTO watch_sessions (id, module_id, user_id, started_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $4) \
                 ON CONFLICT (module_id, user_id) WHERE state = 'in_progress' DO NOTHING \
                 RETURNING *",
            )
            .bind(candidate.id)
            .bind(module_id)
            .bind(user_id)
            .bind(candidate.started_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create session", e)
            })?;

            if let Some(session) = inserted {
                return Ok((session, true));
            }

            if let Some(existing) = self.find_open(module_id, user_id).await? {
                return Ok((existing, false));
            }

            debug!(
                module_id = %module_id,
                user_id = %user_id,
                attempt,
                "Open session closed during get-or-create, retrying"
            );
        }

        warn!(module_id = %module_id, user_id = %user_id, "Could not settle open session");
        Err(AppError::conflict("Open watch session is changing too quickly"))
    }

    async fn add_watch_time(
        &self,
        id: WatchSessionId,
        elapsed_seconds: f64,
    ) -> AppResult<Option<WatchSession>> {
        sqlx::query_as::<_, WatchSession>(
            "UPDATE watch_sessions \
             SET cumulative_watch_time = cumulative_watch_time + $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(elapsed_seconds)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add watch time", e))
    }

    async fn record_position(
        &self,
        id: WatchSessionId,
        percent: f64,
        current_time: f64,
    ) -> AppResult<Option<WatchSession>> {
        sqlx::query_as::<_, WatchSession>(
            "UPDATE watch_sessions \
             SET percent_watched = GREATEST(percent_watched, $2), \
                 current_position = $3, \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(percent)
        .bind(current_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record position", e))
    }

    async fn record_finish(
        &self,
        id: WatchSessionId,
        final_percent: f64,
        final_time: f64,
    ) -> AppResult<Option<(WatchSession, bool)>> {
        // The row lock taken by `prior` makes a concurrent finish wait and
        // then read `finished`, so only one caller sees the transition.
        let row = sqlx::query(
            "WITH prior AS ( \
                 SELECT state AS prior_state FROM watch_sessions WHERE id = $1 FOR UPDATE \
             ) \
             UPDATE watch_sessions \
             SET state = 'finished', \
                 percent_watched = GREATEST(percent_watched, $2, 1.0), \
                 current_position = $3, \
                 finished_at = COALESCE(finished_at, NOW()), \
                 updated_at = NOW() \
             FROM prior \
             WHERE watch_sessions.id = $1 \
             RETURNING watch_sessions.*, prior.prior_state = 'in_progress' AS transitioned",
        )
        .bind(id)
        .bind(final_percent)
        .bind(final_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record finish", e))?;

        row.map(|row| {
            let session = WatchSession::from_row(&row)?;
            let transitioned: bool = row.try_get("transitioned")?;
            Ok((session, transitioned))
        })
        .transpose()
        .map_err(|e: sqlx::Error| {
            AppError::with_source(ErrorKind::Database, "Failed to decode finished session", e)
        })
    }

    async fn delete_for_user(&self, user_id: UserId) -> AppResult<u64> {
        self.delete_where(
            "DELETE FROM watch_sessions WHERE user_id = $1",
            &[user_id.into_uuid()],
            "user",
        )
        .await
    }

    async fn delete_for_module(&self, module_id: ModuleId) -> AppResult<u64> {
        self.delete_where(
            "DELETE FROM watch_sessions WHERE module_id = $1",
            &[module_id.into_uuid()],
            "module",
        )
        .await
    }

    async fn delete_for_module_user(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<u64> {
        self.delete_where(
            "DELETE FROM watch_sessions WHERE module_id = $1 AND user_id = $2",
            &[module_id.into_uuid(), user_id.into_uuid()],
            "module user",
        )
        .await
    }
}
