//! Video instance repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use videotime_core::error::{AppError, ErrorKind};
use videotime_core::result::AppResult;
use videotime_core::types::id::ModuleId;
use videotime_entity::instance::{UpsertVideoInstance, VideoInstance};

use crate::store::InstanceStore;

/// Repository for video instance settings in PostgreSQL.
#[derive(Debug, Clone)]
pub struct InstanceRepository {
    pool: PgPool,
}

impl InstanceRepository {
    /// Create a new instance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstanceStore for InstanceRepository {
    async fn find(&self, id: ModuleId) -> AppResult<Option<VideoInstance>> {
        sqlx::query_as::<_, VideoInstance>("SELECT * FROM video_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find instance", e))
    }

    async fn upsert(&self, id: ModuleId, data: &UpsertVideoInstance) -> AppResult<VideoInstance> {
        sqlx::query_as::<_, VideoInstance>(
            r#"
            INSERT INTO video_instances (
                id, name, video_url, resume_playback, prevent_fast_forwarding,
                completion_on_finish, completion_on_percent, completion_on_percent_value,
                completion_on_view_time, completion_on_view_time_seconds
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                video_url = EXCLUDED.video_url,
                resume_playback = EXCLUDED.resume_playback,
                prevent_fast_forwarding = EXCLUDED.prevent_fast_forwarding,
                completion_on_finish = EXCLUDED.completion_on_finish,
                completion_on_percent = EXCLUDED.completion_on_percent,
                completion_on_percent_value = EXCLUDED.completion_on_percent_value,
                completion_on_view_time = EXCLUDED.completion_on_view_time,
                completion_on_view_time_seconds = EXCLUDED.completion_on_view_time_seconds,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.video_url)
        .bind(data.resume_playback)
        .bind(data.prevent_fast_forwarding)
        .bind(data.completion_on_finish)
        .bind(data.completion_on_percent)
        .bind(data.completion_on_percent_value)
        .bind(data.completion_on_view_time)
        .bind(data.completion_on_view_time_seconds)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save instance", e))
    }

    async fn delete(&self, id: ModuleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM video_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete instance", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
