//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use videotime_core::types::id::{ModuleId, UserId, WatchSessionId};
use videotime_entity::instance::{EffectiveSettings, VideoInstance};
use videotime_entity::watch::{WatchSession, WatchState};
use videotime_plugin::PlayerEmbed;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A watch session as seen by the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session ID.
    pub session_id: WatchSessionId,
    /// Video instance.
    pub module_id: ModuleId,
    /// Watching user.
    pub user_id: UserId,
    /// Accumulated seconds.
    pub cumulative_watch_time: f64,
    /// Furthest fraction reached.
    pub percent_watched: f64,
    /// Last reported position.
    pub current_position: f64,
    /// Lifecycle state.
    pub state: WatchState,
    /// When the session was opened.
    pub started_at: DateTime<Utc>,
}

impl From<WatchSession> for SessionResponse {
    fn from(s: WatchSession) -> Self {
        Self {
            session_id: s.id,
            module_id: s.module_id,
            user_id: s.user_id,
            cumulative_watch_time: s.cumulative_watch_time,
            percent_watched: s.percent_watched,
            current_position: s.current_position,
            state: s.state,
            started_at: s.started_at,
        }
    }
}

/// Where playback should start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeResponse {
    /// Start position in seconds.
    pub seconds: f64,
}

/// Number of sessions removed by an erasure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErasureResponse {
    /// Deleted session count.
    pub deleted: u64,
}

/// Stored and effective configuration of an instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceResponse {
    /// What the course editor saved, if anything.
    pub instance: Option<VideoInstance>,
    /// What the tracker obeys after forced defaults.
    pub effective: EffectiveSettings,
    /// Player chosen for the video URL.
    pub player: Option<PlayerEmbed>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// Configured session store.
    pub store: String,
    /// Database connectivity, when a database is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}
