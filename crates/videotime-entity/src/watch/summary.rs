//! Per-user aggregate over all watch sessions of an instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use videotime_core::types::id::{ModuleId, UserId};

use super::model::WatchSession;

/// Aggregate progress of one user on one video instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchSummary {
    /// The video instance.
    pub module_id: ModuleId,
    /// The user.
    pub user_id: UserId,
    /// Number of sessions, finished or not.
    pub session_count: u64,
    /// Watch time summed over every session.
    pub total_watch_time: f64,
    /// Furthest percent reached in any session.
    pub max_percent: f64,
    /// Whether any session reported playback end.
    pub finished: bool,
    /// Start of the first session.
    pub first_started_at: Option<DateTime<Utc>>,
    /// Start of the most recent session.
    pub last_started_at: Option<DateTime<Utc>>,
    /// Position recorded by the most recent session.
    pub last_position: Option<f64>,
}

impl WatchSummary {
    /// Aggregate the given sessions. Order of the slice does not matter.
    pub fn from_sessions(module_id: ModuleId, user_id: UserId, sessions: &[WatchSession]) -> Self {
        let latest = sessions.iter().max_by_key(|s| (s.started_at, s.id));

        Self {
            module_id,
            user_id,
            session_count: sessions.len() as u64,
            total_watch_time: sessions.iter().map(|s| s.cumulative_watch_time).sum(),
            max_percent: sessions
                .iter()
                .map(|s| s.percent_watched)
                .fold(0.0, f64::max),
            finished: sessions.iter().any(WatchSession::is_finished),
            first_started_at: sessions.iter().map(|s| s.started_at).min(),
            last_started_at: latest.map(|s| s.started_at),
            last_position: latest.map(|s| s.current_position),
        }
    }

    /// Whether the user never started watching.
    pub fn is_empty(&self) -> bool {
        self.session_count == 0
    }
}
