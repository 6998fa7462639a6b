//! Watch tracking configuration.

use serde::{Deserialize, Serialize};

/// Where watch sessions are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via sqlx.
    Postgres,
    /// Process-local store; single node only, lost on restart.
    Memory,
}

/// Watch session tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Session and instance storage backend.
    #[serde(default = "default_store")]
    pub store: StoreBackend,
    /// Interval at which the player reports ticks, in seconds.
    /// Published to clients; the server accepts any elapsed value.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: f64,
    /// Slack (as a fraction of the duration) allowed beyond the furthest
    /// watched percent before a seek counts as fast-forwarding.
    #[serde(default = "default_seek_epsilon")]
    pub seek_epsilon: f64,
    /// A prior position this close to the end of the video restarts playback.
    #[serde(default = "default_resume_tolerance")]
    pub resume_end_tolerance_seconds: f64,
    /// Whether a visit after a finished session opens a fresh session.
    #[serde(default = "default_true")]
    pub new_session_after_finish: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            poll_interval_seconds: default_poll_interval(),
            seek_epsilon: default_seek_epsilon(),
            resume_end_tolerance_seconds: default_resume_tolerance(),
            new_session_after_finish: true,
        }
    }
}

fn default_store() -> StoreBackend {
    StoreBackend::Postgres
}

fn default_poll_interval() -> f64 {
    5.0
}

fn default_seek_epsilon() -> f64 {
    0.01
}

fn default_resume_tolerance() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}
