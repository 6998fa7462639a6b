//! Watch session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use videotime_core::types::id::{ModuleId, UserId, WatchSessionId};

use super::state::WatchState;

/// Progress record for one user's viewing of one video instance.
///
/// `cumulative_watch_time` and `percent_watched` never decrease. Once
/// `state` is `Finished`, `percent_watched` stays at `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WatchSession {
    /// Unique session identifier.
    pub id: WatchSessionId,
    /// The video instance being watched.
    pub module_id: ModuleId,
    /// The watching user.
    pub user_id: UserId,
    /// Seconds of playback accumulated from ticks.
    pub cumulative_watch_time: f64,
    /// Furthest fraction of the duration reached (0.0-1.0).
    pub percent_watched: f64,
    /// Last reported playback position in seconds.
    pub current_position: f64,
    /// Lifecycle state.
    pub state: WatchState,
    /// When the session was opened.
    pub started_at: DateTime<Utc>,
    /// Last mutation.
    pub updated_at: DateTime<Utc>,
    /// When playback end was first reported.
    pub finished_at: Option<DateTime<Utc>>,
}

impl WatchSession {
    /// Open a fresh session with no progress.
    pub fn start(module_id: ModuleId, user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: WatchSessionId::new(),
            module_id,
            user_id,
            cumulative_watch_time: 0.0,
            percent_watched: 0.0,
            current_position: 0.0,
            state: WatchState::InProgress,
            started_at: now,
            updated_at: now,
            finished_at: None,
        }
    }

    /// Check whether playback end has been reported.
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Accumulate watched seconds.
    pub fn apply_tick(&mut self, elapsed_seconds: f64) {
        self.cumulative_watch_time += elapsed_seconds;
        self.updated_at = Utc::now();
    }

    /// Record a playback position. The furthest percent only grows.
    pub fn apply_position(&mut self, percent: f64, current_time: f64) {
        self.percent_watched = self.percent_watched.max(percent);
        self.current_position = current_time;
        self.updated_at = Utc::now();
    }

    /// Record playback end. Idempotent; `finished_at` keeps the first report.
    pub fn apply_finish(&mut self, final_percent: f64, final_time: f64) {
        let now = Utc::now();
        self.state = WatchState::Finished;
        self.percent_watched = self.percent_watched.max(final_percent).max(1.0);
        self.current_position = final_time;
        self.finished_at = self.finished_at.or(Some(now));
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> WatchSession {
        WatchSession::start(ModuleId::new(), UserId::new())
    }

    #[test]
    fn test_start_is_empty_and_in_progress() {
        let s = session();
        assert_eq!(s.state, WatchState::InProgress);
        assert_eq!(s.cumulative_watch_time, 0.0);
        assert_eq!(s.percent_watched, 0.0);
        assert!(s.finished_at.is_none());
    }

    #[test]
    fn test_percent_is_max_of_reports_in_any_order() {
        let mut s = session();
        for p in [0.3, 0.7, 0.2, 0.5] {
            s.apply_position(p, p * 100.0);
        }
        assert_eq!(s.percent_watched, 0.7);
        // Position follows the latest report, even backwards.
        assert_eq!(s.current_position, 50.0);
    }

    #[test]
    fn test_ticks_sum() {
        let mut s = session();
        s.apply_tick(5.0);
        s.apply_tick(7.5);
        s.apply_tick(5.0);
        assert_eq!(s.cumulative_watch_time, 17.5);
    }

    #[test]
    fn test_finish_clamps_percent_and_is_terminal() {
        let mut s = session();
        s.apply_position(0.4, 40.0);
        s.apply_finish(0.98, 99.0);
        assert!(s.is_finished());
        assert_eq!(s.percent_watched, 1.0);
        assert_eq!(s.current_position, 99.0);

        s.apply_position(0.1, 10.0);
        assert_eq!(s.percent_watched, 1.0);
        assert_eq!(s.state, WatchState::Finished);
    }

    #[test]
    fn test_repeated_finish_keeps_first_timestamp() {
        let mut s = session();
        s.apply_finish(1.0, 100.0);
        let first = s.finished_at;
        s.apply_finish(1.0, 100.0);
        assert_eq!(s.finished_at, first);
    }
}
