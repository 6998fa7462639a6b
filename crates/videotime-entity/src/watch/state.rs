//! Watch session state enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a watch session.
///
/// `InProgress` is the initial state; `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "watch_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WatchState {
    /// Playback has started and not yet reached the end.
    InProgress,
    /// Playback end was reported.
    Finished,
}

impl WatchState {
    /// Check if the session is in its terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Return the state as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for WatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
