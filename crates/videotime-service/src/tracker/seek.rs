//! Fast-forward prevention.

use serde::{Deserialize, Serialize};

/// Whether the player may jump to a requested point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekDecision {
    /// Whether the seek is permitted.
    pub allowed: bool,
    /// Furthest fraction the player may seek to.
    pub max_percent: f64,
}

impl SeekDecision {
    /// Decide a seek to `target` given the furthest percent watched so far.
    ///
    /// Without prevention every seek is allowed. With it, the target may
    /// exceed `percent_watched` by at most `epsilon`.
    pub fn decide(prevent: bool, percent_watched: f64, target: f64, epsilon: f64) -> Self {
        if !prevent {
            return Self {
                allowed: true,
                max_percent: 1.0,
            };
        }

        let max_percent = (percent_watched + epsilon).min(1.0);
        Self {
            allowed: target <= max_percent,
            max_percent,
        }
    }
}
