//! Completion rules evaluated against watch progress.

use serde::{Deserialize, Serialize};

use videotime_core::types::completion::{CompletionRule, CompletionStatus, RuleOutcome};

use crate::watch::{WatchSession, WatchSummary};

/// Absorbs float noise when comparing a fraction against a whole percent.
const PERCENT_TOLERANCE: f64 = 1e-9;

/// Effective completion rules of a video instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRules {
    /// Complete when playback end is reported.
    pub on_finish: bool,
    /// Complete at this percent (1-100) of the video, if set.
    pub on_percent: Option<u8>,
    /// Complete after this many seconds of watch time, if set.
    pub on_view_time: Option<u32>,
}

/// The progress figures completion rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Seconds watched.
    pub watch_time: f64,
    /// Furthest fraction reached (0.0-1.0).
    pub percent: f64,
    /// Whether playback end was reported.
    pub finished: bool,
}

impl From<&WatchSession> for ProgressSnapshot {
    fn from(session: &WatchSession) -> Self {
        Self {
            watch_time: session.cumulative_watch_time,
            percent: session.percent_watched,
            finished: session.is_finished(),
        }
    }
}

impl From<&WatchSummary> for ProgressSnapshot {
    fn from(summary: &WatchSummary) -> Self {
        Self {
            watch_time: summary.total_watch_time,
            percent: summary.max_percent,
            finished: summary.finished,
        }
    }
}

impl CompletionRules {
    /// Whether any rule is configured.
    pub fn is_empty(&self) -> bool {
        !self.on_finish && self.on_percent.is_none() && self.on_view_time.is_none()
    }

    /// Evaluate every configured rule against a progress snapshot.
    pub fn evaluate(&self, progress: impl Into<ProgressSnapshot>) -> CompletionStatus {
        let progress = progress.into();
        let mut outcomes = Vec::with_capacity(3);

        if self.on_finish {
            outcomes.push(RuleOutcome {
                rule: CompletionRule::OnFinish,
                satisfied: progress.finished,
                threshold: None,
                observed: if progress.finished { 1.0 } else { 0.0 },
            });
        }

        if let Some(threshold) = self.on_percent {
            let observed = progress.percent * 100.0;
            outcomes.push(RuleOutcome {
                rule: CompletionRule::OnPercent,
                satisfied: observed + PERCENT_TOLERANCE >= f64::from(threshold),
                threshold: Some(f64::from(threshold)),
                observed,
            });
        }

        if let Some(threshold) = self.on_view_time {
            outcomes.push(RuleOutcome {
                rule: CompletionRule::OnViewTime,
                satisfied: progress.watch_time >= f64::from(threshold),
                threshold: Some(f64::from(threshold)),
                observed: progress.watch_time,
            });
        }

        CompletionStatus { outcomes }
    }
}
