//! Completion rule outcomes handed to the LMS completion subsystem.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A configurable completion condition of a video activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    /// Playback end was reported at least once.
    OnFinish,
    /// Furthest percent watched reached a threshold.
    OnPercent,
    /// Accumulated watch time reached a threshold in seconds.
    OnViewTime,
}

impl CompletionRule {
    /// Return the rule as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnFinish => "on_finish",
            Self::OnPercent => "on_percent",
            Self::OnViewTime => "on_view_time",
        }
    }
}

impl fmt::Display for CompletionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Evaluation result for a single configured rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// The rule that was evaluated.
    pub rule: CompletionRule,
    /// Whether the rule is met.
    pub satisfied: bool,
    /// The configured threshold (percent 1-100 or seconds), if the rule has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// The observed value compared against the threshold.
    pub observed: f64,
}

/// Outcome of evaluating every configured completion rule.
///
/// Only rules enabled on the instance appear in `outcomes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionStatus {
    /// One entry per configured rule.
    pub outcomes: Vec<RuleOutcome>,
}

impl CompletionStatus {
    /// Look up whether a rule is satisfied. `None` if it is not configured.
    pub fn is_satisfied(&self, rule: CompletionRule) -> Option<bool> {
        self.outcomes
            .iter()
            .find(|o| o.rule == rule)
            .map(|o| o.satisfied)
    }

    /// Whether any completion rule is configured at all.
    pub fn has_rules(&self) -> bool {
        !self.outcomes.is_empty()
    }

    /// All configured rules are met. False when nothing is configured.
    pub fn is_complete(&self) -> bool {
        self.has_rules() && self.outcomes.iter().all(|o| o.satisfied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(rule: CompletionRule, satisfied: bool) -> RuleOutcome {
        RuleOutcome {
            rule,
            satisfied,
            threshold: None,
            observed: 0.0,
        }
    }

    #[test]
    fn test_empty_status_is_not_complete() {
        let status = CompletionStatus::default();
        assert!(!status.is_complete());
        assert_eq!(status.is_satisfied(CompletionRule::OnFinish), None);
    }

    #[test]
    fn test_all_rules_must_hold() {
        let status = CompletionStatus {
            outcomes: vec![
                outcome(CompletionRule::OnFinish, true),
                outcome(CompletionRule::OnPercent, false),
            ],
        };
        assert!(!status.is_complete());
        assert_eq!(status.is_satisfied(CompletionRule::OnFinish), Some(true));
        assert_eq!(status.is_satisfied(CompletionRule::OnPercent), Some(false));
        assert_eq!(status.is_satisfied(CompletionRule::OnViewTime), None);
    }
}
