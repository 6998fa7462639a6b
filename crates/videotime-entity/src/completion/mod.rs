//! Completion rule configuration and evaluation.

pub mod rules;

pub use rules::{CompletionRules, ProgressSnapshot};
