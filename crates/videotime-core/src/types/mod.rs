//! Core type definitions used across the Video Time workspace.

pub mod completion;
pub mod id;
pub mod pagination;

pub use completion::{CompletionRule, CompletionStatus, RuleOutcome};
pub use id::*;
pub use pagination::{PageRequest, PageResponse};
