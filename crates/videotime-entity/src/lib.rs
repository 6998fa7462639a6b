//! # videotime-entity
//!
//! Domain entity models for Video Time. Database rows derive
//! `sqlx::FromRow`; value objects (summaries, effective settings,
//! completion rules) are plain serde types.
//!
//! The monotonic progress rules live on [`watch::WatchSession`] itself so
//! every store applies them identically.

pub mod completion;
pub mod instance;
pub mod user;
pub mod watch;
