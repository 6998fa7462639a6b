//! # videotime-service
//!
//! Business logic for Video Time. Services are constructed with their
//! dependencies as `Arc` references and take a [`RequestContext`] where
//! the caller's identity matters.

pub mod context;
pub mod instance;
pub mod privacy;
pub mod tracker;

pub use context::RequestContext;
pub use instance::InstanceService;
pub use privacy::PrivacyService;
pub use tracker::{SeekDecision, WatchSessionTracker};
