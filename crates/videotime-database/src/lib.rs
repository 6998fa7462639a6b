//! # videotime-database
//!
//! Storage for Video Time. Defines the [`store::WatchSessionStore`] and
//! [`store::InstanceStore`] seams with two implementations each:
//! PostgreSQL repositories (atomic single-statement updates) and a
//! process-local store for single-node deployments and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{InstanceStore, WatchSessionStore};
