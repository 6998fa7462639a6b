//! Process-local stores for single-node deployments and tests.

pub mod instance;
pub mod watch_session;

pub use instance::MemoryInstanceStore;
pub use watch_session::MemoryWatchSessionStore;
