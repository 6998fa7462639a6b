//! PostgreSQL implementations of the storage traits.

pub mod instance;
pub mod watch_session;

pub use instance::InstanceRepository;
pub use watch_session::WatchSessionRepository;
