//! Watch session domain entities.

pub mod model;
pub mod state;
pub mod summary;

pub use model::WatchSession;
pub use state::WatchState;
pub use summary::WatchSummary;
