//! Watch session tracking: the progress state machine, resume and seek
//! policy, and completion evaluation.

pub mod resume;
pub mod seek;
pub mod service;
mod validate;

pub use resume::resume_position;
pub use seek::SeekDecision;
pub use service::WatchSessionTracker;
