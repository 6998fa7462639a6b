//! Video instance (activity configuration) entities.

pub mod model;
pub mod settings;

pub use model::{UpsertVideoInstance, VideoInstance};
pub use settings::EffectiveSettings;
