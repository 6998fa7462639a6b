//! Video instance settings.

pub mod service;

pub use service::InstanceService;
