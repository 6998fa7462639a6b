//! Erasure of personal watch data.

pub mod service;

pub use service::PrivacyService;
