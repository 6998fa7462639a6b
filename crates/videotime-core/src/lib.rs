//! # videotime-core
//!
//! Core crate for Video Time. Contains configuration schemas, typed
//! identifiers, domain events, the forced-settings overlay, completion
//! value types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Video Time crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod settings;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
