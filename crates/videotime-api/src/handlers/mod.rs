//! HTTP request handlers, grouped by resource.

pub mod health;
pub mod modules;
pub mod sessions;
pub mod users;
