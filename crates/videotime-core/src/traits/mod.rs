//! Core traits defined in `videotime-core` and implemented by other crates.

pub mod notifier;

pub use notifier::{CompletionNotifier, NoopNotifier};
