//! # videotime-plugin
//!
//! Extension points for Video Time:
//!
//! - Tab plugins rendered on the activity page (`watch`, `information`)
//! - Player embedders chosen by video URL (`vimeo`, `html5`)
//! - Hook registry and dispatcher for watch lifecycle events
//! - A completion notifier that forwards events to those hooks

pub mod hooks;
pub mod manager;
pub mod notifier;
pub mod players;
pub mod registry;
pub mod tabs;

pub use hooks::{ClosureHandler, HookDispatcher, HookPayload, HookPoint, HookRegistry, HookResult};
pub use manager::PluginManager;
pub use notifier::HookCompletionNotifier;
pub use players::{PlayerEmbed, PlayerEmbedder};
pub use registry::PluginRegistry;
pub use tabs::{RenderedTab, TabContext, TabPlugin};
