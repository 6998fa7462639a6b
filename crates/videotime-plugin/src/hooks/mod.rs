//! Hook system: registry, dispatcher, and hook definitions.

pub mod closure;
pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use closure::ClosureHandler;
pub use definitions::{HookOutcome, HookPayload, HookPoint, HookResult};
pub use dispatcher::{DispatchResult, HookDispatcher};
pub use registry::{HookHandler, HookRegistry};
