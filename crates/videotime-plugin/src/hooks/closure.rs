//! Closure-based hook handlers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use super::definitions::{HookPayload, HookResult};
use super::registry::HookHandler;

type HandlerFn =
    dyn Fn(HookPayload) -> Pin<Box<dyn Future<Output = HookResult> + Send>> + Send + Sync;

/// A hook handler backed by an async closure.
///
/// The closure receives an owned copy of the payload.
pub struct ClosureHandler {
    id: String,
    priority: i32,
    handler: Arc<HandlerFn>,
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl ClosureHandler {
    /// Creates a new closure-based handler.
    pub fn new<F, Fut>(plugin_id: &str, priority: i32, handler: F) -> Self
    where
        F: Fn(HookPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult> + Send + 'static,
    {
        Self {
            id: plugin_id.to_string(),
            priority,
            handler: Arc::new(move |payload| Box::pin(handler(payload))),
        }
    }
}

#[async_trait]
impl HookHandler for ClosureHandler {
    async fn handle(&self, payload: &HookPayload) -> HookResult {
        (self.handler)(payload.clone()).await
    }

    fn plugin_id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
