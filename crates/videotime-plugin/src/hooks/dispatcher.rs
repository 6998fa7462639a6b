//! Hook dispatcher: runs every handler of a hook point in priority order.
//!
//! A handler that fails or exceeds the timeout is recorded as failed; the
//! remaining handlers still run.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use videotime_core::error::AppError;

use super::definitions::{HookPayload, HookResult};
use super::registry::HookRegistry;

/// Aggregated result of dispatching a hook to all handlers.
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// All individual handler results, in execution order.
    pub results: Vec<HookResult>,
}

impl DispatchResult {
    /// Results of handlers that failed.
    pub fn failures(&self) -> impl Iterator<Item = &HookResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Turn any failure into an error naming the failed plugins.
    pub fn into_result(self) -> Result<Self, AppError> {
        let failed: Vec<&str> = self.failures().map(|r| r.plugin_id.as_str()).collect();
        if failed.is_empty() {
            return Ok(self);
        }
        Err(AppError::plugin(format!(
            "Hook handlers failed: {}",
            failed.join(", ")
        )))
    }
}

/// Dispatches hooks to all registered handlers.
#[derive(Debug)]
pub struct HookDispatcher {
    registry: Arc<HookRegistry>,
    timeout: Duration,
}

impl HookDispatcher {
    /// Creates a new hook dispatcher with a per-handler timeout.
    pub fn new(registry: Arc<HookRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Dispatches a payload to every handler of its hook point.
    pub async fn dispatch(&self, payload: &HookPayload) -> DispatchResult {
        let handlers = self.registry.get_handlers(payload.hook).await;
        if handlers.is_empty() {
            return DispatchResult::default();
        }

        debug!(hook = %payload.hook, handler_count = handlers.len(), "Dispatching hook");

        let mut results = Vec::with_capacity(handlers.len());
        for handler in &handlers {
            let result = match tokio::time::timeout(self.timeout, handler.handle(payload)).await {
                Ok(result) => result,
                Err(_) => {
                    error!(
                        hook = %payload.hook,
                        plugin_id = %handler.plugin_id(),
                        timeout_ms = self.timeout.as_millis() as u64,
                        "Hook handler timed out"
                    );
                    HookResult::failed(handler.plugin_id(), "timed out")
                }
            };

            if result.is_failure() {
                warn!(
                    hook = %payload.hook,
                    plugin_id = %result.plugin_id,
                    outcome = ?result.outcome,
                    "Hook handler failed"
                );
            }
            results.push(result);
        }

        DispatchResult { results }
    }

    /// Returns the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::closure::ClosureHandler;
    use crate::hooks::definitions::HookPoint;

    #[tokio::test]
    async fn test_dispatch_without_handlers_is_empty() {
        let dispatcher = HookDispatcher::new(Arc::new(HookRegistry::new()), Duration::from_secs(1));
        let result = dispatcher
            .dispatch(&HookPayload::new(HookPoint::OnModuleViewed))
            .await;
        assert!(result.results.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_handlers() {
        let registry = Arc::new(HookRegistry::new());
        registry
            .register(
                HookPoint::OnSessionFinished,
                Arc::new(ClosureHandler::new("broken", 1, |_| async {
                    HookResult::failed("broken", "gradebook offline")
                })),
            )
            .await;
        registry
            .register(
                HookPoint::OnSessionFinished,
                Arc::new(ClosureHandler::new("audit", 2, |_| async {
                    HookResult::handled("audit")
                })),
            )
            .await;

        let dispatcher = HookDispatcher::new(registry, Duration::from_secs(1));
        let result = dispatcher
            .dispatch(&HookPayload::new(HookPoint::OnSessionFinished))
            .await;

        assert_eq!(result.results.len(), 2);
        assert_eq!(result.failures().count(), 1);
        let err = result.into_result().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_handler_times_out() {
        let registry = Arc::new(HookRegistry::new());
        registry
            .register(
                HookPoint::OnCompletionUpdated,
                Arc::new(ClosureHandler::new("slow", 1, |_| async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    HookResult::handled("slow")
                })),
            )
            .await;

        let dispatcher = HookDispatcher::new(registry, Duration::from_secs(5));
        let result = dispatcher
            .dispatch(&HookPayload::new(HookPoint::OnCompletionUpdated))
            .await;
        assert!(result.results[0].is_failure());
    }
}
