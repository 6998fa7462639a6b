//! Completion notifier that forwards events to plugin hooks.

use std::sync::Arc;

use async_trait::async_trait;

use videotime_core::events::DomainEvent;
use videotime_core::result::AppResult;
use videotime_core::traits::CompletionNotifier;

use crate::hooks::definitions::HookPayload;
use crate::hooks::dispatcher::HookDispatcher;

/// Delivers each event to the handlers of its hook point. Fails when any
/// handler fails, so the caller can log the lost delivery.
#[derive(Debug, Clone)]
pub struct HookCompletionNotifier {
    dispatcher: Arc<HookDispatcher>,
}

impl HookCompletionNotifier {
    /// Create a notifier over a dispatcher.
    pub fn new(dispatcher: Arc<HookDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl CompletionNotifier for HookCompletionNotifier {
    async fn notify(&self, event: &DomainEvent) -> AppResult<()> {
        let payload = HookPayload::from_event(event)?;
        self.dispatcher.dispatch(&payload).await.into_result()?;
        Ok(())
    }
}
