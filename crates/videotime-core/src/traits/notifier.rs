//! Outbound channel to the completion subsystem.

use async_trait::async_trait;

use crate::events::DomainEvent;
use crate::result::AppResult;

/// Receives watch events after they are durably persisted.
///
/// Delivery is best effort: callers log a failed notification and carry
/// on, so an implementation must not assume it is retried.
#[async_trait]
pub trait CompletionNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver one event.
    async fn notify(&self, event: &DomainEvent) -> AppResult<()>;
}

/// Notifier that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl CompletionNotifier for NoopNotifier {
    async fn notify(&self, event: &DomainEvent) -> AppResult<()> {
        tracing::trace!(event = event.payload.name(), "Dropping event (no notifier)");
        Ok(())
    }
}
