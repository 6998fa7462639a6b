//! Hook points and the payloads passed to their handlers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use videotime_core::events::{DomainEvent, WatchEvent};
use videotime_core::result::AppResult;
use videotime_core::types::id::UserId;

/// Points in the watch lifecycle where plugins can observe events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    /// A watch session was opened.
    OnSessionCreated,
    /// Playback end was reported.
    OnSessionFinished,
    /// The activity page was viewed.
    OnModuleViewed,
    /// Completion was re-evaluated for a user.
    OnCompletionUpdated,
}

impl HookPoint {
    /// Every hook point, in lifecycle order.
    pub const ALL: [HookPoint; 4] = [
        Self::OnSessionCreated,
        Self::OnSessionFinished,
        Self::OnModuleViewed,
        Self::OnCompletionUpdated,
    ];

    /// Returns the string name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnSessionCreated => "on_session_created",
            Self::OnSessionFinished => "on_session_finished",
            Self::OnModuleViewed => "on_module_viewed",
            Self::OnCompletionUpdated => "on_completion_updated",
        }
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&WatchEvent> for HookPoint {
    fn from(event: &WatchEvent) -> Self {
        match event {
            WatchEvent::SessionCreated { .. } => Self::OnSessionCreated,
            WatchEvent::SessionFinished { .. } => Self::OnSessionFinished,
            WatchEvent::ModuleViewed { .. } => Self::OnModuleViewed,
            WatchEvent::CompletionUpdated { .. } => Self::OnCompletionUpdated,
        }
    }
}

/// Payload passed to hook handlers: a flexible key-value map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookPayload {
    /// The hook point being fired.
    pub hook: HookPoint,
    /// Event fields keyed by name.
    pub data: HashMap<String, serde_json::Value>,
    /// The user who triggered this event.
    pub actor_id: Option<UserId>,
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
}

impl HookPayload {
    /// Creates an empty payload for a hook point.
    pub fn new(hook: HookPoint) -> Self {
        Self {
            hook,
            data: HashMap::new(),
            actor_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Build the payload for a domain event. The event's fields become the
    /// payload data.
    pub fn from_event(event: &DomainEvent) -> AppResult<Self> {
        let data = match serde_json::to_value(&event.payload)? {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };

        Ok(Self {
            hook: HookPoint::from(&event.payload),
            data,
            actor_id: event.actor_id,
            timestamp: event.timestamp,
        })
    }

    /// Sets the actor ID.
    pub fn with_actor(mut self, actor_id: UserId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Inserts a data value.
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Gets a data value by key.
    pub fn get_data(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Gets a string data value.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }
}

/// How a handler invocation ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HookOutcome {
    /// The handler processed the event.
    Handled,
    /// The handler failed or timed out.
    Failed {
        /// What went wrong.
        reason: String,
    },
}

/// Result returned from a hook handler invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookResult {
    /// How the invocation ended.
    pub outcome: HookOutcome,
    /// Optional output data from the handler.
    pub output: Option<serde_json::Value>,
    /// Plugin ID that produced this result.
    pub plugin_id: String,
}

impl HookResult {
    /// Creates a handled result.
    pub fn handled(plugin_id: &str) -> Self {
        Self {
            outcome: HookOutcome::Handled,
            output: None,
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Creates a handled result with output data.
    pub fn handled_with_output(plugin_id: &str, output: serde_json::Value) -> Self {
        Self {
            output: Some(output),
            ..Self::handled(plugin_id)
        }
    }

    /// Creates a failed result.
    pub fn failed(plugin_id: &str, reason: impl Into<String>) -> Self {
        Self {
            outcome: HookOutcome::Failed {
                reason: reason.into(),
            },
            output: None,
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Whether the handler failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, HookOutcome::Failed { .. })
    }
}
