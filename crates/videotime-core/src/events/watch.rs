//! Watch-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::completion::CompletionStatus;
use crate::types::id::{ModuleId, UserId, WatchSessionId};

/// Events produced while users watch a video activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WatchEvent {
    /// A new watch session was opened.
    SessionCreated {
        /// The session ID.
        session_id: WatchSessionId,
        /// The video instance.
        module_id: ModuleId,
        /// The watching user.
        user_id: UserId,
    },
    /// Playback end was reported for a session.
    SessionFinished {
        /// The session ID.
        session_id: WatchSessionId,
        /// The video instance.
        module_id: ModuleId,
        /// The watching user.
        user_id: UserId,
    },
    /// The activity page was viewed.
    ModuleViewed {
        /// The video instance.
        module_id: ModuleId,
        /// The viewing user.
        user_id: UserId,
    },
    /// Completion rules were re-evaluated for a user.
    CompletionUpdated {
        /// The video instance.
        module_id: ModuleId,
        /// The user whose completion changed.
        user_id: UserId,
        /// Per-rule outcomes.
        status: CompletionStatus,
    },
}

impl WatchEvent {
    /// Short name used in logs and hook routing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SessionCreated { .. } => "session_created",
            Self::SessionFinished { .. } => "session_finished",
            Self::ModuleViewed { .. } => "module_viewed",
            Self::CompletionUpdated { .. } => "completion_updated",
        }
    }

    /// The video instance the event concerns.
    pub fn module_id(&self) -> ModuleId {
        match self {
            Self::SessionCreated { module_id, .. }
            | Self::SessionFinished { module_id, .. }
            | Self::ModuleViewed { module_id, .. }
            | Self::CompletionUpdated { module_id, .. } => *module_id,
        }
    }

    /// The user the event concerns.
    pub fn user_id(&self) -> UserId {
        match self {
            Self::SessionCreated { user_id, .. }
            | Self::SessionFinished { user_id, .. }
            | Self::ModuleViewed { user_id, .. }
            | Self::CompletionUpdated { user_id, .. } => *user_id,
        }
    }
}
