//! Video instance entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use videotime_core::config::InstanceDefaults;
use videotime_core::types::id::ModuleId;

/// Stored configuration of one video activity.
///
/// Values here are what the course editor saved; forced site defaults are
/// applied on top when they are read (see [`super::EffectiveSettings`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VideoInstance {
    /// The activity identifier.
    pub id: ModuleId,
    /// Display name.
    pub name: String,
    /// Source URL (Vimeo link or direct media file).
    pub video_url: String,
    /// Seek to the last position when a user returns.
    pub resume_playback: bool,
    /// Deny seeking past the furthest watched point.
    pub prevent_fast_forwarding: bool,
    /// Complete when playback end is reported.
    pub completion_on_finish: bool,
    /// Complete when a percentage threshold is reached.
    pub completion_on_percent: bool,
    /// Percentage threshold (1-100).
    pub completion_on_percent_value: i16,
    /// Complete when enough watch time is accumulated.
    pub completion_on_view_time: bool,
    /// Watch time threshold in seconds.
    pub completion_on_view_time_seconds: i32,
    /// When the instance was created.
    pub created_at: DateTime<Utc>,
    /// Last modification.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create or replace an instance's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertVideoInstance {
    /// Display name.
    pub name: String,
    /// Source URL.
    pub video_url: String,
    /// Seek to the last position when a user returns.
    pub resume_playback: bool,
    /// Deny seeking past the furthest watched point.
    pub prevent_fast_forwarding: bool,
    /// Complete when playback end is reported.
    pub completion_on_finish: bool,
    /// Complete when a percentage threshold is reached.
    pub completion_on_percent: bool,
    /// Percentage threshold (1-100).
    pub completion_on_percent_value: i16,
    /// Complete when enough watch time is accumulated.
    pub completion_on_view_time: bool,
    /// Watch time threshold in seconds.
    pub completion_on_view_time_seconds: i32,
}

impl UpsertVideoInstance {
    /// New instance settings seeded from the site defaults.
    pub fn from_defaults(
        name: impl Into<String>,
        video_url: impl Into<String>,
        defaults: &InstanceDefaults,
    ) -> Self {
        Self {
            name: name.into(),
            video_url: video_url.into(),
            resume_playback: defaults.resume_playback.value,
            prevent_fast_forwarding: defaults.prevent_fast_forwarding.value,
            completion_on_finish: defaults.completion_on_finish.value,
            completion_on_percent: defaults.completion_on_percent.value,
            completion_on_percent_value: i16::from(defaults.completion_on_percent_value.value),
            completion_on_view_time: defaults.completion_on_view_time.value,
            completion_on_view_time_seconds: i32::try_from(
                defaults.completion_on_view_time_seconds.value,
            )
            .unwrap_or(i32::MAX),
        }
    }

    /// Materialize as a stored row, keeping `created_at` from a previous
    /// version when there is one.
    pub fn into_instance(self, id: ModuleId, previous: Option<&VideoInstance>) -> VideoInstance {
        let now = Utc::now();
        VideoInstance {
            id,
            name: self.name,
            video_url: self.video_url,
            resume_playback: self.resume_playback,
            prevent_fast_forwarding: self.prevent_fast_forwarding,
            completion_on_finish: self.completion_on_finish,
            completion_on_percent: self.completion_on_percent,
            completion_on_percent_value: self.completion_on_percent_value,
            completion_on_view_time: self.completion_on_view_time,
            completion_on_view_time_seconds: self.completion_on_view_time_seconds,
            created_at: previous.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
