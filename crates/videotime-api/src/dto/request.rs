//! Request DTOs with validation.
//!
//! Range checks here reject bad input before it reaches the tracker,
//! which checks the same bounds again for non-HTTP callers.

use serde::{Deserialize, Serialize};
use validator::Validate;

use videotime_core::config::InstanceDefaults;
use videotime_core::types::id::{ModuleId, UserId};
use videotime_entity::instance::UpsertVideoInstance;

/// Open (or reuse) a watch session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    /// The video instance about to play.
    pub module_id: ModuleId,
}

/// Played seconds since the previous tick.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TickRequest {
    /// Polling interval multiplied by playback rate.
    #[validate(range(min = 0.0, message = "elapsed_seconds must not be negative"))]
    pub elapsed_seconds: f64,
}

/// Current playback position.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PositionRequest {
    /// Fraction of the duration reached.
    #[validate(range(min = 0.0, max = 1.0, message = "percent must be within [0, 1]"))]
    pub percent: f64,
    /// Position in seconds.
    #[validate(range(min = 0.0, message = "current_time must not be negative"))]
    pub current_time: f64,
}

/// Playback reached the end.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FinishRequest {
    /// Fraction reported by the player at the end.
    #[validate(range(min = 0.0, max = 1.0, message = "final_percent must be within [0, 1]"))]
    pub final_percent: f64,
    /// Position in seconds at the end.
    #[validate(range(min = 0.0, message = "final_time must not be negative"))]
    pub final_time: f64,
}

/// Requested seek target.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeekRequest {
    /// Fraction of the duration to jump to.
    #[validate(range(min = 0.0, max = 1.0, message = "percent must be within [0, 1]"))]
    pub percent: f64,
}

/// `?duration=` on the resume endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResumeQuery {
    /// Video duration in seconds as reported by the player.
    #[validate(range(min = 0.0, message = "duration must not be negative"))]
    pub duration: f64,
}

/// Optional subject of a progress query. Defaults to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProgressQuery {
    /// Whose progress to read; reading another user requires teacher role.
    pub user_id: Option<UserId>,
}

/// Create or replace an instance's configuration.
///
/// Only `name` and `video_url` are required; omitted settings take the
/// site defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertInstanceRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    /// Vimeo link or direct media URL.
    #[validate(url(message = "video_url must be a URL"))]
    pub video_url: String,
    /// Seek to the last position when a user returns.
    pub resume_playback: Option<bool>,
    /// Deny seeking past the furthest watched point.
    pub prevent_fast_forwarding: Option<bool>,
    /// Complete when playback end is reported.
    pub completion_on_finish: Option<bool>,
    /// Complete when a percentage threshold is reached.
    pub completion_on_percent: Option<bool>,
    /// Percentage threshold.
    #[validate(range(min = 1, max = 100, message = "completion_on_percent_value must be 1-100"))]
    pub completion_on_percent_value: Option<i16>,
    /// Complete when enough watch time is accumulated.
    pub completion_on_view_time: Option<bool>,
    /// Watch time threshold in seconds.
    #[validate(range(min = 0, message = "completion_on_view_time_seconds must not be negative"))]
    pub completion_on_view_time_seconds: Option<i32>,
}

impl UpsertInstanceRequest {
    /// Fill omitted settings from the site defaults.
    pub fn into_upsert(self, defaults: &InstanceDefaults) -> UpsertVideoInstance {
        let mut data = UpsertVideoInstance::from_defaults(self.name, self.video_url, defaults);
        if let Some(v) = self.resume_playback {
            data.resume_playback = v;
        }
        if let Some(v) = self.prevent_fast_forwarding {
            data.prevent_fast_forwarding = v;
        }
        if let Some(v) = self.completion_on_finish {
            data.completion_on_finish = v;
        }
        if let Some(v) = self.completion_on_percent {
            data.completion_on_percent = v;
        }
        if let Some(v) = self.completion_on_percent_value {
            data.completion_on_percent_value = v;
        }
        if let Some(v) = self.completion_on_view_time {
            data.completion_on_view_time = v;
        }
        if let Some(v) = self.completion_on_view_time_seconds {
            data.completion_on_view_time_seconds = v;
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_out_of_range_rejected() {
        let req = PositionRequest {
            percent: 1.2,
            current_time: 10.0,
        };
        assert!(req.validate().is_err());
        let req = TickRequest {
            elapsed_seconds: -1.0,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_upsert_fills_defaults() {
        let req: UpsertInstanceRequest = serde_json::from_value(serde_json::json!({
            "name": "Intro",
            "video_url": "https://vimeo.com/76979871",
            "prevent_fast_forwarding": true
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let defaults = InstanceDefaults::default();
        let data = req.into_upsert(&defaults);
        assert!(data.prevent_fast_forwarding);
        assert_eq!(data.resume_playback, defaults.resume_playback.value);
        assert_eq!(
            data.completion_on_percent_value,
            i16::from(defaults.completion_on_percent_value.value)
        );
    }

    #[test]
    fn test_upsert_rejects_bad_url() {
        let req: UpsertInstanceRequest = serde_json::from_value(serde_json::json!({
            "name": "Intro",
            "video_url": "not a url"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
