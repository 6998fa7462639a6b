//! Site-wide defaults for video instance settings.
//!
//! Each entry carries a `forced` flag; forced entries override whatever
//! the instance stores (see [`crate::settings::resolve`]).

use serde::{Deserialize, Serialize};

use crate::settings::AdminSetting;

/// Admin defaults for the settings the tracker reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceDefaults {
    /// Seek to the last position when a user returns.
    #[serde(default = "default_resume")]
    pub resume_playback: AdminSetting<bool>,
    /// Deny seeking past the furthest watched point.
    #[serde(default = "default_off")]
    pub prevent_fast_forwarding: AdminSetting<bool>,
    /// Complete when playback end is reported.
    #[serde(default = "default_off")]
    pub completion_on_finish: AdminSetting<bool>,
    /// Complete when a percentage threshold is reached.
    #[serde(default = "default_off")]
    pub completion_on_percent: AdminSetting<bool>,
    /// Percentage threshold (1-100).
    #[serde(default = "default_percent_value")]
    pub completion_on_percent_value: AdminSetting<u8>,
    /// Complete when enough watch time is accumulated.
    #[serde(default = "default_off")]
    pub completion_on_view_time: AdminSetting<bool>,
    /// Watch time threshold in seconds.
    #[serde(default = "default_view_time_value")]
    pub completion_on_view_time_seconds: AdminSetting<u32>,
}

impl Default for InstanceDefaults {
    fn default() -> Self {
        Self {
            resume_playback: default_resume(),
            prevent_fast_forwarding: default_off(),
            completion_on_finish: default_off(),
            completion_on_percent: default_off(),
            completion_on_percent_value: default_percent_value(),
            completion_on_view_time: default_off(),
            completion_on_view_time_seconds: default_view_time_value(),
        }
    }
}

fn default_resume() -> AdminSetting<bool> {
    AdminSetting::unforced(true)
}

fn default_off() -> AdminSetting<bool> {
    AdminSetting::unforced(false)
}

fn default_percent_value() -> AdminSetting<u8> {
    AdminSetting::unforced(100)
}

fn default_view_time_value() -> AdminSetting<u32> {
    AdminSetting::unforced(60)
}
