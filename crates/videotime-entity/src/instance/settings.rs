//! Effective instance settings after the forced-defaults overlay.

use serde::{Deserialize, Serialize};

use videotime_core::config::InstanceDefaults;
use videotime_core::types::id::ModuleId;

use super::model::VideoInstance;
use crate::completion::CompletionRules;

/// Settings the tracker actually obeys for an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    /// The activity these settings belong to.
    pub module_id: ModuleId,
    /// Whether a stored instance record exists.
    pub configured: bool,
    /// Source URL, empty when unconfigured.
    pub video_url: String,
    /// Seek to the last position when a user returns.
    pub resume_playback: bool,
    /// Deny seeking past the furthest watched point.
    pub prevent_fast_forwarding: bool,
    /// Completion rules.
    pub rules: CompletionRules,
}

impl EffectiveSettings {
    /// Apply the site defaults to an instance. Without a stored instance
    /// the defaults are used as-is.
    pub fn resolve(
        module_id: ModuleId,
        instance: Option<&VideoInstance>,
        defaults: &InstanceDefaults,
    ) -> Self {
        let Some(instance) = instance else {
            return Self::from_defaults(module_id, defaults);
        };

        let on_finish = defaults
            .completion_on_finish
            .apply(instance.completion_on_finish);
        let on_percent = defaults
            .completion_on_percent
            .apply(instance.completion_on_percent);
        let percent_value = defaults
            .completion_on_percent_value
            .apply(clamp_percent(instance.completion_on_percent_value));
        let on_view_time = defaults
            .completion_on_view_time
            .apply(instance.completion_on_view_time);
        let view_time_value = defaults
            .completion_on_view_time_seconds
            .apply(u32::try_from(instance.completion_on_view_time_seconds).unwrap_or(0));

        Self {
            module_id,
            configured: true,
            video_url: instance.video_url.clone(),
            resume_playback: defaults.resume_playback.apply(instance.resume_playback),
            prevent_fast_forwarding: defaults
                .prevent_fast_forwarding
                .apply(instance.prevent_fast_forwarding),
            rules: CompletionRules {
                on_finish,
                on_percent: on_percent.then_some(percent_value),
                on_view_time: on_view_time.then_some(view_time_value),
            },
        }
    }

    fn from_defaults(module_id: ModuleId, defaults: &InstanceDefaults) -> Self {
        Self {
            module_id,
            configured: false,
            video_url: String::new(),
            resume_playback: defaults.resume_playback.value,
            prevent_fast_forwarding: defaults.prevent_fast_forwarding.value,
            rules: CompletionRules {
                on_finish: defaults.completion_on_finish.value,
                on_percent: defaults
                    .completion_on_percent
                    .value
                    .then_some(defaults.completion_on_percent_value.value),
                on_view_time: defaults
                    .completion_on_view_time
                    .value
                    .then_some(defaults.completion_on_view_time_seconds.value),
            },
        }
    }
}

fn clamp_percent(value: i16) -> u8 {
    value.clamp(1, 100) as u8
}

#[cfg(test)]
mod tests {
    use videotime_core::settings::AdminSetting;

    use super::*;
    use crate::instance::UpsertVideoInstance;

    fn instance(defaults: &InstanceDefaults) -> VideoInstance {
        let mut upsert =
            UpsertVideoInstance::from_defaults("Intro", "https://vimeo.com/76979871", defaults);
        upsert.resume_playback = false;
        upsert.completion_on_percent = true;
        upsert.completion_on_percent_value = 80;
        upsert.into_instance(ModuleId::new(), None)
    }

    #[test]
    fn test_instance_values_win_when_not_forced() {
        let defaults = InstanceDefaults::default();
        let stored = instance(&defaults);
        let settings = EffectiveSettings::resolve(stored.id, Some(&stored), &defaults);
        assert!(settings.configured);
        assert!(!settings.resume_playback);
        assert_eq!(settings.rules.on_percent, Some(80));
        assert_eq!(settings.rules.on_view_time, None);
    }

    #[test]
    fn test_forced_defaults_override_instance() {
        let mut defaults = InstanceDefaults::default();
        defaults.resume_playback = AdminSetting::forced(true);
        defaults.completion_on_percent_value = AdminSetting::forced(95);
        let stored = instance(&InstanceDefaults::default());

        let settings = EffectiveSettings::resolve(stored.id, Some(&stored), &defaults);
        assert!(settings.resume_playback);
        assert_eq!(settings.rules.on_percent, Some(95));
    }

    #[test]
    fn test_missing_instance_uses_defaults() {
        let defaults = InstanceDefaults::default();
        let settings = EffectiveSettings::resolve(ModuleId::new(), None, &defaults);
        assert!(!settings.configured);
        assert!(settings.resume_playback);
        assert!(settings.rules.is_empty());
    }

    #[test]
    fn test_out_of_range_percent_is_clamped() {
        assert_eq!(clamp_percent(0), 1);
        assert_eq!(clamp_percent(250), 100);
        assert_eq!(clamp_percent(42), 42);
    }
}
