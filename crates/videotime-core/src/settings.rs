//! Forced admin settings overlay.
//!
//! Site administrators may pin a setting so that every instance uses the
//! site default regardless of what the instance itself stores. The
//! overlay is applied when settings are read, never written back.

use serde::{Deserialize, Serialize};

/// Effective value of a setting: the admin default when forced,
/// otherwise the instance's own value.
pub fn resolve<T>(instance_value: T, admin_default: T, forced: bool) -> T {
    if forced { admin_default } else { instance_value }
}

/// A site-level default together with its force flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSetting<T> {
    /// Default used for new instances, and for all instances when forced.
    pub value: T,
    /// Whether the default overrides instance values.
    #[serde(default)]
    pub forced: bool,
}

impl<T: Clone> AdminSetting<T> {
    /// A default that instances may override.
    pub fn unforced(value: T) -> Self {
        Self {
            value,
            forced: false,
        }
    }

    /// A default pinned for every instance.
    pub fn forced(value: T) -> Self {
        Self {
            value,
            forced: true,
        }
    }

    /// Resolve against an instance's stored value.
    pub fn apply(&self, instance_value: T) -> T {
        resolve(instance_value, self.value.clone(), self.forced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_instance_when_not_forced() {
        assert!(resolve(true, false, false));
        assert_eq!(resolve(80u8, 50, false), 80);
    }

    #[test]
    fn test_resolve_uses_admin_default_when_forced() {
        assert!(!resolve(true, false, true));
        assert_eq!(resolve(80u8, 50, true), 50);
    }

    #[test]
    fn test_admin_setting_apply() {
        assert!(AdminSetting::forced(true).apply(false));
        assert!(!AdminSetting::unforced(true).apply(false));
    }

    #[test]
    fn test_forced_flag_defaults_to_false() {
        let setting: AdminSetting<u32> =
            serde_json::from_str(r#"{"value": 30}"#).expect("deserialize");
        assert_eq!(setting, AdminSetting::unforced(30));
    }
}
