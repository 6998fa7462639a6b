//! Tab and player plugin configuration.

use serde::{Deserialize, Serialize};

/// Which built-in tab and player plugins are registered at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Names of tab plugins to enable, in display order.
    #[serde(default = "default_tabs")]
    pub tabs: Vec<String>,
    /// Names of player embedders to enable, in lookup order.
    #[serde(default = "default_players")]
    pub players: Vec<String>,
    /// Seconds a hook handler may run before it is abandoned.
    #[serde(default = "default_hook_timeout")]
    pub hook_timeout_seconds: u64,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            tabs: default_tabs(),
            players: default_players(),
            hook_timeout_seconds: default_hook_timeout(),
        }
    }
}

fn default_tabs() -> Vec<String> {
    vec!["watch".to_string(), "information".to_string()]
}

fn default_players() -> Vec<String> {
    vec!["vimeo".to_string(), "html5".to_string()]
}

fn default_hook_timeout() -> u64 {
    10
}
