//! Plugin manager: builds the registries from configuration and owns the
//! hook dispatcher.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use videotime_core::config::PluginConfig;
use videotime_core::error::AppError;
use videotime_core::result::AppResult;

use crate::hooks::definitions::HookPoint;
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::registry::{HookHandler, HookRegistry};
use crate::notifier::HookCompletionNotifier;
use crate::players::{Html5Player, PlayerEmbedder, VimeoPlayer};
use crate::registry::PluginRegistry;
use crate::tabs::{InformationTab, TabPlugin, WatchTab};

/// Every compiled-in tab, in default display order.
pub fn builtin_tabs() -> Vec<Arc<dyn TabPlugin>> {
    vec![Arc::new(WatchTab), Arc::new(InformationTab)]
}

/// Every compiled-in player, in default lookup order.
pub fn builtin_players() -> Vec<Arc<dyn PlayerEmbedder>> {
    vec![Arc::new(VimeoPlayer), Arc::new(Html5Player)]
}

/// Owns the plugin registry and the hook machinery.
#[derive(Debug)]
pub struct PluginManager {
    plugin_registry: Arc<PluginRegistry>,
    hook_registry: Arc<HookRegistry>,
    hook_dispatcher: Arc<HookDispatcher>,
}

impl PluginManager {
    /// Register the configured built-in tabs and players.
    ///
    /// An empty tab list enables every tab that is on by default; an empty
    /// player list enables every player. Unknown names are a configuration
    /// error.
    pub async fn from_config(config: &PluginConfig) -> AppResult<Self> {
        let hook_registry = Arc::new(HookRegistry::new());
        let hook_dispatcher = Arc::new(HookDispatcher::new(
            Arc::clone(&hook_registry),
            Duration::from_secs(config.hook_timeout_seconds.max(1)),
        ));
        let plugin_registry = Arc::new(PluginRegistry::new());

        let tabs = if config.tabs.is_empty() {
            builtin_tabs()
                .into_iter()
                .filter(|t| t.enabled_by_default())
                .collect()
        } else {
            select(builtin_tabs(), &config.tabs, |t| t.name(), "tab plugin")?
        };
        for tab in tabs {
            plugin_registry.register_tab(tab).await?;
        }

        let players = if config.players.is_empty() {
            builtin_players()
        } else {
            select(builtin_players(), &config.players, |p| p.name(), "player")?
        };
        for player in players {
            plugin_registry.register_player(player).await?;
        }

        info!(
            tabs = ?plugin_registry.tab_names().await,
            players = ?plugin_registry.player_names().await,
            hook_timeout_seconds = config.hook_timeout_seconds,
            "Plugins initialized"
        );

        Ok(Self {
            plugin_registry,
            hook_registry,
            hook_dispatcher,
        })
    }

    /// Register a hook handler.
    pub async fn register_hook(&self, hook: HookPoint, handler: Arc<dyn HookHandler>) {
        self.hook_registry.register(hook, handler).await;
    }

    /// Completion notifier that fires the hook matching each event.
    pub fn notifier(&self) -> HookCompletionNotifier {
        HookCompletionNotifier::new(Arc::clone(&self.hook_dispatcher))
    }

    /// Returns the hook dispatcher.
    pub fn dispatcher(&self) -> &Arc<HookDispatcher> {
        &self.hook_dispatcher
    }

    /// Returns the hook registry.
    pub fn hook_registry(&self) -> &Arc<HookRegistry> {
        &self.hook_registry
    }

    /// Returns the plugin registry.
    pub fn plugin_registry(&self) -> &Arc<PluginRegistry> {
        &self.plugin_registry
    }
}

/// Pick plugins by name, in the order the names are listed.
fn select<T: ?Sized>(
    available: Vec<Arc<T>>,
    names: &[String],
    name_of: impl Fn(&T) -> &str,
    what: &str,
) -> AppResult<Vec<Arc<T>>> {
    names
        .iter()
        .map(|name| {
            available
                .iter()
                .find(|p| name_of(p) == name.as_str())
                .cloned()
                .ok_or_else(|| AppError::configuration(format!("Unknown {what} '{name}'")))
        })
        .collect()
}
