//! Plugin registry: the tabs and players enabled on this server.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use videotime_core::error::AppError;
use videotime_core::result::AppResult;

use crate::players::PlayerEmbedder;
use crate::tabs::{RenderedTab, TabContext, TabPlugin};

/// Registered tab and player plugins, kept in display and lookup order.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    tabs: RwLock<Vec<Arc<dyn TabPlugin>>>,
    players: RwLock<Vec<Arc<dyn PlayerEmbedder>>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tab. Names must be unique.
    pub async fn register_tab(&self, tab: Arc<dyn TabPlugin>) -> AppResult<()> {
        let mut tabs = self.tabs.write().await;
        if tabs.iter().any(|t| t.name() == tab.name()) {
            return Err(AppError::conflict(format!(
                "Tab plugin '{}' is already registered",
                tab.name()
            )));
        }
        info!(tab = %tab.name(), position = tabs.len(), "Registering tab plugin");
        tabs.push(tab);
        Ok(())
    }

    /// Appends a player. Names must be unique.
    pub async fn register_player(&self, player: Arc<dyn PlayerEmbedder>) -> AppResult<()> {
        let mut players = self.players.write().await;
        if players.iter().any(|p| p.name() == player.name()) {
            return Err(AppError::conflict(format!(
                "Player '{}' is already registered",
                player.name()
            )));
        }
        info!(player = %player.name(), position = players.len(), "Registering player");
        players.push(player);
        Ok(())
    }

    /// Names of the registered tabs, in display order.
    pub async fn tab_names(&self) -> Vec<String> {
        let tabs = self.tabs.read().await;
        tabs.iter().map(|t| t.name().to_string()).collect()
    }

    /// Names of the registered players, in lookup order.
    pub async fn player_names(&self) -> Vec<String> {
        let players = self.players.read().await;
        players.iter().map(|p| p.name().to_string()).collect()
    }

    /// First registered player that supports the URL.
    pub async fn player_for(&self, url: &str) -> Option<Arc<dyn PlayerEmbedder>> {
        let players = self.players.read().await;
        players.iter().find(|p| p.supports(url)).cloned()
    }

    /// Render every tab for an activity.
    pub async fn render_tabs(&self, ctx: &TabContext<'_>) -> Vec<RenderedTab> {
        let tabs = self.tabs.read().await;
        tabs.iter().map(|t| t.render(ctx)).collect()
    }
}
