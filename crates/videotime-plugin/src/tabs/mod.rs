//! Tab plugins: the panels shown on a video activity page.

pub mod information;
pub mod watch;

use serde::{Deserialize, Serialize};

use videotime_entity::instance::EffectiveSettings;

use crate::players::PlayerEmbed;

pub use information::InformationTab;
pub use watch::WatchTab;

/// What a tab sees when it renders.
#[derive(Debug, Clone, Copy)]
pub struct TabContext<'a> {
    /// Activity display name.
    pub name: &'a str,
    /// Effective settings of the activity.
    pub settings: &'a EffectiveSettings,
    /// Player chosen for the video URL, if any supports it.
    pub player: Option<&'a PlayerEmbed>,
}

/// A tab ready for the client to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTab {
    /// Tab name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Template data.
    pub context: serde_json::Value,
}

/// One tab of the activity page.
pub trait TabPlugin: Send + Sync + std::fmt::Debug {
    /// Unique tab name.
    fn name(&self) -> &str;

    /// Human-readable label.
    fn label(&self) -> &str;

    /// Whether the tab is shown when configuration does not list tabs.
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Template data for this tab.
    fn render_context(&self, ctx: &TabContext<'_>) -> serde_json::Value;

    /// Render the tab.
    fn render(&self, ctx: &TabContext<'_>) -> RenderedTab {
        RenderedTab {
            name: self.name().to_string(),
            label: self.label().to_string(),
            context: self.render_context(ctx),
        }
    }
}
