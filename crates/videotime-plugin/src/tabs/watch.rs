//! The tab holding the player.

use super::{TabContext, TabPlugin};

/// Shows the video.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchTab;

impl TabPlugin for WatchTab {
    fn name(&self) -> &str {
        "watch"
    }

    fn label(&self) -> &str {
        "Watch"
    }

    fn render_context(&self, ctx: &TabContext<'_>) -> serde_json::Value {
        serde_json::json!({
            "name": ctx.name,
            "player": ctx.player,
            "playable": ctx.player.is_some(),
            "resume_playback": ctx.settings.resume_playback,
            "prevent_fast_forwarding": ctx.settings.prevent_fast_forwarding,
        })
    }
}
