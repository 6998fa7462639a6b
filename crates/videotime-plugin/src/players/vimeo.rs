//! Vimeo player.

use videotime_core::error::AppError;
use videotime_core::result::AppResult;
use videotime_entity::instance::EffectiveSettings;

use super::{PlayerEmbed, PlayerEmbedder, base_options, split_url};

const HOSTS: [&str; 3] = ["vimeo.com", "www.vimeo.com", "player.vimeo.com"];

/// Embeds videos hosted on Vimeo.
#[derive(Debug, Clone, Copy, Default)]
pub struct VimeoPlayer;

impl VimeoPlayer {
    /// Extract the numeric video ID from a Vimeo URL.
    pub fn video_id(url: &str) -> Option<String> {
        let (host, path) = split_url(url)?;
        if !HOSTS.contains(&host.as_str()) {
            return None;
        }
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .find(|segment| segment.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string)
    }
}

impl PlayerEmbedder for VimeoPlayer {
    fn name(&self) -> &str {
        "vimeo"
    }

    fn supports(&self, url: &str) -> bool {
        split_url(url).is_some_and(|(host, _)| HOSTS.contains(&host.as_str()))
    }

    fn embed(&self, settings: &EffectiveSettings) -> AppResult<PlayerEmbed> {
        let id = Self::video_id(&settings.video_url).ok_or_else(|| {
            AppError::validation(format!(
                "No Vimeo video ID in '{}'",
                settings.video_url
            ))
        })?;

        let mut options = base_options(settings);
        options["dnt"] = serde_json::json!(true);

        Ok(PlayerEmbed {
            player: self.name().to_string(),
            embed_url: format!("https://player.vimeo.com/video/{id}"),
            options,
        })
    }
}
