//! Player embedders: turn a video URL into the data a player needs.

pub mod html5;
pub mod vimeo;

use serde::{Deserialize, Serialize};

use videotime_core::result::AppResult;
use videotime_entity::instance::EffectiveSettings;

pub use html5::Html5Player;
pub use vimeo::VimeoPlayer;

/// Everything the client needs to mount a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEmbed {
    /// Name of the embedder that produced this.
    pub player: String,
    /// URL the player loads.
    pub embed_url: String,
    /// Player options.
    pub options: serde_json::Value,
}

/// A player technology for a family of video URLs.
pub trait PlayerEmbedder: Send + Sync + std::fmt::Debug {
    /// Unique embedder name.
    fn name(&self) -> &str;

    /// Whether this embedder can play the URL.
    fn supports(&self, url: &str) -> bool;

    /// Build the embed data for an instance.
    fn embed(&self, settings: &EffectiveSettings) -> AppResult<PlayerEmbed>;
}

/// Split a URL into lowercase host and path, dropping scheme, query and
/// fragment. Returns `None` for anything that is not http(s).
pub(crate) fn split_url(url: &str) -> Option<(String, String)> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (host, path) = match rest.find('/') {
        Some(slash) => (&rest[..slash], &rest[slash..]),
        None => (rest, "/"),
    };
    let host = host.rsplit('@').next().unwrap_or(host);
    let host = host.split(':').next().unwrap_or(host);
    if host.is_empty() {
        return None;
    }
    Some((host.to_ascii_lowercase(), path.to_string()))
}

/// Options shared by every player.
pub(crate) fn base_options(settings: &EffectiveSettings) -> serde_json::Value {
    serde_json::json!({
        "resume_playback": settings.resume_playback,
        "prevent_fast_forwarding": settings.prevent_fast_forwarding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_url() {
        assert_eq!(
            split_url("https://Vimeo.com/76979871?share=copy"),
            Some(("vimeo.com".to_string(), "/76979871".to_string()))
        );
        assert_eq!(
            split_url("http://cdn.example.com:8080"),
            Some(("cdn.example.com".to_string(), "/".to_string()))
        );
        assert_eq!(split_url("ftp://example.com/a.mp4"), None);
        assert_eq!(split_url("https://"), None);
    }
}
