//! Native HTML5 `<video>` player for direct media files.

use videotime_core::error::AppError;
use videotime_core::result::AppResult;
use videotime_entity::instance::EffectiveSettings;

use super::{PlayerEmbed, PlayerEmbedder, base_options, split_url};

/// Extensions and the MIME type the browser is told to expect.
const MEDIA_TYPES: [(&str, &str); 6] = [
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("ogg", "video/ogg"),
    ("m3u8", "application/x-mpegURL"),
];

/// Plays media files directly in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5Player;

impl Html5Player {
    /// MIME type for a media URL, judged by its file extension.
    pub fn mime_type(url: &str) -> Option<&'static str> {
        let (_, path) = split_url(url)?;
        let file = path.rsplit('/').next()?;
        let (_, ext) = file.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        MEDIA_TYPES
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, mime)| *mime)
    }
}

impl PlayerEmbedder for Html5Player {
    fn name(&self) -> &str {
        "html5"
    }

    fn supports(&self, url: &str) -> bool {
        Self::mime_type(url).is_some()
    }

    fn embed(&self, settings: &EffectiveSettings) -> AppResult<PlayerEmbed> {
        let mime = Self::mime_type(&settings.video_url).ok_or_else(|| {
            AppError::validation(format!(
                "Unsupported media file '{}'",
                settings.video_url
            ))
        })?;

        let mut options = base_options(settings);
        options["type"] = serde_json::json!(mime);

        Ok(PlayerEmbed {
            player: self.name().to_string(),
            embed_url: settings.video_url.trim().to_string(),
            options,
        })
    }
}
