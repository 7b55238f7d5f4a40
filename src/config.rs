use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::source::SourceType;
use crate::telegram::VideoKind;

/// Top-level shape of `channels.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsFile {
    pub channels: Vec<Channel>,
}

/// A configured live channel, before its playable URL is resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    /// Localized display name; falls back to `name`
    pub name_bn: Option<String>,
    pub country: Option<String>,
    pub category: String,
    pub logo: String,
    pub source_type: SourceType,
    #[serde(default)]
    pub scrape_config: ScrapeConfig,
}

/// Per-source knobs. Which field is read depends on the channel's
/// `source_type`; the rest are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeConfig {
    pub youtube_channel_id: Option<String>,
    pub youtube_handle: Option<String>,
    pub youtube_embed_url: Option<String>,
    pub url: Option<String>,
    pub iframe_url: Option<String>,
}

pub fn load_channels(path: &Path) -> Result<ChannelsFile> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Reading channel config {}", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("Parsing channel config {}", path.display()))
}

/// A library entry: either a series with per-episode Telegram links or a
/// standalone title with a single link. `video_url`/`video_type`/`updated_at`
/// are filled in during conversion and round-trip through the output JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: TitleKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<Episode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<Related>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_type: Option<VideoKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleKind {
    Series,
    Standalone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_type: Option<VideoKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Related {
    pub previous_season: Option<String>,
    pub next_season: Option<String>,
}

/// Reads the `titles` under a named key, e.g. `{"anime": [...]}`.
pub fn load_titles(path: &Path, key: &str) -> Result<Vec<Title>> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Reading library file {}", path.display()))?;
    let mut doc: serde_json::Value = serde_json::from_str(&body)
        .with_context(|| format!("Parsing library file {}", path.display()))?;

    let entries = match doc.get_mut(key) {
        Some(value) => value.take(),
        None => return Ok(Vec::new()),
    };
    if entries.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(entries)
        .with_context(|| format!("Parsing `{key}` entries in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_channel() {
        let file: ChannelsFile = serde_json::from_str(
            r#"{
                "channels": [{
                    "id": "somoy-news",
                    "name": "Somoy News",
                    "name_bn": "সময় নিউজ",
                    "category": "news",
                    "logo": "https://cdn.example.com/somoy.png",
                    "source_type": "youtube_live",
                    "scrape_config": { "youtube_channel_id": "UCabc123" }
                }]
            }"#,
        )
        .unwrap();

        let ch = &file.channels[0];
        assert_eq!(ch.id, "somoy-news");
        assert_eq!(ch.source_type, SourceType::YoutubeLive);
        assert_eq!(ch.scrape_config.youtube_channel_id.as_deref(), Some("UCabc123"));
        assert!(ch.country.is_none());
    }

    #[test]
    fn scrape_config_may_be_absent() {
        let ch: Channel = serde_json::from_str(
            r#"{
                "id": "x", "name": "X", "category": "misc",
                "logo": "l", "source_type": "direct"
            }"#,
        )
        .unwrap();
        assert!(ch.scrape_config.url.is_none());
    }

    #[test]
    fn parses_a_series_title() {
        let title: Title = serde_json::from_str(
            r#"{
                "id": "one-piece",
                "name": "One Piece",
                "genre": ["Action", "Adventure"],
                "type": "series",
                "episodes": [
                    { "number": 1, "title": "Romance Dawn", "telegram_link": "t.me/anime/1001" }
                ],
                "related": { "previous_season": null, "next_season": "one-piece-2" }
            }"#,
        )
        .unwrap();

        assert_eq!(title.kind, TitleKind::Series);
        assert_eq!(title.episodes.len(), 1);
        assert_eq!(title.related.unwrap().next_season.as_deref(), Some("one-piece-2"));
        assert!(title.video_url.is_none());
    }

    #[test]
    fn converted_fields_are_omitted_when_unset() {
        let title = Title {
            id: "m".into(),
            name: "M".into(),
            image: None,
            genre: vec![],
            description: None,
            kind: TitleKind::Standalone,
            episodes: vec![],
            telegram_link: Some("t.me/movies/5".into()),
            related: None,
            video_url: None,
            video_type: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&title).unwrap();
        assert!(json.get("video_url").is_none());
        assert!(json.get("episodes").is_none());
    }
}
