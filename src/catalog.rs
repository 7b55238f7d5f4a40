use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Channel, Title, TitleKind};
use crate::source::{self, SourceType};
use crate::{telegram, youtube};

/// A channel whose playable/embeddable URL has been resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Stream {
    pub id: String,
    pub name: String,
    pub name_bn: String,
    pub country: String,
    pub category: String,
    pub logo: String,
    pub url: String,
    pub source_type: SourceType,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StreamsDocument {
    pub last_updated: DateTime<Utc>,
    pub total_streams: usize,
    pub streams: Vec<Stream>,
}

#[derive(Debug, Serialize)]
pub struct AnimeDocument {
    pub last_updated: DateTime<Utc>,
    pub total_anime: usize,
    pub anime: Vec<Title>,
}

#[derive(Debug, Serialize)]
pub struct MoviesDocument {
    pub last_updated: DateTime<Utc>,
    pub total_movies: usize,
    pub movies: Vec<Title>,
}

/// Resolves every configured channel into a [`Stream`]. A channel that fails
/// to resolve (network error, offline, bad config) is logged and skipped;
/// the run never aborts over a single channel.
pub async fn resolve_channels(client: &reqwest::Client, channels: &[Channel]) -> Vec<Stream> {
    info!("Resolving {} channels", channels.len());

    let mut streams = Vec::with_capacity(channels.len());
    let mut failed = 0usize;

    for (idx, channel) in channels.iter().enumerate() {
        info!("[{}/{}] {}", idx + 1, channels.len(), channel.name);

        let url = match resolve_source(client, channel).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                warn!("{}: no playable URL, skipping", channel.id);
                failed += 1;
                continue;
            }
            Err(error) => {
                warn!("{}: {error:#}, skipping", channel.id);
                failed += 1;
                continue;
            }
        };

        streams.push(Stream {
            id: channel.id.clone(),
            name: channel.name.clone(),
            name_bn: channel.name_bn.clone().unwrap_or_else(|| channel.name.clone()),
            country: channel
                .country
                .clone()
                .unwrap_or_else(|| "International".to_string()),
            category: channel.category.clone(),
            logo: channel.logo.clone(),
            url,
            source_type: channel.source_type,
            updated_at: Utc::now(),
        });
    }

    info!("Resolved {} channels, {} failed", streams.len(), failed);
    streams
}

async fn resolve_source(
    client: &reqwest::Client,
    channel: &Channel,
) -> anyhow::Result<Option<String>> {
    let cfg = &channel.scrape_config;

    match channel.source_type {
        SourceType::YoutubeLive => {
            youtube::live_hls_url(
                client,
                cfg.youtube_channel_id.as_deref(),
                cfg.youtube_handle.as_deref(),
            )
            .await
        }
        SourceType::YoutubeEmbed => {
            let Some(video_id) = cfg
                .youtube_embed_url
                .as_deref()
                .and_then(youtube::extract_embed_video_id)
            else {
                return Ok(None);
            };
            youtube::video_hls_url(client, &video_id).await
        }
        SourceType::Direct => Ok(cfg.url.clone().filter(|url| !url.is_empty())),
        SourceType::McasterIframe | SourceType::StmifyIframe => Ok(cfg
            .iframe_url
            .as_deref()
            .and_then(source::normalize_iframe_url)),
    }
}

/// Attaches `video_url`/`video_type` to a library title by converting its
/// Telegram links, and stamps `updated_at`. Unconvertible links are warned
/// about and left bare, so the entry still renders without a player.
pub fn convert_title(title: &mut Title) {
    match title.kind {
        TitleKind::Series => {
            for episode in &mut title.episodes {
                let Some(link) = episode.telegram_link.as_deref() else {
                    continue;
                };
                match telegram::convert_link(link) {
                    Some(converted) => {
                        episode.video_url = Some(converted.embed_url);
                        episode.video_type = Some(converted.kind);
                    }
                    None => warn!(
                        "{}: episode {} has an unconvertible link: {link}",
                        title.id, episode.number
                    ),
                }
            }
        }
        TitleKind::Standalone => {
            let Some(link) = title.telegram_link.as_deref() else {
                warn!("{}: standalone title without a telegram_link", title.id);
                title.updated_at = Some(Utc::now());
                return;
            };
            match telegram::convert_link(link) {
                Some(converted) => {
                    title.video_url = Some(converted.embed_url);
                    title.video_type = Some(converted.kind);
                }
                None => warn!("{}: could not convert link: {link}", title.id),
            }
        }
    }

    title.updated_at = Some(Utc::now());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Episode, ScrapeConfig};
    use crate::telegram::VideoKind;

    fn channel(source_type: SourceType, scrape_config: ScrapeConfig) -> Channel {
        Channel {
            id: "test".into(),
            name: "Test".into(),
            name_bn: None,
            country: None,
            category: "news".into(),
            logo: "logo.png".into(),
            source_type,
            scrape_config,
        }
    }

    #[tokio::test]
    async fn direct_source_passes_url_through() {
        let client = crate::util::init_http_client();
        let ch = channel(
            SourceType::Direct,
            ScrapeConfig {
                url: Some("https://cdn.example.com/live.m3u8".into()),
                ..ScrapeConfig::default()
            },
        );
        let url = resolve_source(&client, &ch).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://cdn.example.com/live.m3u8"));
    }

    #[tokio::test]
    async fn iframe_source_normalizes_scheme() {
        let client = crate::util::init_http_client();
        let ch = channel(
            SourceType::McasterIframe,
            ScrapeConfig {
                iframe_url: Some("//mcaster.example.com/embed/5".into()),
                ..ScrapeConfig::default()
            },
        );
        let url = resolve_source(&client, &ch).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://mcaster.example.com/embed/5"));
    }

    #[tokio::test]
    async fn misconfigured_channel_resolves_to_none() {
        let client = crate::util::init_http_client();
        // youtube_embed without an embed URL
        let ch = channel(SourceType::YoutubeEmbed, ScrapeConfig::default());
        assert_eq!(resolve_source(&client, &ch).await.unwrap(), None);

        // direct without a URL
        let ch = channel(SourceType::Direct, ScrapeConfig::default());
        assert_eq!(resolve_source(&client, &ch).await.unwrap(), None);
    }

    #[test]
    fn series_conversion_fills_episode_urls() {
        let mut title: Title = serde_json::from_value(serde_json::json!({
            "id": "one-piece",
            "name": "One Piece",
            "type": "series",
            "episodes": [
                { "number": 1, "telegram_link": "t.me/anime/1001" },
                { "number": 2, "telegram_link": "not a link" }
            ]
        }))
        .unwrap();

        convert_title(&mut title);

        assert_eq!(
            title.episodes[0].video_url.as_deref(),
            Some("https://t.me/anime/1001?embed=1&mode=tme")
        );
        assert_eq!(title.episodes[0].video_type, Some(VideoKind::TelegramEmbed));
        assert!(title.episodes[1].video_url.is_none());
        assert!(title.updated_at.is_some());
    }

    #[test]
    fn standalone_conversion_fills_title_url() {
        let mut title: Title = serde_json::from_value(serde_json::json!({
            "id": "inception",
            "name": "Inception",
            "type": "standalone",
            "telegram_link": "t.me/movies/5001"
        }))
        .unwrap();

        convert_title(&mut title);

        assert_eq!(
            title.video_url.as_deref(),
            Some("https://t.me/movies/5001?embed=1&mode=tme")
        );
    }

    #[test]
    fn episode_with_only_a_number_parses() {
        let episode: Episode = serde_json::from_value(serde_json::json!({ "number": 3 })).unwrap();
        assert!(episode.telegram_link.is_none());
        assert!(episode.title.is_none());
    }
}
