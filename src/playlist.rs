use anyhow::{Context, Result, ensure};
use futures_util::{StreamExt, stream};
use tracing::{info, instrument, warn};

use crate::catalog::Stream;
use crate::util::title_case;

/// Renders the IPTV playlist: one `#EXTINF` line with tvg attributes per
/// stream, followed by its URL. Iframe sources are included too; players
/// that cannot embed them will skip the entry.
#[must_use]
pub fn render(streams: &[Stream]) -> String {
    let mut playlist = String::from("#EXTM3U\n");

    for stream in streams {
        playlist.push_str(&format!(
            "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}\n",
            stream.id,
            stream.name,
            stream.logo,
            title_case(&stream.category),
            stream.name
        ));
        playlist.push_str(&stream.url);
        playlist.push('\n');
    }

    playlist
}

/// Fetches every directly-playable stream URL and verifies the body parses
/// as an M3U8 playlist (master or media). Failures are demoted to warnings:
/// YouTube manifests are session-bound and may reject a second client even
/// though the URL is fine in a player.
///
/// Returns the number of streams that verified OK.
pub async fn check_streams(
    client: &reqwest::Client,
    streams: &[Stream],
    parallelism: usize,
) -> usize {
    let candidates: Vec<&Stream> = streams
        .iter()
        .filter(|s| !s.source_type.is_iframe())
        .collect();
    info!("Checking {} playable URLs", candidates.len());

    let results: Vec<bool> = stream::iter(candidates)
        .map(|s| async move {
            match check_one(client, &s.url).await {
                Ok(()) => true,
                Err(error) => {
                    warn!("{}: check failed: {error:#}", s.id);
                    false
                }
            }
        })
        .buffer_unordered(parallelism.max(1))
        .collect()
        .await;

    results.iter().filter(|ok| **ok).count()
}

#[instrument(skip(client, url))]
async fn check_one(client: &reqwest::Client, url: &str) -> Result<()> {
    let response = client
        .get(url)
        .send()
        .await
        .context("Fetching stream URL")?;
    ensure!(
        response.status().is_success(),
        "Status {}",
        response.status()
    );

    let body = response.bytes().await.context("Reading stream body")?;
    m3u8_rs::parse_playlist_res(&body)
        .map_err(|error| anyhow::anyhow!("Not an M3U8 playlist: {error:?}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::source::SourceType;

    fn stream(id: &str, category: &str, url: &str) -> Stream {
        Stream {
            id: id.to_string(),
            name: "Somoy News".to_string(),
            name_bn: "সময় নিউজ".to_string(),
            country: "Bangladesh".to_string(),
            category: category.to_string(),
            logo: "https://cdn.example.com/somoy.png".to_string(),
            url: url.to_string(),
            source_type: SourceType::Direct,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn renders_header_only_for_empty_catalog() {
        assert_eq!(render(&[]), "#EXTM3U\n");
    }

    #[test]
    fn renders_extinf_with_tvg_attributes() {
        let playlist = render(&[stream(
            "somoy-news",
            "news",
            "https://cdn.example.com/live.m3u8",
        )]);

        assert_eq!(
            playlist,
            "#EXTM3U\n\
             #EXTINF:-1 tvg-id=\"somoy-news\" tvg-name=\"Somoy News\" \
             tvg-logo=\"https://cdn.example.com/somoy.png\" \
             group-title=\"News\",Somoy News\n\
             https://cdn.example.com/live.m3u8\n"
        );
    }

    #[test]
    fn alternates_extinf_and_url_lines() {
        let playlist = render(&[
            stream("a", "news", "https://cdn.example.com/a.m3u8"),
            stream("b", "sports", "https://cdn.example.com/b.m3u8"),
        ]);

        let lines: Vec<&str> = playlist.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "#EXTM3U");
        assert!(lines[1].starts_with("#EXTINF:-1 "));
        assert_eq!(lines[2], "https://cdn.example.com/a.m3u8");
        assert!(lines[3].contains(r#"group-title="Sports""#));
        assert_eq!(lines[4], "https://cdn.example.com/b.m3u8");
    }
}
