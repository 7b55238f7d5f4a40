use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, instrument};

// Both IDs are dug out of the initial-data JSON blob YouTube inlines into
// its watch/live pages; the first occurrence is the page's primary video.
static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""videoId":"([^"]+)""#).unwrap());

static HLS_MANIFEST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""hlsManifestUrl":"([^"]+)""#).unwrap());

static EMBED_VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/embed/([a-zA-Z0-9_-]+)").unwrap());

/// Extracts the live video ID from a channel's `/live` page body.
#[must_use]
pub fn extract_live_video_id(body: &str) -> Option<String> {
    VIDEO_ID_REGEX
        .captures(body)
        .map(|captures| captures[1].to_string())
}

/// Extracts the HLS manifest URL from a watch page body. The URL sits inside
/// a JSON string, so `&` sequences are folded back into `&`.
#[must_use]
pub fn extract_hls_manifest_url(body: &str) -> Option<String> {
    HLS_MANIFEST_REGEX
        .captures(body)
        .map(|captures| captures[1].replace("\\u0026", "&"))
}

/// Extracts a video ID out from a user-configured `/embed/` URL.
#[must_use]
pub fn extract_embed_video_id(embed_url: &str) -> Option<String> {
    EMBED_VIDEO_ID_REGEX
        .captures(embed_url)
        .map(|captures| captures[1].to_string())
}

/// Resolves a channel's current live broadcast to an HLS manifest URL.
/// Either a channel ID (`UC…`) or a handle (without the `@`) works.
///
/// Returns `None` when the channel is not live or has no HLS manifest.
#[instrument(skip(client))]
pub async fn live_hls_url(
    client: &reqwest::Client,
    channel_id: Option<&str>,
    handle: Option<&str>,
) -> Result<Option<String>> {
    let live_page_url = match (channel_id, handle) {
        (Some(id), _) => format!("https://www.youtube.com/channel/{id}/live"),
        (None, Some(handle)) => {
            let handle = handle.trim_start_matches('@');
            format!("https://www.youtube.com/@{handle}/live")
        }
        (None, None) => return Ok(None),
    };

    let body = client
        .get(&live_page_url)
        .send()
        .await
        .context("Fetching channel live page")?
        .text()
        .await
        .context("Decoding channel live page")?;

    let Some(video_id) = extract_live_video_id(&body) else {
        debug!("No live video ID on {live_page_url}");
        return Ok(None);
    };
    debug!("Live video ID: {video_id}");

    video_hls_url(client, &video_id).await
}

/// Resolves a video ID to its HLS manifest URL via the watch page.
///
/// Returns `None` when the video is not a live/HLS stream.
#[instrument(skip(client))]
pub async fn video_hls_url(
    client: &reqwest::Client,
    video_id: &str,
) -> Result<Option<String>> {
    let body = client
        .get(format!("https://www.youtube.com/watch?v={video_id}"))
        .send()
        .await
        .context("Fetching watch page")?
        .text()
        .await
        .context("Decoding watch page")?;

    Ok(extract_hls_manifest_url(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_video_id() {
        let body = r#"{"videoId":"jfKfPfyJRdk","title":"live"},{"videoId":"zzz"}"#;
        assert_eq!(extract_live_video_id(body).as_deref(), Some("jfKfPfyJRdk"));
    }

    #[test]
    fn no_video_id_in_offline_page() {
        assert_eq!(extract_live_video_id("<html>channel is offline</html>"), None);
    }

    #[test]
    fn unescapes_ampersands_in_manifest_url() {
        let body = r#""hlsManifestUrl":"https://manifest.googlevideo.com/api/manifest/hls_variant/expire/123\u0026id/abc.m3u8""#;
        assert_eq!(
            extract_hls_manifest_url(body).as_deref(),
            Some("https://manifest.googlevideo.com/api/manifest/hls_variant/expire/123&id/abc.m3u8")
        );
    }

    #[test]
    fn extracts_embed_video_id() {
        assert_eq!(
            extract_embed_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1")
                .as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(extract_embed_video_id("https://example.com/player"), None);
    }
}
