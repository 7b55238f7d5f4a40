use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// t.me/c/<internal-channel-id>/<post>. Checked before the public form so the
// literal `c` path segment is never mistaken for a channel name.
static PRIVATE_POST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"t\.me/c/(\d+)/(\d+)").unwrap());

// t.me/<channel>/<post> or telegram.me/<channel>/<post>
static PUBLIC_POST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:t|telegram)\.me/([A-Za-z0-9_]+)/(\d+)").unwrap());

const DIRECT_VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".mkv", ".avi"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoKind {
    TelegramEmbed,
    DirectVideo,
}

/// A Telegram post link rewritten into something a static page can embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedLink {
    pub original: String,
    pub embed_url: String,
    pub preview_url: String,
    #[serde(rename = "type")]
    pub kind: VideoKind,
}

/// Rewrites a Telegram post link (`t.me/channel/123`, `t.me/c/123456/789`,
/// `telegram.me/channel/123`, scheme optional) into an embeddable URL.
/// Direct `.mp4`/`.mkv`/`.avi` links pass through untouched.
///
/// Returns `None` when the link matches no supported shape.
#[must_use]
pub fn convert_link(raw: &str) -> Option<ConvertedLink> {
    let link = raw.trim();
    if link.is_empty() {
        return None;
    }

    if let Some(captures) = PRIVATE_POST_REGEX.captures(link) {
        let channel_id = &captures[1];
        let post_id = &captures[2];

        return Some(ConvertedLink {
            original: link.to_string(),
            embed_url: format!("https://t.me/c/{channel_id}/{post_id}?embed=1&mode=tme"),
            preview_url: format!("https://t.me/c/{channel_id}/{post_id}"),
            kind: VideoKind::TelegramEmbed,
        });
    }

    if let Some(captures) = PUBLIC_POST_REGEX.captures(link) {
        let channel = &captures[1];
        let post_id = &captures[2];

        return Some(ConvertedLink {
            original: link.to_string(),
            embed_url: format!("https://t.me/{channel}/{post_id}?embed=1&mode=tme"),
            preview_url: format!("https://t.me/{channel}/{post_id}"),
            kind: VideoKind::TelegramEmbed,
        });
    }

    let lowered = link.to_lowercase();
    if link.starts_with("http")
        && DIRECT_VIDEO_EXTENSIONS.iter().any(|ext| lowered.contains(ext))
    {
        return Some(ConvertedLink {
            original: link.to_string(),
            embed_url: link.to_string(),
            preview_url: link.to_string(),
            kind: VideoKind::DirectVideo,
        });
    }

    None
}
