use serde::{Deserialize, Serialize};

/// How a channel's playable URL is obtained. The wire names appear verbatim
/// in `channels.json` and in the emitted catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Live page of a YouTube channel; resolved to an HLS manifest URL
    YoutubeLive,
    /// A YouTube `/embed/` URL; resolved to an HLS manifest URL
    YoutubeEmbed,
    /// A raw, already-playable URL taken from the config as-is
    Direct,
    McasterIframe,
    StmifyIframe,
}

impl SourceType {
    /// Iframe sources can only be embedded, not handed to a video player.
    #[must_use]
    pub const fn is_iframe(self) -> bool {
        matches!(self, Self::McasterIframe | Self::StmifyIframe)
    }
}

/// Normalizes a configured iframe URL into something a browser can load:
/// protocol-relative `//host/…` and bare `host/…` forms get `https`.
///
/// Returns `None` for an empty value so the channel is skipped.
#[must_use]
pub fn normalize_iframe_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(trimmed.to_string());
    }

    Some(format!("https://{trimmed}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_config_values() {
        let parsed: SourceType = serde_json::from_str(r#""mcaster_iframe""#).unwrap();
        assert_eq!(parsed, SourceType::McasterIframe);
        assert_eq!(
            serde_json::to_string(&SourceType::YoutubeLive).unwrap(),
            r#""youtube_live""#
        );
    }

    #[test]
    fn iframe_sources_are_flagged() {
        assert!(SourceType::McasterIframe.is_iframe());
        assert!(SourceType::StmifyIframe.is_iframe());
        assert!(!SourceType::Direct.is_iframe());
        assert!(!SourceType::YoutubeLive.is_iframe());
    }

    #[test]
    fn adds_scheme_to_protocol_relative_urls() {
        assert_eq!(
            normalize_iframe_url("//player.example.com/ch/1").as_deref(),
            Some("https://player.example.com/ch/1")
        );
    }

    #[test]
    fn adds_scheme_to_bare_urls() {
        assert_eq!(
            normalize_iframe_url("player.example.com/ch/1").as_deref(),
            Some("https://player.example.com/ch/1")
        );
    }

    #[test]
    fn keeps_existing_scheme() {
        assert_eq!(
            normalize_iframe_url("http://player.example.com/ch/1").as_deref(),
            Some("http://player.example.com/ch/1")
        );
        assert_eq!(
            normalize_iframe_url("  https://player.example.com/ch/1 ").as_deref(),
            Some("https://player.example.com/ch/1")
        );
    }

    #[test]
    fn empty_url_resolves_to_nothing() {
        assert_eq!(normalize_iframe_url(""), None);
        assert_eq!(normalize_iframe_url("   "), None);
    }
}
