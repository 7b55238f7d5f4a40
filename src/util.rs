use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

/// YouTube serves a consent interstitial to obviously non-browser agents,
/// so the scraper identifies as a plain browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

#[must_use]
pub fn init_http_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert("User-Agent", HeaderValue::from_static(BROWSER_USER_AGENT));

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Unable to build HTTP client")
}

/// Escapes a value for interpolation into HTML text or a double-quoted
/// attribute.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Uppercases the first letter of every whitespace-separated word, e.g.
/// `"news"` → `"News"`.
#[must_use]
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<String>>()
        .join(" ")
}
