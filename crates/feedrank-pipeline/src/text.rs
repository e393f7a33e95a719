//! Text, URL and domain canonicalisation shared by the normalizer and the
//! deduplicator, so that equivalence keys agree with normalized fields.

use url::Url;

/// Trim, collapse every whitespace run (including newlines) to one space,
/// and truncate to `max_chars` characters.
#[must_use]
pub fn clean_text(text: &str, max_chars: usize) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

/// Lower-case and whitespace-collapse text for use in an equivalence key.
#[must_use]
pub fn normalize_key_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonicalise a URL for comparison.
///
/// Lower-cases, trims, strips a leading `http://` or `https://`, an optional
/// leading `www.`, and a trailing slash. The steps repeat until nothing
/// changes, so `normalize_url(normalize_url(u)) == normalize_url(u)`.
///
/// ```
/// use feedrank_pipeline::text::normalize_url;
///
/// assert_eq!(normalize_url("https://www.Example.com/a/"), "example.com/a");
/// assert_eq!(normalize_url("http://example.com/a"), "example.com/a");
/// ```
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let mut current = raw.trim().to_lowercase();
    loop {
        let next = strip_url_decorations(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_url_decorations(url: &str) -> String {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let url = url.strip_prefix("www.").unwrap_or(url);
    let url = url.strip_suffix('/').unwrap_or(url);
    url.to_string()
}

/// Extract the host of a normalized URL, without a leading `www.`.
///
/// Returns `None` when the URL is empty or has no parsable host.
#[must_use]
pub fn extract_domain(normalized_url: &str) -> Option<String> {
    if normalized_url.is_empty() {
        return None;
    }

    // Normalized URLs are scheme-less; anything still carrying a scheme
    // (ftp://, etc.) is parsed as-is.
    let candidate = if normalized_url.contains("://") {
        normalized_url.to_string()
    } else {
        format!("http://{normalized_url}")
    };

    let parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
