//! URL admissibility checks performed before any request is made.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use std::collections::BTreeSet;

/// A URL counts as absolute when it starts with a scheme followed by `:`.
/// Windows drive paths (`C:\dir`) look like a scheme and are excluded.
static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z\d+\-.]*?:").expect("absolute URL pattern is valid")
});
static WINDOWS_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]:\\").expect("windows path pattern is valid"));

/// Whether `url` lacks a scheme and has to be resolved against a base URL.
pub fn is_relative_url(url: &str) -> bool {
    WINDOWS_PATH.is_match(url) || !ABSOLUTE_URL.is_match(url)
}

/// Decides whether a URL may be probed at all.
///
/// Implementations must be pure and cheap: the engine calls this once per
/// input URL and the prober calls it again before issuing requests.
pub trait UrlValidator: Send + Sync {
    fn is_valid(&self, url: &str, base_url: Option<&str>, protocols: &BTreeSet<String>) -> bool;
}

/// Relative URLs are valid when a base URL is configured; absolute URLs must
/// parse and use one of the allowed protocols (`"https:"` style).
#[derive(Default, Debug, Clone, Copy)]
pub struct DefaultUrlValidator;

impl UrlValidator for DefaultUrlValidator {
    fn is_valid(&self, url: &str, base_url: Option<&str>, protocols: &BTreeSet<String>) -> bool {
        if is_relative_url(url) {
            return base_url.is_some_and(|base| !base.is_empty());
        }

        match Url::parse(url) {
            Ok(parsed) => protocols.contains(&format!("{}:", parsed.scheme())),
            Err(_) => false,
        }
    }
}

/// Normalize a protocol name to the `"scheme:"` form used for comparisons.
pub fn normalize_protocol(protocol: &str) -> String {
    let trimmed = protocol.trim().trim_end_matches("//").to_ascii_lowercase();
    if trimmed.ends_with(':') {
        trimmed
    } else {
        format!("{trimmed}:")
    }
}
