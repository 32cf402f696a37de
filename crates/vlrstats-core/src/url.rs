//! URL helper functions for vlr.gg
//!
//! Provides functions for building search and profile URLs.

/// Builds the search path for a player name, restricted to the players category
///
/// # Arguments
/// * `name` - Player name (spaces become `%20`)
///
/// # Example
/// ```
/// use vlrstats_core::url::build_search_path;
/// let path = build_search_path("tenz");
/// assert_eq!(path, "/search/?q=tenz&type=players");
/// ```
pub fn build_search_path(name: &str) -> String {
    let encoded = urlencoding::encode(name);
    format!("/search/?q={}&type=players", encoded)
}

/// Joins the site origin with a profile link taken from a search result
///
/// Absolute links are returned unchanged.
///
/// # Example
/// ```
/// use vlrstats_core::url::build_profile_url;
/// let url = build_profile_url("https://www.vlr.gg", "/player/9/tenz");
/// assert_eq!(url, "https://www.vlr.gg/player/9/tenz");
/// ```
pub fn build_profile_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}

/// Appends the all-time statistics selector to a profile URL
///
/// # Example
/// ```
/// use vlrstats_core::url::with_all_time_span;
/// let url = with_all_time_span("https://www.vlr.gg/player/9/tenz");
/// assert_eq!(url, "https://www.vlr.gg/player/9/tenz?timespan=all");
/// ```
pub fn with_all_time_span(profile_url: &str) -> String {
    let separator = if profile_url.contains('?') { '&' } else { '?' };
    format!("{}{}timespan=all", profile_url, separator)
}
