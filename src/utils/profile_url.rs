use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PROFILE_URL: Regex = Regex::new(r"^https?://(?:www\.)?reddit\.com/user/[^/]+/?$").unwrap();
}

const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Returns true if `url` is a Reddit user profile URL such as
/// `https://www.reddit.com/user/spez/`
pub fn validate_reddit_url(url: &str) -> bool {
    PROFILE_URL.is_match(url)
}

/// Extracts the username from a profile URL
///
/// Returns an empty string when the segment before the last one is not `user`.
pub fn extract_username_from_url(url: &str) -> String {
    let parts: Vec<&str> = url.trim_end_matches('/').split('/').collect();
    match parts.as_slice() {
        [.., "user", name] => name.to_string(),
        _ => String::new(),
    }
}

/// Replaces characters that are invalid in file names with `_`
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}
