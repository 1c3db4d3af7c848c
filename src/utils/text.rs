use chrono::{TimeZone, Utc};

/// Truncates `text` to at most `max_length` characters, appending `...` when cut
pub fn truncate_text(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        None => text.to_string(),
        Some((idx, _)) => format!("{}...", &text[..idx]),
    }
}

/// Formats a Unix timestamp (seconds) as `YYYY-mm-dd HH:MM:SS` in UTC
///
/// Returns `Unknown date` for values chrono cannot represent.
pub fn format_timestamp(timestamp: f64) -> String {
    if !timestamp.is_finite() {
        return "Unknown date".to_string();
    }
    match Utc.timestamp_opt(timestamp.trunc() as i64, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "Unknown date".to_string(),
    }
}
