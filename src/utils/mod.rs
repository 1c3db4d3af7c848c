/// Profile URL validation and file name helpers
pub mod profile_url;
/// Text truncation and timestamp formatting
pub mod text;

pub use profile_url::{extract_username_from_url, sanitize_filename, validate_reddit_url};
pub use text::{format_timestamp, truncate_text};
