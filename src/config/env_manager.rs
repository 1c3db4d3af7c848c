use log::debug;

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Optional override for the Gemini model name
pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
/// Optional override for the Gemini API base URL
pub const GEMINI_API_BASE_URL: &str = "GEMINI_API_BASE_URL";
/// Optional override for the Reddit base URL
pub const REDDIT_BASE_URL: &str = "REDDIT_BASE_URL";

/// Loads a `.env` file from the working directory, if one exists
///
/// Variables already present in the process environment are not overwritten.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Ignoring unreadable .env file: {}", e),
    }
}

/// Reads an environment variable, treating empty or whitespace-only values as unset
pub fn get_env_value(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
