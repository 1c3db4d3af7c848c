use thiserror::Error;
use std::io;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, PersonaError>;

/// Errors that can occur while building a persona
#[derive(Debug, Error)]
pub enum PersonaError {
    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// General message errors
    #[error("{0}")]
    Message(String),

    /// Network connectivity errors and non-success statuses
    #[error("Network error: {0}")]
    Network(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generative model errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parse(String),
}

impl PersonaError {
    /// True for errors caused by the network rather than the input; these are logged as warnings
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) |
            Self::Http(_) |
            Self::Io(_)
        )
    }
}

impl From<toml::de::Error> for PersonaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse config file: {}", err))
    }
}
