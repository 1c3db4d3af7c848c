mod env_manager;

use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{PersonaError, Result};
use std::fs;
use log::debug;

pub use env_manager::{get_env_value, load_dotenv};

const DEFAULT_REDDIT_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";

/// Main configuration struct for the application
///
/// Holds the output location, the listing API settings used by the scraper,
/// the generative model settings and the size of the content window sent to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the persona report is written to
    pub output_dir: PathBuf,
    /// Listing API settings
    pub reddit: RedditSettings,
    /// Generative model settings
    pub llm: LlmSettings,
    /// Content window sent to the model
    pub window: WindowSettings,
}

/// Settings for the paginated listing API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditSettings {
    /// Scheme and host of the listing API
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Items requested per page
    pub page_limit: u32,
    /// Hard cap on pages fetched per listing
    pub max_pages: u32,
    /// Pause between pages, in milliseconds
    pub page_delay_ms: u64,
}

/// Settings for the generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API key, usually supplied through `GEMINI_API_KEY`
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model name
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
}

/// Bounds on how many records are included in the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Leading posts considered
    pub max_posts: usize,
    /// Leading comments considered
    pub max_comments: usize,
}

impl Config {
    /// Creates a new configuration with the specified output directory
    ///
    /// The API key is left empty; use [`Config::from_env`] to resolve it.
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            reddit: RedditSettings::default(),
            llm: LlmSettings::default(),
            window: WindowSettings::default(),
        }
    }

    /// Builds the configuration from defaults and the process environment
    ///
    /// Fails with [`PersonaError::Config`] when `GEMINI_API_KEY` is missing or empty.
    pub fn from_env(output_dir: PathBuf) -> Result<Self> {
        let mut config = Self::new(output_dir);
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file
    ///
    /// Missing sections and keys fall back to their defaults. The environment is
    /// not consulted; call [`Config::apply_env`] afterwards.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PersonaError::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Applies `.env` and process environment overrides
    ///
    /// The API key from the environment wins over one read from a file.
    pub fn apply_env(&mut self) -> Result<()> {
        load_dotenv();

        if let Some(key) = get_env_value(env_manager::GEMINI_API_KEY) {
            self.llm.api_key = key;
        }
        if let Some(model) = get_env_value(env_manager::GEMINI_MODEL) {
            self.llm.model = model;
        }
        if let Some(url) = get_env_value(env_manager::GEMINI_API_BASE_URL) {
            self.llm.base_url = url;
        }
        if let Some(url) = get_env_value(env_manager::REDDIT_BASE_URL) {
            self.reddit.base_url = url;
        }

        if self.llm.api_key.trim().is_empty() {
            return Err(PersonaError::Config(format!(
                "{} is not set in the environment or .env",
                env_manager::GEMINI_API_KEY
            )));
        }
        Ok(())
    }

    /// Checks the credential is present and the numeric knobs are in range
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.trim().is_empty() {
            return Err(PersonaError::Config("Gemini API key is empty".into()));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(PersonaError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }
        if self.llm.max_output_tokens == 0 {
            return Err(PersonaError::Config("max_output_tokens must be positive".into()));
        }
        if !(1..=100).contains(&self.reddit.page_limit) {
            return Err(PersonaError::Config(format!(
                "page_limit must be between 1 and 100, got {}",
                self.reddit.page_limit
            )));
        }
        if self.reddit.max_pages == 0 {
            return Err(PersonaError::Config("max_pages must be at least 1".into()));
        }
        url::Url::parse(&self.reddit.base_url)?;
        url::Url::parse(&self.llm.base_url)?;
        Ok(())
    }

    /// Ensures the output directory exists, creating it if needed
    pub async fn ensure_output_dir(&self) -> Result<()> {
        if !tokio::fs::try_exists(&self.output_dir).await? {
            tokio::fs::create_dir_all(&self.output_dir).await?;
        }
        Ok(())
    }
}

impl RedditSettings {
    /// Pause between consecutive page requests
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

impl Default for RedditSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REDDIT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_limit: 100,
            max_pages: 10,
            page_delay_ms: 1000,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: 0.3,
            max_output_tokens: 2048,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            max_posts: 50,
            max_comments: 100,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PathBuf::from("outputs"))
    }
}
