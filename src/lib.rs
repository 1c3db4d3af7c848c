#![warn(missing_docs)]
#![warn(clippy::all)]

//! reddit-persona - build a behavioural persona report for a Reddit user
//!
//! The pipeline walks the user's public post and comment listings, condenses
//! the leading records into a digest, asks a generative model for a structured
//! profile, and renders that profile as a plain-text report.
//!
//! ## Components
//! - [`normalize`]: text cleanup for listing content
//! - [`scraper`]: cursor-paginated listing fetcher that degrades to partial results
//! - [`persona`]: windowing, prompting, schema-checked parsing and the fallback profile
//! - [`pipeline`]: one end-to-end run writing `<username>_persona.txt`
//!
//! ## Usage
//! ```rust,ignore
//! use reddit_persona::{Config, PersonaGenerator, RedditScraper, pipeline};
//!
//! async fn example() -> reddit_persona::Result<()> {
//!     let config = Config::from_env("outputs".into())?;
//!     let scraper = RedditScraper::new(config.reddit.clone())?;
//!     let generator = PersonaGenerator::from_config(&config)?;
//!     pipeline::run(&config, "kojied", &scraper, &generator).await?;
//!     Ok(())
//! }
//! ```

/// Command-line arguments and terminal output helpers
pub mod cli;
/// Configuration module for the application
pub mod config;
/// Error handling types and utilities
pub mod error;
/// Generative model clients
pub mod llm;
/// Logging configuration and utilities
pub mod logging;
/// Post and comment records
pub mod models;
/// Listing text cleanup
pub mod normalize;
/// Persona synthesis and report rendering
pub mod persona;
/// End-to-end run
pub mod pipeline;
/// Paginated listing fetcher
pub mod scraper;
/// Utilities (profile URLs, file names, text helpers)
pub mod utils;

// Re-export common types
pub use config::Config;
pub use error::{PersonaError, Result};
pub use llm::{GeminiClient, GenerationConfig, TextGenerator};
pub use models::{Record, RecordDetail, RecordKind, UserDataset};
pub use normalize::normalize;
pub use persona::{AnalysisSource, PersonaAnalysis, PersonaGenerator, Synthesis};
pub use pipeline::RunOutcome;
pub use scraper::{FetchOutcome, FetchStatus, RedditScraper, ScrapeReport};
