//! Persona synthesis: windowing, prompting, schema-checked parsing and the
//! fallback profile.

use crate::config::{Config, WindowSettings};
use crate::error::Result;
use crate::llm::{GeminiClient, GenerationConfig, TextGenerator};
use crate::models::{Record, UserDataset};
use crate::normalize::normalize;
use crate::utils::truncate_text;
use log::{error, info, warn};
use std::sync::Arc;

mod analysis;
mod prompts;
mod report;

pub use analysis::{strip_code_fences, Demographics, PersonaAnalysis};
pub use prompts::persona_prompt;
pub use report::{format_list, format_persona, top_subreddits};

const RESPONSE_PREVIEW_CHARS: usize = 200;

/// Where an analysis came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisSource {
    /// Parsed from the model's response
    Model,
    /// The fixed fallback, with the reason the model result was unusable
    Fallback(String),
}

/// Result of [`PersonaGenerator::synthesize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// The profile, real or fallback
    pub analysis: PersonaAnalysis,
    /// Whether the model produced it
    pub source: AnalysisSource,
}

impl Synthesis {
    /// True when the fallback profile was substituted
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, AnalysisSource::Fallback(_))
    }
}

/// Turns a [`UserDataset`] into a [`PersonaAnalysis`] using a text model
pub struct PersonaGenerator {
    generator: Arc<dyn TextGenerator>,
    generation: GenerationConfig,
    window: WindowSettings,
}

impl PersonaGenerator {
    /// Creates a generator around any [`TextGenerator`]
    pub fn new(generator: Arc<dyn TextGenerator>, generation: GenerationConfig, window: WindowSettings) -> Self {
        Self {
            generator,
            generation,
            window,
        }
    }

    /// Creates a Gemini-backed generator from the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GeminiClient::from_settings(&config.llm)?;
        let generation = GenerationConfig {
            temperature: config.llm.temperature,
            max_output_tokens: config.llm.max_output_tokens,
        };
        Ok(Self::new(Arc::new(client), generation, config.window))
    }

    /// Synthesizes a profile and renders it as the text report
    pub async fn generate_persona(&self, dataset: &UserDataset) -> String {
        let synthesis = self.synthesize(dataset).await;
        format_persona(&synthesis.analysis, dataset)
    }

    /// Builds the digest, asks the model once and parses its answer
    ///
    /// Never fails: a request error or a response that does not match the
    /// persona schema yields [`PersonaAnalysis::fallback`].
    pub async fn synthesize(&self, dataset: &UserDataset) -> Synthesis {
        let content = build_content_digest(dataset, &self.window);
        let prompt = persona_prompt(&dataset.username, &content);

        let text = match self.generator.generate(&prompt, &self.generation).await {
            Ok(text) => text,
            Err(e) if e.is_transient() => {
                warn!("{} API unreachable: {}", self.generator.name(), e);
                return fallback(e.to_string());
            }
            Err(e) => {
                error!("Error with {} API: {}", self.generator.name(), e);
                return fallback(e.to_string());
            }
        };

        info!(
            "{} raw response: {}",
            self.generator.name(),
            truncate_text(text.trim(), RESPONSE_PREVIEW_CHARS)
        );

        match PersonaAnalysis::from_model_text(&text) {
            Ok(analysis) => Synthesis {
                analysis,
                source: AnalysisSource::Model,
            },
            Err(e) => {
                warn!("Discarding model response: {}", e);
                fallback(e.to_string())
            }
        }
    }
}

fn fallback(reason: String) -> Synthesis {
    Synthesis {
        analysis: PersonaAnalysis::fallback(),
        source: AnalysisSource::Fallback(reason),
    }
}

/// Concatenates the leading posts and comments into the prompt digest
///
/// Takes at most `window.max_posts` posts and `window.max_comments` comments in
/// dataset order, skips records without content, and joins
/// `POST in r/<sub>: <text>` / `COMMENT in r/<sub>: <text>` lines with blank lines.
pub fn build_content_digest(dataset: &UserDataset, window: &WindowSettings) -> String {
    let posts = dataset.posts.iter().take(window.max_posts);
    let comments = dataset.comments.iter().take(window.max_comments);

    posts
        .chain(comments)
        .filter_map(digest_line)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn digest_line(record: &Record) -> Option<String> {
    if record.content().is_empty() {
        return None;
    }
    let text = normalize(record.content());
    if text.is_empty() {
        return None;
    }
    Some(format!(
        "{} in r/{}: {}",
        record.kind().tag(),
        record.subreddit.as_deref().unwrap_or("unknown"),
        text
    ))
}
