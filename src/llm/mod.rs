//! Generative text model access.
//!
//! The persona synthesizer only needs "prompt in, text out"; [`TextGenerator`]
//! is that seam, with [`GeminiClient`] as the production implementation.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod gemini;

pub use gemini::GeminiClient;

/// Sampling knobs sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_output_tokens: 2048,
        }
    }
}

/// A model that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Name used in log lines
    fn name(&self) -> &str;

    /// Issues a single request and returns the generated text
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;
}
