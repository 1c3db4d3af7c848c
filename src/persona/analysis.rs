use crate::error::{PersonaError, Result};
use serde::{Deserialize, Serialize};

/// Estimated demographic facts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    /// Estimated age range
    pub age_range: String,
    /// Estimated location or region
    pub location: String,
    /// Estimated occupation or field
    pub occupation: String,
}

/// Structured behavioural profile
///
/// Every key is required and must have the documented kind (string or list of
/// strings); deserialization is the schema check for model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaAnalysis {
    /// Demographic estimates
    pub demographics: Demographics,
    /// Primary interests
    pub interests: Vec<String>,
    /// Observed personality characteristics
    pub personality_traits: Vec<String>,
    /// How the user communicates
    pub communication_style: String,
    /// Values and beliefs expressed
    pub values_beliefs: Vec<String>,
    /// Lifestyle indicators
    pub lifestyle: String,
    /// Level of technical knowledge
    pub technical_expertise: String,
    /// Online social behaviour patterns
    pub social_behavior: String,
}

impl PersonaAnalysis {
    /// Low-information profile used whenever the model cannot be used
    pub fn fallback() -> Self {
        Self {
            demographics: Demographics {
                age_range: "Unable to determine".to_string(),
                location: "Unable to determine".to_string(),
                occupation: "Unable to determine".to_string(),
            },
            interests: vec!["Based on subreddit activity".to_string()],
            personality_traits: vec!["Active Reddit user".to_string()],
            communication_style: "Engages in online discussions".to_string(),
            values_beliefs: vec!["Unable to determine without content analysis".to_string()],
            lifestyle: "Active social media user".to_string(),
            technical_expertise: "Basic to intermediate".to_string(),
            social_behavior: "Participates in online communities".to_string(),
        }
    }

    /// Parses and schema-checks the model's text output
    ///
    /// Surrounding Markdown code fences are ignored. Any missing key or value of
    /// the wrong kind is an error.
    pub fn from_model_text(text: &str) -> Result<Self> {
        let json = strip_code_fences(text);
        if json.is_empty() {
            return Err(PersonaError::Parse("model returned no JSON".into()));
        }
        serde_json::from_str(json)
            .map_err(|e| PersonaError::Parse(format!("model output does not match the persona schema: {}", e)))
    }
}

/// Strips a surrounding ```` ```json ```` / ```` ``` ```` fence
pub fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```JSON")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
