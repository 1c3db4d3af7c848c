/// Builds the persona request for `username` around the windowed `content`
///
/// The requested JSON object has exactly the keys of
/// [`PersonaAnalysis`](super::PersonaAnalysis).
pub fn persona_prompt(username: &str, content: &str) -> String {
    format!(
        r#"
Analyze the following Reddit user's posts and comments to create a comprehensive user persona.

User: {username}

Content:
{content}

Please provide a detailed analysis in JSON format with the following structure:
{{
  "demographics": {{
    "age_range": "estimated age range",
    "location": "estimated location/region",
    "occupation": "estimated occupation or field"
  }},
  "interests": [
    "primary interests based on subreddit activity and content"
  ],
  "personality_traits": [
    "personality characteristics observed"
  ],
  "communication_style": "description of how they communicate",
  "values_beliefs": [
    "values and beliefs expressed"
  ],
  "lifestyle": "lifestyle indicators",
  "technical_expertise": "level of technical knowledge",
  "social_behavior": "online social behavior patterns"
}}

Respond with the JSON object only.
"#,
        username = username,
        content = content
    )
}
