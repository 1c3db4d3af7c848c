#![allow(dead_code)]

use reddit_persona::config::{Config, RedditSettings};
use serde_json::{json, Value};
use std::path::Path;

pub mod test_helpers {
    use super::*;

    pub const PERSONA_JSON: &str = r#"{
  "demographics": {"age_range": "25-34", "location": "Seattle, WA", "occupation": "Backend developer"},
  "interests": ["Rust", "Mechanical keyboards"],
  "personality_traits": ["Analytical", "Patient"],
  "communication_style": "Concise and technical",
  "values_beliefs": ["Open source matters"],
  "lifestyle": "Works remotely, cycles on weekends",
  "technical_expertise": "Advanced",
  "social_behavior": "Answers beginner questions"
}"#;

    pub fn setup_test_logger() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    pub fn post_item(id: &str, subreddit: &str, title: &str, selftext: &str) -> Value {
        json!({
            "kind": "t3",
            "data": {
                "id": id,
                "subreddit": subreddit,
                "title": title,
                "selftext": selftext,
                "score": 10,
                "num_comments": 2,
                "created_utc": 1_700_000_000.0,
                "permalink": format!("/r/{}/comments/{}/", subreddit, id),
                "url": format!("https://www.reddit.com/r/{}/comments/{}/", subreddit, id)
            }
        })
    }

    pub fn comment_item(id: &str, subreddit: &str, body: &str) -> Value {
        json!({
            "kind": "t1",
            "data": {
                "id": id,
                "subreddit": subreddit,
                "body": body,
                "score": 3,
                "parent_id": "t3_parent",
                "link_title": "Some thread",
                "created_utc": 1_700_000_100.0,
                "permalink": format!("/r/{}/comments/parent/x/{}/", subreddit, id)
            }
        })
    }

    pub fn listing_body(children: &[Value], after: Option<&str>) -> String {
        json!({
            "kind": "Listing",
            "data": {
                "after": after,
                "dist": children.len(),
                "children": children
            }
        })
        .to_string()
    }

    pub fn gemini_body(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    pub fn test_settings(base_url: &str) -> RedditSettings {
        RedditSettings {
            base_url: base_url.to_string(),
            page_delay_ms: 0,
            ..RedditSettings::default()
        }
    }

    pub fn test_config(output_dir: &Path, reddit_url: &str, gemini_url: &str) -> Config {
        let mut config = Config::new(output_dir.to_path_buf());
        config.reddit = test_settings(reddit_url);
        config.llm.api_key = "test-key".to_string();
        config.llm.base_url = gemini_url.to_string();
        config
    }
}
