//! Records fetched from a user's listings.
//!
//! A [`Record`] is either a post or a comment. Both share the same base fields;
//! the variant-specific fields live in [`RecordDetail`]. The text handed to the
//! model is always derived through [`Record::content`].

use crate::error::{PersonaError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const PERMALINK_HOST: &str = "https://reddit.com";

/// Which listing a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A submitted post
    Post,
    /// A comment
    Comment,
}

impl RecordKind {
    /// Plural label used in log lines
    pub fn plural(self) -> &'static str {
        match self {
            Self::Post => "posts",
            Self::Comment => "comments",
        }
    }

    /// Upper-case tag used in the prompt digest
    pub fn tag(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// A normalized post or comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Item id without its type prefix
    pub id: String,
    /// Creation time, when the API supplied a valid one
    pub created_utc: Option<DateTime<Utc>>,
    /// Net score
    pub score: i64,
    /// Subreddit name without the `r/` prefix
    pub subreddit: Option<String>,
    /// Absolute permalink
    pub permalink: String,
    /// Variant-specific fields
    pub detail: RecordDetail,
}

/// Fields that differ between posts and comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordDetail {
    /// Submitted post
    Post {
        /// Title
        title: String,
        /// Self text, empty for link posts
        selftext: String,
        /// Link target
        url: String,
        /// Comment count
        num_comments: i64,
        /// Media hint such as `image` or `link`, empty when absent
        post_hint: String,
    },
    /// Comment
    Comment {
        /// Comment body
        body: String,
        /// Fullname of the parent item
        parent_id: String,
        /// Title of the post the comment belongs to
        link_title: String,
    },
}

impl Record {
    /// Maps one raw listing child (`{"kind": .., "data": {..}}`) into a record
    ///
    /// Missing or null fields fall back to defaults. Fails only when the child
    /// carries no `data` object at all.
    pub fn from_listing_child(child: &Value, kind: RecordKind) -> Result<Self> {
        let data = child
            .get("data")
            .and_then(Value::as_object)
            .ok_or_else(|| PersonaError::Parse("listing child has no data object".into()))?;
        Ok(Self::from_item_data(data, kind))
    }

    /// Maps the `data` object of a listing child into a record of the given kind
    pub fn from_item_data(data: &Map<String, Value>, kind: RecordKind) -> Self {
        let detail = match kind {
            RecordKind::Post => RecordDetail::Post {
                title: string_field(data, "title"),
                selftext: string_field(data, "selftext"),
                url: string_field(data, "url"),
                num_comments: int_field(data, "num_comments"),
                post_hint: string_field(data, "post_hint"),
            },
            RecordKind::Comment => RecordDetail::Comment {
                body: string_field(data, "body"),
                parent_id: string_field(data, "parent_id"),
                link_title: string_field(data, "link_title"),
            },
        };

        Self {
            id: string_field(data, "id"),
            created_utc: data.get("created_utc").and_then(Value::as_f64).and_then(timestamp_from_secs),
            score: int_field(data, "score"),
            subreddit: data
                .get("subreddit")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            permalink: format!("{}{}", PERMALINK_HOST, string_field(data, "permalink")),
            detail,
        }
    }

    /// Which listing this record belongs to
    pub fn kind(&self) -> RecordKind {
        match self.detail {
            RecordDetail::Post { .. } => RecordKind::Post,
            RecordDetail::Comment { .. } => RecordKind::Comment,
        }
    }

    /// Text used for analysis: self text (or the title when that is empty) for
    /// posts, the body for comments
    pub fn content(&self) -> &str {
        match &self.detail {
            RecordDetail::Post { selftext, title, .. } => {
                if selftext.is_empty() {
                    title
                } else {
                    selftext
                }
            }
            RecordDetail::Comment { body, .. } => body,
        }
    }
}

fn string_field(data: &Map<String, Value>, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Scores occasionally arrive as floats.
fn int_field(data: &Map<String, Value>, key: &str) -> i64 {
    match data.get(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        _ => 0,
    }
}

fn timestamp_from_secs(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    Utc.timestamp_opt(secs.trunc() as i64, 0).single()
}

/// Everything fetched for one user, in API order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDataset {
    /// Username the listings were fetched for
    pub username: String,
    /// Posts, newest first
    pub posts: Vec<Record>,
    /// Comments, newest first
    pub comments: Vec<Record>,
}

impl UserDataset {
    /// Creates a dataset from already fetched listings
    pub fn new(username: impl Into<String>, posts: Vec<Record>, comments: Vec<Record>) -> Self {
        Self {
            username: username.into(),
            posts,
            comments,
        }
    }

    /// True when neither posts nor comments were fetched
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }

    /// Posts followed by comments
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.posts.iter().chain(self.comments.iter())
    }

    /// Oldest and newest creation times across all records
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let mut times = self.records().filter_map(|r| r.created_utc);
        let first = times.next()?;
        Some(times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }
}
