//! Paginated fetching of a user's posts and comments.
//!
//! Each listing is walked with an `after` cursor until the API reports no
//! further page, a page comes back empty, the page cap is hit, or a request
//! fails. Failures never propagate: whatever was accumulated is returned along
//! with a [`FetchStatus`] describing why the walk stopped.

use crate::config::RedditSettings;
use crate::error::{PersonaError, Result};
use crate::models::{Record, RecordKind, UserDataset};
use crate::utils::format_timestamp;
use log::{debug, error, info, warn};
use reqwest::Client;
use reqwest::header;
use std::time::Duration;
use url::Url;

mod listing;

pub use listing::{Listing, ListingData};

/// Why a listing walk stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The API reported no further pages, or returned an empty page
    Exhausted,
    /// The page cap was reached while a cursor was still available
    PageCapReached,
    /// A request or response failed; records before the failure are kept
    Aborted(String),
}

/// Result of walking one listing
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// Records in API order
    pub records: Vec<Record>,
    /// Why the walk stopped
    pub status: FetchStatus,
    /// Pages successfully retrieved
    pub pages: u32,
    /// Items that could not be mapped and were skipped
    pub skipped_items: usize,
}

impl FetchOutcome {
    /// True when the walk was cut short by an error or items were dropped
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, FetchStatus::Aborted(_)) || self.skipped_items > 0
    }

    /// True when the walk failed before retrieving anything
    pub fn is_total_failure(&self) -> bool {
        matches!(self.status, FetchStatus::Aborted(_)) && self.pages == 0
    }

    /// Separates the records from the walk summary
    pub fn split(self) -> (Vec<Record>, FetchSummary) {
        let summary = FetchSummary {
            status: self.status,
            pages: self.pages,
            skipped_items: self.skipped_items,
        };
        (self.records, summary)
    }
}

/// Posts and comments for one user, plus how each listing walk ended
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    /// Fetched records
    pub dataset: UserDataset,
    /// Outcome of the posts walk (records moved into `dataset`)
    pub posts: FetchSummary,
    /// Outcome of the comments walk (records moved into `dataset`)
    pub comments: FetchSummary,
}

/// Everything in a [`FetchOutcome`] except the records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    /// Why the walk stopped
    pub status: FetchStatus,
    /// Pages successfully retrieved
    pub pages: u32,
    /// Items that could not be mapped
    pub skipped_items: usize,
}

/// Client for the public user listing endpoints
pub struct RedditScraper {
    client: Client,
    settings: RedditSettings,
}

impl RedditScraper {
    /// Creates a scraper with a single pooled HTTP client
    pub fn new(settings: RedditSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client, settings })
    }

    /// Listing endpoint for a user, e.g. `<base>/user/<name>/submitted.json`
    pub fn listing_url(&self, username: &str, kind: RecordKind) -> Result<Url> {
        let mut url = Url::parse(&self.settings.base_url)?;
        let leaf = match kind {
            RecordKind::Post => "submitted.json",
            RecordKind::Comment => "comments.json",
        };
        url.path_segments_mut()
            .map_err(|_| PersonaError::Config(format!("Base URL cannot have a path: {}", self.settings.base_url)))?
            .pop_if_empty()
            .extend(&["user", username, leaf]);
        Ok(url)
    }

    /// Fetches posts, then comments, for `username`
    ///
    /// Only an unusable base URL is an error; fetch failures are reported in
    /// the returned summaries.
    pub async fn scrape_user_data(&self, username: &str) -> Result<ScrapeReport> {
        let posts_url = self.listing_url(username, RecordKind::Post)?;
        let comments_url = self.listing_url(username, RecordKind::Comment)?;

        let (posts, posts_summary) = self.fetch(&posts_url, RecordKind::Post).await.split();
        let (comments, comments_summary) = self.fetch(&comments_url, RecordKind::Comment).await.split();

        let dataset = UserDataset::new(username, posts, comments);
        if let Some((oldest, newest)) = dataset.time_span() {
            debug!(
                "Activity for {} spans {} to {}",
                username,
                format_timestamp(oldest.timestamp() as f64),
                format_timestamp(newest.timestamp() as f64)
            );
        }

        Ok(ScrapeReport {
            dataset,
            posts: posts_summary,
            comments: comments_summary,
        })
    }

    /// Walks one listing endpoint, accumulating records of `kind`
    pub async fn fetch(&self, url: &Url, kind: RecordKind) -> FetchOutcome {
        let mut records = Vec::new();
        let mut skipped_items = 0;
        let mut pages = 0;
        let mut after: Option<String> = None;
        let mut status = FetchStatus::PageCapReached;

        for page in 0..self.settings.max_pages {
            let listing = match self.fetch_page(url, after.as_deref()).await {
                Ok(listing) => listing,
                Err(e) => {
                    if e.is_transient() {
                        warn!("Error fetching {} (page {}): {}", kind, page + 1, e);
                    } else {
                        error!("Error fetching {} (page {}): {}", kind, page + 1, e);
                    }
                    status = FetchStatus::Aborted(e.to_string());
                    break;
                }
            };
            pages += 1;

            let children = listing.children();
            if children.is_empty() {
                status = FetchStatus::Exhausted;
                break;
            }

            for child in children {
                match Record::from_listing_child(child, kind) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        warn!("Skipping malformed {} item: {}", kind, e);
                        skipped_items += 1;
                    }
                }
            }

            match listing.next_cursor() {
                Some(next) => after = Some(next.to_string()),
                None => {
                    status = FetchStatus::Exhausted;
                    break;
                }
            }

            pause(self.settings.page_delay()).await;
        }

        info!("Fetched {} {}", records.len(), kind);
        if status == FetchStatus::PageCapReached {
            debug!("Stopped {} after the {}-page cap", kind, self.settings.max_pages);
        }

        FetchOutcome {
            records,
            status,
            pages,
            skipped_items,
        }
    }

    async fn fetch_page(&self, url: &Url, after: Option<&str>) -> Result<Listing> {
        let mut query = vec![("limit", self.settings.page_limit.to_string())];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self.client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
            .map_err(|e| PersonaError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PersonaError::Network(format!("HTTP {} from {}", status, url)));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraper(base_url: &str) -> RedditScraper {
        let settings = RedditSettings {
            base_url: base_url.to_string(),
            page_delay_ms: 0,
            ..RedditSettings::default()
        };
        RedditScraper::new(settings).unwrap()
    }

    #[test]
    fn test_listing_urls() {
        let scraper = scraper("https://www.reddit.com");
        assert_eq!(
            scraper.listing_url("kojied", RecordKind::Post).unwrap().as_str(),
            "https://www.reddit.com/user/kojied/submitted.json"
        );
        assert_eq!(
            scraper.listing_url("kojied", RecordKind::Comment).unwrap().as_str(),
            "https://www.reddit.com/user/kojied/comments.json"
        );
    }

    #[test]
    fn test_listing_url_with_prefix_and_odd_username() {
        let scraper = scraper("http://127.0.0.1:1234/proxy/");
        assert_eq!(
            scraper.listing_url("a b?", RecordKind::Post).unwrap().as_str(),
            "http://127.0.0.1:1234/proxy/user/a%20b%3F/submitted.json"
        );
    }

    #[test]
    fn test_listing_url_rejects_unusable_base() {
        assert!(scraper("mailto:someone@example.com").listing_url("x", RecordKind::Post).is_err());
    }

    #[tokio::test]
    async fn test_page_errors_are_classified() {
        let mut server = mockito::Server::new_async().await;
        let _unavailable = server.mock("GET", "/user/down/submitted.json")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let _garbled = server.mock("GET", "/user/garbled/submitted.json")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;
        let scraper = scraper(&server.url());

        let url = scraper.listing_url("down", RecordKind::Post).unwrap();
        let err = scraper.fetch_page(&url, None).await.unwrap_err();
        assert!(matches!(err, PersonaError::Network(_)));
        assert!(err.is_transient());

        let url = scraper.listing_url("garbled", RecordKind::Post).unwrap();
        let err = scraper.fetch_page(&url, None).await.unwrap_err();
        assert!(matches!(err, PersonaError::Json(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_outcome_flags() {
        let aborted = FetchOutcome {
            records: vec![],
            status: FetchStatus::Aborted("HTTP 500".into()),
            pages: 0,
            skipped_items: 0,
        };
        assert!(aborted.is_degraded());
        assert!(aborted.is_total_failure());

        let empty = FetchOutcome {
            records: vec![],
            status: FetchStatus::Exhausted,
            pages: 1,
            skipped_items: 0,
        };
        assert!(!empty.is_degraded());
        assert!(!empty.is_total_failure());
    }
}
