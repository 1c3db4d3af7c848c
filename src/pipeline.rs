//! One end-to-end run: scrape, synthesize, render and write the report.

use crate::config::Config;
use crate::error::Result;
use crate::persona::{format_persona, PersonaGenerator};
use crate::scraper::{FetchStatus, FetchSummary, RedditScraper};
use crate::utils::sanitize_filename;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The report was written to this path
    Written(PathBuf),
    /// Neither posts nor comments were found; nothing was written
    NoContent,
}

/// Path of the report for `username` inside `output_dir`
pub fn persona_output_path(output_dir: &Path, username: &str) -> PathBuf {
    output_dir.join(format!("{}_persona.txt", sanitize_filename(username)))
}

/// Runs the whole analysis for one user
///
/// Fetch and model failures degrade rather than fail; errors come only from
/// configuration, the output directory, or writing the report.
pub async fn run(
    config: &Config,
    username: &str,
    scraper: &RedditScraper,
    generator: &PersonaGenerator,
) -> Result<RunOutcome> {
    config.ensure_output_dir().await?;

    info!("Starting analysis for user: {}", username);
    info!("Scraping Reddit data...");
    let report = scraper.scrape_user_data(username).await?;
    log_fetch_summary("posts", &report.posts);
    log_fetch_summary("comments", &report.comments);

    let dataset = report.dataset;
    if dataset.is_empty() {
        warn!("No posts or comments found for this user");
        return Ok(RunOutcome::NoContent);
    }

    info!("Generating user persona...");
    let synthesis = generator.synthesize(&dataset).await;
    if synthesis.is_fallback() {
        warn!("Model analysis unavailable; writing the fallback persona");
    }
    let persona = format_persona(&synthesis.analysis, &dataset);

    let output_file = persona_output_path(&config.output_dir, &dataset.username);
    tokio::fs::write(&output_file, persona).await?;
    info!("Persona saved to: {}", output_file.display());

    Ok(RunOutcome::Written(output_file))
}

fn log_fetch_summary(label: &str, summary: &FetchSummary) {
    if let FetchStatus::Aborted(reason) = &summary.status {
        if summary.pages == 0 {
            warn!("Could not fetch any {}: {}", label, reason);
        } else {
            warn!("Fetching {} stopped after {} pages: {}", label, summary.pages, reason);
        }
    }
    if summary.skipped_items > 0 {
        warn!("Skipped {} malformed {}", summary.skipped_items, label);
    }
}
