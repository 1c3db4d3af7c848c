use reddit_persona::{
    cli::{self, Cli},
    config::Config,
    error::{PersonaError, Result},
    logging::{self, LogSink},
    persona::PersonaGenerator,
    pipeline::{self, RunOutcome},
    scraper::RedditScraper,
    utils::{extract_username_from_url, validate_reddit_url},
};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_level, LogSink::default()) {
        cli::print_warning(&format!("Logging to stderr only: {}", e));
        let _ = logging::init(&cli.log_level, LogSink::Stderr);
    }

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Error during execution: {}", e);
            cli::print_error(&e.to_string());
            1
        }
    };
    process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    if !validate_reddit_url(&cli.profile_url) {
        return Err(PersonaError::Validation(format!(
            "Invalid Reddit profile URL provided: {}",
            cli.profile_url
        )));
    }
    let username = extract_username_from_url(&cli.profile_url);

    let config = load_config(&cli)?;
    let scraper = RedditScraper::new(config.reddit.clone())?;
    let generator = PersonaGenerator::from_config(&config)?;

    let pb = cli::spinner(&format!("Analyzing u/{}", username));
    let outcome = pipeline::run(&config, &username, &scraper, &generator).await;
    pb.finish_and_clear();

    match outcome? {
        RunOutcome::Written(path) => cli::print_success(&path),
        RunOutcome::NoContent => {
            info!("Nothing written for {}", username);
            cli::print_warning("No posts or comments found for this user");
        }
    }
    Ok(())
}

/// Defaults, then the optional config file, then CLI flags, then the environment
fn load_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => path,
        None => {
            let output_dir = cli.output_dir.clone().unwrap_or_else(|| PathBuf::from("outputs"));
            return Config::from_env(output_dir);
        }
    };

    let mut config = Config::load_file(path)?;
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    config.apply_env()?;
    config.validate()?;
    Ok(config)
}
