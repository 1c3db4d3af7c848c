use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Generate a user persona from a Reddit profile
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Reddit user profile URL, e.g. https://www.reddit.com/user/kojied/
    pub profile_url: String,

    /// Output directory for results [default: outputs, or the config file's]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Prints the success line naming the written report
pub fn print_success(path: &std::path::Path) {
    println!(
        "{} {}",
        "User persona generated successfully:".bright_green(),
        path.display().to_string().bright_white()
    );
}

/// Prints a warning for the user
pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Prints an error for the user
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".bright_red(), message.bright_red());
}

/// Creates a spinner on stderr; hidden when stderr is not a terminal
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style.tick_strings(&["-", "\\", "|", "/", "-", "\\", "|", "/"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
