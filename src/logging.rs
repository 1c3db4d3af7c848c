use crate::error::{PersonaError, Result};
use env_logger::{Builder, Env, Target};
use log::{self, LevelFilter};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use yansi::Paint;

/// Default log file written next to the working directory by the binary
pub const DEFAULT_LOG_FILE: &str = "reddit_analyzer.log";

/// Where log records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Coloured output on stderr
    Stderr,
    /// Plain output appended to a file
    File(PathBuf),
    /// Plain output to both stderr and a file
    Tee(PathBuf),
}

impl Default for LogSink {
    fn default() -> Self {
        Self::Tee(PathBuf::from(DEFAULT_LOG_FILE))
    }
}

/// Writes every buffer to stderr and a file
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| PersonaError::Config(format!("Failed to open log file {}: {}", path.display(), e)))
}

/// Initializes the application's logging system with the specified log level and sink
///
/// Valid log levels are: error, warn, info, debug, trace; anything else means info.
/// `RUST_LOG` takes precedence.
/// Calling this more than once returns an error rather than panicking.
pub fn init(log_level: &str, sink: LogSink) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(parse_log_level(log_level))
        .parse_env(Env::default().write_style_or("RUST_LOG_STYLE", "always"));

    match sink {
        LogSink::Stderr => {
            builder
                .format(|buf, record| writeln!(buf, "{}", format_log(record, true)))
                .target(Target::Stderr);
        }
        LogSink::File(path) => {
            let file = open_log_file(&path)?;
            builder
                .format(|buf, record| writeln!(buf, "{}", format_log(record, false)))
                .target(Target::Pipe(Box::new(file)));
        }
        LogSink::Tee(path) => {
            let file = open_log_file(&path)?;
            builder
                .format(|buf, record| writeln!(buf, "{}", format_log(record, false)))
                .target(Target::Pipe(Box::new(TeeWriter { file })));
        }
    }

    builder
        .try_init()
        .map_err(|e| PersonaError::Message(format!("Logger already initialized: {}", e)))
}

/// Formats a log record into a structured string
///
/// Returns `[timestamp] LEVEL [target] message`, colouring the level when `colored` is set
pub fn format_log(record: &log::Record, colored: bool) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let target = if !record.target().is_empty() {
        record.target()
    } else {
        record.module_path().unwrap_or("unknown")
    };

    format!(
        "[{}] {} [{}] {}",
        timestamp,
        level_label(record.level(), colored),
        target,
        record.args()
    )
}

fn level_label(level: log::Level, colored: bool) -> String {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !colored {
        return label.to_string();
    }
    match level {
        log::Level::Error => Paint::red(label).bold().to_string(),
        log::Level::Warn => Paint::yellow(label).bold().to_string(),
        log::Level::Info => Paint::cyan(label).bold().to_string(),
        log::Level::Debug => Paint::blue(label).bold().to_string(),
        log::Level::Trace => Paint::new(label).to_string(),
    }
}

/// Parses a log level string into a LevelFilter
///
/// Returns the corresponding LevelFilter, defaulting to Info for invalid strings
pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}
