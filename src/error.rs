use std::path::PathBuf;
use thiserror::Error;

use crate::check::CheckReport;

/// The main error type for framealign operations.
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open transcript {path}: {source}")]
    TranscriptOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read transcript line {line}: {source}")]
    TranscriptRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid frame pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to load frame {path}: {source}")]
    FrameLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to write TSV output: {0}")]
    TsvWrite(#[from] csv::Error),

    #[error("Check failed with {error_count} error(s) and {warning_count} warning(s)")]
    CheckFailed {
        error_count: usize,
        warning_count: usize,
        report: CheckReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
