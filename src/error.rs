//! Error types for gap-score

use std::path::PathBuf;
use thiserror::Error;

/// Which suite a results file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    Sealed,
    Open,
}

impl std::fmt::Display for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Suite::Sealed => write!(f, "sealed"),
            Suite::Open => write!(f, "open"),
        }
    }
}

/// Errors that can occur while loading inputs or handling reports
#[derive(Error, Debug)]
pub enum GapScoreError {
    #[error("Failed to read {suite} results from {}", path.display())]
    ReadResults {
        suite: Suite,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {suite} results from {}", path.display())]
    ParseResults {
        suite: Suite,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed JSON document: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Failed to write output to {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report to stdout")]
    WriteStdout(#[source] std::io::Error),
}

pub type GapScoreResult<T> = Result<T, GapScoreError>;
