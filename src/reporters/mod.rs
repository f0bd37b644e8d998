//! Output reporters for gap-score reports
//!
//! Supports two output formats:
//! - `json` - Machine-readable JSON in the canonical report schema
//! - `summary` - Short human-readable digest

mod json;
mod summary;

use crate::report::Report;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Summary,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "summary" => Ok(OutputFormat::Summary),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: json, summary",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

/// Presentation switches that do not change report content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Replace emoji glyphs with plain-text tags
    pub no_emoji: bool,
}

/// Render a report using an OutputFormat enum
pub fn report_with_format(
    report: &Report,
    format: OutputFormat,
    options: RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::render(report),
        OutputFormat::Summary => Ok(summary::render(report, options)),
    }
}
