//! JSON reporter
//!
//! Outputs the report in the canonical schema as pretty-printed JSON with
//! two-space indentation and fixed key order. Parsing the output with
//! [`Report::from_json`] and rendering again yields the same bytes.

use crate::report::Report;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
