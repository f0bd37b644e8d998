//! Results file loading
//!
//! A results file is a JSON object with a `tests` array:
//!
//! ```json
//! {
//!   "tests": [
//!     {"name": "login_ok", "status": "passed", "category": "happy_path"},
//!     {"name": "sql_escape", "status": "failed", "category": "security",
//!      "expected": "escaped", "actual": "raw", "message": "injection possible"}
//!   ]
//! }
//! ```
//!
//! A missing or `null` `tests` entry means zero tests, not an error.

use crate::error::{GapScoreError, GapScoreResult, Suite};
use crate::models::{ResultSet, TestOutcome};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ResultsFile {
    #[serde(default)]
    tests: Option<Vec<TestOutcome>>,
}

impl ResultSet {
    /// Parse a results document from a JSON string
    pub fn from_json(content: &str) -> GapScoreResult<Self> {
        let file: ResultsFile = serde_json::from_str(content)?;
        Ok(ResultSet::new(file.tests.unwrap_or_default()))
    }

    /// Load a results file for the given suite
    pub fn load(path: &Path, suite: Suite) -> GapScoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GapScoreError::ReadResults {
            suite,
            path: path.to_path_buf(),
            source,
        })?;

        let file: ResultsFile =
            serde_json::from_str(&content).map_err(|source| GapScoreError::ParseResults {
                suite,
                path: path.to_path_buf(),
                source,
            })?;

        let set = ResultSet::new(file.tests.unwrap_or_default());
        debug!(
            "Loaded {} {} tests ({} failed) from {}",
            set.len(),
            suite,
            set.failed_count(),
            path.display()
        );
        Ok(set)
    }
}
