//! gap-score - measure how much of a sealed test suite an implementation fails
//!
//! The Gap Score is the percentage of sealed tests (written from the
//! requirements and hidden from the implementer) that fail. Reports carry
//! the score, a severity level, suite totals, per-failure details and an
//! optional coverage comparison against the implementer's own open tests.
//!
//! ```
//! use gap_score::models::{ResultSet, TestOutcome, TestStatus};
//! use gap_score::report::build_report;
//! use gap_score::scoring::Level;
//!
//! let sealed = ResultSet::new(vec![
//!     TestOutcome::new("accepts_valid_token", TestStatus::Passed),
//!     TestOutcome::new("rejects_expired_token", TestStatus::Failed),
//! ]);
//! let report = build_report(&sealed, None);
//! assert_eq!(report.score().to_string(), "50.0");
//! assert_eq!(report.level(), Level::Significant);
//! ```

pub mod cli;
pub mod config;
pub mod coverage;
pub mod error;
pub mod gate;
pub mod models;
pub mod report;
pub mod reporters;
pub mod results;
pub mod scoring;
