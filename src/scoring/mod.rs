//! Gap Score computation
//!
//! The Gap Score is the percentage of the sealed suite that failed.
//!
//! # Scoring Formula
//!
//! ```text
//! score = round(failed / total × 100, 1 decimal)    (total > 0)
//! score = 0.0                                        (total = 0)
//! ```
//!
//! Rounding is half away from zero, applied to the exact ratio. The score
//! is held as whole tenths of a percent, so `2/18` is stored as `111` and
//! reported as `11.1`. Truncating instead of rounding is not conformant:
//! `1/6` is `16.666…%` and must report `16.7`, not `16.6`.
//!
//! # Severity Bands
//!
//! | score ≤ | level       |
//! |---------|-------------|
//! | 0       | perfect     |
//! | 15      | minor       |
//! | 30      | moderate    |
//! | 50      | significant |
//! | > 50    | critical    |

mod level;

pub use level::{classify, Level, LevelBand, LEVELS};

use crate::models::ResultSet;
use std::fmt;
use tracing::debug;

/// Upper bound of a score in tenths (100.0%)
const MAX_TENTHS: u32 = 1000;

/// A failure percentage rounded to one decimal place
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GapScore {
    tenths: u32,
}

impl GapScore {
    pub const ZERO: GapScore = GapScore { tenths: 0 };

    /// Build from whole tenths of a percent (`151` is `15.1%`)
    pub fn from_tenths(tenths: u32) -> Option<Self> {
        (tenths <= MAX_TENTHS).then_some(Self { tenths })
    }

    /// Build from a percentage, rounding to one decimal place.
    ///
    /// Returns `None` for values outside `[0, 100]` or non-finite input.
    pub fn from_percent(percent: f64) -> Option<Self> {
        if !percent.is_finite() {
            return None;
        }
        let tenths = (percent * 10.0).round();
        if !(0.0..=MAX_TENTHS as f64).contains(&tenths) {
            return None;
        }
        Some(Self {
            tenths: tenths as u32,
        })
    }

    /// Score for `failed` out of `total` tests
    pub fn from_counts(failed: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let failed = failed.min(total) as u128;
        let total = total as u128;
        // round-half-away(failed * 1000 / total) without leaving integers
        let tenths = (2 * failed * MAX_TENTHS as u128 + total) / (2 * total);
        Self {
            tenths: tenths as u32,
        }
    }

    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    pub fn level(&self) -> Level {
        classify(*self)
    }
}

impl fmt::Display for GapScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

/// Compute the score of a sealed result set
pub fn compute_score(sealed: &ResultSet) -> GapScore {
    let total = sealed.len();
    let failed = sealed.failed_count();
    let score = GapScore::from_counts(failed, total);
    debug!("Score: {}/{} failed -> {}%", failed, total, score);
    score
}
