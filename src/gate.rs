//! Threshold gate for CI
//!
//! Decides the run outcome from the score and an optional limit. The
//! comparison is strict: a score equal to the threshold passes.

use crate::scoring::GapScore;

/// Exit code for a normal run
pub const EXIT_OK: u8 = 0;
/// Exit code when the score exceeds the threshold
pub const EXIT_THRESHOLD_EXCEEDED: u8 = 1;
/// Exit code for usage errors and unreadable input
pub const EXIT_USAGE: u8 = 2;

/// Result of applying the threshold gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateOutcome {
    /// No threshold was given
    NoGate,
    /// Score is at or below the threshold
    Within { score: GapScore, threshold: f64 },
    /// Score is strictly above the threshold
    Exceeded { score: GapScore, threshold: f64 },
}

impl GateOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, GateOutcome::Exceeded { .. })
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_failure() {
            EXIT_THRESHOLD_EXCEEDED
        } else {
            EXIT_OK
        }
    }
}

impl std::fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateOutcome::NoGate => write!(f, "no threshold"),
            GateOutcome::Within { score, threshold } => {
                write!(f, "score {} is within threshold {}", score, threshold)
            }
            GateOutcome::Exceeded { score, threshold } => {
                write!(f, "score {} exceeds threshold {}", score, threshold)
            }
        }
    }
}

/// Apply the gate to a computed score
pub fn evaluate(score: GapScore, threshold: Option<f64>) -> GateOutcome {
    match threshold {
        None => GateOutcome::NoGate,
        Some(threshold) if score.as_f64() > threshold => GateOutcome::Exceeded { score, threshold },
        Some(threshold) => GateOutcome::Within { score, threshold },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(percent: f64) -> GapScore {
        GapScore::from_percent(percent).expect("valid percent")
    }

    #[test]
    fn test_no_threshold_always_passes() {
        let outcome = evaluate(score(100.0), None);
        assert_eq!(outcome, GateOutcome::NoGate);
        assert_eq!(outcome.exit_code(), EXIT_OK);
    }

    #[test]
    fn test_equal_to_threshold_passes() {
        assert_eq!(evaluate(score(15.0), Some(15.0)).exit_code(), EXIT_OK);
        assert_eq!(evaluate(score(11.1), Some(11.1)).exit_code(), EXIT_OK);
    }

    #[test]
    fn test_one_tenth_above_threshold_fails() {
        assert_eq!(
            evaluate(score(15.1), Some(15.0)).exit_code(),
            EXIT_THRESHOLD_EXCEEDED
        );
        assert_eq!(
            evaluate(score(11.2), Some(11.1)).exit_code(),
            EXIT_THRESHOLD_EXCEEDED
        );
    }

    #[test]
    fn test_critical_run_exceeds_fifty() {
        let outcome = evaluate(GapScore::from_counts(9, 15), Some(50.0));
        assert!(outcome.is_failure());
        assert_eq!(outcome.to_string(), "score 60.0 exceeds threshold 50");
    }

    #[test]
    fn test_zero_threshold_fails_any_failure() {
        assert!(!evaluate(GapScore::ZERO, Some(0.0)).is_failure());
        assert!(evaluate(score(0.1), Some(0.0)).is_failure());
    }
}
