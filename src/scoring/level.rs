//! Severity bands for a Gap Score
//!
//! Bands are data: an ordered table of inclusive upper bounds, scanned
//! first-match. Renderers look up names and glyphs here instead of
//! re-deriving boundaries.

use super::GapScore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named severity of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Perfect,
    Minor,
    Moderate,
    Significant,
    Critical,
}

/// One row of the band table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBand {
    /// Inclusive upper bound in tenths of a percent; `None` is unbounded
    pub max_tenths: Option<u32>,
    pub level: Level,
    pub indicator: &'static str,
    /// Plain-text stand-in for `indicator` in emoji-free output
    pub tag: &'static str,
}

/// Band table, ascending by upper bound
pub const LEVELS: &[LevelBand] = &[
    LevelBand {
        max_tenths: Some(0),
        level: Level::Perfect,
        indicator: "✅",
        tag: "[PERFECT]",
    },
    LevelBand {
        max_tenths: Some(150),
        level: Level::Minor,
        indicator: "🟢",
        tag: "[MINOR]",
    },
    LevelBand {
        max_tenths: Some(300),
        level: Level::Moderate,
        indicator: "🟡",
        tag: "[MODERATE]",
    },
    LevelBand {
        max_tenths: Some(500),
        level: Level::Significant,
        indicator: "🟠",
        tag: "[SIGNIFICANT]",
    },
    LevelBand {
        max_tenths: None,
        level: Level::Critical,
        indicator: "🔴",
        tag: "[CRITICAL]",
    },
];

/// Band a score falls into
pub fn band_for(score: GapScore) -> &'static LevelBand {
    let tenths = score.tenths();
    LEVELS
        .iter()
        .find(|band| match band.max_tenths {
            Some(max) => tenths <= max,
            None => true,
        })
        .unwrap_or(&LEVELS[LEVELS.len() - 1])
}

/// Classify a score into its severity level
pub fn classify(score: GapScore) -> Level {
    band_for(score).level
}

impl Level {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Perfect => "perfect",
            Level::Minor => "minor",
            Level::Moderate => "moderate",
            Level::Significant => "significant",
            Level::Critical => "critical",
        }
    }

    fn band(&self) -> &'static LevelBand {
        LEVELS
            .iter()
            .find(|band| band.level == *self)
            .unwrap_or(&LEVELS[LEVELS.len() - 1])
    }

    /// Emoji glyph shown next to the score in summaries
    pub fn indicator(&self) -> &'static str {
        self.band().indicator
    }

    /// Bracketed tag used when emoji are disabled
    pub fn tag(&self) -> &'static str {
        self.band().tag
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perfect" => Ok(Level::Perfect),
            "minor" => Ok(Level::Minor),
            "moderate" => Ok(Level::Moderate),
            "significant" => Ok(Level::Significant),
            "critical" => Ok(Level::Critical),
            _ => Err(format!(
                "Unknown level '{}'. Valid levels: perfect, minor, moderate, significant, critical",
                s
            )),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
