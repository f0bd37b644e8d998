//! Report assembly
//!
//! Builds the terminal [`Report`] from a sealed suite and an optional open
//! suite. Field presence is part of the contract: without an open suite
//! the report has no `open_tests` and no `coverage_comparison` at all,
//! rather than zeroed or empty values.
//!
//! # Example
//!
//! ```
//! use gap_score::models::{ResultSet, TestOutcome, TestStatus};
//! use gap_score::report::ReportBuilder;
//!
//! let sealed = ResultSet::new(vec![
//!     TestOutcome::new("login_ok", TestStatus::Passed),
//!     TestOutcome::new("sql_escape", TestStatus::Failed).with_category("security"),
//! ]);
//! let report = ReportBuilder::new(&sealed).build();
//! assert_eq!(report.summary.score.to_string(), "50.0");
//! assert_eq!(report.failures[0].category, "security");
//! assert!(report.open_tests.is_none());
//! ```

use crate::coverage::{self, CoverageComparison, CoverageEntry};
use crate::error::{GapScoreError, GapScoreResult};
use crate::models::{Category, ResultSet, TestOutcome};
use crate::scoring::{self, GapScore, Level};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Version of the report format this crate emits
pub const SPEC_VERSION: &str = "1.0.0";

/// Category recorded for failures that carry none
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Product name the report is published under.
///
/// Both flavors share the engine; only key names and titles differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreFlavor {
    #[default]
    Gap,
    Shadow,
}

impl ScoreFlavor {
    /// Key of the score inside `report`
    pub const fn score_key(&self) -> &'static str {
        match self {
            ScoreFlavor::Gap => "gap_score",
            ScoreFlavor::Shadow => "shadow_score",
        }
    }

    /// Top-level key carrying the format version
    pub const fn version_key(&self) -> &'static str {
        match self {
            ScoreFlavor::Gap => "gap_score_spec_version",
            ScoreFlavor::Shadow => "shadow_score_spec_version",
        }
    }

    /// Headline used in human-readable output
    pub const fn title(&self) -> &'static str {
        match self {
            ScoreFlavor::Gap => "Gap Score",
            ScoreFlavor::Shadow => "Shadow Score",
        }
    }
}

impl FromStr for ScoreFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gap" => Ok(ScoreFlavor::Gap),
            "shadow" => Ok(ScoreFlavor::Shadow),
            _ => Err(format!("Unknown flavor '{}'. Valid flavors: gap, shadow", s)),
        }
    }
}

impl std::fmt::Display for ScoreFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreFlavor::Gap => write!(f, "gap"),
            ScoreFlavor::Shadow => write!(f, "shadow"),
        }
    }
}

/// Score and its severity band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: GapScore,
    pub level: Level,
}

impl ScoreSummary {
    pub fn new(score: GapScore) -> Self {
        Self {
            score,
            level: scoring::classify(score),
        }
    }
}

/// Pass/fail totals of one suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TestTotals {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl TestTotals {
    pub fn from_results(results: &ResultSet) -> Self {
        let total = results.len();
        let failed = results.failed_count();
        Self {
            total,
            passed: total - failed,
            failed,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.passed.checked_add(self.failed) == Some(self.total)
    }
}

/// A failed sealed test, flattened for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub test_name: String,
    pub category: String,
    pub expected: String,
    pub actual: String,
    pub message: String,
}

impl From<&TestOutcome> for Failure {
    fn from(outcome: &TestOutcome) -> Self {
        let category = match outcome.category.as_deref() {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => UNKNOWN_CATEGORY.to_string(),
        };
        Self {
            test_name: outcome.name.clone(),
            category,
            expected: outcome.expected.clone().unwrap_or_default(),
            actual: outcome.actual.clone().unwrap_or_default(),
            message: outcome.message.clone().unwrap_or_default(),
        }
    }
}

/// Full result of one scoring run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub flavor: ScoreFlavor,
    pub spec_version: String,
    pub summary: ScoreSummary,
    pub sealed_tests: TestTotals,
    /// Present iff an open suite was supplied
    pub open_tests: Option<TestTotals>,
    /// Sealed failures in input order
    pub failures: Vec<Failure>,
    /// Present iff an open suite was supplied
    pub coverage_comparison: Option<CoverageComparison>,
}

impl Report {
    pub fn score(&self) -> GapScore {
        self.summary.score
    }

    pub fn level(&self) -> Level {
        self.summary.level
    }

    /// Parse a structured report of either flavor back into a `Report`.
    ///
    /// Rejects documents whose derived fields disagree with their inputs.
    pub fn from_json(content: &str) -> GapScoreResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let (flavor, other) = if value.get(ScoreFlavor::Shadow.version_key()).is_some() {
            (ScoreFlavor::Shadow, ScoreFlavor::Gap)
        } else {
            (ScoreFlavor::Gap, ScoreFlavor::Shadow)
        };
        if value
            .get("report")
            .and_then(|r| r.get(other.score_key()))
            .is_some()
        {
            return Err(GapScoreError::InvalidReport(format!(
                "report.{} does not belong in a {} report",
                other.score_key(),
                flavor.version_key()
            )));
        }
        let wire: WireReport = serde_json::from_value(value)?;
        wire.into_report(flavor)
    }
}

/// Assembles a [`Report`] from loaded result sets
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder<'a> {
    sealed: &'a ResultSet,
    open: Option<&'a ResultSet>,
    flavor: ScoreFlavor,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(sealed: &'a ResultSet) -> Self {
        Self {
            sealed,
            open: None,
            flavor: ScoreFlavor::default(),
        }
    }

    /// Attach the open suite; enables open totals and coverage comparison.
    pub fn with_open(mut self, open: &'a ResultSet) -> Self {
        self.open = Some(open);
        self
    }

    pub fn with_open_opt(mut self, open: Option<&'a ResultSet>) -> Self {
        self.open = open;
        self
    }

    pub fn with_flavor(mut self, flavor: ScoreFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn build(self) -> Report {
        let summary = ScoreSummary::new(scoring::compute_score(self.sealed));
        let failures: Vec<Failure> = self.sealed.failures().map(Failure::from).collect();

        let (open_tests, coverage_comparison) = match self.open {
            Some(open) => (
                Some(TestTotals::from_results(open)),
                Some(coverage::compare(self.sealed, open)),
            ),
            None => (None, None),
        };

        debug!(
            "Built report: score={} level={} failures={} open={}",
            summary.score,
            summary.level,
            failures.len(),
            open_tests.is_some()
        );

        Report {
            flavor: self.flavor,
            spec_version: SPEC_VERSION.to_string(),
            summary,
            sealed_tests: TestTotals::from_results(self.sealed),
            open_tests,
            failures,
            coverage_comparison,
        }
    }
}

/// Build a gap-flavored report
pub fn build_report(sealed: &ResultSet, open: Option<&ResultSet>) -> Report {
    ReportBuilder::new(sealed).with_open_opt(open).build()
}

struct SummaryFields<'a> {
    flavor: ScoreFlavor,
    summary: &'a ScoreSummary,
}

impl Serialize for SummaryFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ScoreSummary", 2)?;
        s.serialize_field(self.flavor.score_key(), &self.summary.score.as_f64())?;
        s.serialize_field("level", &self.summary.level)?;
        s.end()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Report", 6)?;
        s.serialize_field(self.flavor.version_key(), &self.spec_version)?;
        s.serialize_field(
            "report",
            &SummaryFields {
                flavor: self.flavor,
                summary: &self.summary,
            },
        )?;
        s.serialize_field("sealed_tests", &self.sealed_tests)?;
        match &self.open_tests {
            Some(open) => s.serialize_field("open_tests", open)?,
            None => s.skip_field("open_tests")?,
        }
        s.serialize_field("failures", &self.failures)?;
        match &self.coverage_comparison {
            Some(coverage) => s.serialize_field("coverage_comparison", coverage)?,
            None => s.skip_field("coverage_comparison")?,
        }
        s.end()
    }
}

#[derive(Deserialize)]
struct WireSummary {
    #[serde(rename = "gap_score", alias = "shadow_score")]
    score: f64,
    level: Level,
}

#[derive(Deserialize)]
struct WireReport {
    #[serde(rename = "gap_score_spec_version", alias = "shadow_score_spec_version")]
    spec_version: String,
    report: WireSummary,
    sealed_tests: TestTotals,
    #[serde(default)]
    open_tests: Option<TestTotals>,
    failures: Vec<Failure>,
    #[serde(default)]
    coverage_comparison: Option<BTreeMap<String, CoverageEntry>>,
}

impl WireReport {
    fn into_report(self, flavor: ScoreFlavor) -> GapScoreResult<Report> {
        let score = GapScore::from_percent(self.report.score)
            .filter(|s| (s.as_f64() - self.report.score).abs() < 1e-9)
            .ok_or_else(|| {
                GapScoreError::InvalidReport(format!(
                    "score {} is not a one-decimal percentage in [0, 100]",
                    self.report.score
                ))
            })?;
        let summary = ScoreSummary::new(score);
        if summary.level != self.report.level {
            return Err(GapScoreError::InvalidReport(format!(
                "level '{}' does not match score {} (expected '{}')",
                self.report.level, score, summary.level
            )));
        }

        if !self.sealed_tests.is_consistent() {
            return Err(GapScoreError::InvalidReport(
                "sealed_tests total != passed + failed".into(),
            ));
        }
        let expected = GapScore::from_counts(self.sealed_tests.failed, self.sealed_tests.total);
        if expected != score {
            return Err(GapScoreError::InvalidReport(format!(
                "score {} does not match {}/{} failed sealed tests (expected {})",
                score, self.sealed_tests.failed, self.sealed_tests.total, expected
            )));
        }
        if let Some(open) = &self.open_tests {
            if !open.is_consistent() {
                return Err(GapScoreError::InvalidReport(
                    "open_tests total != passed + failed".into(),
                ));
            }
        }
        if self.failures.len() != self.sealed_tests.failed {
            return Err(GapScoreError::InvalidReport(format!(
                "{} failures listed but sealed_tests.failed is {}",
                self.failures.len(),
                self.sealed_tests.failed
            )));
        }
        if self.open_tests.is_some() != self.coverage_comparison.is_some() {
            return Err(GapScoreError::InvalidReport(
                "open_tests and coverage_comparison must be present together".into(),
            ));
        }

        let coverage_comparison = self
            .coverage_comparison
            .map(parse_coverage)
            .transpose()?;

        Ok(Report {
            flavor,
            spec_version: self.spec_version,
            summary,
            sealed_tests: self.sealed_tests,
            open_tests: self.open_tests,
            failures: self.failures,
            coverage_comparison,
        })
    }
}

fn parse_coverage(raw: BTreeMap<String, CoverageEntry>) -> GapScoreResult<CoverageComparison> {
    let mut parsed = Vec::with_capacity(raw.len());
    for (key, entry) in raw {
        let category = Category::from_str(&key).map_err(GapScoreError::InvalidReport)?;
        if entry != CoverageEntry::new(entry.sealed_count, entry.open_count) {
            return Err(GapScoreError::InvalidReport(format!(
                "coverage_comparison.{key}: delta {} != sealed - open",
                entry.delta
            )));
        }
        parsed.push((category, entry));
    }
    let comparison: CoverageComparison = parsed.into_iter().collect();
    if comparison.len() != Category::ALL.len() {
        return Err(GapScoreError::InvalidReport(
            "coverage_comparison must list every category".into(),
        ));
    }
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestStatus;

    fn sealed_fixture() -> ResultSet {
        ResultSet::new(vec![
            TestOutcome::new("t1", TestStatus::Passed).with_category("happy_path"),
            TestOutcome::new("t2", TestStatus::Failed)
                .with_category("security")
                .with_expectation("hashed", "plaintext")
                .with_message("Not hashed"),
            TestOutcome::new("t3", TestStatus::Failed).with_message("no category"),
        ])
    }

    #[test]
    fn test_report_structure() {
        let sealed = ResultSet::new(vec![
            TestOutcome::new("t1", TestStatus::Passed).with_category("happy_path"),
        ]);
        let report = build_report(&sealed, None);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["gap_score_spec_version"], "1.0.0");
        assert!(value.get("report").is_some());
        assert!(value.get("sealed_tests").is_some());
        assert!(value.get("failures").is_some());
    }

    #[test]
    fn test_report_without_open_tests_omits_fields() {
        let report = build_report(&sealed_fixture(), None);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("open_tests").is_none());
        assert!(value.get("coverage_comparison").is_none());
    }

    #[test]
    fn test_report_with_open_tests() {
        let sealed = ResultSet::new(vec![
            TestOutcome::new("s1", TestStatus::Passed).with_category("happy_path"),
        ]);
        let open = ResultSet::new(vec![
            TestOutcome::new("o1", TestStatus::Passed).with_category("happy_path"),
            TestOutcome::new("o2", TestStatus::Failed).with_category("edge_case"),
        ]);
        let report = build_report(&sealed, Some(&open));
        assert_eq!(
            report.open_tests,
            Some(TestTotals {
                total: 2,
                passed: 1,
                failed: 1
            })
        );
        let coverage = report.coverage_comparison.as_ref().unwrap();
        assert_eq!(coverage.len(), 4);
        assert_eq!(coverage.get(Category::EdgeCase).unwrap().delta, -1);
    }

    #[test]
    fn test_empty_open_suite_still_emits_coverage() {
        let report = build_report(&sealed_fixture(), Some(&ResultSet::default()));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["open_tests"]["total"], 0);
        assert_eq!(value["coverage_comparison"]["security"]["sealed"], 1);
    }

    #[test]
    fn test_failure_details() {
        let report = build_report(&sealed_fixture(), None);
        assert_eq!(report.failures.len(), 2);
        let f = &report.failures[0];
        assert_eq!(f.test_name, "t2");
        assert_eq!(f.category, "security");
        assert_eq!(f.expected, "hashed");
        assert_eq!(f.actual, "plaintext");
        assert_eq!(f.message, "Not hashed");
    }

    #[test]
    fn test_missing_category_is_unknown() {
        let report = build_report(&sealed_fixture(), None);
        let f = &report.failures[1];
        assert_eq!(f.category, UNKNOWN_CATEGORY);
        assert_eq!(f.expected, "");
        assert_eq!(f.actual, "");
    }

    #[test]
    fn test_unrecognized_category_kept_literally() {
        let sealed = ResultSet::new(vec![
            TestOutcome::new("p", TestStatus::Failed).with_category("performance"),
            TestOutcome::new("e", TestStatus::Failed).with_category(""),
        ]);
        let report = build_report(&sealed, None);
        assert_eq!(report.failures[0].category, "performance");
        assert_eq!(report.failures[1].category, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_failures_never_come_from_open_suite() {
        let open = ResultSet::new(vec![TestOutcome::new("o", TestStatus::Failed)]);
        let report = build_report(&ResultSet::default(), Some(&open));
        assert!(report.failures.is_empty());
        assert_eq!(report.summary.score, GapScore::ZERO);
        assert_eq!(report.level(), Level::Perfect);
    }

    #[test]
    fn test_duplicate_failures_are_kept() {
        let sealed = ResultSet::new(vec![
            TestOutcome::new("dup", TestStatus::Failed),
            TestOutcome::new("dup", TestStatus::Failed),
        ]);
        assert_eq!(build_report(&sealed, None).failures.len(), 2);
    }

    #[test]
    fn test_field_order() {
        let open = ResultSet::default();
        let report = build_report(&sealed_fixture(), Some(&open));
        let json = serde_json::to_string(&report).unwrap();
        let order = [
            "\"gap_score_spec_version\"",
            "\"report\"",
            "\"sealed_tests\"",
            "\"open_tests\"",
            "\"failures\"",
            "\"coverage_comparison\"",
        ];
        let positions: Vec<usize> = order.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_shadow_flavor_keys() {
        let report = ReportBuilder::new(&sealed_fixture())
            .with_flavor(ScoreFlavor::Shadow)
            .build();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["shadow_score_spec_version"], SPEC_VERSION);
        assert_eq!(value["report"]["shadow_score"], 66.7);
        assert!(value.get("gap_score_spec_version").is_none());
    }

    #[test]
    fn test_from_json_round_trip() {
        let open = ResultSet::new(vec![
            TestOutcome::new("o1", TestStatus::Passed).with_category("security"),
        ]);
        for flavor in [ScoreFlavor::Gap, ScoreFlavor::Shadow] {
            let report = ReportBuilder::new(&sealed_fixture())
                .with_open(&open)
                .with_flavor(flavor)
                .build();
            let json = serde_json::to_string_pretty(&report).unwrap();
            let parsed = Report::from_json(&json).expect("parse report");
            assert_eq!(parsed, report);
            assert_eq!(serde_json::to_string_pretty(&parsed).unwrap(), json);
        }
    }

    #[test]
    fn test_from_json_rejects_inconsistent_totals() {
        let json = r#"{
            "gap_score_spec_version": "1.0.0",
            "report": {"gap_score": 0.0, "level": "perfect"},
            "sealed_tests": {"total": 3, "passed": 1, "failed": 1},
            "failures": [{"test_name": "t", "category": "unknown", "expected": "", "actual": "", "message": ""}]
        }"#;
        assert!(matches!(
            Report::from_json(json),
            Err(GapScoreError::InvalidReport(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_wrong_level() {
        let json = r#"{
            "gap_score_spec_version": "1.0.0",
            "report": {"gap_score": 15.0, "level": "moderate"},
            "sealed_tests": {"total": 0, "passed": 0, "failed": 0},
            "failures": []
        }"#;
        let err = Report::from_json(json).unwrap_err();
        assert!(err.to_string().contains("minor"), "{err}");
    }

    #[test]
    fn test_from_json_requires_coverage_with_open() {
        let json = r#"{
            "gap_score_spec_version": "1.0.0",
            "report": {"gap_score": 0.0, "level": "perfect"},
            "sealed_tests": {"total": 0, "passed": 0, "failed": 0},
            "open_tests": {"total": 0, "passed": 0, "failed": 0},
            "failures": []
        }"#;
        assert!(Report::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_mixed_flavor_keys() {
        let gap_with_shadow_score = r#"{
            "gap_score_spec_version": "1.0.0",
            "report": {"shadow_score": 0.0, "level": "perfect"},
            "sealed_tests": {"total": 0, "passed": 0, "failed": 0},
            "failures": []
        }"#;
        let err = Report::from_json(gap_with_shadow_score).unwrap_err();
        assert!(matches!(err, GapScoreError::InvalidReport(_)), "{err}");
        assert!(err.to_string().contains("shadow_score"), "{err}");

        let shadow_with_gap_score = r#"{
            "shadow_score_spec_version": "1.0.0",
            "report": {"gap_score": 0.0, "level": "perfect"},
            "sealed_tests": {"total": 0, "passed": 0, "failed": 0},
            "failures": []
        }"#;
        assert!(matches!(
            Report::from_json(shadow_with_gap_score),
            Err(GapScoreError::InvalidReport(_))
        ));
    }
}
