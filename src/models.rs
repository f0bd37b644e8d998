//! Core data models for gap-score
//!
//! These models describe raw test outcomes as they are read from a
//! results file. Everything derived from them (scores, coverage, the
//! report) lives in its own module.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of a single executed test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
}

impl TestStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, TestStatus::Failed)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "passed"),
            TestStatus::Failed => write!(f, "failed"),
        }
    }
}

/// The fixed scenario categories used by the coverage comparison.
///
/// Declaration order is the emission order in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HappyPath,
    EdgeCase,
    ErrorHandling,
    Security,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::HappyPath,
        Category::EdgeCase,
        Category::ErrorHandling,
        Category::Security,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::HappyPath => "happy_path",
            Category::EdgeCase => "edge_case",
            Category::ErrorHandling => "error_handling",
            Category::Security => "security",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy_path" => Ok(Category::HappyPath),
            "edge_case" => Ok(Category::EdgeCase),
            "error_handling" => Ok(Category::ErrorHandling),
            "security" => Ok(Category::Security),
            _ => Err(format!(
                "Unknown category '{}'. Valid categories: happy_path, edge_case, error_handling, security",
                s
            )),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executed test, as recorded in a results file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub name: String,
    pub status: TestStatus,
    /// Literal category string; may name something outside [`Category`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TestOutcome {
    pub fn new(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            status,
            category: None,
            expected: None,
            actual: None,
            message: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_expectation(
        mut self,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    /// The fixed category this test belongs to, if it names one
    pub fn fixed_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }
}

/// Ordered outcomes of one suite (sealed or open)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    outcomes: Vec<TestOutcome>,
}

impl ResultSet {
    pub fn new(outcomes: Vec<TestOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestOutcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|t| t.status.is_failed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter().filter(|t| t.status.is_failed())
    }

    /// Number of outcomes tagged with the given fixed category
    pub fn count_in(&self, category: Category) -> usize {
        self.outcomes
            .iter()
            .filter(|t| t.fixed_category() == Some(category))
            .count()
    }
}

impl From<Vec<TestOutcome>> for ResultSet {
    fn from(outcomes: Vec<TestOutcome>) -> Self {
        Self::new(outcomes)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a TestOutcome;
    type IntoIter = std::slice::Iter<'a, TestOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
