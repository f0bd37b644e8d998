//! Sealed vs. open coverage comparison
//!
//! Counts tests per fixed [`Category`] in each suite. Outcomes tagged with
//! anything else (or nothing) are left out of the comparison; they still
//! count toward suite totals.

use crate::models::{Category, ResultSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category test counts for both suites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CoverageEntry {
    #[serde(rename = "sealed")]
    pub sealed_count: usize,
    #[serde(rename = "open")]
    pub open_count: usize,
    /// `sealed_count - open_count`
    pub delta: i64,
}

impl CoverageEntry {
    pub fn new(sealed_count: usize, open_count: usize) -> Self {
        Self {
            sealed_count,
            open_count,
            delta: sealed_count as i64 - open_count as i64,
        }
    }
}

/// Coverage entries for every fixed category, in category order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageComparison {
    entries: BTreeMap<Category, CoverageEntry>,
}

impl CoverageComparison {
    pub fn get(&self, category: Category) -> Option<&CoverageEntry> {
        self.entries.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CoverageEntry)> {
        self.entries.iter().map(|(c, e)| (*c, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Category, CoverageEntry)> for CoverageComparison {
    fn from_iter<I: IntoIterator<Item = (Category, CoverageEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for CoverageComparison {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, entry) in &self.entries {
            map.serialize_entry(category.as_str(), entry)?;
        }
        map.end()
    }
}

/// Compare category coverage of the sealed and open suites.
///
/// All four categories are always present, zero counts included.
pub fn compare(sealed: &ResultSet, open: &ResultSet) -> CoverageComparison {
    Category::ALL
        .iter()
        .map(|&category| {
            (
                category,
                CoverageEntry::new(sealed.count_in(category), open.count_in(category)),
            )
        })
        .collect()
}
