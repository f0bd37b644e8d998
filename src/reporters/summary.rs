//! Summary (terminal) reporter
//!
//! Fixed-line digest of a report:
//!
//! ```text
//! Gap Score: 11.1% 🟢 (minor)
//! Sealed: 16/18 passed
//! Open:   2/3 passed
//!
//! Failures (2):
//!   ❌ rejects_expired_token: expired token accepted
//!   ❌ handles_empty_cart: panicked on empty cart
//! ```
//!
//! The `Open:` line appears only with an open suite, the failures block
//! only when something failed.

use super::RenderOptions;
use crate::report::Report;

const FAILURE_MARK: &str = "❌";
const FAILURE_MARK_PLAIN: &str = "-";

/// Render report as a human-readable summary
pub fn render(report: &Report, options: RenderOptions) -> String {
    let mut out = String::new();
    let level = report.level();
    let glyph = if options.no_emoji {
        level.tag()
    } else {
        level.indicator()
    };

    out.push_str(&format!(
        "{}: {}% {} ({})\n",
        report.flavor.title(),
        report.score(),
        glyph,
        level
    ));
    out.push_str(&format!(
        "Sealed: {}/{} passed\n",
        report.sealed_tests.passed, report.sealed_tests.total
    ));
    if let Some(open) = &report.open_tests {
        out.push_str(&format!("Open:   {}/{} passed\n", open.passed, open.total));
    }

    if !report.failures.is_empty() {
        let mark = if options.no_emoji {
            FAILURE_MARK_PLAIN
        } else {
            FAILURE_MARK
        };
        out.push_str(&format!("\nFailures ({}):\n", report.failures.len()));
        for failure in &report.failures {
            out.push_str(&format!(
                "  {} {}: {}\n",
                mark, failure.test_name, failure.message
            ));
        }
    }

    out
}
