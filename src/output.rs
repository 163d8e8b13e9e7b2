//! CLI output formatting for pipeline runs.
//!
//! The `format_*` function is pure (returns `Vec<String>`, no I/O) so tests
//! can assert on exact lines; `print_*` is the stdout wrapper the binary
//! calls. Entities follow a two-level pattern: a header line with positional
//! index and identity, then indented context lines.
//!
//! ```text
//! Category blog (run 4f1c2d…)
//! 001 dawn-jpg: processed
//!     Source: shots/dawn.jpg
//! 002 dusk-jpg: skipped (unchanged)
//!     Source: shots/dusk.jpg
//!
//! Processed 1, skipped 1, failed 0
//! ```

use crate::pipeline::{PhotoStatus, RunReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

pub fn format_run_report(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Category {} (run {})",
        report.category_slug, report.run_id
    ));

    for (pos, outcome) in report.outcomes.iter().enumerate() {
        let status = match &outcome.status {
            PhotoStatus::Processed => "processed".to_string(),
            PhotoStatus::Skipped => "skipped (unchanged)".to_string(),
            PhotoStatus::Failed(reason) => format!("failed: {reason}"),
        };
        lines.push(format!(
            "{} {}: {}",
            format_index(pos + 1),
            outcome.slug,
            status
        ));
        lines.push(format!("    Source: {}", outcome.source.display()));
    }

    lines.push(String::new());
    lines.push(format!(
        "Processed {}, skipped {}, failed {}",
        report.processed(),
        report.skipped(),
        report.failed()
    ));
    lines
}

pub fn print_run_report(report: &RunReport) {
    for line in format_run_report(report) {
        println!("{line}");
    }
}
