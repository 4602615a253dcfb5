//! Output formatting and persistence for grade summaries.
//!
//! Supports the console summary, pretty-printed JSON, and the plain-text
//! report file.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::assignment::{Category, display_number};
use crate::grading::classify::GPA_SCALE_MAX;
use crate::grading::types::GradeSummary;

/// Default file name offered when saving a report.
pub const DEFAULT_REPORT_FILE: &str = "grade_report.txt";

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &GradeSummary) {
    debug!("{:#?}", summary);
}

/// Serializes a summary as pretty-printed JSON.
pub fn to_json(summary: &GradeSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Console summary shown at the end of a session.
pub struct SummaryView<'a>(pub &'a GradeSummary);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        if summary.assignments.is_empty() {
            return writeln!(f, "No assignments recorded.");
        }

        let rule = "=".repeat(60);
        writeln!(f, "\n{rule}")?;
        writeln!(f, "GRADE CALCULATOR SUMMARY")?;
        writeln!(f, "{rule}")?;

        writeln!(f, "\nAssignment Details:")?;
        writeln!(f, "{}", "-".repeat(60))?;
        for category in Category::ALL {
            let mut rows = summary
                .assignments
                .iter()
                .filter(|a| a.category() == category)
                .peekable();
            if rows.peek().is_none() {
                continue;
            }
            writeln!(f, "{category} Assignments:")?;
            for a in rows {
                writeln!(
                    f,
                    "   - {}: {}% (Weight: {}%, Weighted: {:.2})",
                    a.name(),
                    display_number(a.grade()),
                    display_number(a.weight()),
                    a.weighted_grade()
                )?;
            }
        }

        writeln!(f, "\nCategory Totals:")?;
        writeln!(f, "{}", "-".repeat(30))?;
        for category in Category::ALL {
            let c = summary.category(category);
            writeln!(
                f,
                "Total {category} Grade: {:.2}% (Weight: {}%)",
                c.total,
                display_number(c.total_weight)
            )?;
        }

        writeln!(f, "\nFinal Results:")?;
        writeln!(f, "{}", "-".repeat(20))?;
        writeln!(f, "Overall Grade: {:.2}%", summary.final_grade)?;
        writeln!(f, "GPA: {:.1}/{:.1}", summary.gpa, GPA_SCALE_MAX)?;
        writeln!(f, "Result: {}", summary.verdict)?;
        writeln!(f, "{rule}")
    }
}

/// Plain-text report file body. No decorative symbols.
pub struct ReportView<'a>(pub &'a GradeSummary);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "GRADE CALCULATOR REPORT")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(
            f,
            "Generated on: {}\n",
            summary.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;

        writeln!(f, "Assignment Details:")?;
        writeln!(f, "{}", "-".repeat(30))?;
        for a in &summary.assignments {
            writeln!(f, "{}: {}", a.category(), a.name())?;
            writeln!(
                f,
                "  Grade: {}%, Weight: {}%",
                display_number(a.grade()),
                display_number(a.weight())
            )?;
            writeln!(f, "  Weighted Score: {:.2}\n", a.weighted_grade())?;
        }

        writeln!(f, "Category Totals:")?;
        writeln!(f, "Formative: {:.2}%", summary.formative.total)?;
        writeln!(f, "Summative: {:.2}%\n", summary.summative.total)?;
        writeln!(f, "Final Grade: {:.2}%", summary.final_grade)?;
        writeln!(f, "GPA: {:.1}/{:.1}", summary.gpa, GPA_SCALE_MAX)?;
        writeln!(f, "Result: {}", summary.result())
    }
}

/// Renders the console summary shown at the end of a session.
pub fn render_summary(summary: &GradeSummary) -> String {
    SummaryView(summary).to_string()
}

/// Renders the plain-text report file.
pub fn render_report(summary: &GradeSummary) -> String {
    ReportView(summary).to_string()
}

/// Writes the plain-text report to `path`, replacing any existing file.
#[tracing::instrument(skip(summary), fields(path = %path.display()))]
pub fn save_report(path: &Path, summary: &GradeSummary) -> Result<()> {
    fs::write(path, render_report(summary))
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!(assignments = summary.assignments.len(), "Report saved");
    Ok(())
}
