//! Serializable snapshot of a finished session, consumed by the console
//! summary, the saved report, and `--json` output.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::assignment::{Assignment, Category};
use crate::grading::classify::{Verdict, convert_to_gpa};
use crate::session::Session;

/// Totals for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: f64,
    pub total_weight: f64,
    pub average: f64,
}

/// Everything the presentation layer renders for one student.
#[derive(Debug, Clone, Serialize)]
pub struct GradeSummary {
    pub generated_at: DateTime<Local>,
    pub assignments: Vec<Assignment>,
    pub formative: CategorySummary,
    pub summative: CategorySummary,
    pub final_grade: f64,
    pub gpa: f64,
    pub verdict: Verdict,
}

impl GradeSummary {
    pub fn from_session(session: &Session) -> Self {
        Self::at(session, Local::now())
    }

    /// Builds the summary with a fixed timestamp.
    pub fn at(session: &Session, generated_at: DateTime<Local>) -> Self {
        let final_grade = session.final_grade();
        let verdict = session.determine_pass_fail();

        GradeSummary {
            generated_at,
            assignments: session.assignments().to_vec(),
            formative: category_summary(session, Category::Formative),
            summative: category_summary(session, Category::Summative),
            final_grade,
            gpa: convert_to_gpa(final_grade),
            verdict,
        }
    }

    /// Plain-text pass/fail label.
    pub fn result(&self) -> &'static str {
        self.verdict.label()
    }

    pub fn category(&self, category: Category) -> &CategorySummary {
        match category {
            Category::Formative => &self.formative,
            Category::Summative => &self.summative,
        }
    }
}

fn category_summary(session: &Session, category: Category) -> CategorySummary {
    CategorySummary {
        category,
        total: session.category_total(category),
        total_weight: session.total_weight(category),
        average: session.category_average(category),
    }
}
