use serde::Serialize;
use std::fmt;

use crate::assignment::Category;
use crate::session::Session;

/// Maximum cumulative weight any single category may hold.
pub const CATEGORY_WEIGHT_CEILING: f64 = 100.0;

/// Minimum per-category average, in percent, required to pass.
pub const PASS_THRESHOLD: f64 = 50.0;

/// Top of the grade-point scale.
pub const GPA_SCALE_MAX: f64 = 5.0;

/// Grade-point value for anything below the lowest tier.
pub const GPA_FLOOR: f64 = 1.0;

/// `(minimum overall percentage, grade points)`, highest tier first.
pub const GPA_TIERS: &[(f64, f64)] = &[(90.0, 5.0), (80.0, 4.0), (70.0, 3.0), (60.0, 2.0)];

/// Converts an overall percentage into grade points.
///
/// | Range  | GPA |
/// |--------|-----|
/// | >= 90  | 5.0 |
/// | >= 80  | 4.0 |
/// | >= 70  | 3.0 |
/// | >= 60  | 2.0 |
/// | < 60   | 1.0 |
///
/// There is no 0.0 tier, and input above 100 stays in the top tier.
pub fn convert_to_gpa(grade: f64) -> f64 {
    GPA_TIERS
        .iter()
        .find(|(min, _)| grade >= *min)
        .map(|(_, points)| *points)
        .unwrap_or(GPA_FLOOR)
}

/// Course outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Plain-text label used in summaries and saved reports.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "Passed the course",
            Verdict::Fail => "Fail and Repeat",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Session {
    /// Category total as a percentage of the weight entered for it.
    ///
    /// A category with no weight averages 0, which can never pass.
    pub fn category_average(&self, category: Category) -> f64 {
        let weight = self.total_weight(category);
        if weight > 0.0 {
            self.category_total(category) / weight * 100.0
        } else {
            0.0
        }
    }

    /// Pass iff both category averages reach [`PASS_THRESHOLD`].
    pub fn determine_pass_fail(&self) -> Verdict {
        let passed = Category::ALL
            .iter()
            .all(|c| self.category_average(*c) >= PASS_THRESHOLD);
        if passed { Verdict::Pass } else { Verdict::Fail }
    }
}
