//! Assignment records, the two weighting categories, and the pure input
//! predicates used before anything touches a session's accounting.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Weighting category of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Formative,
    Summative,
}

impl Category {
    /// Both categories in display order.
    pub const ALL: [Category; 2] = [Category::Formative, Category::Summative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Formative => "Formative",
            Category::Summative => "Summative",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Case-insensitive; `"SUMMATIVE"` and `"summative"` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "formative" => Ok(Category::Formative),
            "summative" => Ok(Category::Summative),
            _ => Err(ValidationError::InvalidCategory(s.to_string())),
        }
    }
}

/// True iff `category` names Formative or Summative, ignoring case.
pub fn validate_category(category: &str) -> bool {
    category.parse::<Category>().is_ok()
}

/// Canonical casing: first letter uppercase, the rest lowercase.
///
/// Assumes the input already passed [`validate_category`].
pub fn normalize_category(category: &str) -> String {
    let lower = category.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// True iff `0 <= grade <= 100`.
pub fn validate_grade(grade: f64) -> bool {
    (0.0..=100.0).contains(&grade)
}

/// True iff `0 <= weight <= 100`.
pub fn validate_weight(weight: f64) -> bool {
    (0.0..=100.0).contains(&weight)
}

/// One graded item. `weighted_grade` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    name: String,
    category: Category,
    weight: f64,
    grade: f64,
    weighted_grade: f64,
}

impl Assignment {
    pub(crate) fn new(name: String, category: Category, weight: f64, grade: f64) -> Self {
        Assignment {
            name,
            category,
            weight,
            grade,
            weighted_grade: grade / 100.0 * weight,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn grade(&self) -> f64 {
        self.grade
    }

    /// `grade / 100 * weight`.
    pub fn weighted_grade(&self) -> f64 {
        self.weighted_grade
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}% (Weight: {}%)",
            self.name,
            display_number(self.grade),
            display_number(self.weight)
        )
    }
}

/// Formats a raw percentage with at least one decimal place (`85` -> `85.0`).
///
/// Magnitudes below 1e-4 or from 1e16 up switch to exponent form with a
/// signed two-digit exponent (`0.00001` -> `1e-05`).
pub fn display_number(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{:e}", value);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => sci,
        };
    }
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_category_case_insensitive() {
        assert!(validate_category("Formative"));
        assert!(validate_category("formative"));
        assert!(validate_category("SUMMATIVE"));
        assert!(validate_category("sUmMaTiVe"));
        assert!(!validate_category("final"));
        assert!(!validate_category(""));
        assert!(!validate_category(" formative"));
    }

    #[test]
    fn test_normalize_category_idempotent() {
        for raw in ["SUMMATIVE", "summative", "Summative"] {
            let once = normalize_category(raw);
            assert_eq!(once, "Summative");
            assert_eq!(normalize_category(&once), once);
        }
        assert_eq!(normalize_category("fORMATIVE"), "Formative");
    }

    #[test]
    fn test_category_parse_matches_normalized_form() {
        let parsed: Category = "FORMATIVE".parse().unwrap();
        assert_eq!(parsed.as_str(), normalize_category("FORMATIVE"));
        assert_eq!(
            "exam".parse::<Category>(),
            Err(ValidationError::InvalidCategory("exam".to_string()))
        );
    }

    #[test]
    fn test_grade_and_weight_bounds_inclusive() {
        assert!(validate_grade(0.0));
        assert!(validate_grade(100.0));
        assert!(!validate_grade(-0.1));
        assert!(!validate_grade(100.1));
        assert!(!validate_grade(f64::NAN));

        assert!(validate_weight(0.0));
        assert!(validate_weight(100.0));
        assert!(!validate_weight(-1.0));
        assert!(!validate_weight(f64::INFINITY));
    }

    #[test]
    fn test_weighted_grade_computed_once() {
        let a = Assignment::new("Quiz".into(), Category::Formative, 60.0, 80.0);
        assert_eq!(a.weighted_grade(), 80.0 / 100.0 * 60.0);
        assert_eq!(a.weighted_grade(), 48.0);
    }

    #[test]
    fn test_display_number_exponent_cutoff() {
        assert_eq!(display_number(0.00001), "1e-05");
        assert_eq!(display_number(0.000015), "1.5e-05");
        assert_eq!(display_number(0.0001), "0.0001");
        assert_eq!(display_number(0.0), "0.0");
        assert_eq!(display_number(1e16), "1e+16");
        assert_eq!(display_number(12.5), "12.5");
    }

    #[test]
    fn test_display_formats_like_report() {
        let a = Assignment::new("Lab 1".into(), Category::Summative, 12.5, 85.0);
        assert_eq!(a.to_string(), "Lab 1: 85.0% (Weight: 12.5%)");
    }
}
