//! Per-student session state and category weight accounting.

use serde::Serialize;
use tracing::{debug, warn};

use crate::assignment::{
    Assignment, Category, normalize_category, validate_category, validate_grade,
    validate_weight,
};
use crate::error::ValidationError;
use crate::grading::classify::CATEGORY_WEIGHT_CEILING;

/// Ordered assignments for one student plus the weight consumed in each
/// category. Totals only move when an assignment is accepted.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Session {
    assignments: Vec<Assignment>,
    formative_total_weight: f64,
    summative_total_weight: f64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and records an assignment.
    ///
    /// Checks run in a fixed order (category, grade, weight, category limit)
    /// so the first violated constraint is the one reported. Nothing is
    /// recorded unless every check passes.
    pub fn add_assignment(
        &mut self,
        name: impl Into<String>,
        category: &str,
        weight: f64,
        grade: f64,
    ) -> Result<Assignment, ValidationError> {
        let name = name.into();
        let result = self.try_add(name.clone(), category, weight, grade);
        match &result {
            Ok(a) => debug!(
                name = %a.name(),
                category = %a.category(),
                weight,
                grade,
                weighted = a.weighted_grade(),
                "Assignment accepted"
            ),
            Err(e) => warn!(name = %name, error = %e, "Assignment rejected"),
        }
        result
    }

    fn try_add(
        &mut self,
        name: String,
        category: &str,
        weight: f64,
        grade: f64,
    ) -> Result<Assignment, ValidationError> {
        if !validate_category(category) {
            return Err(ValidationError::InvalidCategory(category.to_string()));
        }
        let category: Category = normalize_category(category).parse()?;

        if !validate_grade(grade) {
            return Err(ValidationError::InvalidGrade(grade));
        }
        if !validate_weight(weight) {
            return Err(ValidationError::InvalidWeight(weight));
        }
        if !self.check_weight_limit(category, weight) {
            return Err(ValidationError::WeightLimitExceeded {
                category,
                weight,
                current: self.total_weight(category),
            });
        }

        let assignment = Assignment::new(name, category, weight, grade);
        self.assignments.push(assignment.clone());
        *self.total_weight_mut(category) += weight;
        Ok(assignment)
    }

    /// True iff adding `weight` keeps `category` at or under 100%.
    pub fn check_weight_limit(&self, category: Category, weight: f64) -> bool {
        self.total_weight(category) + weight <= CATEGORY_WEIGHT_CEILING
    }

    /// Weight already consumed in `category`.
    pub fn total_weight(&self, category: Category) -> f64 {
        match category {
            Category::Formative => self.formative_total_weight,
            Category::Summative => self.summative_total_weight,
        }
    }

    fn total_weight_mut(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Formative => &mut self.formative_total_weight,
            Category::Summative => &mut self.summative_total_weight,
        }
    }

    pub fn formative_total_weight(&self) -> f64 {
        self.formative_total_weight
    }

    pub fn summative_total_weight(&self) -> f64 {
        self.summative_total_weight
    }

    /// All assignments in insertion order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Assignments of one category, still in insertion order.
    pub fn assignments_in(&self, category: Category) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |a| a.category() == category)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
