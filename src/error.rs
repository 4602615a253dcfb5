//! Typed validation failures reported by [`Session::add_assignment`].
//!
//! [`Session::add_assignment`]: crate::session::Session::add_assignment

use thiserror::Error;

use crate::assignment::Category;
use crate::grading::classify::CATEGORY_WEIGHT_CEILING;

/// Why an assignment was rejected. None of these are fatal: the caller is
/// expected to re-prompt or skip the row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("category must be 'Formative' or 'Summative', got '{0}'")]
    InvalidCategory(String),

    #[error("grade must be between 0-100, got {0}")]
    InvalidGrade(f64),

    #[error("weight must be between 0-100, got {0}")]
    InvalidWeight(f64),

    #[error(
        "adding {weight}% would exceed 100% limit for {category} category (current {category} weight: {current}%)"
    )]
    WeightLimitExceeded {
        category: Category,
        weight: f64,
        current: f64,
    },
}

impl ValidationError {
    /// Weight still available in the category, for limit violations only.
    pub fn remaining_weight(&self) -> Option<f64> {
        match self {
            ValidationError::WeightLimitExceeded { current, .. } => {
                Some(CATEGORY_WEIGHT_CEILING - current)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_weight_only_for_limit_errors() {
        let err = ValidationError::WeightLimitExceeded {
            category: Category::Summative,
            weight: 30.0,
            current: 80.0,
        };
        assert_eq!(err.remaining_weight(), Some(20.0));
        assert_eq!(ValidationError::InvalidGrade(101.0).remaining_weight(), None);
    }

    #[test]
    fn test_limit_message_mentions_current_total() {
        let err = ValidationError::WeightLimitExceeded {
            category: Category::Formative,
            weight: 50.0,
            current: 60.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Formative"));
        assert!(msg.contains("current Formative weight: 60%"));
    }
}
