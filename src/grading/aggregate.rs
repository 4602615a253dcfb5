use crate::assignment::Category;
use crate::session::Session;

impl Session {
    /// Sum of weighted grades in one category (0.0 when it is empty).
    pub fn category_total(&self, category: Category) -> f64 {
        self.assignments_in(category)
            .map(|a| a.weighted_grade())
            .sum()
    }

    /// `(formative_total, summative_total)`.
    pub fn category_totals(&self) -> (f64, f64) {
        (
            self.category_total(Category::Formative),
            self.category_total(Category::Summative),
        )
    }

    /// Overall course percentage: the raw sum of both category totals.
    ///
    /// Not clamped. Two fully weighted categories can reach 200.
    pub fn final_grade(&self) -> f64 {
        let (formative, summative) = self.category_totals();
        formative + summative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_totals_are_zero() {
        let s = Session::new();
        assert_eq!(s.category_totals(), (0.0, 0.0));
        assert_eq!(s.final_grade(), 0.0);
    }

    #[test]
    fn test_formative_total_sums_weighted_grades() {
        let mut s = Session::new();
        s.add_assignment("A", "Formative", 60.0, 80.0).unwrap();
        s.add_assignment("B", "Formative", 40.0, 50.0).unwrap();

        let (formative, summative) = s.category_totals();
        assert_eq!(formative, 68.0);
        assert_eq!(summative, 0.0);
    }

    #[test]
    fn test_final_grade_is_unclamped_sum() {
        let mut s = Session::new();
        s.add_assignment("Project", "Formative", 100.0, 100.0).unwrap();
        s.add_assignment("Exam", "Summative", 100.0, 40.0).unwrap();

        assert_eq!(s.category_totals(), (100.0, 40.0));
        assert_eq!(s.final_grade(), 140.0);
    }

    #[test]
    fn test_partial_allocation_yields_partial_total() {
        let mut s = Session::new();
        s.add_assignment("Quiz", "Formative", 20.0, 100.0).unwrap();
        s.add_assignment("Test", "Summative", 30.0, 50.0).unwrap();

        assert_eq!(s.final_grade(), 20.0 + 15.0);
    }
}
