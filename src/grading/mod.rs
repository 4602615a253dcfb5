//! Grade aggregation and classification.
//!
//! This module sums weighted contributions per category, maps the overall
//! percentage onto the grade-point scale, and decides pass/fail from the
//! per-category averages.

pub mod aggregate;
pub mod classify;
pub mod types;
