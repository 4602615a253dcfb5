pub mod assignment;
pub mod error;
pub mod grading;
pub mod interactive;
pub mod output;
pub mod parser;
pub mod session;

pub use assignment::{Assignment, Category};
pub use error::ValidationError;
pub use grading::classify::{Verdict, convert_to_gpa};
pub use grading::types::GradeSummary;
pub use session::Session;
