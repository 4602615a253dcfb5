//! Parsing for typed-in values and CSV assignment sheets.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::session::Session;

/// Words that end the program from any data-entry prompt.
pub const EXIT_COMMANDS: &[&str] = &["exit", "quit", "q"];

/// True if the user asked to leave.
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    EXIT_COMMANDS.contains(&input.as_str())
}

/// True for `y` / `yes`, ignoring case and surrounding whitespace.
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Parses a percentage typed at a prompt.
pub fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok()
}

/// Parses the assignment count; `None` for anything that is not an integer.
pub fn parse_count(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

/// One row of an assignment sheet: `name,category,weight,grade`.
#[derive(Debug, Deserialize)]
pub struct AssignmentRow {
    pub name: String,
    pub category: String,
    pub weight: f64,
    pub grade: f64,
}

/// Reads a CSV assignment sheet into a new session.
///
/// # Errors
///
/// Fails on malformed CSV, an empty name, or the first row that the session
/// rejects; the error names the offending row.
pub fn read_assignments<R: Read>(reader: R) -> Result<Session> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut session = Session::new();

    for (idx, row) in rdr.deserialize::<AssignmentRow>().enumerate() {
        let line = idx + 2;
        let row = row.with_context(|| format!("invalid assignment row at line {line}"))?;
        if row.name.is_empty() {
            bail!("assignment name cannot be empty (line {line})");
        }
        session
            .add_assignment(row.name, &row.category, row.weight, row.grade)
            .with_context(|| format!("rejected assignment at line {line}"))?;
    }

    Ok(session)
}

/// Loads an assignment sheet from disk.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_assignments(path: &Path) -> Result<Session> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let session = read_assignments(file)?;
    info!(count = session.assignments().len(), "Assignment sheet loaded");
    Ok(session)
}
