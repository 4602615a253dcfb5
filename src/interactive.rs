//! Prompt-driven data entry for one student at a time.
//!
//! The loop is generic over its input and output so the whole conversation
//! can be scripted in tests. Every data-entry prompt accepts an exit command
//! (see [`EXIT_COMMANDS`](crate::parser::EXIT_COMMANDS)); running out of
//! input is treated the same way.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::assignment::{Category, display_number, validate_grade, validate_weight};
use crate::grading::classify::CATEGORY_WEIGHT_CEILING;
use crate::grading::types::GradeSummary;
use crate::output::{render_summary, save_report};
use crate::parser::{is_affirmative, is_exit_command, parse_count, parse_number};
use crate::session::Session;

/// Drives sessions until the user exits or declines another student.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    default_report: PathBuf,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, default_report: impl Into<PathBuf>) -> Self {
        Prompter {
            input,
            output,
            default_report: default_report.into(),
        }
    }

    /// Consumes the prompter and hands back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs sessions back to back.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(session) = self.collect_session()? else {
                writeln!(self.output, "\nExiting Grade Calculator. Goodbye!")?;
                info!("User exited during data entry");
                return Ok(());
            };

            let summary = GradeSummary::from_session(&session);
            write!(self.output, "{}", render_summary(&summary))?;

            if self.confirm("\nSave report to file? (y/n): ")? {
                self.save(&summary)?;
            }

            if !self.confirm("\nCalculate grades for another student? (y/n): ")? {
                writeln!(self.output, "\nThank you for using the Grade Calculator!")?;
                return Ok(());
            }
            writeln!(self.output, "\n{}", "=".repeat(60))?;
        }
    }

    /// Gathers one student's assignments. `None` means the user exited.
    pub fn collect_session(&mut self) -> Result<Option<Session>> {
        let mut session = Session::new();

        writeln!(self.output, "Welcome to the Grade Generator Calculator!")?;
        writeln!(self.output, "{}", "=".repeat(50))?;
        writeln!(
            self.output,
            "Tip: Type 'exit', 'quit', or 'q' at any time to exit the program"
        )?;

        let Some(count) = self.ask_count()? else {
            return Ok(None);
        };

        for i in 1..=count {
            writeln!(self.output, "\nAssignment {i}:")?;
            writeln!(self.output, "{}", "-".repeat(20))?;
            if !self.collect_assignment(&mut session)? {
                return Ok(None);
            }
        }

        Ok(Some(session))
    }

    fn ask_count(&mut self) -> Result<Option<u64>> {
        loop {
            let Some(line) = self.ask("\nEnter number of assignments: ")? else {
                return Ok(None);
            };
            match parse_count(&line) {
                Some(n) if n > 0 => return Ok(Some(n as u64)),
                Some(_) => writeln!(self.output, "Please enter a positive number.")?,
                None => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    /// Prompts until one assignment is accepted. Returns false on exit.
    fn collect_assignment(&mut self, session: &mut Session) -> Result<bool> {
        loop {
            let Some(name) = self.ask("Name: ")? else {
                return Ok(false);
            };
            if name.is_empty() {
                writeln!(self.output, "Assignment name cannot be empty.")?;
                continue;
            }

            let Some(category) = self.ask_category()? else {
                return Ok(false);
            };
            let Some(weight) = self.ask_weight(session, category)? else {
                return Ok(false);
            };
            let Some(grade) = self.ask_grade()? else {
                return Ok(false);
            };

            match session.add_assignment(name, category.as_str(), weight, grade) {
                Ok(a) => {
                    writeln!(self.output, "Added: {a}")?;
                    return Ok(true);
                }
                Err(e) => {
                    writeln!(self.output, "Error: {e}")?;
                    writeln!(self.output, "Failed to add assignment. Please try again.")?;
                }
            }
        }
    }

    fn ask_category(&mut self) -> Result<Option<Category>> {
        loop {
            let Some(line) = self.ask("Category (Formative/Summative): ")? else {
                return Ok(None);
            };
            match line.parse::<Category>() {
                Ok(c) => return Ok(Some(c)),
                Err(_) => writeln!(
                    self.output,
                    "Please enter 'Formative' or 'Summative' (case-insensitive)"
                )?,
            }
        }
    }

    fn ask_weight(&mut self, session: &Session, category: Category) -> Result<Option<f64>> {
        loop {
            let Some(line) = self.ask("Weight (%): ")? else {
                return Ok(None);
            };
            let Some(weight) = parse_number(&line) else {
                writeln!(self.output, "Please enter a valid number.")?;
                continue;
            };
            if !validate_weight(weight) {
                writeln!(self.output, "Weight must be between 0-100")?;
                continue;
            }
            if session.check_weight_limit(category, weight) {
                return Ok(Some(weight));
            }

            let current = session.total_weight(category);
            writeln!(
                self.output,
                "Weight {}% would exceed 100% limit for {category}",
                display_number(weight)
            )?;
            writeln!(
                self.output,
                "   Current {category} total: {}%",
                display_number(current)
            )?;
            writeln!(
                self.output,
                "   Maximum allowed: {}%",
                display_number(CATEGORY_WEIGHT_CEILING - current)
            )?;
        }
    }

    fn ask_grade(&mut self) -> Result<Option<f64>> {
        loop {
            let Some(line) = self.ask("Grade (%): ")? else {
                return Ok(None);
            };
            match parse_number(&line) {
                Some(grade) if validate_grade(grade) => return Ok(Some(grade)),
                Some(_) => writeln!(self.output, "Grade must be between 0-100")?,
                None => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn save(&mut self, summary: &GradeSummary) -> Result<()> {
        let prompt = format!(
            "Enter filename (or press Enter for '{}'): ",
            self.default_report.display()
        );
        let path = match self.read_answer(&prompt)? {
            Some(name) if !name.is_empty() => PathBuf::from(name),
            _ => self.default_report.clone(),
        };

        match save_report(&path, summary) {
            Ok(()) => writeln!(self.output, "Report saved to {}", path.display())?,
            Err(e) => {
                warn!(error = %e, "Report save failed");
                writeln!(self.output, "Error saving file: {e:#}")?;
            }
        }
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self
            .read_answer(prompt)?
            .is_some_and(|answer| is_affirmative(&answer)))
    }

    /// Data-entry prompt: `None` on exit command or end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self
            .read_answer(prompt)?
            .filter(|answer| !is_exit_command(answer)))
    }

    /// Writes `prompt` and reads one trimmed line; `None` at end of input.
    fn read_answer(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn run_script(script: &str, default_report: PathBuf) -> String {
        let mut prompter = Prompter::new(Cursor::new(script.to_string()), Vec::new(), default_report);
        prompter.run().unwrap();
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_exit_at_count_prompt() {
        let out = run_script("q\n", PathBuf::from("unused.txt"));
        assert!(out.contains("Welcome to the Grade Generator Calculator!"));
        assert!(out.contains("Goodbye!"));
        assert!(!out.contains("Assignment 1:"));
    }

    #[test]
    fn test_end_of_input_is_exit() {
        let out = run_script("2\nQuiz\n", PathBuf::from("unused.txt"));
        assert!(out.ends_with("Exiting Grade Calculator. Goodbye!\n"));
    }

    #[test]
    fn test_reprompts_invalid_entries() {
        let script = "zero\n-1\n2\n\
                      \nQuiz\nhomework\nformative\nabc\n150\n100\n120\n90\n\
                      Exam\nSUMMATIVE\n100\n40\n\
                      n\nn\n";
        let out = run_script(script, PathBuf::from("unused.txt"));

        assert!(out.contains("Please enter a valid number."));
        assert!(out.contains("Please enter a positive number."));
        assert!(out.contains("Assignment name cannot be empty."));
        assert!(out.contains("Please enter 'Formative' or 'Summative' (case-insensitive)"));
        assert!(out.contains("Weight must be between 0-100"));
        assert!(out.contains("Grade must be between 0-100"));
        assert!(out.contains("Added: Quiz: 90.0% (Weight: 100.0%)"));
        assert!(out.contains("Added: Exam: 40.0% (Weight: 100.0%)"));
        assert!(out.contains("Overall Grade: 130.00%"));
        assert!(out.contains("Result: Fail and Repeat"));
        assert!(out.contains("Thank you for using the Grade Calculator!"));
    }

    #[test]
    fn test_weight_limit_shows_headroom() {
        let script = "2\n\
                      Midterm\nsummative\n70\n80\n\
                      Final\nsummative\n40\n30\n95\n\
                      n\nn\n";
        let out = run_script(script, PathBuf::from("unused.txt"));

        assert!(out.contains("Weight 40.0% would exceed 100% limit for Summative"));
        assert!(out.contains("Current Summative total: 70.0%"));
        assert!(out.contains("Maximum allowed: 30.0%"));
        assert!(out.contains("Added: Final: 95.0% (Weight: 30.0%)"));
    }

    #[test]
    fn test_saves_report_with_default_name_and_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let default_report = dir.path().join("grade_report.txt");
        let script = "1\nEssay\nFormative\n100\n85\n\
                      y\n\n\
                      yes\n\
                      exit\n";
        let out = run_script(script, default_report.clone());

        let report = fs::read_to_string(&default_report).unwrap();
        assert!(report.contains("Formative: Essay"));
        assert!(report.contains("Result: Fail and Repeat"));
        assert!(out.contains(&format!("Report saved to {}", default_report.display())));
        assert_eq!(out.matches("Welcome to the Grade Generator Calculator!").count(), 2);
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_save_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("nope").join("report.txt");
        let script = format!(
            "1\nEssay\nFormative\n100\n85\ny\n{}\nn\n",
            bad.display()
        );
        let out = run_script(&script, PathBuf::from("unused.txt"));

        assert!(out.contains("Error saving file:"));
        assert!(out.contains("Thank you for using the Grade Calculator!"));
    }
}
