//! CLI entry point for the grade calculator.
//!
//! Runs the interactive data-entry loop by default, or computes a summary
//! from a CSV assignment sheet.

use anyhow::Result;
use clap::{Parser, Subcommand};
use grade_calculator::{
    GradeSummary,
    interactive::Prompter,
    output::{DEFAULT_REPORT_FILE, print_pretty, render_summary, save_report, to_json},
    parser::load_assignments,
};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_calculator")]
#[command(about = "Weighted course grade, GPA and pass/fail calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter assignments at the prompt (the default)
    Interactive {
        /// File name offered when saving a report
        #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
        report: PathBuf,
    },
    /// Compute the summary for one student's CSV assignment sheet
    Compute {
        /// CSV with a `name,category,weight,grade` header
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Also save the plain-text report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Print the summary as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: quiet stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/grade_calculator.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_calculator.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => interactive(PathBuf::from(DEFAULT_REPORT_FILE))?,
        Some(Commands::Interactive { report }) => interactive(report)?,
        Some(Commands::Compute {
            input,
            report,
            json,
        }) => compute(&input, report.as_deref(), json)?,
    }

    Ok(())
}

#[tracing::instrument(skip_all, fields(default_report = %default_report.display()))]
fn interactive(default_report: PathBuf) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout(), default_report);
    prompter.run()
}

#[tracing::instrument(skip_all, fields(input = %input.display(), json))]
fn compute(input: &Path, report: Option<&Path>, json: bool) -> Result<()> {
    let session = load_assignments(input)?;
    let summary = GradeSummary::from_session(&session);
    print_pretty(&summary);

    let mut stdout = io::stdout().lock();
    if json {
        writeln!(stdout, "{}", to_json(&summary)?)?;
    } else {
        write!(stdout, "{}", render_summary(&summary))?;
    }

    if let Some(path) = report {
        save_report(path, &summary)?;
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}
