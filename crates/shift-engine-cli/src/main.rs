//! `shift-check` CLI — check staff availability against a roster snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Bulk check (request from stdin, JSON report on stdout)
//! echo '{"window":{"date":"2025-01-10","start":"18:00","end":"23:00"},"staff_ids":["A","B"]}' \
//!   | shift-check resolve --roster roster.json
//!
//! # Bulk check from file to file, roster taken from the environment
//! SHIFT_CHECK_ROSTER=roster.json shift-check resolve -i request.json -o report.json
//!
//! # Single staff member, human-readable output
//! shift-check check --roster roster.json --staff A \
//!   --date 2025-01-10 --start 22:00 --end 02:00 --format text
//! ```
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over `--log-level`.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use shift_engine::{
    AvailabilityOutcome, AvailabilityRequest, ConflictReport, Roster, Verdict, WindowRequest,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shift-check",
    version,
    about = "Check which staff can take a shift"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check many staff members against one shift
    Resolve {
        /// Roster snapshot (JSON with `staff` and `assignments`)
        #[arg(long, env = "SHIFT_CHECK_ROSTER")]
        roster: PathBuf,
        /// Request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Check a single staff member against one shift
    Check {
        /// Roster snapshot (JSON with `staff` and `assignments`)
        #[arg(long, env = "SHIFT_CHECK_ROSTER")]
        roster: PathBuf,
        /// Staff identifier
        #[arg(long)]
        staff: String,
        /// Shift date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Shift start, HH:MM
        #[arg(long)]
        start: String,
        /// Shift end, HH:MM (at or before start means the shift ends the next day)
        #[arg(long)]
        end: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Resolve {
            roster,
            input,
            output,
            format,
        } => {
            let roster = load_roster(&roster)?;
            let raw = read_input(input.as_deref())?;
            let request: AvailabilityRequest =
                serde_json::from_str(&raw).context("Failed to parse availability request")?;
            debug!(staff = request.staff_ids.len(), "parsed availability request");

            let outcome = shift_engine::check_availability(&roster, &request)
                .context("Availability check failed")?;
            info!(
                available = outcome.summary.available_count,
                total = outcome.summary.total_requested,
                "availability resolved"
            );

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&outcome)?,
                Format::Text => render_outcome(&outcome),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check {
            roster,
            staff,
            date,
            start,
            end,
            format,
        } => {
            let roster = load_roster(&roster)?;
            let window = WindowRequest::new(&date, &start, &end);
            let report = shift_engine::check_staff(&roster, &staff, &window)
                .context("Availability check failed")?;

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&report)?,
                Format::Text => render_report(&report),
            };
            write_output(None, &rendered)?;
        }
    }

    Ok(())
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_roster(path: &Path) -> Result<Roster> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster: {}", path.display()))?;
    let roster: Roster = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse roster: {}", path.display()))?;
    debug!(
        staff = roster.staff.len(),
        assignments = roster.assignments.len(),
        "loaded roster"
    );
    Ok(roster)
}

fn render_outcome(outcome: &AvailabilityOutcome) -> String {
    let summary = &outcome.summary;
    let mut lines: Vec<String> = summary.reports.iter().map(render_report).collect();
    for id in &outcome.not_found {
        lines.push(format!("{}: not found", id));
    }
    lines.push(format!(
        "{}/{} available{}",
        summary.available_count,
        summary.total_requested,
        if summary.all_available { " (all)" } else { "" }
    ));
    lines.join("\n")
}

fn render_report(report: &ConflictReport) -> String {
    match &report.verdict {
        Verdict::Available => format!("{}: available", report.staff_id),
        Verdict::NotOptedIn => format!("{}: unavailable (not-opted-in)", report.staff_id),
        Verdict::ScheduleConflict(c) => format!(
            "{}: unavailable (schedule-conflict with '{}' {}, {} min overlap)",
            report.staff_id, c.label, c.window, c.overlap_minutes
        ),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
