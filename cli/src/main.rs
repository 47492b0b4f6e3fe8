mod report;
mod tui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use attendo_core::{
    parse_human_date, AttendanceService, FileLedgerRepository, FileSemesterRepository, LectureId,
    LectureStatus, SemesterDraft,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub type Service = AttendanceService<FileSemesterRepository, FileLedgerRepository>;

#[derive(Parser)]
#[command(name = "attendo")]
#[command(about = "Track lecture attendance and how many lectures you can still skip", long_about = None)]
struct Cli {
    /// Directory holding semester.json and attendance.json. Defaults to ~/.attendo
    #[arg(long, global = true, env = "ATTENDO_HOME")]
    data_dir: Option<PathBuf>,

    /// Evaluate everything as of this date (YYYY-MM-DD) instead of the local date.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or edit the semester (usage: setup start:2025-01-06 end:2025-05-30 subjects:Math,Physics all:Math=1 mon:Physics=2)
    Setup {
        /// Semester fields as key:value pairs. Left out fields keep their previous value.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Show the semester and its weekly schedule
    Show,
    /// List the lectures of a day (default: today)
    Day { date: Option<String> },
    /// Mark one lecture (usage: mark yest Math#1 present, or mark 2025-01-06 2 absent)
    Mark {
        date: String,
        /// Lecture as subject#n, or its position in `attendo day`
        lecture: String,
        /// present | absent
        status: LectureStatus,
    },
    /// Mark every lecture of a day absent
    Leave { date: String },
    /// Toggle the holiday flag of a day
    Holiday { date: String },
    /// Attendance percentages and remaining bunks
    Stats,
    /// Open the dashboard
    Tui,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    debug!("Running as of {today}");
    let service = AttendanceService::new(
        FileSemesterRepository::new(cli.data_dir.clone())?,
        FileLedgerRepository::new(cli.data_dir)?,
    );

    match cli.command {
        Some(Commands::Setup { args }) => {
            if args.is_empty() {
                return Err(anyhow!(
                    "Nothing to set. Usage: setup start:YYYY-MM-DD end:YYYY-MM-DD subjects:A,B mon:A=2"
                ));
            }
            let previous = service.semester()?;
            let config = SemesterDraft::from_args(&args, today)?
                .build(previous.as_ref())
                .context("Semester not saved")?;
            service.replace_semester(&config)?;
            println!(
                "Semester {} saved ({} subjects).",
                config.name(),
                config.subjects().len()
            );
            report::show_semester(&config);
        }
        Some(Commands::Show) => {
            let config = service.require_semester()?;
            report::show_semester(&config);
        }
        Some(Commands::Day { date }) => {
            let date = match date {
                Some(d) => parse_human_date(&d, today)?,
                None => today,
            };
            report::show_day(&service.day(date, today)?);
        }
        Some(Commands::Mark { date, lecture, status }) => {
            let date = parse_human_date(&date, today)?;
            let lecture = resolve_lecture(&service, date, &lecture)?;
            service.set_lecture_status(date, lecture.clone(), status, today)?;
            println!("{} on {} marked {}.", lecture, date, status);
        }
        Some(Commands::Leave { date }) => {
            let date = parse_human_date(&date, today)?;
            match service.mark_leave(date, today)? {
                0 => println!("No lectures to mark on {}.", date),
                n => println!("Marked {} lectures absent on {}.", n, date),
            }
        }
        Some(Commands::Holiday { date }) => {
            let date = parse_human_date(&date, today)?;
            if service.toggle_holiday(date, today)? {
                println!("{} is now a holiday.", date);
            } else {
                println!("{} is no longer a holiday.", date);
            }
        }
        Some(Commands::Stats) => {
            let config = service.require_semester()?;
            report::show_stats(&config, &service.report(today)?);
        }
        Some(Commands::Tui) | None => {
            tui::run(service, today)?;
        }
    }
    Ok(())
}

/// Accepts `subject#n`, or a 1-based position in the day's lecture list.
fn resolve_lecture(service: &Service, date: NaiveDate, input: &str) -> Result<LectureId> {
    if let Ok(position) = input.parse::<usize>() {
        let lectures = service.lectures_on(date)?;
        return position
            .checked_sub(1)
            .and_then(|i| lectures.get(i).cloned())
            .ok_or_else(|| anyhow!("{} has no lecture number {}", date, position));
    }
    Ok(input.parse()?)
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG exists; use it.
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            "attendo_core",
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
