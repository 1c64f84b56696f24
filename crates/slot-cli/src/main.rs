//! `slotctl` CLI — intersect interview availability and book slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Show every slot where candidate 1 overlaps engineers e1 and e2
//! slotctl slots -r roster.json -c 1 -e e1,e2
//!
//! # Check a single request (suggests 30 minutes earlier when that works)
//! slotctl check -r roster.json -b bookings.json -c 1 -e e1 --day Monday --start 10:30 -d 60
//!
//! # Book it, writing the updated bookings list to a file
//! slotctl book -r roster.json -b bookings.json -c 1 -e e1 --day Monday --start 09:00 -o bookings.json
//!
//! # Cancel every chunk of a booking
//! slotctl cancel -b bookings.json --group 01HZX3J8Q5M8V6Y9T2K4N7P0RS
//!
//! # List bookings, one line per logical booking
//! slotctl bookings -b bookings.json
//! ```
//!
//! Logs go to stderr and are controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use slot_engine::display::initials;
use slot_engine::ledger::BookingLedger;
use slot_engine::time::end_time;
use slot_engine::{
    BookingGroupId, BookingRecord, Day, InterviewType, Roster, Scheduler, SchedulerConfig,
    SlotDecision, TimeOfDay,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slotctl",
    version,
    about = "Interview availability intersection and booking CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (allowedDurations, openingTime, ...); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List mutually free slots for a candidate and engineers
    Slots {
        /// Roster JSON with candidates and engineers
        #[arg(short, long)]
        roster: String,
        /// Candidate id
        #[arg(short, long)]
        candidate: String,
        /// Comma-separated engineer ids (all engineers if omitted)
        #[arg(short, long)]
        engineers: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Check whether a slot can be booked
    Check(RequestArgs),
    /// Book a slot and print the updated bookings list as JSON
    Book {
        #[command(flatten)]
        request: RequestArgs,
        /// Book the earlier suggestion when the requested slot is taken
        #[arg(long)]
        accept_suggestion: bool,
        #[arg(long, value_enum)]
        interview_type: Option<InterviewKind>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Cancel every chunk of a booking group
    Cancel {
        /// Bookings JSON (reads from stdin if omitted)
        #[arg(short, long)]
        bookings: Option<String>,
        #[arg(long)]
        group: String,
        /// Remove the records instead of marking them cancelled
        #[arg(long)]
        remove: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Summarize bookings, one line per logical booking
    Bookings {
        /// Bookings JSON (reads from stdin if omitted)
        #[arg(short, long)]
        bookings: Option<String>,
    },
}

#[derive(Args)]
struct RequestArgs {
    /// Roster JSON with candidates and engineers
    #[arg(short, long)]
    roster: String,
    /// Existing bookings JSON (empty ledger if omitted)
    #[arg(short, long)]
    bookings: Option<String>,
    /// Candidate id
    #[arg(short, long)]
    candidate: String,
    /// Engineer id
    #[arg(short, long)]
    engineer: String,
    #[arg(long)]
    day: String,
    /// Start time as HH:MM
    #[arg(long)]
    start: String,
    /// Duration in minutes (config default if omitted)
    #[arg(short, long)]
    duration: Option<u32>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum InterviewKind {
    Video,
    Phone,
    InPerson,
}

impl From<InterviewKind> for InterviewType {
    fn from(kind: InterviewKind) -> Self {
        match kind {
            InterviewKind::Video => InterviewType::Video,
            InterviewKind::Phone => InterviewType::Phone,
            InterviewKind::InPerson => InterviewType::InPerson,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Slots {
            roster,
            candidate,
            engineers,
            format,
        } => {
            let roster = load_roster(&roster)?;
            let engineer_ids = match engineers {
                Some(raw) => split_ids(&raw),
                None => roster.engineers.iter().map(|e| e.id.clone()).collect(),
            };

            let mut session = Scheduler::new(roster, config)?;
            session.select_candidate(&candidate)?;
            session.select_engineers(engineer_ids.as_slice())?;

            let slots = session.available_slots().clone();
            match format {
                Format::Json => {
                    let rows: Vec<serde_json::Value> = slots
                        .iter()
                        .map(|(key, ids)| {
                            serde_json::json!({
                                "day": key.day,
                                "start": key.start,
                                "engineers": ids,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
                Format::Text => {
                    if slots.is_empty() {
                        println!("No overlapping availability.");
                    }
                    for (key, ids) in &slots {
                        let badges: Vec<String> = ids
                            .iter()
                            .filter_map(|id| session.roster().engineer(id))
                            .map(|e| format!("{} ({})", e.id, initials(&e.name)))
                            .collect();
                        println!("{:<9} {}  {}", key.day, key.start, badges.join(", "));
                    }
                }
            }
        }
        Commands::Check(request) => {
            let (session, day, start) = open_request(&request, config)?;
            match session.request_slot(day, start, &request.engineer)? {
                SlotDecision::Bookable { intent } => {
                    println!(
                        "bookable: {} {}-{} ({} - {})",
                        intent.day,
                        intent.start_time,
                        end_time(intent.start_time, intent.duration),
                        intent.start_time.format_12h(),
                        end_time(intent.start_time, intent.duration).format_12h()
                    );
                }
                SlotDecision::SuggestEarlier { suggested, .. } => {
                    println!(
                        "unavailable; suggested: {} {}-{}",
                        suggested.day,
                        suggested.start_time,
                        end_time(suggested.start_time, suggested.duration)
                    );
                }
                SlotDecision::Unavailable => println!("unavailable"),
            }
        }
        Commands::Book {
            request,
            accept_suggestion,
            interview_type,
            output,
        } => {
            let (mut session, day, start) = open_request(&request, config)?;
            let mut intent = match session.request_slot(day, start, &request.engineer)? {
                SlotDecision::Bookable { intent } => intent,
                SlotDecision::SuggestEarlier { suggested, .. } if accept_suggestion => suggested,
                SlotDecision::SuggestEarlier { suggested, .. } => anyhow::bail!(
                    "Slot {} {} is not available; {} is free (rerun with --accept-suggestion)",
                    day,
                    start,
                    suggested.start_time
                ),
                SlotDecision::Unavailable => anyhow::bail!(
                    "This time slot is not available for the selected duration. Please try a different time."
                ),
            };
            intent.interview_type = interview_type.map(InterviewType::from);

            let stored = session
                .confirm(&intent, chrono::Utc::now())
                .context("Failed to confirm booking")?;
            if let Some(first) = stored.first() {
                tracing::info!(group = %first.group, records = stored.len(), "booking confirmed");
            }

            let json = serde_json::to_string_pretty(session.ledger())?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Cancel {
            bookings,
            group,
            remove,
            output,
        } => {
            let mut ledger = load_ledger(bookings.as_deref())?;
            let group: BookingGroupId = group
                .parse()
                .with_context(|| format!("Invalid booking group id: {}", group))?;
            let changed = if remove {
                ledger.remove(group)?
            } else {
                ledger.cancel(group)?
            };
            tracing::info!(%group, changed, "booking group updated");

            let json = serde_json::to_string_pretty(&ledger)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Bookings { bookings } => {
            let ledger = load_ledger(bookings.as_deref())?;
            for summary in ledger.groups() {
                println!(
                    "{}  {:<9} {}-{}  {} with {}  {:?}",
                    summary.group,
                    summary.day,
                    summary.start_time,
                    summary.end_time,
                    summary.candidate_id,
                    summary.engineer_id,
                    summary.status
                );
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build a session for a single request and parse its day and start time.
fn open_request(request: &RequestArgs, config: SchedulerConfig) -> Result<(Scheduler, Day, TimeOfDay)> {
    let roster = load_roster(&request.roster)?;
    let ledger = match request.bookings.as_deref() {
        Some(path) => load_ledger(Some(path))?,
        None => BookingLedger::new(),
    };
    let day: Day = request.day.parse()?;
    let start: TimeOfDay = request.start.parse()?;

    let mut session = Scheduler::new(roster, config)?.with_ledger(ledger);
    session.select_candidate(&request.candidate)?;
    if let Some(duration) = request.duration {
        session.set_duration(duration)?;
    }
    Ok((session, day, start))
}

fn load_config(path: Option<&str>) -> Result<SchedulerConfig> {
    match path {
        Some(path) => {
            let json = read_input(Some(path))?;
            SchedulerConfig::from_json(&json)
                .with_context(|| format!("Failed to load config: {}", path))
        }
        None => Ok(SchedulerConfig::default()),
    }
}

fn load_roster(path: &str) -> Result<Roster> {
    let json = read_input(Some(path))?;
    Roster::from_json(&json).with_context(|| format!("Failed to load roster: {}", path))
}

fn load_ledger(path: Option<&str>) -> Result<BookingLedger> {
    let json = read_input(path)?;
    if json.trim().is_empty() {
        return Ok(BookingLedger::new());
    }
    let records: Vec<BookingRecord> =
        serde_json::from_str(&json).context("Failed to parse bookings JSON")?;
    Ok(BookingLedger::from_records(records))
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
