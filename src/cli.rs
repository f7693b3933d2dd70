/// CLI argument parsing and command handling.
use std::path::PathBuf;

use anyhow::Result;
use chrono::Duration;
use clap::{Parser, Subcommand};

use crate::clock::Clock;
use crate::format::{format_clock, format_hours, format_money, format_time};
use crate::stats;
use crate::store::Store;
use crate::timer::Tracker;
use crate::types::{ProjectId, SessionId};

#[derive(Parser)]
#[command(
    name = "stint",
    version,
    about = "Stint - A terminal time tracker for freelance projects"
)]
pub struct Cli {
    /// Database file to use
    #[arg(long, global = true, env = "STINT_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start timing a project, closing any running timer
    Start { project: String },
    /// Stop the running timer
    Stop,
    /// Show the running timer
    Status,
    /// List recorded sessions, newest first
    Sessions {
        #[arg(short = 'p', long = "project")]
        project: Option<String>,
        #[arg(short = 'n', long = "limit", default_value_t = 10)]
        limit: usize,
    },
    /// Tracked time for every project, running timer included
    Projects,
    /// Delete a recorded session
    Delete { id: String },
    /// Total tracked time for a project
    Total {
        project: String,
        /// Hourly rate used to compute earnings
        #[arg(short = 'r', long = "rate")]
        rate: Option<f64>,
    },
    /// Time tracked today
    Today,
    /// Time tracked per day over the last seven days
    Week,
}

/// Execute a one-shot CLI command against the tracker.
pub fn run<S: Store, C: Clock>(command: Command, tracker: &mut Tracker<S, C>) -> Result<()> {
    match command {
        Command::Start { project } => handle_start(&project, tracker)?,
        Command::Stop => handle_stop(tracker)?,
        Command::Status => handle_status(tracker),
        Command::Sessions { project, limit } => handle_sessions(project, limit, tracker)?,
        Command::Projects => handle_projects(tracker),
        Command::Delete { id } => handle_delete(&id, tracker)?,
        Command::Total { project, rate } => handle_total(&project, rate, tracker)?,
        Command::Today => println!("Today: {}", format_time(tracker.today_time())),
        Command::Week => handle_week(tracker),
    }
    Ok(())
}

fn handle_start<S: Store, C: Clock>(project: &str, tracker: &mut Tracker<S, C>) -> Result<()> {
    if let Some(closed) = tracker.start(project)? {
        println!(
            "Stopped '{}' after {}",
            closed.project_id,
            format_time(closed.duration)
        );
    }
    println!("Started timer for '{}'", project.trim());
    Ok(())
}

fn handle_stop<S: Store, C: Clock>(tracker: &mut Tracker<S, C>) -> Result<()> {
    match tracker.stop()? {
        Some(session) => {
            println!(
                "Stopped '{}' after {}",
                session.project_id,
                format_time(session.duration)
            );
            println!(
                "Total on '{}': {}",
                session.project_id,
                format_time(tracker.total_time(&session.project_id))
            );
        }
        None => println!("No timer running."),
    }
    Ok(())
}

fn handle_status<S: Store, C: Clock>(tracker: &Tracker<S, C>) {
    match tracker.state().project_id() {
        Some(project) => {
            println!("Timer running: {project}");
            println!("Elapsed: {}", format_clock(tracker.elapsed()));
        }
        None => println!("No timer running."),
    }
}

fn handle_sessions<S: Store, C: Clock>(
    project: Option<String>,
    limit: usize,
    tracker: &Tracker<S, C>,
) -> Result<()> {
    let project_id = project.map(ProjectId::new).transpose()?;
    let sessions = match &project_id {
        Some(project_id) => {
            let mut sessions: Vec<_> = tracker.sessions_by_project(project_id).collect();
            sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
            sessions.truncate(limit);
            sessions
        }
        None => tracker.ledger().recent(limit),
    };
    if sessions.is_empty() {
        println!("No sessions recorded.");
        return Ok(());
    }
    for session in sessions {
        println!(
            "{}  {:<20} {} - {}  {}",
            session.id,
            session.project_id.as_str(),
            session.start_time.format("%Y-%m-%d %H:%M"),
            session.end_time.format("%H:%M"),
            format_time(session.duration)
        );
    }
    Ok(())
}

fn handle_projects<S: Store, C: Clock>(tracker: &Tracker<S, C>) {
    let totals = tracker.time_by_project();
    if totals.is_empty() {
        println!("No time tracked yet.");
        return;
    }
    for (project, seconds) in totals {
        let marker = if tracker.state().is_running_for(&project) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<24} {:>12}  {} h",
            project.as_str(),
            format_time(seconds),
            format_hours(seconds)
        );
    }
}

fn handle_delete<S: Store, C: Clock>(id: &str, tracker: &mut Tracker<S, C>) -> Result<()> {
    if tracker.delete_session(&SessionId::from(id.trim()))? {
        println!("Deleted session {id}");
    } else {
        println!("Session {id} not found");
    }
    Ok(())
}

fn handle_total<S: Store, C: Clock>(
    project: &str,
    rate: Option<f64>,
    tracker: &Tracker<S, C>,
) -> Result<()> {
    let project_id = ProjectId::new(project)?;
    let seconds = tracker.total_time(&project_id);
    println!(
        "{project_id}: {} ({} h)",
        format_time(seconds),
        format_hours(seconds)
    );
    if let Some(rate) = rate {
        println!(
            "Earnings at {}/h: {}",
            format_money(rate),
            format_money(stats::earnings(seconds, rate))
        );
    }
    Ok(())
}

fn handle_week<S: Store, C: Clock>(tracker: &Tracker<S, C>) {
    let today = tracker.now().date_naive();
    let days: Vec<_> = (0..7).rev().map(|offset| today - Duration::days(offset)).collect();
    let totals = stats::day_totals(tracker.ledger().as_slice(), &days);
    for (day, seconds) in totals {
        let seconds = if day == today {
            tracker.today_time()
        } else {
            seconds
        };
        println!("{}  {}", day.format("%a %Y-%m-%d"), format_time(seconds));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::MemoryStore;

    fn setup() -> (Tracker<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::today_noon();
        let tracker = Tracker::open(MemoryStore::default(), clock.clone()).unwrap();
        (tracker, clock)
    }

    #[test]
    fn test_parse_start_with_db_flag() {
        let cli = Cli::try_parse_from(["stint", "--db", "/tmp/x.db", "start", "acme"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert!(matches!(cli.command, Some(Command::Start { project }) if project == "acme"));
    }

    #[test]
    fn test_parse_no_subcommand_opens_dashboard() {
        let cli = Cli::try_parse_from(["stint"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_start_and_stop_commands() {
        let (mut tracker, clock) = setup();
        run(Command::Start { project: "acme".into() }, &mut tracker).unwrap();
        clock.advance(120);
        run(Command::Stop, &mut tracker).unwrap();
        assert!(!tracker.state().is_running());
        assert_eq!(tracker.total_time(&ProjectId::new("acme").unwrap()), 120);
    }

    #[test]
    fn test_start_blank_project_fails() {
        let (mut tracker, _) = setup();
        let result = run(Command::Start { project: " ".into() }, &mut tracker);
        assert!(result.is_err());
        assert!(!tracker.state().is_running());
    }

    #[test]
    fn test_delete_command_handles_missing_session() {
        let (mut tracker, clock) = setup();
        run(Command::Start { project: "acme".into() }, &mut tracker).unwrap();
        clock.advance(5);
        run(Command::Stop, &mut tracker).unwrap();
        let id = tracker.ledger().as_slice()[0].id.to_string();

        run(Command::Delete { id: id.clone() }, &mut tracker).unwrap();
        run(Command::Delete { id }, &mut tracker).unwrap();
        assert!(tracker.ledger().is_empty());
    }

    #[test]
    fn test_sessions_for_unknown_or_blank_project() {
        let (mut tracker, clock) = setup();
        run(Command::Start { project: "acme".into() }, &mut tracker).unwrap();
        clock.advance(30);
        run(Command::Stop, &mut tracker).unwrap();

        let listed = Command::Sessions {
            project: Some("other".into()),
            limit: 10,
        };
        run(listed, &mut tracker).unwrap();
        let blank = Command::Sessions {
            project: Some("  ".into()),
            limit: 10,
        };
        assert!(run(blank, &mut tracker).is_err());
    }

    #[test]
    fn test_read_only_commands_succeed() {
        let (mut tracker, _) = setup();
        run(Command::Start { project: "acme".into() }, &mut tracker).unwrap();
        run(Command::Status, &mut tracker).unwrap();
        run(Command::Today, &mut tracker).unwrap();
        run(Command::Week, &mut tracker).unwrap();
        run(Command::Projects, &mut tracker).unwrap();
        run(
            Command::Sessions {
                project: Some("acme".into()),
                limit: 5,
            },
            &mut tracker,
        )
        .unwrap();
        run(
            Command::Total {
                project: "acme".into(),
                rate: Some(50.0),
            },
            &mut tracker,
        )
        .unwrap();
    }
}
