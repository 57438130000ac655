use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use clap::Subcommand;

use focusmate_core::{FocusSession, TaskId};
use focusmate_store::Store;

use crate::config::resolve_tz;

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Record a finished work interval after the fact
    Log {
        /// Task id to log against; omit for untracked time
        #[arg(long)]
        task: Option<TaskId>,

        /// Actual minutes worked
        #[arg(long)]
        minutes: i32,

        /// Planned minutes; defaults to --minutes
        #[arg(long)]
        planned: Option<i32>,

        /// Mark as stopped before the planned interval ran out
        #[arg(long, default_value_t = false)]
        manual: bool,
    },

    /// Show recent sessions, newest first
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

pub fn run(cmd: SessionCommand) -> Result<()> {
    let (cfg, mut store) = crate::open_configured_store()?;
    match cmd {
        SessionCommand::Log {
            task,
            minutes,
            planned,
            manual,
        } => log(store.as_mut(), task, minutes, planned, manual),
        SessionCommand::List { limit } => {
            let tz = resolve_tz(&cfg)?;
            list(store.as_ref(), limit, tz)
        }
    }
}

fn log(
    store: &mut dyn Store,
    task: Option<TaskId>,
    minutes: i32,
    planned: Option<i32>,
    manual: bool,
) -> Result<()> {
    if minutes < 1 {
        bail!("minutes must be at least 1");
    }
    if let Some(id) = task {
        if store.task(id)?.is_none() {
            bail!("no task with id {id}");
        }
    }

    // Backdate the start so the stored interval matches the minutes worked.
    let ended_at = Utc::now();
    let started_at = ended_at - Duration::minutes(minutes as i64);
    let session = FocusSession::from_interval(
        task,
        started_at,
        ended_at,
        planned.unwrap_or(minutes),
        manual,
    );

    let session = store.add_session(session)?;
    match session.task_id {
        Some(id) => println!(
            "Logged session {}: {} min against task {}",
            session.id, session.actual_minutes, id
        ),
        None => println!(
            "Logged session {}: {} min (untracked)",
            session.id, session.actual_minutes
        ),
    }
    Ok(())
}

fn list(store: &dyn Store, limit: usize, tz: chrono_tz::Tz) -> Result<()> {
    let sessions = store.sessions()?;
    if sessions.is_empty() {
        println!("No sessions logged yet. Try: focusmate focus");
        return Ok(());
    }

    println!(
        "{:>4}  {:<17} {:>6}  {:>7}/{:<7}  {:<6}",
        "id", "started", "task", "actual", "planned", "stop"
    );
    for s in sessions.iter().rev().take(limit) {
        let started = s.started_at.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string();
        let task = match s.task_id {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        };
        let how = if s.stopped_manually { "manual" } else { "auto" };
        println!(
            "{:>4}  {:<17} {:>6}  {:>7}/{:<7}  {:<6}",
            s.id, started, task, s.actual_minutes, s.planned_minutes, how
        );
    }

    let shown = sessions.len().min(limit);
    println!("\n{} of {} session(s)", shown, sessions.len());
    Ok(())
}
