use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use focusmate_core::{rank, score_breakdown, Task, TaskId};
use focusmate_store::Store;

mod config;
mod dump_cmd;
mod focus;
mod session_cmd;
mod setup;
mod state;
mod stats_cmd;
mod tasks_cmd;

#[derive(Parser, Debug)]
#[command(
    name = "focusmate",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FOCUSMATE_BUILD_SHA"), ")"),
    about = "FocusMate: focus timer, task ranking, and progress tracking"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One-time setup: timezone, timer default, storage backend
    Setup {
        /// Write the default config without prompting
        #[arg(long, default_value_t = false)]
        defaults: bool,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: tasks_cmd::TaskCommand,
    },

    /// Rank open tasks by what deserves attention now
    Plan {
        /// Limit number of tasks printed (default: 10)
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Include Done tasks in the ranking
        #[arg(long, default_value_t = false)]
        all: bool,

        /// Show the per-term score breakdown
        #[arg(long, default_value_t = false)]
        explain: bool,
    },

    /// Run a focus timer and record the session when it ends
    Focus {
        /// Task id to focus on; omit for untracked time
        #[arg(long)]
        task: Option<TaskId>,

        /// Preset name supplying the focus length (see: preset list)
        #[arg(long)]
        preset: Option<String>,

        /// Focus length in minutes; overrides the preset
        #[arg(long)]
        minutes: Option<i32>,
    },

    /// Log and list focus sessions
    Session {
        #[command(subcommand)]
        command: session_cmd::SessionCommand,
    },

    /// Progress summary, or one task's target vs logged minutes
    Stats {
        /// Task id for a single-task view
        #[arg(long)]
        task: Option<TaskId>,
    },

    /// Timer presets
    Preset {
        #[command(subcommand)]
        command: PresetCommand,
    },

    /// Print raw store records, optionally as CSV
    Dump {
        #[command(subcommand)]
        command: dump_cmd::DumpCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PresetCommand {
    /// List available presets
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Setup { defaults } => {
            setup::run_setup(defaults)?;
        }

        Command::Task { command } => {
            tasks_cmd::run(command)?;
        }

        Command::Plan { limit, all, explain } => {
            plan(limit, all, explain)?;
        }

        Command::Focus { task, preset, minutes } => {
            focus::run_focus(task, preset, minutes)?;
        }

        Command::Session { command } => {
            session_cmd::run(command)?;
        }

        Command::Stats { task } => {
            stats_cmd::run(task)?;
        }

        Command::Preset { command } => match command {
            PresetCommand::List => list_presets()?,
        },

        Command::Dump { command } => {
            dump_cmd::run(command)?;
        }
    }

    Ok(())
}

/// Load config and open whichever backend it names.
pub(crate) fn open_configured_store() -> Result<(config::Config, Box<dyn Store>)> {
    let cfg = config::load_config()?;
    let dir = config::data_dir(&cfg)?;
    let store = focusmate_store::open_store(cfg.store.backend, &dir)
        .with_context(|| format!("open {} store at {}", cfg.store.backend, dir.display()))?;
    Ok((cfg, store))
}

fn plan(limit: usize, all: bool, explain: bool) -> Result<()> {
    let (cfg, store) = open_configured_store()?;
    let tz = config::resolve_tz(&cfg)?;
    let today = Utc::now().with_timezone(&tz).date_naive();

    let mut tasks = store.tasks()?;
    if !all {
        tasks.retain(|t| !t.is_done());
    }

    if tasks.is_empty() {
        println!("No open tasks. Add one: focusmate task add --title \"...\"");
        return Ok(());
    }

    let ranked = rank(tasks, &*store, today)?;

    println!("# Plan for {today}\n");
    for (idx, t) in ranked.iter().take(limit).enumerate() {
        let logged = store.minutes_logged(t.id)?;
        let b = score_breakdown(t, logged, today);
        println!(
            "{:>2}. [{}] {}  score={:.2}  prio={}  {}  logged {}/{} min",
            idx + 1,
            t.id,
            t.title,
            b.total(),
            t.priority,
            fmt_due(t, today),
            logged,
            t.target_minutes,
        );
        if explain {
            println!(
                "      priority {:.2} + urgency {:.2} + gap {:.2}",
                b.priority_term, b.urgency_term, b.gap_term
            );
        }
    }

    if ranked.len() > limit {
        println!("\n({} more not shown; pass --limit)", ranked.len() - limit);
    }

    Ok(())
}

fn fmt_due(task: &Task, today: NaiveDate) -> String {
    match task.due_date {
        None => "no due date".to_string(),
        Some(due) => {
            let days = (due - today).num_days();
            if days < 0 {
                format!("due {} (overdue {}d)", due, -days)
            } else if days == 0 {
                format!("due {} (today)", due)
            } else {
                format!("due {} (in {}d)", due, days)
            }
        }
    }
}

fn list_presets() -> Result<()> {
    let (_cfg, store) = open_configured_store()?;
    let presets = store.presets()?;

    println!(
        "{:<14} {:>6} {:>12} {:>11} {:>7}",
        "name", "focus", "short break", "long break", "cycles"
    );
    for p in &presets {
        println!(
            "{:<14} {:>5}m {:>11}m {:>10}m {:>7}",
            p.name, p.focus_min, p.short_break_min, p.long_break_min, p.cycles_before_long
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_due_buckets() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();

        let no_due = Task::new("x");
        assert_eq!(fmt_due(&no_due, today), "no due date");

        let t = Task::new("x").with_due(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap());
        assert_eq!(fmt_due(&t, today), "due 2026-08-25 (today)");

        let t = Task::new("x").with_due(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap());
        assert_eq!(fmt_due(&t, today), "due 2026-08-28 (in 3d)");

        let t = Task::new("x").with_due(NaiveDate::from_ymd_opt(2026, 8, 23).unwrap());
        assert_eq!(fmt_due(&t, today), "due 2026-08-23 (overdue 2d)");
    }
}
