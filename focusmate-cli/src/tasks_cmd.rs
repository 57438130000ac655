use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;

use focusmate_core::{Task, TaskId, TaskStatus};
use focusmate_store::Store;

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task
    Add {
        #[arg(long)]
        title: String,

        /// Higher means more important (1-5 in practice)
        #[arg(long, default_value_t = 3)]
        priority: i32,

        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,

        /// Target minutes to invest overall
        #[arg(long, default_value_t = 60)]
        target: i32,
    },

    /// List tasks, newest first
    List {
        /// Filter: pending | in-progress | done | all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Set a task's status (pending | in-progress | done)
    SetStatus {
        id: TaskId,
        status: String,
    },

    /// Shortcut for `set-status <id> done`
    Done {
        id: TaskId,
    },

    /// Delete a task; its logged sessions stay in history
    Delete {
        id: TaskId,
    },
}

pub fn run(cmd: TaskCommand) -> Result<()> {
    let (_cfg, mut store) = crate::open_configured_store()?;
    match cmd {
        TaskCommand::Add {
            title,
            priority,
            due,
            target,
        } => add(store.as_mut(), title, priority, due, target),
        TaskCommand::List { status } => list(store.as_ref(), &status),
        TaskCommand::SetStatus { id, status } => set_status(store.as_mut(), id, &status),
        TaskCommand::Done { id } => set_status(store.as_mut(), id, "done"),
        TaskCommand::Delete { id } => delete(store.as_mut(), id),
    }
}

fn add(
    store: &mut dyn Store,
    title: String,
    priority: i32,
    due: Option<String>,
    target: i32,
) -> Result<()> {
    if target < 0 {
        bail!("target minutes must not be negative");
    }

    let mut task = Task::new(title).with_priority(priority).with_target(target);
    if let Some(raw) = due {
        let parsed = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid due date '{raw}' (expected YYYY-MM-DD)"))?;
        task = task.with_due(parsed);
    }

    let task = store.add_task(task)?;
    println!("Added task {}: {}", task.id, task.title);
    Ok(())
}

fn list(store: &dyn Store, status: &str) -> Result<()> {
    let filter = parse_status_filter(status)?;

    let mut tasks = store.tasks()?;
    if let Some(wanted) = filter {
        tasks.retain(|t| t.status == wanted);
    }

    if tasks.is_empty() {
        println!("No tasks. Add one: focusmate task add --title \"...\"");
        return Ok(());
    }

    println!(
        "{:>4}  {:<32} {:>4}  {:<12} {:>13}  {:<12}",
        "id", "title", "prio", "due", "logged/target", "status"
    );
    for t in &tasks {
        let logged = store.minutes_logged(t.id)?;
        let due = match t.due_date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => "-".to_string(),
        };
        println!(
            "{:>4}  {:<32} {:>4}  {:<12} {:>6}/{:<6}  {:<12}",
            t.id,
            ellipsize(&t.title, 32),
            t.priority,
            due,
            logged,
            t.target_minutes,
            t.status
        );
    }
    Ok(())
}

fn set_status(store: &mut dyn Store, id: TaskId, status: &str) -> Result<()> {
    let Some(parsed) = TaskStatus::parse(status) else {
        bail!("unknown status '{status}' (pending | in-progress | done)");
    };
    store.set_status(id, parsed)?;
    println!("Task {} -> {}", id, parsed);
    Ok(())
}

fn delete(store: &mut dyn Store, id: TaskId) -> Result<()> {
    let removed = store.delete_task(id)?;
    println!("Deleted task {}: {}", removed.id, removed.title);
    Ok(())
}

fn parse_status_filter(raw: &str) -> Result<Option<TaskStatus>> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match TaskStatus::parse(raw) {
        Some(s) => Ok(Some(s)),
        None => bail!("unknown status filter '{raw}' (pending | in-progress | done | all)"),
    }
}

fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
