//! Raw record dumps: the debugging view over whatever the store holds.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use focusmate_store::Store;

#[derive(Subcommand, Debug)]
pub enum DumpCommand {
    /// Task records
    Tasks {
        /// Write CSV to this path instead of printing
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Session records
    Sessions {
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Preset records
    Presets {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

pub fn run(cmd: DumpCommand) -> Result<()> {
    let (_cfg, store) = crate::open_configured_store()?;
    match cmd {
        DumpCommand::Tasks { csv } => {
            let headers = ["id", "title", "priority", "due_date", "target_minutes", "status"];
            let rows = task_rows(store.as_ref())?;
            emit(&headers, rows, csv)
        }
        DumpCommand::Sessions { csv } => {
            let headers = [
                "id",
                "task_id",
                "started_at",
                "ended_at",
                "planned_minutes",
                "actual_minutes",
                "stopped_manually",
            ];
            let rows = session_rows(store.as_ref())?;
            emit(&headers, rows, csv)
        }
        DumpCommand::Presets { csv } => {
            let headers = [
                "id",
                "name",
                "focus_min",
                "short_break_min",
                "long_break_min",
                "cycles_before_long",
            ];
            let rows = preset_rows(store.as_ref())?;
            emit(&headers, rows, csv)
        }
    }
}

fn task_rows(store: &dyn Store) -> Result<Vec<Vec<String>>> {
    Ok(store
        .tasks()?
        .into_iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.title,
                t.priority.to_string(),
                t.due_date.map(|d| d.to_string()).unwrap_or_default(),
                t.target_minutes.to_string(),
                t.status.to_string(),
            ]
        })
        .collect())
}

fn session_rows(store: &dyn Store) -> Result<Vec<Vec<String>>> {
    Ok(store
        .sessions()?
        .into_iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.task_id.map(|id| id.to_string()).unwrap_or_default(),
                s.started_at.to_rfc3339(),
                s.ended_at.to_rfc3339(),
                s.planned_minutes.to_string(),
                s.actual_minutes.to_string(),
                s.stopped_manually.to_string(),
            ]
        })
        .collect())
}

fn preset_rows(store: &dyn Store) -> Result<Vec<Vec<String>>> {
    Ok(store
        .presets()?
        .into_iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name,
                p.focus_min.to_string(),
                p.short_break_min.to_string(),
                p.long_break_min.to_string(),
                p.cycles_before_long.to_string(),
            ]
        })
        .collect())
}

fn emit(headers: &[&str], rows: Vec<Vec<String>>, csv_path: Option<PathBuf>) -> Result<()> {
    match csv_path {
        Some(path) => {
            let mut w = csv::Writer::from_path(&path)
                .with_context(|| format!("create {}", path.display()))?;
            w.write_record(headers)?;
            for row in &rows {
                w.write_record(row)?;
            }
            w.flush()?;
            println!("Wrote {} row(s) to {}", rows.len(), path.display());
        }
        None => {
            for row in &rows {
                let line = headers
                    .iter()
                    .zip(row)
                    .map(|(h, v)| format!("{h}={v}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{line}");
            }
            println!("\n{} row(s)", rows.len());
        }
    }
    Ok(())
}
