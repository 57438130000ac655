use anyhow::Result;
use chrono::Utc;

use focusmate_core::{summarize, task_progress, TaskId};
use focusmate_store::Store;

use crate::config::resolve_tz;

pub fn run(task: Option<TaskId>) -> Result<()> {
    let (cfg, store) = crate::open_configured_store()?;
    let tz = resolve_tz(&cfg)?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    let sessions = store.sessions()?;

    match task {
        None => {
            let tasks = store.tasks()?;
            let s = summarize(&tasks, &sessions, today, tz);

            println!("# FocusMate stats ({today})\n");
            println!("Sessions today:   {}", s.today_sessions);
            println!("Total minutes:    {}", s.total_minutes);
            println!("Completion rate:  {}%", s.completion_rate);
            println!("Avg session:      {} min", s.avg_session);
            println!("Streak:           {} day(s)", s.streak);
        }
        Some(id) => {
            // A deleted task keeps its session history; show it with target 0.
            let (title, target) = match store.task(id)? {
                Some(t) => (t.title, t.target_minutes),
                None => (format!("(deleted task {id})"), 0),
            };
            let p = task_progress(id, target, &sessions);
            let scale = p.target.max(p.logged).max(1);

            println!("# {title}\n");
            println!("Target: {:>5} min  {}", p.target, bar(p.target, scale, 30));
            println!("Logged: {:>5} min  {}", p.logged, bar(p.logged, scale, 30));
            println!("\n{}% of target covered", p.percent());
        }
    }
    Ok(())
}

/// Fixed-width bar scaled against `max`.
fn bar(value: i32, max: i32, width: usize) -> String {
    if max <= 0 {
        return String::new();
    }
    let filled = ((value.max(0) as f64 / max as f64) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
