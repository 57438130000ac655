//! Task ranking: the "what should I work on now" ordering.
//!
//! Score is a weighted linear combination of user priority, deadline urgency,
//! and the remaining-effort gap. The computation is pure: `today` is an
//! explicit parameter, and effort totals are batch-fetched up front rather
//! than queried mid-sort, so a fixed input snapshot always produces the same
//! order.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::RetrievalError;
use crate::task::{Task, TaskId};

/// Weight on the user-assigned priority.
pub const PRIORITY_WEIGHT: f64 = 2.0;
/// Weight on deadline urgency (inverse days until due, clamped at one day).
pub const URGENCY_WEIGHT: f64 = 1.0;
/// Weight on the remaining-effort gap, measured in hours.
pub const GAP_WEIGHT: f64 = 1.5;

/// Supplies total minutes already logged against a task id.
///
/// Implemented by the stores and by a plain pre-fetched map. A failed lookup
/// aborts the whole ranking pass; there is no partial result.
pub trait EffortSource {
    fn minutes_logged(&self, id: TaskId) -> Result<i32, RetrievalError>;
}

/// A pre-fetched effort snapshot. Ids absent from the map read as zero
/// minutes logged.
impl EffortSource for HashMap<TaskId, i32> {
    fn minutes_logged(&self, id: TaskId) -> Result<i32, RetrievalError> {
        Ok(*self.get(&id).unwrap_or(&0))
    }
}

/// Per-term decomposition of one task's score, for explain-style output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub priority_term: f64,
    pub urgency_term: f64,
    pub gap_term: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.priority_term + self.urgency_term + self.gap_term
    }
}

/// Decompose a task's score given minutes already logged and today's date.
///
/// A due date of today or earlier clamps to one day out: the urgency term
/// maxes out at exactly `URGENCY_WEIGHT`, with no extra escalation for
/// overdue tasks. Effort beyond the target clamps the gap to zero rather
/// than going negative.
pub fn score_breakdown(task: &Task, minutes_logged: i32, today: NaiveDate) -> ScoreBreakdown {
    let gap = (task.target_minutes - minutes_logged).max(0);

    let urgency = match task.due_date {
        None => 0.0,
        Some(due) => {
            let days_until_due = (due - today).num_days().max(1);
            1.0 / days_until_due as f64
        }
    };

    ScoreBreakdown {
        priority_term: PRIORITY_WEIGHT * task.priority as f64,
        urgency_term: URGENCY_WEIGHT * urgency,
        gap_term: GAP_WEIGHT * (gap as f64 / 60.0),
    }
}

pub fn score(task: &Task, minutes_logged: i32, today: NaiveDate) -> f64 {
    score_breakdown(task, minutes_logged, today).total()
}

/// Rank tasks best-first against a complete effort snapshot.
///
/// The sort is stable: tasks with equal scores keep their input order. Empty
/// input ranks to empty output.
pub fn rank_tasks(tasks: Vec<Task>, logged: &HashMap<TaskId, i32>, today: NaiveDate) -> Vec<Task> {
    let mut scored: Vec<(Task, f64)> = tasks
        .into_iter()
        .map(|t| {
            let minutes = *logged.get(&t.id).unwrap_or(&0);
            let s = score(&t, minutes, today);
            (t, s)
        })
        .collect();

    // sort_by is stable, so ties preserve input order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored.into_iter().map(|(t, _)| t).collect()
}

/// Batch-fetch effort for every task, then rank.
///
/// The first failed lookup propagates untouched and nothing is returned for
/// the tasks already fetched.
pub fn rank<S: EffortSource + ?Sized>(
    tasks: Vec<Task>,
    efforts: &S,
    today: NaiveDate,
) -> Result<Vec<Task>, RetrievalError> {
    let mut logged = HashMap::with_capacity(tasks.len());
    for task in &tasks {
        logged.insert(task.id, efforts.minutes_logged(task.id)?);
    }
    Ok(rank_tasks(tasks, &logged, today))
}
