//! Focus session model: one timed work interval, finished or stopped early.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::TaskId;

pub type SessionId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: SessionId,

    /// Task the interval was logged against. None means untracked focus time,
    /// which still counts toward daily totals and streaks.
    pub task_id: Option<TaskId>,

    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,

    pub planned_minutes: i32,
    pub actual_minutes: i32,

    /// True when the user stopped the timer before the planned interval ran out.
    pub stopped_manually: bool,
}

impl FocusSession {
    /// Build a session from a finished interval. `id` stays 0 until the store
    /// assigns one.
    pub fn from_interval(
        task_id: Option<TaskId>,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        planned_minutes: i32,
        stopped_manually: bool,
    ) -> Self {
        Self {
            id: 0,
            task_id,
            started_at,
            ended_at,
            planned_minutes,
            actual_minutes: actual_minutes_between(started_at, ended_at),
            stopped_manually,
        }
    }
}

/// Elapsed minutes of an interval, rounded to the nearest minute and floored
/// at 1 so a session stopped within the first seconds still counts something.
pub fn actual_minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i32 {
    let secs = (end - start).num_seconds().max(0) as f64;
    ((secs / 60.0).round() as i32).max(1)
}
