//! Progress summaries over tasks and logged sessions.
//!
//! Sessions are stored in UTC; day bucketing (today's count, streaks) happens
//! in the user's timezone. Both `today` and the zone are explicit parameters
//! so the numbers are reproducible in tests.

use std::collections::HashSet;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::session::FocusSession;
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Sessions whose local start date is `today`.
    pub today_sessions: usize,

    /// Actual minutes across every session ever logged.
    pub total_minutes: i32,

    /// Percent of tasks marked Done, rounded. 0 when there are no tasks.
    pub completion_rate: i32,

    /// Mean actual minutes per session, rounded. 0 when there are no sessions.
    pub avg_session: i32,

    /// Consecutive days with at least one session, counting back from today.
    pub streak: u32,
}

pub fn summarize(tasks: &[Task], sessions: &[FocusSession], today: NaiveDate, tz: Tz) -> Summary {
    let today_sessions = sessions
        .iter()
        .filter(|s| local_day(s, tz) == today)
        .count();

    let total_minutes: i32 = sessions.iter().map(|s| s.actual_minutes).sum();

    let done = tasks.iter().filter(|t| t.is_done()).count();
    let completion_rate = if tasks.is_empty() {
        0
    } else {
        ((done as f64 * 100.0) / tasks.len() as f64).round() as i32
    };

    let avg_session = if sessions.is_empty() {
        0
    } else {
        (total_minutes as f64 / sessions.len() as f64).round() as i32
    };

    Summary {
        today_sessions,
        total_minutes,
        completion_rate,
        avg_session,
        streak: streak_days(sessions, today, tz),
    }
}

/// Days in a row with at least one session, counting back from (and
/// including) today. A day without a session ends the count immediately, so
/// no session yet today means a streak of zero even after a long run.
pub fn streak_days(sessions: &[FocusSession], today: NaiveDate, tz: Tz) -> u32 {
    let days: HashSet<NaiveDate> = sessions.iter().map(|s| local_day(s, tz)).collect();

    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Target vs logged minutes for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    pub target: i32,
    pub logged: i32,
}

impl TaskProgress {
    /// Percent of target covered, saturating at 100. A task with no target
    /// counts as fully covered once anything is logged.
    pub fn percent(&self) -> i32 {
        if self.target <= 0 {
            return if self.logged > 0 { 100 } else { 0 };
        }
        let pct = (self.logged as f64 * 100.0 / self.target as f64).round() as i32;
        pct.min(100)
    }
}

/// Sum logged minutes for `task_id` against a caller-supplied target.
///
/// Sessions logged against other ids (or no id) are ignored. The target comes
/// from the caller so a deleted task simply reads as target 0 while its
/// logged history stays visible.
pub fn task_progress(task_id: TaskId, target_minutes: i32, sessions: &[FocusSession]) -> TaskProgress {
    let logged = sessions
        .iter()
        .filter(|s| s.task_id == Some(task_id))
        .map(|s| s.actual_minutes)
        .sum();
    TaskProgress {
        target: target_minutes,
        logged,
    }
}

fn local_day(session: &FocusSession, tz: Tz) -> NaiveDate {
    session.started_at.with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::America::Chicago;
    use chrono_tz::UTC;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn session_at(start: DateTime<Utc>, task_id: Option<TaskId>, minutes: i32) -> FocusSession {
        FocusSession {
            id: 0,
            task_id,
            started_at: start,
            ended_at: start + chrono::Duration::minutes(minutes as i64),
            planned_minutes: minutes,
            actual_minutes: minutes,
            stopped_manually: false,
        }
    }

    fn utc(y: i32, m: u32, day: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, day, h, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_inputs_summarize_to_zeros() {
        let s = summarize(&[], &[], d(2026, 8, 25), UTC);
        assert_eq!(
            s,
            Summary {
                today_sessions: 0,
                total_minutes: 0,
                completion_rate: 0,
                avg_session: 0,
                streak: 0,
            }
        );
    }

    #[test]
    fn test_completion_rate_rounds() {
        let tasks = vec![
            Task::new("a").with_status(TaskStatus::Done),
            Task::new("b"),
            Task::new("c").with_status(TaskStatus::InProgress),
        ];
        let s = summarize(&tasks, &[], d(2026, 8, 25), UTC);
        // 1 of 3 done
        assert_eq!(s.completion_rate, 33);

        let tasks = vec![
            Task::new("a").with_status(TaskStatus::Done),
            Task::new("b").with_status(TaskStatus::Done),
            Task::new("c"),
        ];
        let s = summarize(&tasks, &[], d(2026, 8, 25), UTC);
        assert_eq!(s.completion_rate, 67);
    }

    #[test]
    fn test_avg_session_rounds_half_up() {
        let sessions = vec![
            session_at(utc(2026, 8, 25, 9), Some(1), 25),
            session_at(utc(2026, 8, 25, 11), Some(1), 30),
        ];
        let s = summarize(&[], &sessions, d(2026, 8, 25), UTC);
        assert_eq!(s.total_minutes, 55);
        // 27.5 rounds to 28
        assert_eq!(s.avg_session, 28);
        assert_eq!(s.today_sessions, 2);
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let sessions = vec![
            session_at(utc(2026, 8, 23, 9), Some(1), 25),
            session_at(utc(2026, 8, 24, 9), Some(1), 25),
            session_at(utc(2026, 8, 25, 9), None, 25),
        ];
        assert_eq!(streak_days(&sessions, d(2026, 8, 25), UTC), 3);
    }

    #[test]
    fn test_streak_breaks_on_first_gap() {
        // 21st and 22nd logged, 23rd missed, 24th and 25th logged.
        let sessions = vec![
            session_at(utc(2026, 8, 21, 9), Some(1), 25),
            session_at(utc(2026, 8, 22, 9), Some(1), 25),
            session_at(utc(2026, 8, 24, 9), Some(1), 25),
            session_at(utc(2026, 8, 25, 9), Some(1), 25),
        ];
        assert_eq!(streak_days(&sessions, d(2026, 8, 25), UTC), 2);
    }

    #[test]
    fn test_no_session_today_means_zero_streak() {
        let sessions = vec![
            session_at(utc(2026, 8, 23, 9), Some(1), 25),
            session_at(utc(2026, 8, 24, 9), Some(1), 25),
        ];
        assert_eq!(streak_days(&sessions, d(2026, 8, 25), UTC), 0);
    }

    #[test]
    fn test_day_bucketing_uses_the_given_zone() {
        // 03:00 UTC on the 25th is still the evening of the 24th in Chicago.
        let late_night = vec![session_at(utc(2026, 8, 25, 3), Some(1), 25)];

        let s = summarize(&[], &late_night, d(2026, 8, 25), Chicago);
        assert_eq!(s.today_sessions, 0);

        let s = summarize(&[], &late_night, d(2026, 8, 24), Chicago);
        assert_eq!(s.today_sessions, 1);

        let s = summarize(&[], &late_night, d(2026, 8, 25), UTC);
        assert_eq!(s.today_sessions, 1);
    }

    #[test]
    fn test_task_progress_filters_by_id() {
        let sessions = vec![
            session_at(utc(2026, 8, 24, 9), Some(1), 30),
            session_at(utc(2026, 8, 24, 10), Some(2), 45),
            session_at(utc(2026, 8, 24, 11), Some(1), 20),
            session_at(utc(2026, 8, 24, 12), None, 15),
        ];
        let p = task_progress(1, 120, &sessions);
        assert_eq!(p, TaskProgress { target: 120, logged: 50 });
        assert_eq!(p.percent(), 42);
    }

    #[test]
    fn test_progress_percent_saturates() {
        assert_eq!(TaskProgress { target: 60, logged: 90 }.percent(), 100);
        assert_eq!(TaskProgress { target: 0, logged: 30 }.percent(), 100);
        assert_eq!(TaskProgress { target: 0, logged: 0 }.percent(), 0);
        assert_eq!(TaskProgress { target: 60, logged: 0 }.percent(), 0);
    }
}
