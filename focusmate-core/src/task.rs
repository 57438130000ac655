//! Task model shared by the ranker, the analytics layer, and the stores.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned sequential id. 0 marks a draft that has not been inserted.
pub type TaskId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Lenient parse for CLI input: case-insensitive, `-` and `_` both accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" | "inprogress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core task type.
///
/// Note: we keep this small + serializable. Where it lives (memory maps or
/// JSON files) is the store layer's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,

    /// User-assigned importance, higher means more important (1-5 in practice).
    pub priority: i32,

    /// Optional due date. Absent means no deadline pressure at all.
    pub due_date: Option<NaiveDate>,

    /// Total minutes the user intends to invest in this task.
    pub target_minutes: i32,

    pub status: TaskStatus,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            priority: 3,
            due_date: None,
            target_minutes: 60,
            status: TaskStatus::Pending,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_target(mut self, minutes: i32) -> Self {
        self.target_minutes = minutes;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_accepts_cli_spellings() {
        assert_eq!(TaskStatus::parse("pending"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::parse("IN-PROGRESS"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("in_progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse(" Done "), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: TaskStatus = serde_json::from_str("\"DONE\"").unwrap();
        assert_eq!(back, TaskStatus::Done);
    }

    #[test]
    fn test_builder_defaults() {
        let t = Task::new("write draft");
        assert_eq!(t.id, 0);
        assert_eq!(t.priority, 3);
        assert_eq!(t.target_minutes, 60);
        assert_eq!(t.due_date, None);
        assert_eq!(t.status, TaskStatus::Pending);
        assert!(!t.is_done());
    }
}
