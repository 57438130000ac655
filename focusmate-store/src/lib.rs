//! focusmate-store: the storage capability behind FocusMate.
//!
//! One [`Store`] trait, two interchangeable implementations:
//!
//! - [`JsonStore`] keeps a JSON/JSONL data directory and is the persistent
//!   default.
//! - [`MemoryStore`] keeps plain maps and forgets everything at drop, for
//!   tests and throwaway runs.
//!
//! Which one backs a run is a config decision made by the caller, never a
//! silent global fallback.

pub mod json;
pub mod memory;

use std::path::Path;

use serde::{Deserialize, Serialize};

use focusmate_core::{EffortSource, FocusSession, Preset, RetrievalError, Task, TaskId, TaskStatus};

pub use json::JsonStore;
pub use memory::MemoryStore;

/// Task source, session log, effort totals, and preset catalog in one seam.
///
/// Every method shares the single `RetrievalError` kind; callers get the
/// reason string and decide how to surface it.
pub trait Store {
    /// Insert a draft task and hand it back with the next sequential id.
    /// The title must be non-empty after trimming.
    fn add_task(&mut self, draft: Task) -> Result<Task, RetrievalError>;

    /// Replace an existing task wholesale, matched by id.
    fn update_task(&mut self, task: &Task) -> Result<(), RetrievalError>;

    fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<(), RetrievalError>;

    /// Remove a task and return it. Its sessions stay in the log.
    fn delete_task(&mut self, id: TaskId) -> Result<Task, RetrievalError>;

    fn task(&self, id: TaskId) -> Result<Option<Task>, RetrievalError>;

    /// All tasks, newest first.
    fn tasks(&self) -> Result<Vec<Task>, RetrievalError>;

    /// Append a session and hand it back with the next sequential id.
    fn add_session(&mut self, draft: FocusSession) -> Result<FocusSession, RetrievalError>;

    /// All sessions, oldest first (insertion order).
    fn sessions(&self) -> Result<Vec<FocusSession>, RetrievalError>;

    /// Total actual minutes logged against a task id; 0 when none.
    fn minutes_logged(&self, id: TaskId) -> Result<i32, RetrievalError>;

    fn presets(&self) -> Result<Vec<Preset>, RetrievalError>;
}

// Lets a boxed or borrowed store feed the ranker directly.
impl<'a> EffortSource for dyn Store + 'a {
    fn minutes_logged(&self, id: TaskId) -> Result<i32, RetrievalError> {
        Store::minutes_logged(self, id)
    }
}

/// Which implementation backs a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Json,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Json => "json",
            Backend::Memory => "memory",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(Backend::Json),
            "memory" => Some(Backend::Memory),
            _ => None,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open the configured backend. `data_dir` only matters for `Json`.
pub fn open_store(backend: Backend, data_dir: &Path) -> Result<Box<dyn Store>, RetrievalError> {
    match backend {
        Backend::Json => Ok(Box::new(JsonStore::open(data_dir)?)),
        Backend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}

pub(crate) fn validate_title(draft: &Task) -> Result<String, RetrievalError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(RetrievalError::new("task title must not be empty"));
    }
    Ok(title.to_string())
}

pub(crate) fn missing_task(id: TaskId) -> RetrievalError {
    RetrievalError::new(format!("no task with id {id}"))
}
