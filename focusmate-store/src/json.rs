//! JSON-file-backed store.
//!
//! Layout under the data directory:
//!
//! - `tasks.json`     pretty-printed snapshot, rewritten on every task change
//! - `sessions.jsonl` append-only log, one session per line
//! - `presets.json`   seeded with the built-in catalog on first open, then
//!   left alone so users can edit it
//!
//! Everything loads at open and stays in memory. The files stay small for a
//! single-user tool, so whole-file rewrites of the task snapshot are fine;
//! sessions only ever append.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use focusmate_core::{
    builtin_presets, FocusSession, Preset, RetrievalError, Task, TaskId, TaskStatus,
};

use crate::{missing_task, validate_title, Store};

const TASKS_FILE: &str = "tasks.json";
const SESSIONS_FILE: &str = "sessions.jsonl";
const PRESETS_FILE: &str = "presets.json";

#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    tasks: Vec<Task>,
    sessions: Vec<FocusSession>,
    presets: Vec<Preset>,
}

impl JsonStore {
    /// Open (and if needed create) a data directory. Missing files mean an
    /// empty store; unparseable files are an error, not silently discarded
    /// data.
    pub fn open(dir: &Path) -> Result<Self, RetrievalError> {
        fs::create_dir_all(dir)
            .map_err(|e| RetrievalError::new(format!("create {}: {e}", dir.display())))?;

        let tasks: Vec<Task> = read_json_or_default(&dir.join(TASKS_FILE))?;
        let sessions: Vec<FocusSession> = read_jsonl(&dir.join(SESSIONS_FILE))?;

        let presets_path = dir.join(PRESETS_FILE);
        let presets = if presets_path.exists() {
            read_json_or_default(&presets_path)?
        } else {
            let seeded = builtin_presets();
            write_json_pretty(&presets_path, &seeded)?;
            seeded
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            tasks,
            sessions,
            presets,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_task_id(&self) -> TaskId {
        // The session log outlives deleted tasks; ids it references stay
        // taken, or a new task would inherit the dead task's logged minutes.
        self.tasks
            .iter()
            .map(|t| t.id)
            .chain(self.sessions.iter().filter_map(|s| s.task_id))
            .max()
            .unwrap_or(0)
            + 1
    }

    fn next_session_id(&self) -> u32 {
        self.sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    /// Write the snapshot to disk first; memory takes it only once the write
    /// has landed.
    fn persist_and_set_tasks(&mut self, tasks: Vec<Task>) -> Result<(), RetrievalError> {
        write_json_pretty(&self.dir.join(TASKS_FILE), &tasks)?;
        self.tasks = tasks;
        Ok(())
    }

    fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

impl Store for JsonStore {
    fn add_task(&mut self, mut draft: Task) -> Result<Task, RetrievalError> {
        draft.title = validate_title(&draft)?;
        draft.id = self.next_task_id();
        let mut tasks = self.tasks.clone();
        tasks.push(draft.clone());
        self.persist_and_set_tasks(tasks)?;
        Ok(draft)
    }

    fn update_task(&mut self, task: &Task) -> Result<(), RetrievalError> {
        let idx = self.task_index(task.id).ok_or_else(|| missing_task(task.id))?;
        let mut updated = task.clone();
        updated.title = validate_title(&updated)?;
        let mut tasks = self.tasks.clone();
        tasks[idx] = updated;
        self.persist_and_set_tasks(tasks)
    }

    fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<(), RetrievalError> {
        let idx = self.task_index(id).ok_or_else(|| missing_task(id))?;
        let mut tasks = self.tasks.clone();
        tasks[idx].status = status;
        self.persist_and_set_tasks(tasks)
    }

    fn delete_task(&mut self, id: TaskId) -> Result<Task, RetrievalError> {
        let idx = self.task_index(id).ok_or_else(|| missing_task(id))?;
        let mut tasks = self.tasks.clone();
        let removed = tasks.remove(idx);
        self.persist_and_set_tasks(tasks)?;
        Ok(removed)
    }

    fn task(&self, id: TaskId) -> Result<Option<Task>, RetrievalError> {
        Ok(self.tasks.iter().find(|t| t.id == id).cloned())
    }

    fn tasks(&self) -> Result<Vec<Task>, RetrievalError> {
        // The snapshot appends in id order; newest first is the reverse.
        Ok(self.tasks.iter().rev().cloned().collect())
    }

    fn add_session(&mut self, mut draft: FocusSession) -> Result<FocusSession, RetrievalError> {
        draft.id = self.next_session_id();
        append_jsonl(&self.dir.join(SESSIONS_FILE), &draft)?;
        self.sessions.push(draft.clone());
        Ok(draft)
    }

    fn sessions(&self) -> Result<Vec<FocusSession>, RetrievalError> {
        Ok(self.sessions.clone())
    }

    fn minutes_logged(&self, id: TaskId) -> Result<i32, RetrievalError> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.task_id == Some(id))
            .map(|s| s.actual_minutes)
            .sum())
    }

    fn presets(&self) -> Result<Vec<Preset>, RetrievalError> {
        Ok(self.presets.clone())
    }
}

impl focusmate_core::EffortSource for JsonStore {
    fn minutes_logged(&self, id: TaskId) -> Result<i32, RetrievalError> {
        Store::minutes_logged(self, id)
    }
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, RetrievalError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| RetrievalError::new(format!("read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| RetrievalError::new(format!("parse {}: {e}", path.display())))
}

fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), RetrievalError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| RetrievalError::new(format!("serialize {}: {e}", path.display())))?;
    fs::write(path, json)
        .map_err(|e| RetrievalError::new(format!("write {}: {e}", path.display())))
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RetrievalError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| RetrievalError::new(format!("read {}: {e}", path.display())))?;

    let mut out = Vec::new();
    for (n, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = serde_json::from_str(line).map_err(|e| {
            RetrievalError::new(format!("parse {} line {}: {e}", path.display(), n + 1))
        })?;
        out.push(value);
    }
    Ok(out)
}

fn append_jsonl<T: Serialize>(path: &Path, value: &T) -> Result<(), RetrievalError> {
    let json = serde_json::to_string(value)
        .map_err(|e| RetrievalError::new(format!("serialize {}: {e}", path.display())))?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RetrievalError::new(format!("open {}: {e}", path.display())))?;
    writeln!(file, "{json}")
        .map_err(|e| RetrievalError::new(format!("append {}: {e}", path.display())))
}
