//! In-memory store: plain maps plus sequence counters.
//!
//! Same shape the fallback map in earlier FocusMate builds had, except it is
//! an ordinary value you construct and pass around instead of a process-wide
//! singleton. Tests and `backend = "memory"` runs use it.

use std::collections::BTreeMap;

use focusmate_core::{
    builtin_presets, FocusSession, Preset, RetrievalError, Task, TaskId, TaskStatus,
};

use crate::{missing_task, validate_title, Store};

#[derive(Debug)]
pub struct MemoryStore {
    task_seq: TaskId,
    session_seq: u32,
    tasks: BTreeMap<TaskId, Task>,
    sessions: Vec<FocusSession>,
    presets: Vec<Preset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            task_seq: 0,
            session_seq: 0,
            tasks: BTreeMap::new(),
            sessions: Vec::new(),
            presets: builtin_presets(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn add_task(&mut self, mut draft: Task) -> Result<Task, RetrievalError> {
        draft.title = validate_title(&draft)?;
        self.task_seq += 1;
        draft.id = self.task_seq;
        self.tasks.insert(draft.id, draft.clone());
        Ok(draft)
    }

    fn update_task(&mut self, task: &Task) -> Result<(), RetrievalError> {
        if !self.tasks.contains_key(&task.id) {
            return Err(missing_task(task.id));
        }
        let mut updated = task.clone();
        updated.title = validate_title(&updated)?;
        self.tasks.insert(updated.id, updated);
        Ok(())
    }

    fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<(), RetrievalError> {
        match self.tasks.get_mut(&id) {
            Some(task) => {
                task.status = status;
                Ok(())
            }
            None => Err(missing_task(id)),
        }
    }

    fn delete_task(&mut self, id: TaskId) -> Result<Task, RetrievalError> {
        self.tasks.remove(&id).ok_or_else(|| missing_task(id))
    }

    fn task(&self, id: TaskId) -> Result<Option<Task>, RetrievalError> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn tasks(&self) -> Result<Vec<Task>, RetrievalError> {
        // BTreeMap iterates ascending by id; newest first is the reverse.
        Ok(self.tasks.values().rev().cloned().collect())
    }

    fn add_session(&mut self, mut draft: FocusSession) -> Result<FocusSession, RetrievalError> {
        self.session_seq += 1;
        draft.id = self.session_seq;
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

impl focusmate_core::EffortSource for MemoryStore {
    fn minutes_logged(&self, id: TaskId) -> Result<i32, RetrievalError> {
        Store::minutes_logged(self, id)
    }
}
