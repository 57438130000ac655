//! focusmate-core: the task, session, and ranking primitives behind FocusMate.
//!
//! Everything here is pure and synchronous. Storage lives in
//! `focusmate-store`; the CLI and timer live in `focusmate-cli`. The one
//! algorithm worth reading is in [`scheduler`]: a weighted priority/urgency/
//! remaining-effort score that orders tasks for the "work on this next"
//! suggestion.

pub mod analytics;
pub mod error;
pub mod preset;
pub mod scheduler;
pub mod session;
pub mod task;

pub use analytics::{summarize, streak_days, task_progress, Summary, TaskProgress};
pub use error::RetrievalError;
pub use preset::{builtin_presets, Preset};
pub use scheduler::{
    rank, rank_tasks, score, score_breakdown, EffortSource, ScoreBreakdown, GAP_WEIGHT,
    PRIORITY_WEIGHT, URGENCY_WEIGHT,
};
pub use session::{actual_minutes_between, FocusSession, SessionId};
pub use task::{Task, TaskId, TaskStatus};
