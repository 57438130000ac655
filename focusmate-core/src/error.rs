//! The one error the storage seam is allowed to raise.

use thiserror::Error;

/// Failure to fetch from or persist to the task/effort source.
///
/// The ranker and the analytics layer never catch this: there is no retry,
/// no default substitution, no partial output. The caller decides what to do
/// with the reason string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("retrieval failed: {reason}")]
pub struct RetrievalError {
    reason: String,
}

impl RetrievalError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
