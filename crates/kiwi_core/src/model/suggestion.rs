//! Transient AI-suggested task.

use crate::model::task::{Priority, TaskDraft};

/// Candidate task produced by the suggestion service.
///
/// Never stored on its own; accepting it turns it into a regular task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedTask {
    pub title: String,
    pub notes: String,
    pub priority: Priority,
}

impl SuggestedTask {
    /// Converts the suggestion into a draft for `TaskStore::add`.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft::new(self.title.clone())
            .notes(self.notes.clone())
            .priority(self.priority)
    }
}
