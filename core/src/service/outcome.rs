use crate::model::task::Task;
use crate::model::task_list::{Entry, Removed};

/// Structured result of one applied command. Rendering is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added { entry: Entry, total: usize },
    Marked(Entry),
    Unmarked(Entry),
    Deleted(Removed),
    Listing(Vec<Entry>),
    Matches { query: String, entries: Vec<Entry> },
    /// The user said `bye`; the session should stop reading input.
    Farewell,
    /// No verb matched; the caller should show what is available.
    Menu,
}

impl Outcome {
    pub fn ends_session(&self) -> bool {
        matches!(self, Outcome::Farewell)
    }

    /// The task this outcome is about, for single-task outcomes.
    pub fn task(&self) -> Option<&Task> {
        match self {
            Outcome::Added { entry, .. } | Outcome::Marked(entry) | Outcome::Unmarked(entry) => {
                Some(&entry.task)
            }
            Outcome::Deleted(removed) => Some(&removed.task),
            _ => None,
        }
    }
}
