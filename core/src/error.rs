use thiserror::Error;

/// Failures the core reports back to the session. Every variant is
/// recoverable: the session prints the message and reads the next line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DukeError {
    #[error("OOPS!!! {0}")]
    Syntax(String),

    #[error("OOPS!!! {0}")]
    DateFormat(String),

    #[error("OOPS!!! Task {index} does not exist. You have {len} tasks in the list.")]
    Index { index: usize, len: usize },

    #[error("Corrupted task record: {0}")]
    Record(String),
}

impl DukeError {
    pub fn syntax(message: impl Into<String>) -> Self {
        DukeError::Syntax(message.into())
    }

    pub fn date_format(message: impl Into<String>) -> Self {
        DukeError::DateFormat(message.into())
    }
}

pub const MESSAGE_EMPTY_TODO: &str = "The description of a todo cannot be empty.";
pub const MESSAGE_DEADLINE_CONTAINS_BY: &str =
    "A deadline can only have one '/by'. Please remove the extra one.";
pub const MESSAGE_EVENT_CONTAINS_TO: &str =
    "An event can only have one '/to'. Please remove the extra one.";
pub const MESSAGE_EVENT_CONTAINS_FROM: &str =
    "An event can only have one '/from'. Please remove the extra one.";
pub const MESSAGE_INVALID_EVENT_PERIOD: &str = "An event cannot end before it starts.";
