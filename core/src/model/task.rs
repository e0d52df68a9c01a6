use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DukeError, MESSAGE_INVALID_EVENT_PERIOD};
use crate::time::{is_ordered, parse_storage, CanonicalDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline {
        by: CanonicalDateTime,
    },
    // Invariant: from <= to. Only `Task::event` builds this variant.
    Event {
        from: CanonicalDateTime,
        to: CanonicalDateTime,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Todo,
        }
    }

    pub fn deadline(description: impl Into<String>, by: CanonicalDateTime) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Deadline { by },
        }
    }

    pub fn event(
        description: impl Into<String>,
        from: CanonicalDateTime,
        to: CanonicalDateTime,
    ) -> Result<Self, DukeError> {
        if !is_ordered(&from, &to) {
            return Err(DukeError::date_format(MESSAGE_INVALID_EVENT_PERIOD));
        }
        Ok(Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Event { from, to },
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    pub fn tag(&self) -> RecordKind {
        match self.kind {
            TaskKind::Todo => RecordKind::T,
            TaskKind::Deadline { .. } => RecordKind::D,
            TaskKind::Event { .. } => RecordKind::E,
        }
    }

    pub fn to_record(&self) -> TaskRecord {
        let (by, from, to) = match &self.kind {
            TaskKind::Todo => (None, None, None),
            TaskKind::Deadline { by } => (Some(by.to_storage_string()), None, None),
            TaskKind::Event { from, to } => (
                None,
                Some(from.to_storage_string()),
                Some(to.to_storage_string()),
            ),
        };
        TaskRecord {
            kind: self.tag(),
            done: self.done,
            description: self.description.clone(),
            by,
            from,
            to,
        }
    }

    pub fn from_record(record: TaskRecord) -> Result<Self, DukeError> {
        if record.description.is_empty() {
            return Err(DukeError::Record("task without a description".to_string()));
        }

        let mut task = match record.kind {
            RecordKind::T => Task::todo(record.description),
            RecordKind::D => {
                let by = required_date(record.by.as_deref(), "by")?;
                Task::deadline(record.description, by)
            }
            RecordKind::E => {
                let from = required_date(record.from.as_deref(), "from")?;
                let to = required_date(record.to.as_deref(), "to")?;
                Task::event(record.description, from, to)?
            }
        };
        task.done = record.done;
        Ok(task)
    }
}

fn required_date(value: Option<&str>, field: &str) -> Result<CanonicalDateTime, DukeError> {
    let text = value.ok_or_else(|| DukeError::Record(format!("missing '{}' date", field)))?;
    parse_storage(text).map_err(|_| DukeError::Record(format!("bad '{}' date: {}", field, text)))
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.done { "X" } else { " " };
        write!(f, "[{:?}][{}] {}", self.tag(), status, self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by),
            TaskKind::Event { from, to } => write!(f, " (from: {} to: {})", from, to),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    T,
    D,
    E,
}

/// Flat, kind-tagged view of a task, used by storage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub kind: RecordKind,
    pub done: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> CanonicalDateTime {
        CanonicalDateTime::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn evening(y: i32, m: u32, d: u32) -> CanonicalDateTime {
        CanonicalDateTime::DateTime(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_display() {
        let mut todo = Task::todo("read book");
        assert_eq!(todo.to_string(), "[T][ ] read book");
        todo.mark_done();
        assert_eq!(todo.to_string(), "[T][X] read book");

        let deadline = Task::deadline("submit report", date(2019, 12, 1));
        assert_eq!(deadline.to_string(), "[D][ ] submit report (by: Dec 01 2019)");

        let event = Task::event("trip", date(2019, 12, 1), evening(2019, 12, 2)).unwrap();
        assert_eq!(
            event.to_string(),
            "[E][ ] trip (from: Dec 01 2019 to: Dec 02 2019 18:00)"
        );
    }

    #[test]
    fn test_event_rejects_reversed_range() {
        let err = Task::event("trip", date(2019, 12, 2), date(2019, 12, 1)).unwrap_err();
        assert_eq!(err, DukeError::date_format(MESSAGE_INVALID_EVENT_PERIOD));
        assert!(Task::event("one day", date(2019, 12, 1), date(2019, 12, 1)).is_ok());
    }

    #[test]
    fn test_record_round_trip() {
        let mut done_deadline = Task::deadline("submit | report", evening(2019, 12, 1));
        done_deadline.mark_done();
        let tasks = vec![
            Task::todo("read book"),
            done_deadline,
            Task::event("trip", date(2019, 12, 1), evening(2019, 12, 2)).unwrap(),
        ];

        for task in tasks {
            let record = task.to_record();
            assert_eq!(Task::from_record(record).unwrap(), task);
        }
    }

    #[test]
    fn test_record_shape() {
        let record = Task::event("trip", date(2019, 12, 1), evening(2019, 12, 2))
            .unwrap()
            .to_record();
        assert_eq!(record.kind, RecordKind::E);
        assert!(!record.done);
        assert_eq!(record.by, None);
        assert_eq!(record.from.as_deref(), Some("2019-12-01"));
        assert_eq!(record.to.as_deref(), Some("2019-12-02 18:00"));
    }

    #[test]
    fn test_from_record_rejects_broken_records() {
        let missing_by = TaskRecord {
            kind: RecordKind::D,
            done: false,
            description: "submit".to_string(),
            by: None,
            from: None,
            to: None,
        };
        assert!(matches!(Task::from_record(missing_by), Err(DukeError::Record(_))));

        let reversed = TaskRecord {
            kind: RecordKind::E,
            done: false,
            description: "trip".to_string(),
            by: None,
            from: Some("2019-12-02".to_string()),
            to: Some("2019-12-01".to_string()),
        };
        assert!(Task::from_record(reversed).is_err());

        let empty = TaskRecord {
            kind: RecordKind::T,
            done: true,
            description: String::new(),
            by: None,
            from: None,
            to: None,
        };
        assert!(matches!(Task::from_record(empty), Err(DukeError::Record(_))));
    }

    #[test]
    fn test_from_record_reads_only_storage_dates() {
        for by in ["today", "tomorrow", " 2019-12-01", "1/12/2019"] {
            let record = TaskRecord {
                kind: RecordKind::D,
                done: false,
                description: "submit".to_string(),
                by: Some(by.to_string()),
                from: None,
                to: None,
            };
            assert!(
                matches!(Task::from_record(record), Err(DukeError::Record(_))),
                "{by:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_event_may_start_at_midnight_of_its_end_date() {
        let midnight = CanonicalDateTime::DateTime(
            NaiveDate::from_ymd_opt(2019, 12, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        let task = Task::event("party", midnight, date(2019, 12, 1)).unwrap();
        assert_eq!(Task::from_record(task.to_record()).unwrap(), task);
    }
}
