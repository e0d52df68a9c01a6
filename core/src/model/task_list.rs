use crate::error::DukeError;
use crate::model::task::{Task, TaskRecord};

/// A task together with its 1-based position at the time it was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub index: usize,
    pub task: Task,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub index: usize,
    pub task: Task,
    pub remaining: usize,
}

/// Ordered task collection addressed by 1-based external indices.
///
/// Indices are always contiguous over `1..=len()`: deleting task `n` moves
/// every task after it down by one. An index outside that range is an
/// `Index` error, never clamped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&Task> {
        index.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    pub fn add(&mut self, task: Task) -> Entry {
        self.tasks.push(task.clone());
        Entry {
            index: self.tasks.len(),
            task,
        }
    }

    pub fn mark(&mut self, index: usize) -> Result<Entry, DukeError> {
        let slot = self.position(index)?;
        let task = &mut self.tasks[slot];
        task.mark_done();
        Ok(Entry {
            index,
            task: task.clone(),
        })
    }

    pub fn unmark(&mut self, index: usize) -> Result<Entry, DukeError> {
        let slot = self.position(index)?;
        let task = &mut self.tasks[slot];
        task.mark_undone();
        Ok(Entry {
            index,
            task: task.clone(),
        })
    }

    pub fn delete(&mut self, index: usize) -> Result<Removed, DukeError> {
        let slot = self.position(index)?;
        let task = self.tasks.remove(slot);
        Ok(Removed {
            index,
            task,
            remaining: self.tasks.len(),
        })
    }

    pub fn list(&self) -> Vec<Entry> {
        self.entries().collect()
    }

    pub fn find(&self, query: &str) -> Vec<Entry> {
        self.entries()
            .filter(|e| e.task.description().contains(query))
            .collect()
    }

    pub fn records(&self) -> Vec<TaskRecord> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    pub fn from_records(records: Vec<TaskRecord>) -> Result<Self, DukeError> {
        let tasks = records
            .into_iter()
            .map(Task::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tasks })
    }

    fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.tasks.iter().enumerate().map(|(i, task)| Entry {
            index: i + 1,
            task: task.clone(),
        })
    }

    fn position(&self, index: usize) -> Result<usize, DukeError> {
        if index == 0 || index > self.tasks.len() {
            return Err(DukeError::Index {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::CanonicalDateTime;
    use chrono::NaiveDate;

    fn sample() -> TaskList {
        let due = CanonicalDateTime::Date(NaiveDate::from_ymd_opt(2019, 12, 1).unwrap());
        TaskList::from(vec![
            Task::todo("read book"),
            Task::deadline("return book", due),
            Task::todo("buy milk"),
            Task::todo("book flight"),
        ])
    }

    fn descriptions(list: &TaskList) -> Vec<String> {
        list.list()
            .into_iter()
            .map(|e| e.task.description().to_string())
            .collect()
    }

    #[test]
    fn test_add_appends_with_next_index() {
        let mut list = TaskList::new();
        let first = list.add(Task::todo("a"));
        let second = list.add(Task::todo("b"));
        assert_eq!(first.index, 1);
        assert_eq!(second.index, 2);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_mark_then_unmark_restores_state() {
        let mut list = sample();
        for n in 1..=list.len() {
            let marked = list.mark(n).unwrap();
            assert!(marked.task.is_done());
            assert_eq!(marked.index, n);
            let unmarked = list.unmark(n).unwrap();
            assert!(!unmarked.task.is_done());
            assert!(!list.get(n).unwrap().is_done());
        }
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut list = sample();
        list.mark(2).unwrap();
        let again = list.mark(2).unwrap();
        assert!(again.task.is_done());
        let unmark_twice = list.unmark(3).unwrap();
        assert!(!unmark_twice.task.is_done());
    }

    #[test]
    fn test_out_of_range_indices_fail() {
        let mut list = sample();
        let len = list.len();
        assert_eq!(list.mark(0).unwrap_err(), DukeError::Index { index: 0, len });
        assert_eq!(
            list.mark(len + 1).unwrap_err(),
            DukeError::Index { index: len + 1, len }
        );
        assert!(list.unmark(len + 1).is_err());
        assert!(list.delete(0).is_err());
        assert_eq!(list.len(), len);

        let mut empty = TaskList::new();
        assert_eq!(
            empty.delete(0).unwrap_err(),
            DukeError::Index { index: 0, len: 0 }
        );
        assert_eq!(
            empty.delete(1).unwrap_err(),
            DukeError::Index { index: 1, len: 0 }
        );
        assert!(empty.mark(1).is_err());
    }

    #[test]
    fn test_delete_renumbers_following_tasks() {
        let mut list = sample();
        let before = descriptions(&list);

        let removed = list.delete(2).unwrap();
        assert_eq!(removed.index, 2);
        assert_eq!(removed.task.description(), "return book");
        assert_eq!(removed.remaining, 3);

        let after = descriptions(&list);
        assert_eq!(after.len(), before.len() - 1);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1..], before[2..]);
    }

    #[test]
    fn test_list_empty_is_not_an_error() {
        assert!(TaskList::new().list().is_empty());
    }

    #[test]
    fn test_find_preserves_indices_and_order() {
        let list = sample();
        let hits = list.find("book");
        let indices: Vec<usize> = hits.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 4]);

        let all = list.list();
        for hit in &hits {
            assert!(hit.task.description().contains("book"));
            assert_eq!(all[hit.index - 1], *hit);
        }
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let list = sample();
        assert!(list.find("Book").is_empty());
        assert!(list.find("zzz").is_empty());
    }

    #[test]
    fn test_records_round_trip() {
        let mut list = sample();
        list.mark(3).unwrap();
        let restored = TaskList::from_records(list.records()).unwrap();
        assert_eq!(restored, list);
    }
}
