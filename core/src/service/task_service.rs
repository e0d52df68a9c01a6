use anyhow::Result;
use tracing::debug;

use crate::error::DukeError;
use crate::input::{parse_command, Command};
use crate::model::task_list::TaskList;
use crate::repository::TaskRepository;
use crate::service::outcome::Outcome;

pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: TaskList,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn load(repo: R) -> Result<Self> {
        let records = repo.load()?;
        let tasks = TaskList::from_records(records)?;
        Ok(Self { repo, tasks })
    }

    pub fn with_tasks(repo: R, tasks: TaskList) -> Self {
        Self { repo, tasks }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Interprets and applies one input line, saving the list if it changed.
    ///
    /// Command failures come back as a `DukeError` inside the error and leave
    /// the list untouched. If saving fails, the in-memory list has already
    /// been updated and the plain storage error is returned.
    pub fn handle(&mut self, line: &str) -> Result<Outcome> {
        let command = parse_command(line)?;
        let mutates = command.mutates();

        let outcome = apply(&mut self.tasks, command)?;
        if mutates {
            self.repo.save(&self.tasks.records())?;
        }
        Ok(outcome)
    }
}

pub fn apply(tasks: &mut TaskList, command: Command) -> Result<Outcome, DukeError> {
    let outcome = match command {
        Command::Bye => Outcome::Farewell,
        Command::List => Outcome::Listing(tasks.list()),
        Command::Mark(index) => Outcome::Marked(tasks.mark(index)?),
        Command::Unmark(index) => Outcome::Unmarked(tasks.unmark(index)?),
        Command::Add(task) => {
            let entry = tasks.add(task);
            Outcome::Added {
                entry,
                total: tasks.len(),
            }
        }
        Command::Delete(index) => Outcome::Deleted(tasks.delete(index)?),
        Command::Find(query) => {
            let entries = tasks.find(&query);
            Outcome::Matches { query, entries }
        }
        Command::Unrecognized => Outcome::Menu,
    };
    debug!(len = tasks.len(), "applied command");
    Ok(outcome)
}
