use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{
    DukeError, MESSAGE_DEADLINE_CONTAINS_BY, MESSAGE_EMPTY_TODO, MESSAGE_EVENT_CONTAINS_FROM,
    MESSAGE_EVENT_CONTAINS_TO,
};
use crate::model::task::Task;
use crate::time::normalize;

// Whole-line grammars, checked in declaration order by `parse_command`.
static MARK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^mark [0-9]+$").unwrap());
static UNMARK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^unmark [0-9]+$").unwrap());
static EMPTY_TODO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^todo\s*$").unwrap());
static TODO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^todo .+$").unwrap());
static DEADLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^deadline .+ /by .+$").unwrap());
static EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^event .+ /from .+ /to .+$").unwrap());
static DELETE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^delete [0-9]+$").unwrap());
static FIND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^find .+$").unwrap());

const BY: &str = " /by ";
const FROM: &str = " /from ";
const TO: &str = " /to ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bye,
    List,
    Mark(usize),
    Unmark(usize),
    Add(Task),
    Delete(usize),
    Find(String),
    Unrecognized,
}

impl Command {
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Mark(_) | Command::Unmark(_) | Command::Add(_) | Command::Delete(_)
        )
    }
}

pub fn parse_command(line: &str) -> Result<Command, DukeError> {
    let command = classify(line)?;
    debug!(?command, "classified input line");
    Ok(command)
}

fn classify(line: &str) -> Result<Command, DukeError> {
    if line == "bye" {
        return Ok(Command::Bye);
    }
    if line == "list" {
        return Ok(Command::List);
    }
    if MARK.is_match(line) {
        return Ok(Command::Mark(parse_index(line)?));
    }
    if UNMARK.is_match(line) {
        return Ok(Command::Unmark(parse_index(line)?));
    }
    if EMPTY_TODO.is_match(line) {
        return Err(DukeError::syntax(MESSAGE_EMPTY_TODO));
    }
    if TODO.is_match(line) {
        return Ok(Command::Add(Task::todo(argument(line))));
    }
    if DEADLINE.is_match(line) {
        return parse_deadline(line).map(Command::Add);
    }
    if EVENT.is_match(line) {
        return parse_event(line).map(Command::Add);
    }
    if DELETE.is_match(line) {
        return Ok(Command::Delete(parse_index(line)?));
    }
    if FIND.is_match(line) {
        return Ok(Command::Find(argument(line).to_string()));
    }
    Ok(Command::Unrecognized)
}

/// Everything after the verb and its single separating space.
fn argument(line: &str) -> &str {
    line.split_once(' ').map(|(_, rest)| rest).unwrap_or("")
}

fn parse_index(line: &str) -> Result<usize, DukeError> {
    let digits = argument(line);
    digits
        .parse()
        .map_err(|_| DukeError::syntax(format!("{} is not a task number I can handle.", digits)))
}

fn parse_deadline(line: &str) -> Result<Task, DukeError> {
    let (head, by) = split_at_separator(line, BY)?;
    if by.contains(BY.trim()) {
        return Err(DukeError::syntax(MESSAGE_DEADLINE_CONTAINS_BY));
    }

    let by = normalize(by)?;
    Ok(Task::deadline(argument(head), by))
}

// The trailing `/to` boundary is fixed first so that a `/from` inside the
// description can never be taken as the separator.
fn parse_event(line: &str) -> Result<Task, DukeError> {
    let (head, to) = split_at_separator(line, TO)?;
    if to.contains(TO.trim()) {
        return Err(DukeError::syntax(MESSAGE_EVENT_CONTAINS_TO));
    }

    let (head, from) = split_at_separator(head, FROM)?;
    if from.contains(FROM.trim()) {
        return Err(DukeError::syntax(MESSAGE_EVENT_CONTAINS_FROM));
    }

    let from = normalize(from)?;
    let to = normalize(to)?;
    Task::event(argument(head), from, to)
}

fn split_at_separator<'a>(text: &'a str, separator: &str) -> Result<(&'a str, &'a str), DukeError> {
    text.split_once(separator).ok_or_else(|| {
        DukeError::syntax(format!("I expected '{}' in this command.", separator.trim()))
    })
}
