use std::io::{self, Write};

use duke_core::{DukeError, Entry, Outcome};

const HORIZONTAL_LINE: &str = "____________________________________________________________";
const INDENT: &str = "    ";

const LOGO: &str = r#"
 ____        _
|  _ \ _   _| | _____
| | | | | | | |/ / _ \
| |_| | |_| |   <  __/
|____/ \__,_|_|\_\___|
"#;

const MENU: &[&str] = &[
    "I'm sorry, but I don't know what that means :-(",
    "Here is what I understand:",
    "  todo <description>",
    "  deadline <description> /by <date>",
    "  event <description> /from <date> /to <date>",
    "  list",
    "  mark <task number>",
    "  unmark <task number>",
    "  delete <task number>",
    "  find <keyword>",
    "  bye",
    "Dates look like 2019-12-01, 2019-12-01 18:00 or 2/12/2019 1800.",
];

pub struct Ui<W: Write> {
    out: W,
}

impl<W: Write> Ui<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn show_welcome(&mut self) -> io::Result<()> {
        writeln!(self.out, "Hello from{}", LOGO)?;
        self.show_lines(&["Hello! I'm Duke", "What can I do for you?"])?;
        self.show_line()
    }

    pub fn show_line(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}{}", INDENT, HORIZONTAL_LINE)
    }

    pub fn show_error(&mut self, error: &anyhow::Error) -> io::Result<()> {
        match error.downcast_ref::<DukeError>() {
            Some(duke_error) => self.show_lines(&[duke_error.to_string()]),
            None => self.show_lines(&[format!("Could not save your tasks: {:#}", error)]),
        }
    }

    pub fn show_load_error(&mut self, error: &anyhow::Error) -> io::Result<()> {
        self.show_lines(&[
            format!("Could not load your saved tasks: {:#}", error),
            "Starting with an empty list.".to_string(),
        ])?;
        self.show_line()
    }

    pub fn show_outcome(&mut self, outcome: &Outcome) -> io::Result<()> {
        let lines = render(outcome);
        self.show_lines(&lines)
    }

    fn show_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}{}", INDENT, line.as_ref())?;
        }
        self.out.flush()
    }
}

pub fn render(outcome: &Outcome) -> Vec<String> {
    let mut lines = match outcome {
        Outcome::Added { .. } => vec!["Got it. I've added this task:".to_string()],
        Outcome::Marked(_) => vec!["Nice! I've marked this task as done:".to_string()],
        Outcome::Unmarked(_) => vec!["OK, I've marked this task as not done yet:".to_string()],
        Outcome::Deleted(_) => vec!["Noted. I've removed this task:".to_string()],
        Outcome::Listing(entries) if entries.is_empty() => {
            vec!["Your list is empty.".to_string()]
        }
        Outcome::Listing(entries) => {
            let mut lines = vec!["Here are the tasks in your list:".to_string()];
            lines.extend(entries.iter().map(numbered));
            lines
        }
        Outcome::Matches { query, entries } if entries.is_empty() => {
            vec![format!("No tasks match '{}'.", query)]
        }
        Outcome::Matches { entries, .. } => {
            let mut lines = vec!["Here are the matching tasks in your list:".to_string()];
            lines.extend(entries.iter().map(numbered));
            lines
        }
        Outcome::Farewell => vec!["Bye. Hope to see you again soon!".to_string()],
        Outcome::Menu => MENU.iter().map(|s| s.to_string()).collect(),
    };

    if let Some(task) = outcome.task() {
        lines.push(format!("  {}", task));
    }
    match outcome {
        Outcome::Added { total, .. } => lines.push(count_line(*total)),
        Outcome::Deleted(removed) => lines.push(count_line(removed.remaining)),
        _ => {}
    }
    lines
}

fn numbered(entry: &Entry) -> String {
    format!("{}.{}", entry.index, entry.task)
}

fn count_line(total: usize) -> String {
    let noun = if total == 1 { "task" } else { "tasks" };
    format!("Now you have {} {} in the list.", total, noun)
}
