use std::io::{BufRead, Write};

use anyhow::Result;
use duke_core::{TaskRepository, TaskService};
use tracing::{debug, warn};

use crate::ui::Ui;

/// Runs the read-apply-render loop until `bye` or end of input.
pub fn run<R, I, W>(service: &mut TaskService<R>, input: I, ui: &mut Ui<W>) -> Result<()>
where
    R: TaskRepository,
    I: BufRead,
    W: Write,
{
    let mut active = true;
    let mut lines = input.lines();

    while active {
        let Some(line) = lines.next() else {
            debug!("input closed");
            break;
        };
        let line = line?;

        match service.handle(&line) {
            Ok(outcome) => {
                active = !outcome.ends_session();
                ui.show_outcome(&outcome)?;
            }
            Err(e) => {
                warn!(error = %e, "command failed");
                ui.show_error(&e)?;
            }
        }
        ui.show_line()?;
    }

    Ok(())
}
