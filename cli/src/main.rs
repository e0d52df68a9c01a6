mod session;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use duke_core::{FileTaskRepository, TaskList, TaskService};
use tracing::warn;

use crate::ui::Ui;

#[derive(Parser)]
#[command(name = "duke")]
#[command(about = "A chatty line-based task tracker", long_about = None)]
struct Cli {
    /// Task file to load and save (default: ~/.duke/duke.txt; `.json` files are stored as JSON)
    #[arg(short, long, env = "DUKE_FILE")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    if std::env::var("DUKE_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("duke_core=debug,duke=debug")
            .with_writer(io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let repo = FileTaskRepository::new(cli.file)?;

    let mut ui = Ui::new(io::stdout());
    ui.show_welcome()?;

    let mut service = match TaskService::load(repo.clone()) {
        Ok(service) => service,
        Err(e) => {
            warn!(error = %e, path = ?repo.path(), "starting with an empty list");
            ui.show_load_error(&e)?;
            TaskService::with_tasks(repo, TaskList::new())
        }
    };

    session::run(&mut service, io::stdin().lock(), &mut ui)
}
