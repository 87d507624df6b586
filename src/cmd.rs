//! Command implementations for the CLI interface.
//!
//! `ui` opens the to-do screen; `list` prints the stored list without touching
//! it; `completions` emits a shell completion script.

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use log::error;

use crate::cli::Cli;
use crate::config::Settings;
use crate::controller::Controller;
use crate::store::{FileStore, PersistenceAdapter};
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive to-do screen (default).
    Ui,

    /// Print the stored tasks.
    List,

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Open the to-do screen. Errors are returned so the caller can flush the
/// log before exiting.
pub fn cmd_ui(settings: &Settings) -> Result<(), String> {
    let adapter = PersistenceAdapter::new(FileStore::new(&settings.store_dir));
    let controller = Controller::start(adapter, settings.dark_theme)
        .map_err(|e| format!("Failed to start task writer: {e}"))?;
    run_tui(controller).map_err(|e| {
        error!("terminal UI failed: {e}");
        format!("Error running TUI: {e}")
    })
}

pub fn cmd_list(settings: &Settings) -> Result<(), String> {
    let adapter = PersistenceAdapter::new(FileStore::new(&settings.store_dir));
    match adapter.try_load() {
        Ok(Some(tasks)) if !tasks.is_empty() => print_table(&tasks),
        Ok(_) => println!("No tasks."),
        Err(e) => {
            error!("list failed: {e}");
            return Err(format!(
                "Failed to read tasks from {}: {e}",
                settings.store_dir.display()
            ));
        }
    }
    Ok(())
}

pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

/// Print tasks in insertion order as a plain table.
pub fn print_table(tasks: &[Task]) {
    print!("{}", format_table(tasks));
}

fn format_table(tasks: &[Task]) -> String {
    let mut out = format!("{:<6} {:<5} {}\n", "ID", "Done", "Task");
    for t in tasks {
        let done = if t.completed { "[x]" } else { "[ ]" };
        out.push_str(&format!("{:<6} {:<5} {}\n", t.id, done, t.task));
    }
    out
}
