//! # todo - terminal to-do list
//!
//! A single-screen to-do list for the terminal. Add short text tasks, mark them
//! complete, delete them one by one or clear the whole list, and switch between a
//! light and a dark theme.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the screen
//! todo
//!
//! # Print the stored list
//! todo list
//!
//! # Keep tasks somewhere else
//! todo --store ~/notes/todo
//! ```
//!
//! ## Keys
//!
//! - Typing goes to the input line at the bottom; `Enter` adds the task.
//! - `Tab`/`Esc` moves to the list: `c` completes, `d` deletes, `x` clears
//!   everything (after confirmation), `t` toggles the theme, `q` quits.
//!
//! Tasks are saved to `~/.todo/todos.json` after every change, on a background
//! thread. The theme is not saved and follows the terminal on each start.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Settings;

fn main() {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli);

    // Dropped before exit so buffered records reach the log file.
    let logger = if matches!(cli.command, Some(Commands::Completions { .. })) {
        None
    } else {
        match logging::init_logging(&settings.log_level, &settings.log_dir()) {
            Ok(handle) => {
                log::info!("store directory: {}", settings.store_dir.display());
                Some(handle)
            }
            Err(e) => {
                eprintln!("Logging disabled: {e}");
                None
            }
        }
    };

    let result = match cli.command {
        None | Some(Commands::Ui) => cmd_ui(&settings),
        Some(Commands::List) => cmd_list(&settings),
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        if let Some(handle) = &logger {
            handle.flush();
        }
        drop(logger);
        std::process::exit(1);
    }
}
