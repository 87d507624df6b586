use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::cmd::Commands;

/// Single-screen terminal to-do list.
/// Tasks are stored in ~/.todo/todos.json or the directory passed via --store.
#[derive(Parser)]
#[command(name = "todo", version, about = "Terminal to-do list")]
pub struct Cli {
    /// Directory holding the task store and log files.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Start in this theme instead of following the terminal's colours.
    #[arg(long, global = true, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Log level for the file logger (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Theme selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}
