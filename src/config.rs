//! Startup settings resolved from flags, environment and defaults.

use std::path::{Path, PathBuf};

use crate::cli::{Cli, ThemeArg};

/// Environment variable overriding the store directory.
pub const STORE_DIR_ENV: &str = "TODO_STORE_DIR";

/// Everything the app needs to know before it opens the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub log_level: String,
    pub dark_theme: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        let env_dir = std::env::var(STORE_DIR_ENV).ok();
        let home = std::env::var("HOME").ok();
        let colorfgbg = std::env::var("COLORFGBG").ok();

        let dark_theme = match cli.theme {
            Some(ThemeArg::Dark) => true,
            Some(ThemeArg::Light) => false,
            None => colorfgbg.as_deref().and_then(dark_from_colorfgbg).unwrap_or(false),
        };

        Settings {
            store_dir: resolve_store_dir(cli.store.as_deref(), env_dir.as_deref(), home.as_deref()),
            log_level: cli.log_level.clone(),
            dark_theme,
        }
    }

    /// Directory log files are written to.
    pub fn log_dir(&self) -> PathBuf {
        self.store_dir.join("logs")
    }
}

/// Pick the store directory: explicit flag, then environment, then `$HOME/.todo`.
pub fn resolve_store_dir(flag: Option<&Path>, env_dir: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    PathBuf::from(home.unwrap_or(".")).join(".todo")
}

/// Interpret `$COLORFGBG` ("fg;bg" or "fg;default;bg"). The last field is the
/// background palette index; 0-6 and 8 are dark.
pub fn dark_from_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}
