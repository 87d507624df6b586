//! TUI entry point and terminal setup.

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::controller::Controller;
use crate::tui::app::App;

/// Initialise the terminal, run the to-do screen until the user quits, then
/// restore the terminal and wait for the final save.
pub fn run_tui(controller: Controller) -> io::Result<()> {
    enable_raw_mode()?;
    let mut terminal = or_restore(enter_screen(), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    let mut app = App::new(controller);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();
    result
}

fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Run `restore` if `result` is an error, then pass the result through.
fn or_restore<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_setup_restores_terminal() {
        let mut restored = false;
        let result: io::Result<()> = or_restore(Err(io::Error::other("no tty")), || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn successful_setup_keeps_terminal() {
        let mut restored = false;
        let result = or_restore(Ok(5), || restored = true);
        assert_eq!(result.unwrap(), 5);
        assert!(!restored);
    }
}
