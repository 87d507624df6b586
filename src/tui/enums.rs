//! Enumerations for TUI state management.

/// Which screen layer currently receives key presses.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    TaskList,
    Alert,
    ConfirmClear,
}

/// Which part of the main screen has keyboard focus.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Focus {
    List,
    Input,
}
