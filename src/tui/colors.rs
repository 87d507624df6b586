//! Color constants and light/dark palettes for the terminal user interface.

use ratatui::style::Color;

/// Brand colour for task text and the add trigger.
pub const PRIMARY: Color = Color::Rgb(31, 20, 92);
/// Complete action
pub const GREEN: Color = Color::Rgb(0, 128, 0);
/// Delete and clear-all actions
pub const RED: Color = Color::Rgb(200, 0, 0);
/// Primary is unreadable on black.
const PRIMARY_ON_DARK: Color = Color::Rgb(170, 160, 255);

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub task: Color,
    pub muted: Color,
    pub border: Color,
    pub focus: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Palette {
    pub fn for_theme(dark: bool) -> Self {
        if dark {
            Palette {
                background: Color::Black,
                foreground: Color::White,
                task: PRIMARY_ON_DARK,
                muted: Color::DarkGray,
                border: Color::Gray,
                focus: Color::Yellow,
                highlight_bg: Color::Rgb(50, 50, 60),
                highlight_fg: Color::White,
                status_bg: PRIMARY,
                status_fg: Color::White,
            }
        } else {
            Palette {
                background: Color::White,
                foreground: Color::Black,
                task: PRIMARY,
                muted: Color::Gray,
                border: Color::DarkGray,
                focus: PRIMARY,
                highlight_bg: Color::Rgb(225, 225, 235),
                highlight_fg: Color::Black,
                status_bg: PRIMARY,
                status_fg: Color::White,
            }
        }
    }
}
