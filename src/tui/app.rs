//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the state controller,
//! translates key presses into controller operations, and renders the
//! single to-do screen with its alert and confirmation overlays.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::controller::{Confirmation, Controller};
use crate::tui::{
    colors::{Palette, GREEN, RED},
    enums::{AppState, Focus},
    input::InputField,
    utils::centered_rect,
};

const TITLE: &str = "TODO APP";
const PLACEHOLDER: &str = "Add TODO";

/// Application state for the to-do screen.
pub struct App {
    controller: Controller,
    state: AppState,
    focus: Focus,
    list_state: ListState,
    input: InputField,
    alert_message: String,
    status_message: String,
}

impl App {
    /// Create the screen around an already loaded controller.
    pub fn new(controller: Controller) -> Self {
        let mut app = App {
            controller,
            state: AppState::TaskList,
            focus: Focus::Input,
            list_state: ListState::default(),
            input: InputField::new(),
            alert_message: String::new(),
            status_message: String::new(),
        };
        app.clamp_selection();
        app
    }

    /// Stop the controller's writer once the screen is gone.
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }

    /// Set a status message to display in the status bar.
    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Id of the task under the list cursor.
    fn selected_id(&self) -> Option<u64> {
        self.list_state
            .selected()
            .and_then(|i| self.controller.tasks().get(i))
            .map(|t| t.id)
    }

    fn selected_text(&self) -> String {
        self.list_state
            .selected()
            .and_then(|i| self.controller.tasks().get(i))
            .map(|t| t.task.clone())
            .unwrap_or_default()
    }

    /// Keep the list cursor on an existing row after the list changes.
    fn clamp_selection(&mut self) {
        let len = self.controller.tasks().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn toggle_theme(&mut self) {
        let dark = !self.controller.is_dark();
        self.controller.toggle_theme(dark);
        self.set_status_message(format!("Dark theme {}", if dark { "on" } else { "off" }));
    }

    /// Add the pending input as a task, or raise the validation alert.
    fn submit_input(&mut self) {
        match self.controller.add_task(&self.input.value) {
            Ok(_) => {
                self.set_status_message(format!("Added '{}'", self.input.value));
                self.input.clear();
                let last = self.controller.tasks().len() - 1;
                self.list_state.select(Some(last));
            }
            Err(e) => {
                self.alert_message = e.to_string();
                self.state = AppState::Alert;
            }
        }
    }

    fn complete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let text = self.selected_text();
            if self.controller.complete_task(id) {
                self.set_status_message(format!("Completed '{text}'"));
            }
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let text = self.selected_text();
            if self.controller.delete_task(id) {
                self.clamp_selection();
                self.set_status_message(format!("Deleted '{text}'"));
            }
        }
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.status_message.clear();

        match self.state {
            AppState::Alert => self.handle_alert_input(key.code),
            AppState::ConfirmClear => self.handle_confirm_input(key.code),
            AppState::TaskList => match self.focus {
                Focus::Input => self.handle_text_input(key),
                Focus::List => return self.handle_list_input(key),
            },
        }
        false
    }

    fn handle_alert_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.alert_message.clear();
            self.state = AppState::TaskList;
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        let answer = match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Confirmation::Confirm,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Confirmation::Cancel,
            _ => return,
        };
        if self.controller.clear_all(answer) {
            self.clamp_selection();
            self.set_status_message("Cleared all tasks".to_string());
        } else {
            self.set_status_message("Clear cancelled".to_string());
        }
        self.state = AppState::TaskList;
    }

    fn handle_text_input(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('t') if ctrl => self.toggle_theme(),
            KeyCode::Char(c) if !ctrl => self.input.handle_char(c),
            KeyCode::Enter => self.submit_input(),
            KeyCode::Esc | KeyCode::Tab => self.focus = Focus::List,
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_cursor_home(),
            KeyCode::End => self.input.move_cursor_end(),
            _ => {}
        }
    }

    fn handle_list_input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.list_state.selected() {
                    if selected + 1 < self.controller.tasks().len() {
                        self.list_state.select(Some(selected + 1));
                    }
                }
            }
            KeyCode::Char('c') | KeyCode::Char(' ') | KeyCode::Enter => self.complete_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('x') => self.state = AppState::ConfirmClear,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => self.focus = Focus::Input,
            _ => {}
        }
        false
    }

    /// Poll for and handle one keyboard event. Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key));
                }
            }
        }
        Ok(false)
    }

    /// Render the title, theme toggle and clear-all trigger.
    fn render_header(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(inner);

        let title = Paragraph::new(Span::styled(
            TITLE,
            Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
        ));
        let (switch, switch_style) = if self.controller.is_dark() {
            ("Dark [ON ]", Style::default().fg(palette.focus).add_modifier(Modifier::BOLD))
        } else {
            ("Dark [OFF]", Style::default().fg(palette.muted))
        };
        let toggle = Paragraph::new(Line::from(vec![
            Span::styled("(t) ", Style::default().fg(palette.muted)),
            Span::styled(switch, switch_style),
        ]))
        .alignment(Alignment::Center);
        let clear = Paragraph::new(Span::styled(
            "(x) Clear all",
            Style::default().fg(RED).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right);

        f.render_widget(title, columns[0]);
        f.render_widget(toggle, columns[1]);
        f.render_widget(clear, columns[2]);
    }

    /// Render the scrollable task list with per-row actions.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let border = if self.focus == Focus::List {
            palette.focus
        } else {
            palette.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!("Tasks ({})", self.controller.tasks().len()));

        if self.controller.tasks().is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Nothing to do. Type a task below and press Enter.",
                Style::default().fg(palette.muted),
            )))
            .block(block)
            .alignment(Alignment::Center);
            f.render_widget(hint, area);
            return;
        }

        let items: Vec<ListItem> = self
            .controller
            .tasks()
            .iter()
            .map(|task| {
                let mut text_style = Style::default().fg(palette.task).add_modifier(Modifier::BOLD);
                if task.completed {
                    text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
                }
                let mut spans = vec![Span::styled(task.task.clone(), text_style)];
                if !task.completed {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        " complete ",
                        Style::default().fg(Color::White).bg(GREEN),
                    ));
                }
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    " delete ",
                    Style::default().fg(Color::White).bg(RED),
                ));
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(palette.highlight_bg)
                    .fg(palette.highlight_fg),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    /// Render the input line and add trigger.
    fn render_footer(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let focused = self.focus == Focus::Input && self.state == AppState::TaskList;
        let border = if focused { palette.focus } else { palette.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("New task")
            .title_bottom(Line::from(Span::styled(
                " [Enter] + ",
                Style::default().fg(Color::White).bg(palette.status_bg),
            )).right_aligned());
        let inner = block.inner(area);

        let (scroll, column) = cursor_offsets(&self.input, inner.width);

        let content = if self.input.value.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(palette.muted)))
        } else {
            Line::from(Span::styled(
                self.input.value.as_str(),
                Style::default().fg(palette.foreground),
            ))
        };
        let paragraph = Paragraph::new(content).block(block).scroll((0, scroll));
        f.render_widget(paragraph, area);

        if focused {
            f.set_cursor_position((inner.x.saturating_add(column), inner.y));
        }
    }

    /// Render the modal validation alert.
    fn render_alert(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let area = centered_rect(60, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.alert_message.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press Enter to dismiss"),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Error")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(RED)),
            )
            .style(Style::default().bg(palette.background).fg(palette.foreground))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the clear-all confirmation dialog.
    fn render_confirm(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let area = centered_rect(60, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Clear Todos?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y] Yes", Style::default().fg(RED).add_modifier(Modifier::BOLD)),
                Span::raw("    "),
                Span::raw("[n] No"),
            ]),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Confirm")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.focus)),
            )
            .style(Style::default().bg(palette.background).fg(palette.foreground))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match (self.state, self.focus) {
                (AppState::Alert, _) => "Enter: dismiss".to_string(),
                (AppState::ConfirmClear, _) => "y: clear everything | n/Esc: keep".to_string(),
                (AppState::TaskList, Focus::Input) => {
                    "Enter: add | Tab/Esc: list | Ctrl+T: theme | Ctrl+C: quit".to_string()
                }
                (AppState::TaskList, Focus::List) => {
                    "↑↓: select | c: complete | d: delete | x: clear | t: theme | a: add | q: quit"
                        .to_string()
                }
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(palette.status_bg).fg(palette.status_fg))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function: the screen, then any modal on top.
    fn render(&mut self, f: &mut Frame) {
        let palette = Palette::for_theme(self.controller.is_dark());
        let area = f.area();
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Task list
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_header(f, chunks[0], &palette);
        self.render_task_list(f, chunks[1], &palette);
        self.render_footer(f, chunks[2], &palette);
        self.render_status_bar(f, chunks[3], &palette);

        match self.state {
            AppState::Alert => self.render_alert(f, area, &palette),
            AppState::ConfirmClear => self.render_confirm(f, area, &palette),
            AppState::TaskList => {}
        }
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Horizontal scroll for the input line and the cursor column inside it, for
/// a line `width` cells wide. The column is always less than `width`.
fn cursor_offsets(input: &InputField, width: u16) -> (u16, u16) {
    let before_cursor: String = input.value.chars().take(input.cursor).collect();
    let cursor_width = u16::try_from(Span::raw(before_cursor).width()).unwrap_or(u16::MAX);
    let scroll = cursor_width.saturating_sub(width.saturating_sub(1));
    (scroll, cursor_width - scroll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, PersistenceAdapter};
    use crate::task::Task;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn app_with(store: &MemoryStore) -> App {
        let controller = Controller::start(PersistenceAdapter::new(store.clone()), false).unwrap();
        App::new(controller)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut App, text: &str) {
        type_text(app, text);
        press(app, KeyCode::Enter);
    }

    fn draw(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_lines(buffer: &Buffer) -> Vec<String> {
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn tasks(app: &App) -> Vec<Task> {
        app.controller.tasks().to_vec()
    }

    #[test]
    fn typing_and_enter_adds_task_and_clears_input() {
        let mut app = app_with(&MemoryStore::default());
        add(&mut app, "Buy milk");

        let tasks = tasks(&app);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task, "Buy milk");
        assert!(!tasks[0].completed);
        assert!(app.input.value.is_empty());
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn empty_input_raises_alert_without_change() {
        let mut app = app_with(&MemoryStore::default());
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::Alert);
        assert!(tasks(&app).is_empty());
        let screen = screen_lines(&draw(&mut app)).join("\n");
        assert!(screen.contains("Please input todo"));
        assert!(screen.contains("Error"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn list_keys_complete_and_delete_selected_task() {
        let mut app = app_with(&MemoryStore::default());
        add(&mut app, "first");
        add(&mut app, "second");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('c'));
        let after_complete = tasks(&app);
        assert!(after_complete[0].completed);
        assert!(!after_complete[1].completed);

        press(&mut app, KeyCode::Char('d'));
        let after_delete = tasks(&app);
        assert_eq!(after_delete.len(), 1);
        assert_eq!(after_delete[0].task, "second");
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn clear_all_asks_first() {
        let mut app = app_with(&MemoryStore::default());
        add(&mut app, "a");
        add(&mut app, "b");
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state, AppState::ConfirmClear);
        assert!(screen_lines(&draw(&mut app)).join("\n").contains("Clear Todos?"));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(tasks(&app).len(), 2);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        assert!(tasks(&app).is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn theme_toggles_from_list_and_input() {
        let mut app = app_with(&MemoryStore::default());
        assert!(!app.controller.is_dark());

        ctrl(&mut app, 't');
        assert!(app.controller.is_dark());
        assert!(app.input.value.is_empty());

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('t'));
        assert!(!app.controller.is_dark());
    }

    #[test]
    fn dark_theme_paints_black_background() {
        let mut app = app_with(&MemoryStore::default());
        ctrl(&mut app, 't');
        let buffer = draw(&mut app);
        assert_eq!(buffer.content()[buffer.area.width as usize * 5 + 30].bg, Color::Black);
    }

    #[test]
    fn q_types_in_input_but_quits_from_list() {
        let mut app = app_with(&MemoryStore::default());
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input.value, "q");

        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let mut app = app_with(&MemoryStore::default());
        assert!(ctrl(&mut app, 'c'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Alert);
        assert!(ctrl(&mut app, 'c'));
    }

    #[test]
    fn screen_shows_header_rows_and_placeholder() {
        let mut app = app_with(&MemoryStore::default());
        let empty = screen_lines(&draw(&mut app)).join("\n");
        assert!(empty.contains(TITLE));
        assert!(empty.contains("Clear all"));
        assert!(empty.contains(PLACEHOLDER));
        assert!(empty.contains("Nothing to do"));

        add(&mut app, "Buy milk");
        add(&mut app, "Walk dog");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('c'));

        let buffer = draw(&mut app);
        let lines = screen_lines(&buffer);
        let (milk_row, milk) = lines
            .iter()
            .enumerate()
            .find(|(_, l)| l.contains("Buy milk"))
            .unwrap();
        let dog = lines.iter().find(|l| l.contains("Walk dog")).unwrap();
        assert!(!milk.contains("complete"));
        assert!(milk.contains("delete"));
        assert!(dog.contains("complete"));
        assert!(dog.contains("delete"));

        let width = buffer.area.width as usize;
        let row = &buffer.content()[milk_row * width..(milk_row + 1) * width];
        assert!(row
            .iter()
            .any(|cell| cell.symbol() == "B" && cell.modifier.contains(Modifier::CROSSED_OUT)));
    }

    #[test]
    fn cursor_stays_inside_narrow_input() {
        let mut input = InputField::new();
        for c in "abcdef".chars() {
            input.handle_char(c);
        }
        assert_eq!(cursor_offsets(&input, 20), (0, 6));
        assert_eq!(cursor_offsets(&input, 4), (3, 3));

        input.move_cursor_home();
        assert_eq!(cursor_offsets(&input, 4), (0, 0));
    }

    #[test]
    fn very_long_input_does_not_overflow_cursor() {
        let mut input = InputField::new();
        input.value = "x".repeat(70_000);
        input.move_cursor_end();

        let (scroll, column) = cursor_offsets(&input, 68);
        assert_eq!(column, 67);
        assert_eq!(scroll, u16::MAX - 67);

        let mut app = app_with(&MemoryStore::default());
        app.input = input;
        draw(&mut app);
    }

    #[test]
    fn exit_writes_final_state() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        add(&mut app, "Buy milk");
        add(&mut app, "Walk dog");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('d'));
        app.shutdown();

        let reopened = app_with(&store);
        let stored = tasks(&reopened);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].task, "Buy milk");
    }
}
