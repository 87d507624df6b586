//! Input field handling for the terminal user interface.

/// A single-line text input. The cursor counts characters, not bytes.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset of the character at `cursor`.
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputField {
        let mut input = InputField::new();
        for c in text.chars() {
            input.handle_char(c);
        }
        input
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut input = typed("milk");
        input.move_cursor_home();
        for c in "Buy ".chars() {
            input.handle_char(c);
        }
        assert_eq!(input.value, "Buy milk");
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn editing_multibyte_text() {
        let mut input = typed("café ✓");
        input.handle_backspace();
        assert_eq!(input.value, "café ");
        input.move_cursor_left();
        input.move_cursor_left();
        input.handle_delete();
        assert_eq!(input.value, "caf ");
        input.handle_char('e');
        assert_eq!(input.value, "cafe ");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = typed("ab");
        input.move_cursor_right();
        assert_eq!(input.cursor, 2);
        input.handle_delete();
        assert_eq!(input.value, "ab");
        input.move_cursor_home();
        input.move_cursor_left();
        input.handle_backspace();
        assert_eq!(input.cursor, 0);
        assert_eq!(input.value, "ab");
        input.move_cursor_end();
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn clear_resets_value_and_cursor() {
        let mut input = typed("something");
        input.clear();
        assert!(input.value.is_empty());
        assert_eq!(input.cursor, 0);
    }
}
