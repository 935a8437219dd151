//! Cursor-editable text field state, shared by the auth form, the dialogs
//! and the message compose box.

/// Upper bound for any single-line input in the UI.
const MAX_FIELD_LENGTH: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextFieldState {
    /// The current text being edited.
    text: String,
    /// Cursor position (character index, not byte).
    cursor_position: usize,
}

impl TextFieldState {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor_position = text.chars().count();
        Self {
            text,
            cursor_position,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Inserts a character at the cursor.
    /// Returns false if the field would exceed the maximum length.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_FIELD_LENGTH {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete_char_at(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }

    /// Clears all text and resets the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(text: &str) -> TextFieldState {
        TextFieldState::with_text(text)
    }

    #[test]
    fn default_field_is_empty_with_cursor_at_zero() {
        let state = TextFieldState::default();

        assert!(state.is_empty());
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn with_text_places_cursor_at_end() {
        let state = field("hello");

        assert_eq!(state.text(), "hello");
        assert_eq!(state.cursor_position(), 5);
    }

    #[test]
    fn insert_char_appends_at_cursor() {
        let mut state = field("ab");
        state.move_cursor_left();

        assert!(state.insert_char('x'));
        assert_eq!(state.text(), "axb");
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn backspace_removes_char_before_cursor() {
        let mut state = field("abc");

        state.delete_char_before();

        assert_eq!(state.text(), "ab");
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn backspace_at_start_does_nothing() {
        let mut state = field("abc");
        state.move_cursor_home();

        state.delete_char_before();

        assert_eq!(state.text(), "abc");
    }

    #[test]
    fn delete_removes_char_at_cursor() {
        let mut state = field("abc");
        state.move_cursor_home();

        state.delete_char_at();

        assert_eq!(state.text(), "bc");
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn cursor_movement_is_bounded() {
        let mut state = field("ab");

        state.move_cursor_right();
        assert_eq!(state.cursor_position(), 2);

        state.move_cursor_home();
        state.move_cursor_left();
        assert_eq!(state.cursor_position(), 0);

        state.move_cursor_end();
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn edits_handle_multibyte_characters() {
        let mut state = field("héllo");
        state.move_cursor_home();
        state.move_cursor_right();
        state.move_cursor_right();

        state.delete_char_before();

        assert_eq!(state.text(), "hllo");
    }

    #[test]
    fn clear_resets_text_and_cursor() {
        let mut state = field("abc");

        state.clear();

        assert!(state.is_empty());
        assert_eq!(state.cursor_position(), 0);
    }
}
