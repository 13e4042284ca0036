use crossterm::event::KeyCode;

/// Cursor and horizontal scroll state of a single-line text field
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    cursor_pos: usize,    // Character index (0 = before first char)
    scroll_offset: usize, // First visible character when text > width
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Keep the cursor inside `text` after it was replaced programmatically
    pub fn clamp_to(&mut self, text: &str) {
        self.cursor_pos = self.cursor_pos.min(text.chars().count());
    }

    /// Handle a key press against the current text
    ///
    /// Returns `Some(new_text)` if the text changed, `None` if only the cursor moved
    pub fn handle_key(&mut self, key: KeyCode, current_value: &str) -> Option<String> {
        let char_count = current_value.chars().count();
        self.cursor_pos = self.cursor_pos.min(char_count);

        match key {
            KeyCode::Char(c) => {
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.insert(self.cursor_pos, c);
                self.cursor_pos += 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Backspace => {
                if self.cursor_pos == 0 {
                    return None;
                }
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.remove(self.cursor_pos - 1);
                self.cursor_pos -= 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Delete => {
                if self.cursor_pos >= char_count {
                    return None;
                }
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.remove(self.cursor_pos);
                Some(chars.into_iter().collect())
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor_pos < char_count {
                    self.cursor_pos += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                None
            }
            KeyCode::End => {
                self.cursor_pos = char_count;
                None
            }
            _ => None,
        }
    }

    /// Update scroll offset to keep the cursor visible; called during rendering
    pub fn update_scroll(&mut self, visible_width: usize, text: &str) {
        if visible_width == 0 {
            return;
        }
        let char_count = text.chars().count();

        if self.cursor_pos < self.scroll_offset {
            self.scroll_offset = self.cursor_pos;
        } else if self.cursor_pos >= self.scroll_offset + visible_width {
            self.scroll_offset = self.cursor_pos + 1 - visible_width;
        }

        // The cursor may sit one past the last character
        let max_offset = (char_count + 1).saturating_sub(visible_width);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}
