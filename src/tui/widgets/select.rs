use crossterm::event::KeyCode;

/// Selection and dropdown state of a pick-one-of-many widget
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    selected_index: Option<usize>,
    is_open: bool,
    highlight_index: usize, // Keyboard navigation while the dropdown is open
    option_count: usize,
}

impl SelectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn highlighted(&self) -> usize {
        self.highlight_index
    }

    /// Update the option count, dropping a selection that no longer exists
    pub fn update_option_count(&mut self, count: usize) {
        self.option_count = count;
        if self.selected_index.is_some_and(|i| i >= count) {
            self.selected_index = None;
        }
        if self.highlight_index >= count {
            self.highlight_index = count.saturating_sub(1);
        }
    }

    pub fn open(&mut self) {
        if self.option_count == 0 {
            return;
        }
        self.is_open = true;
        self.highlight_index = self.selected_index.unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Select an option by index; `None` or an out-of-range index clears the selection
    pub fn select(&mut self, index: Option<usize>) {
        self.selected_index = index.filter(|i| *i < self.option_count);
        if let Some(i) = self.selected_index {
            self.highlight_index = i;
        }
    }

    pub fn navigate_next(&mut self) {
        if self.option_count > 0 {
            self.highlight_index = (self.highlight_index + 1) % self.option_count;
        }
    }

    pub fn navigate_prev(&mut self) {
        if self.option_count > 0 {
            self.highlight_index = if self.highlight_index == 0 {
                self.option_count - 1
            } else {
                self.highlight_index - 1
            };
        }
    }

    /// Handle a key press
    ///
    /// Returns `(consumed, committed)`: `committed` holds the newly selected
    /// index when the selection changed.
    pub fn handle_key(&mut self, key: KeyCode) -> (bool, Option<usize>) {
        if self.is_open {
            match key {
                KeyCode::Up => self.navigate_prev(),
                KeyCode::Down => self.navigate_next(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.close();
                    let previous = self.selected_index;
                    self.selected_index = Some(self.highlight_index);
                    let committed = (previous != self.selected_index).then_some(self.highlight_index);
                    return (true, committed);
                }
                KeyCode::Esc => self.close(),
                _ => return (false, None),
            }
            return (true, None);
        }

        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.open();
                (true, None)
            }
            _ => (false, None),
        }
    }

    /// Close the dropdown when the widget loses focus
    pub fn handle_blur(&mut self) {
        self.close();
    }
}
