use crossterm::event::KeyCode;

/// On/off state of a check box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckboxState {
    checked: bool,
}

impl CheckboxState {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Space or Enter flips the state; returns the new state when it changed
    pub fn handle_key(&mut self, key: KeyCode) -> Option<bool> {
        match key {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.checked = !self.checked;
                Some(self.checked)
            }
            _ => None,
        }
    }
}
