//! Widget capabilities the sheet binds against
//!
//! A toolkit implements these traits; the binding logic never sees concrete
//! widget types. Programmatic setters (`set_selected`, `set_text`, `select_label`)
//! must not invoke the user-change callback. Only genuine user interaction does.

use crate::observable::WidgetId;
use std::rc::Rc;

/// Capabilities shared by every editor widget
pub trait EditorWidget {
    fn id(&self) -> WidgetId;

    fn set_enabled(&self, enabled: bool);

    fn is_enabled(&self) -> bool;

    fn request_focus(&self);

    fn has_focus(&self) -> bool;

    /// Clear the validation-error presentation state
    fn mark_valid(&self);

    /// Apply the validation-error presentation state
    fn mark_invalid(&self);

    fn is_valid(&self) -> bool;
}

/// Two-state toggle (check box)
pub trait ToggleWidget: EditorWidget {
    fn set_selected(&self, selected: bool);

    fn is_selected(&self) -> bool;

    /// Replace the callback invoked when the user toggles the widget
    fn on_user_change(&self, callback: Box<dyn Fn(bool)>);
}

/// Single-line text field
pub trait TextWidget: EditorWidget {
    fn set_text(&self, text: &str);

    fn text(&self) -> String;

    /// Masked fields display placeholders instead of the text
    fn is_masked(&self) -> bool;

    /// Replace the callback invoked with the full text after each user edit
    fn on_user_change(&self, callback: Box<dyn Fn(&str)>);
}

/// Pick-one-of-many selector showing display labels
pub trait ChoiceWidget: EditorWidget {
    fn set_items(&self, labels: Vec<String>);

    fn items(&self) -> Vec<String>;

    /// Select the item with exactly this label; `None` clears the selection
    fn select_label(&self, label: Option<&str>);

    fn selected_label(&self) -> Option<String>;

    /// Replace the callback invoked with the label the user picked
    fn on_user_change(&self, callback: Box<dyn Fn(&str)>);
}

/// Factory for editor widgets
pub trait WidgetToolkit {
    fn create_toggle(&self) -> Rc<dyn ToggleWidget>;

    fn create_text(&self, masked: bool) -> Rc<dyn TextWidget>;

    fn create_choice(&self) -> Rc<dyn ChoiceWidget>;
}

/// Editor placed in the value column of a property sheet
#[derive(Clone)]
pub enum Editor {
    Toggle(Rc<dyn ToggleWidget>),
    Text(Rc<dyn TextWidget>),
    Choice(Rc<dyn ChoiceWidget>),
}

impl Editor {
    pub fn id(&self) -> WidgetId {
        match self {
            Editor::Toggle(w) => w.id(),
            Editor::Text(w) => w.id(),
            Editor::Choice(w) => w.id(),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        match self {
            Editor::Toggle(w) => w.set_enabled(enabled),
            Editor::Text(w) => w.set_enabled(enabled),
            Editor::Choice(w) => w.set_enabled(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            Editor::Toggle(w) => w.is_enabled(),
            Editor::Text(w) => w.is_enabled(),
            Editor::Choice(w) => w.is_enabled(),
        }
    }

    pub fn request_focus(&self) {
        match self {
            Editor::Toggle(w) => w.request_focus(),
            Editor::Text(w) => w.request_focus(),
            Editor::Choice(w) => w.request_focus(),
        }
    }

    pub fn has_focus(&self) -> bool {
        match self {
            Editor::Toggle(w) => w.has_focus(),
            Editor::Text(w) => w.has_focus(),
            Editor::Choice(w) => w.has_focus(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Editor::Toggle(w) => w.is_valid(),
            Editor::Text(w) => w.is_valid(),
            Editor::Choice(w) => w.is_valid(),
        }
    }

    /// Text shown for the editor's current value, with masking applied
    pub fn display_value(&self) -> String {
        match self {
            Editor::Toggle(w) => if w.is_selected() { "[x]" } else { "[ ]" }.to_string(),
            Editor::Text(w) if w.is_masked() => "•".repeat(w.text().chars().count()),
            Editor::Text(w) => w.text(),
            Editor::Choice(w) => w.selected_label().unwrap_or_default(),
        }
    }

    pub fn as_toggle(&self) -> Option<&Rc<dyn ToggleWidget>> {
        match self {
            Editor::Toggle(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Rc<dyn TextWidget>> {
        match self {
            Editor::Text(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&Rc<dyn ChoiceWidget>> {
        match self {
            Editor::Choice(w) => Some(w),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Editor::Toggle(_) => "Toggle",
            Editor::Text(_) => "Text",
            Editor::Choice(_) => "Choice",
        };
        f.debug_struct("Editor").field("kind", &kind).field("id", &self.id()).finish()
    }
}
