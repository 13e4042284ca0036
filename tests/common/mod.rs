//! Widget toolkit that records every call, for binding tests
#![allow(dead_code)]

use propsheet::observable::WidgetId;
use propsheet::sheet::{ChoiceWidget, EditorWidget, TextWidget, ToggleWidget, WidgetToolkit};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct Base {
    pub id: WidgetId,
    pub enabled: Cell<bool>,
    pub valid: Cell<bool>,
    pub focus_requests: Cell<usize>,
    pub focus: Rc<Cell<Option<WidgetId>>>,
}

impl Base {
    fn new(focus: Rc<Cell<Option<WidgetId>>>) -> Self {
        Self {
            id: WidgetId::next(),
            enabled: Cell::new(true),
            valid: Cell::new(true),
            focus_requests: Cell::new(0),
            focus,
        }
    }

    fn id(&self) -> WidgetId {
        self.id
    }
}

macro_rules! recording_editor_widget {
    ($ty:ty) => {
        impl EditorWidget for $ty {
            fn id(&self) -> WidgetId {
                self.base.id()
            }
            fn set_enabled(&self, enabled: bool) {
                self.base.enabled.set(enabled);
            }
            fn is_enabled(&self) -> bool {
                self.base.enabled.get()
            }
            fn request_focus(&self) {
                self.base.focus_requests.set(self.base.focus_requests.get() + 1);
                self.base.focus.set(Some(self.base.id()));
            }
            fn has_focus(&self) -> bool {
                self.base.focus.get() == Some(self.base.id())
            }
            fn mark_valid(&self) {
                self.base.valid.set(true);
            }
            fn mark_invalid(&self) {
                self.base.valid.set(false);
            }
            fn is_valid(&self) -> bool {
                self.base.valid.get()
            }
        }
    };
}

pub struct RecordingToggle {
    pub base: Base,
    pub selected: Cell<bool>,
    /// Programmatic `set_selected` calls
    pub sets: Cell<usize>,
    callback: RefCell<Option<Rc<dyn Fn(bool)>>>,
}

recording_editor_widget!(RecordingToggle);

impl RecordingToggle {
    /// Simulate the user clicking the check box
    pub fn click(&self) {
        let selected = !self.selected.get();
        self.selected.set(selected);
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            callback(selected);
        }
    }
}

impl ToggleWidget for RecordingToggle {
    fn set_selected(&self, selected: bool) {
        self.sets.set(self.sets.get() + 1);
        self.selected.set(selected);
    }
    fn is_selected(&self) -> bool {
        self.selected.get()
    }
    fn on_user_change(&self, callback: Box<dyn Fn(bool)>) {
        *self.callback.borrow_mut() = Some(Rc::from(callback));
    }
}

pub struct RecordingText {
    pub base: Base,
    pub masked: bool,
    pub text: RefCell<String>,
    /// Programmatic `set_text` calls
    pub sets: Cell<usize>,
    callback: RefCell<Option<Rc<dyn Fn(&str)>>>,
}

recording_editor_widget!(RecordingText);

impl RecordingText {
    /// Simulate the user replacing the whole text
    pub fn type_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            callback(text);
        }
    }
}

impl TextWidget for RecordingText {
    fn set_text(&self, text: &str) {
        self.sets.set(self.sets.get() + 1);
        *self.text.borrow_mut() = text.to_string();
    }
    fn text(&self) -> String {
        self.text.borrow().clone()
    }
    fn is_masked(&self) -> bool {
        self.masked
    }
    fn on_user_change(&self, callback: Box<dyn Fn(&str)>) {
        *self.callback.borrow_mut() = Some(Rc::from(callback));
    }
}

pub struct RecordingChoice {
    pub base: Base,
    pub items: RefCell<Vec<String>>,
    pub selected: RefCell<Option<String>>,
    /// Programmatic `select_label` calls
    pub sets: Cell<usize>,
    callback: RefCell<Option<Rc<dyn Fn(&str)>>>,
}

recording_editor_widget!(RecordingChoice);

impl RecordingChoice {
    /// Simulate the user picking an item
    pub fn pick(&self, label: &str) {
        *self.selected.borrow_mut() = Some(label.to_string());
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            callback(label);
        }
    }
}

impl ChoiceWidget for RecordingChoice {
    fn set_items(&self, labels: Vec<String>) {
        *self.items.borrow_mut() = labels;
    }
    fn items(&self) -> Vec<String> {
        self.items.borrow().clone()
    }
    fn select_label(&self, label: Option<&str>) {
        self.sets.set(self.sets.get() + 1);
        let label = label.filter(|l| self.items.borrow().iter().any(|item| item.as_str() == *l));
        *self.selected.borrow_mut() = label.map(str::to_string);
    }
    fn selected_label(&self) -> Option<String> {
        self.selected.borrow().clone()
    }
    fn on_user_change(&self, callback: Box<dyn Fn(&str)>) {
        *self.callback.borrow_mut() = Some(Rc::from(callback));
    }
}

/// Keeps every widget it creates so tests can drive them
#[derive(Default)]
pub struct RecordingToolkit {
    pub focus: Rc<Cell<Option<WidgetId>>>,
    pub toggles: RefCell<Vec<Rc<RecordingToggle>>>,
    pub texts: RefCell<Vec<Rc<RecordingText>>>,
    pub choices: RefCell<Vec<Rc<RecordingChoice>>>,
}

impl RecordingToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&self, index: usize) -> Rc<RecordingToggle> {
        self.toggles.borrow()[index].clone()
    }

    pub fn text(&self, index: usize) -> Rc<RecordingText> {
        self.texts.borrow()[index].clone()
    }

    pub fn choice(&self, index: usize) -> Rc<RecordingChoice> {
        self.choices.borrow()[index].clone()
    }

    pub fn created(&self) -> usize {
        self.toggles.borrow().len() + self.texts.borrow().len() + self.choices.borrow().len()
    }
}

impl WidgetToolkit for RecordingToolkit {
    fn create_toggle(&self) -> Rc<dyn ToggleWidget> {
        let widget = Rc::new(RecordingToggle {
            base: Base::new(self.focus.clone()),
            selected: Cell::new(false),
            sets: Cell::new(0),
            callback: RefCell::new(None),
        });
        self.toggles.borrow_mut().push(widget.clone());
        widget
    }

    fn create_text(&self, masked: bool) -> Rc<dyn TextWidget> {
        let widget = Rc::new(RecordingText {
            base: Base::new(self.focus.clone()),
            masked,
            text: RefCell::new(String::new()),
            sets: Cell::new(0),
            callback: RefCell::new(None),
        });
        self.texts.borrow_mut().push(widget.clone());
        widget
    }

    fn create_choice(&self) -> Rc<dyn ChoiceWidget> {
        let widget = Rc::new(RecordingChoice {
            base: Base::new(self.focus.clone()),
            items: RefCell::new(Vec::new()),
            selected: RefCell::new(None),
            sets: Cell::new(0),
            callback: RefCell::new(None),
        });
        self.choices.borrow_mut().push(widget.clone());
        widget
    }
}
