//! Terminal implementation of the sheet's widget capabilities
//!
//! Widgets created by one [`TuiToolkit`] share a single focus owner. Key
//! presses go to the focused widget only, and Tab/BackTab traversal skips
//! disabled widgets. The toolkit holds its widgets weakly: once the sheet that
//! owns a widget is dropped, the widget leaves traversal and key routing.
//! User-change callbacks are cloned out of their cell before being invoked, so
//! a callback may freely call back into the widget.

use super::widgets::{CheckboxState, SelectState, TextInputState};
use crate::observable::WidgetId;
use crate::sheet::{ChoiceWidget, EditorWidget, TextWidget, ToggleWidget, WidgetToolkit};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct FocusOwner {
    current: Cell<Option<WidgetId>>,
}

/// State shared by every terminal widget
#[derive(Debug)]
struct WidgetBase {
    id: WidgetId,
    enabled: Cell<bool>,
    valid: Cell<bool>,
    focus: Rc<FocusOwner>,
}

impl WidgetBase {
    fn new(focus: Rc<FocusOwner>) -> Self {
        Self {
            id: WidgetId::next(),
            enabled: Cell::new(true),
            valid: Cell::new(true),
            focus,
        }
    }

    fn request_focus(&self) {
        if !self.enabled.get() {
            log::debug!("Ignoring focus request for disabled {}", self.id);
            return;
        }
        self.focus.current.set(Some(self.id));
    }

    fn has_focus(&self) -> bool {
        self.focus.current.get() == Some(self.id)
    }
}

/// Widget-side view used by the toolkit for routing
trait TuiWidget {
    fn base(&self) -> &WidgetBase;

    /// Returns true when the key was consumed
    fn handle_key(&self, key: KeyCode) -> bool;

    fn on_blur(&self) {}
}

macro_rules! editor_widget_impl {
    ($ty:ty) => {
        impl EditorWidget for $ty {
            fn id(&self) -> WidgetId {
                self.base.id
            }

            fn set_enabled(&self, enabled: bool) {
                self.base.enabled.set(enabled);
                if !enabled {
                    TuiWidget::on_blur(self);
                }
            }

            fn is_enabled(&self) -> bool {
                self.base.enabled.get()
            }

            fn request_focus(&self) {
                self.base.request_focus();
            }

            fn has_focus(&self) -> bool {
                self.base.has_focus()
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

/// Check box
pub struct TuiToggle {
    base: WidgetBase,
    state: RefCell<CheckboxState>,
    callback: RefCell<Option<Rc<dyn Fn(bool)>>>,
}

editor_widget_impl!(TuiToggle);

impl ToggleWidget for TuiToggle {
    fn set_selected(&self, selected: bool) {
        self.state.borrow_mut().set_checked(selected);
    }

    fn is_selected(&self) -> bool {
        self.state.borrow().is_checked()
    }

    fn on_user_change(&self, callback: Box<dyn Fn(bool)>) {
        *self.callback.borrow_mut() = Some(Rc::from(callback));
    }
}

impl TuiWidget for TuiToggle {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn handle_key(&self, key: KeyCode) -> bool {
        let changed = self.state.borrow_mut().handle_key(key);
        let Some(selected) = changed else {
            return false;
        };
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            callback(selected);
        }
        true
    }
}

/// Single-line text field, optionally masked
pub struct TuiText {
    base: WidgetBase,
    masked: bool,
    text: RefCell<String>,
    input: RefCell<TextInputState>,
    callback: RefCell<Option<Rc<dyn Fn(&str)>>>,
}

editor_widget_impl!(TuiText);

impl TuiText {
    pub fn cursor_pos(&self) -> usize {
        self.input.borrow().cursor_pos()
    }

    /// Scroll so the cursor fits in `width` cells; returns the first visible character
    pub fn scroll_to_fit(&self, width: usize) -> usize {
        let text = self.text.borrow();
        let mut input = self.input.borrow_mut();
        input.update_scroll(width, &text);
        input.scroll_offset()
    }
}

impl TextWidget for TuiText {
    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        self.input.borrow_mut().clamp_to(text);
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

impl TuiWidget for TuiText {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn handle_key(&self, key: KeyCode) -> bool {
        let consumed = matches!(
            key,
            KeyCode::Char(_)
                | KeyCode::Backspace
                | KeyCode::Delete
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
        );

        let current = self.text();
        let edited = self.input.borrow_mut().handle_key(key, &current);
        if let Some(text) = edited {
            *self.text.borrow_mut() = text.clone();
            let callback = self.callback.borrow().clone();
            if let Some(callback) = callback {
                callback(&text);
            }
        }
        consumed
    }
}

/// Dropdown selector
pub struct TuiChoice {
    base: WidgetBase,
    items: RefCell<Vec<String>>,
    state: RefCell<SelectState>,
    callback: RefCell<Option<Rc<dyn Fn(&str)>>>,
}

editor_widget_impl!(TuiChoice);

impl TuiChoice {
    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub fn highlighted(&self) -> usize {
        self.state.borrow().highlighted()
    }
}

impl ChoiceWidget for TuiChoice {
    fn set_items(&self, labels: Vec<String>) {
        self.state.borrow_mut().update_option_count(labels.len());
        *self.items.borrow_mut() = labels;
    }

    fn items(&self) -> Vec<String> {
        self.items.borrow().clone()
    }

    fn select_label(&self, label: Option<&str>) {
        let index = label.and_then(|l| self.items.borrow().iter().position(|item| item == l));
        self.state.borrow_mut().select(index);
    }

    fn selected_label(&self) -> Option<String> {
        let index = self.state.borrow().selected()?;
        self.items.borrow().get(index).cloned()
    }

    fn on_user_change(&self, callback: Box<dyn Fn(&str)>) {
        *self.callback.borrow_mut() = Some(Rc::from(callback));
    }
}

impl TuiWidget for TuiChoice {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn handle_key(&self, key: KeyCode) -> bool {
        let (consumed, committed) = self.state.borrow_mut().handle_key(key);
        let label = committed.and_then(|i| self.items.borrow().get(i).cloned());
        if let Some(label) = label {
            let callback = self.callback.borrow().clone();
            if let Some(callback) = callback {
                callback(&label);
            }
        }
        consumed
    }

    fn on_blur(&self) {
        self.state.borrow_mut().handle_blur();
    }
}

/// Concrete widget handle kept by the toolkit
#[derive(Clone)]
pub enum TuiHandle {
    Toggle(Rc<TuiToggle>),
    Text(Rc<TuiText>),
    Choice(Rc<TuiChoice>),
}

impl TuiHandle {
    fn widget(&self) -> &dyn TuiWidget {
        match self {
            TuiHandle::Toggle(w) => w.as_ref(),
            TuiHandle::Text(w) => w.as_ref(),
            TuiHandle::Choice(w) => w.as_ref(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.widget().base().id
    }

    fn downgrade(&self) -> WeakHandle {
        match self {
            TuiHandle::Toggle(w) => WeakHandle::Toggle(Rc::downgrade(w)),
            TuiHandle::Text(w) => WeakHandle::Text(Rc::downgrade(w)),
            TuiHandle::Choice(w) => WeakHandle::Choice(Rc::downgrade(w)),
        }
    }
}

enum WeakHandle {
    Toggle(Weak<TuiToggle>),
    Text(Weak<TuiText>),
    Choice(Weak<TuiChoice>),
}

impl WeakHandle {
    fn upgrade(&self) -> Option<TuiHandle> {
        match self {
            WeakHandle::Toggle(w) => w.upgrade().map(TuiHandle::Toggle),
            WeakHandle::Text(w) => w.upgrade().map(TuiHandle::Text),
            WeakHandle::Choice(w) => w.upgrade().map(TuiHandle::Choice),
        }
    }

    fn is_alive(&self) -> bool {
        match self {
            WeakHandle::Toggle(w) => w.strong_count() > 0,
            WeakHandle::Text(w) => w.strong_count() > 0,
            WeakHandle::Choice(w) => w.strong_count() > 0,
        }
    }
}

/// Factory and focus manager for terminal widgets
#[derive(Clone, Default)]
pub struct TuiToolkit {
    focus: Rc<FocusOwner>,
    widgets: Rc<RefCell<Vec<WeakHandle>>>,
}

impl TuiToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.current.get()
    }

    /// Concrete widget for `id`, for renderer-specific state
    pub fn handle(&self, id: WidgetId) -> Option<TuiHandle> {
        self.widgets
            .borrow()
            .iter()
            .filter_map(WeakHandle::upgrade)
            .find(|h| h.id() == id)
    }

    /// Widgets still owned by a live sheet, in creation order
    pub fn widgets(&self) -> Vec<TuiHandle> {
        self.widgets.borrow_mut().retain(WeakHandle::is_alive);
        self.widgets.borrow().iter().filter_map(WeakHandle::upgrade).collect()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets().len()
    }

    /// Route a key press to the focused widget
    ///
    /// Tab and BackTab move focus. Returns true when the key was consumed.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return true;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return true;
            }
            _ => {}
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        let Some(handle) = self.focused().and_then(|id| self.handle(id)) else {
            return false;
        };
        let widget = handle.widget();
        if !widget.base().enabled.get() {
            return false;
        }
        widget.handle_key(key.code)
    }

    pub fn focus_next(&self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&self) {
        self.move_focus(-1);
    }

    fn move_focus(&self, step: isize) {
        let widgets = self.widgets();
        let enabled: Vec<&TuiHandle> = widgets
            .iter()
            .filter(|h| h.widget().base().enabled.get())
            .collect();
        if enabled.is_empty() {
            return;
        }

        let len = enabled.len() as isize;
        let next = match self.focused().and_then(|id| enabled.iter().position(|h| h.id() == id)) {
            Some(pos) => (pos as isize + step).rem_euclid(len) as usize,
            None if step > 0 => 0,
            None => enabled.len() - 1,
        };

        self.blur_current(&widgets);
        let target = enabled[next];
        log::debug!("Focus moved to {}", target.id());
        self.focus.current.set(Some(target.id()));
    }

    fn blur_current(&self, widgets: &[TuiHandle]) {
        if let Some(current) = self.focused().and_then(|id| widgets.iter().find(|h| h.id() == id)) {
            current.widget().on_blur();
        }
    }

    fn register(&self, handle: TuiHandle) {
        let mut widgets = self.widgets.borrow_mut();
        widgets.retain(WeakHandle::is_alive);
        widgets.push(handle.downgrade());
    }
}

impl WidgetToolkit for TuiToolkit {
    fn create_toggle(&self) -> Rc<dyn ToggleWidget> {
        let widget = Rc::new(TuiToggle {
            base: WidgetBase::new(self.focus.clone()),
            state: RefCell::new(CheckboxState::default()),
            callback: RefCell::new(None),
        });
        self.register(TuiHandle::Toggle(widget.clone()));
        widget
    }

    fn create_text(&self, masked: bool) -> Rc<dyn TextWidget> {
        let widget = Rc::new(TuiText {
            base: WidgetBase::new(self.focus.clone()),
            masked,
            text: RefCell::new(String::new()),
            input: RefCell::new(TextInputState::new()),
            callback: RefCell::new(None),
        });
        self.register(TuiHandle::Text(widget.clone()));
        widget
    }

    fn create_choice(&self) -> Rc<dyn ChoiceWidget> {
        let widget = Rc::new(TuiChoice {
            base: WidgetBase::new(self.focus.clone()),
            items: RefCell::new(Vec::new()),
            state: RefCell::new(SelectState::new()),
            callback: RefCell::new(None),
        });
        self.register(TuiHandle::Choice(widget.clone()));
        widget
    }
}

impl std::fmt::Debug for TuiToolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TuiToolkit")
            .field("widgets", &self.widget_count())
            .field("focused", &self.focused())
            .finish()
    }
}
