//! Two-column grid holding the labels and editors of a property sheet

use super::widget::Editor;
use crate::observable::{ObservableProperty, Subscription, Trigger, WidgetId};
use std::cell::RefCell;
use std::rc::Rc;

/// Minimum width, in terminal cells, of an editor in a labeled row
pub const MIN_COLUMN_WIDTH: u16 = 12;

/// Style class carried by every property pane
pub const PROPERTY_PANE_CLASS: &str = "property-pane";

/// Columns between the label and editor columns
pub const PANE_HGAP: u16 = 2;
/// Blank rows between grid rows
pub const PANE_VGAP: u16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Insets {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self { top, right, bottom, left }
    }
}

pub const PANE_PADDING: Insets = Insets::new(1, 2, 1, 2);

/// Row label, associated with the editor it describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    /// Accessible label target
    pub label_for: Option<WidgetId>,
}

#[derive(Debug, Clone)]
pub enum CellContent {
    Label(Label),
    Editor(Editor),
}

/// One placed node and its layout constraints
#[derive(Debug, Clone)]
pub struct GridCell {
    pub column: u16,
    pub row: usize,
    pub content: CellContent,
    /// Grow horizontally to fill the available width
    pub hgrow: bool,
    pub min_width: Option<u16>,
    /// `None` means unbounded
    pub max_width: Option<u16>,
}

impl GridCell {
    pub fn new(content: CellContent, column: u16, row: usize) -> Self {
        Self {
            column,
            row,
            content,
            hgrow: false,
            min_width: None,
            max_width: None,
        }
    }

    pub fn editor(&self) -> Option<&Editor> {
        match &self.content {
            CellContent::Editor(editor) => Some(editor),
            CellContent::Label(_) => None,
        }
    }

    pub fn label(&self) -> Option<&Label> {
        match &self.content {
            CellContent::Label(label) => Some(label),
            CellContent::Editor(_) => None,
        }
    }
}

/// Root layout node of a property sheet
pub struct PropertyPane {
    cells: Vec<GridCell>,
    style_classes: Vec<String>,
    hgap: u16,
    vgap: u16,
    padding: Insets,
    focused: ObservableProperty<bool>,
    disabled: ObservableProperty<bool>,
    focus_forward: Rc<RefCell<Option<Subscription>>>,
}

impl PropertyPane {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            style_classes: vec![PROPERTY_PANE_CLASS.to_string()],
            hgap: PANE_HGAP,
            vgap: PANE_VGAP,
            padding: PANE_PADDING,
            focused: ObservableProperty::new(false),
            disabled: ObservableProperty::new(false),
            focus_forward: Rc::new(RefCell::new(None)),
        }
    }

    pub fn add(&mut self, cell: GridCell) {
        self.cells.push(cell);
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell_at(&self, column: u16, row: usize) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.column == column && c.row == row)
    }

    /// Number of rows, counting from row 0 to the last occupied row
    pub fn row_count(&self) -> usize {
        self.cells.iter().map(|c| c.row + 1).max().unwrap_or(0)
    }

    pub fn label_at(&self, row: usize) -> Option<&Label> {
        self.cells
            .iter()
            .filter(|c| c.row == row)
            .find_map(GridCell::label)
    }

    pub fn editor_at(&self, row: usize) -> Option<&Editor> {
        self.cells
            .iter()
            .filter(|c| c.row == row)
            .find_map(GridCell::editor)
    }

    /// Editors in row order
    pub fn editors(&self) -> Vec<&Editor> {
        let mut placed: Vec<&GridCell> = self.cells.iter().filter(|c| c.editor().is_some()).collect();
        placed.sort_by_key(|c| c.row);
        placed.into_iter().filter_map(GridCell::editor).collect()
    }

    pub fn style_classes(&self) -> &[String] {
        &self.style_classes
    }

    pub fn hgap(&self) -> u16 {
        self.hgap
    }

    pub fn vgap(&self) -> u16 {
        self.vgap
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Observable focus state of the pane itself
    pub fn focused(&self) -> &ObservableProperty<bool> {
        &self.focused
    }

    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    pub fn request_focus(&self) {
        if !self.focused.get() {
            self.focused.set(true, Trigger::Program);
        }
    }

    /// Record that focus moved elsewhere
    pub fn clear_focus(&self) {
        if self.focused.get() {
            self.focused.set(false, Trigger::Program);
        }
    }

    /// On the first not-focused → focused transition, hand focus to `editor`
    ///
    /// The listener removes itself after firing once. Installing a new one
    /// replaces any listener that has not fired yet. The pane keeps its own
    /// focused state until [`PropertyPane::clear_focus`] is called.
    pub fn forward_first_focus(&self, editor: Editor) {
        let slot = Rc::downgrade(&self.focus_forward);
        let subscription = self.focused.subscribe(move |evt| {
            if evt.old_value || !evt.new_value {
                return;
            }
            if let Some(slot) = slot.upgrade() {
                slot.borrow_mut().take();
            }
            log::debug!("Forwarding initial focus to {}", editor.id());
            editor.request_focus();
        });
        *self.focus_forward.borrow_mut() = Some(subscription);
    }

    /// Observable disabled flag
    ///
    /// Editors built by [`crate::PropertySheetBuilder`] watch it and turn
    /// themselves off while it is set.
    pub fn disabled(&self) -> &ObservableProperty<bool> {
        &self.disabled
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled, Trigger::Program);
    }

    /// Effective disabled state of an editor: its own flag or the pane's
    pub fn is_editor_disabled(&self, editor: &Editor) -> bool {
        self.is_disabled() || !editor.is_enabled()
    }
}

impl Default for PropertyPane {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PropertyPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyPane")
            .field("cells", &self.cells)
            .field("focused", &self.is_focused())
            .field("disabled", &self.is_disabled())
            .finish()
    }
}
