//! Property sheet construction
//!
//! [`PropertySheetBuilder`] turns an ordered list of options into a
//! [`PropertySheet`]: one bound editor per option laid out in a two-column
//! grid, plus a live [`ValidationRegistry`] describing which text fields
//! currently hold rejected input.

pub mod editor;
pub mod error;
pub mod layout;
pub mod validation;
pub mod widget;

pub use editor::{BoundEditor, EditorFactory, EnumChoices, LABEL_KEY_SUFFIX};
pub use error::SheetError;
pub use layout::{CellContent, GridCell, Insets, Label, MIN_COLUMN_WIDTH, PropertyPane};
pub use validation::{Validation, ValidationChange, ValidationRegistry, validate, validators};
pub use widget::{ChoiceWidget, Editor, EditorWidget, TextWidget, ToggleWidget, WidgetToolkit};

use crate::i18n::Localizer;
use crate::observable::{ObservableOption, OptionId, Subscription};

/// One row of a built sheet
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub option: ObservableOption,
    pub label: Option<String>,
    pub editor: Editor,
}

/// Builds property sheets against one toolkit and one localizer
pub struct PropertySheetBuilder<'a> {
    toolkit: &'a dyn WidgetToolkit,
    localizer: &'a dyn Localizer,
}

impl<'a> PropertySheetBuilder<'a> {
    pub fn new(toolkit: &'a dyn WidgetToolkit, localizer: &'a dyn Localizer) -> Self {
        Self { toolkit, localizer }
    }

    /// Build a sheet with one row per option, in input order
    ///
    /// Fails without returning a partial sheet when any option has no editor.
    /// Bindings installed for earlier rows are detached in that case.
    pub fn create_property_sheet(&self, options: &[ObservableOption]) -> Result<PropertySheet, SheetError> {
        let registry = ValidationRegistry::new();
        let mut pane = PropertyPane::new();
        let factory =
            EditorFactory::new(self.toolkit, self.localizer, &registry).disabled_by(pane.disabled());

        let mut rows = Vec::with_capacity(options.len());
        let mut bindings = Vec::new();

        for (row, option) in options.iter().enumerate() {
            let BoundEditor { editor, label, subscriptions } = factory.build_editor(option)?;
            bindings.extend(subscriptions);

            match &label {
                Some(text) => {
                    pane.add(GridCell::new(
                        CellContent::Label(Label {
                            text: text.clone(),
                            label_for: Some(editor.id()),
                        }),
                        0,
                        row,
                    ));
                    let mut cell = GridCell::new(CellContent::Editor(editor.clone()), 1, row);
                    cell.hgrow = true;
                    cell.min_width = Some(MIN_COLUMN_WIDTH);
                    cell.max_width = None;
                    pane.add(cell);
                }
                None => {
                    log::debug!("No label for '{}', placing editor only", option.id());
                    pane.add(GridCell::new(CellContent::Editor(editor.clone()), 1, row));
                }
            }

            if row == 0 {
                pane.forward_first_focus(editor.clone());
            }

            rows.push(SheetRow {
                option: option.clone(),
                label,
                editor,
            });
        }

        log::info!(
            "Created property sheet with {} rows ({} labeled), {} validation errors",
            rows.len(),
            rows.iter().filter(|r| r.label.is_some()).count(),
            registry.len()
        );

        Ok(PropertySheet {
            pane,
            registry,
            rows,
            _bindings: bindings,
        })
    }
}

/// A built property sheet
///
/// Dropping the sheet detaches every binding it installed on the options.
pub struct PropertySheet {
    pane: PropertyPane,
    registry: ValidationRegistry,
    rows: Vec<SheetRow>,
    _bindings: Vec<Subscription>,
}

impl PropertySheet {
    /// Root layout node
    pub fn pane(&self) -> &PropertyPane {
        &self.pane
    }

    /// Focus the sheet; the first time, focus moves on to the first editor
    pub fn request_focus(&self) {
        self.pane.request_focus();
    }

    pub fn is_disabled(&self) -> bool {
        self.pane.is_disabled()
    }

    /// Disable or enable the whole sheet; every editor follows
    pub fn set_disabled(&self, disabled: bool) {
        self.pane.set_disabled(disabled);
    }

    /// Live view of the current validation errors
    pub fn validation_errors(&self) -> &ValidationRegistry {
        &self.registry
    }

    pub fn is_valid(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn options(&self) -> impl Iterator<Item = &ObservableOption> {
        self.rows.iter().map(|r| &r.option)
    }

    pub fn editor_for(&self, id: &OptionId) -> Option<&Editor> {
        self.rows.iter().find(|r| r.option.id() == id).map(|r| &r.editor)
    }
}

impl std::fmt::Debug for PropertySheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySheet")
            .field("pane", &self.pane)
            .field("errors", &self.registry)
            .field("bindings", &self._bindings.len())
            .finish()
    }
}
