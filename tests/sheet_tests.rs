//! Sheet layout, focus and construction failures

mod common;

use common::RecordingToolkit;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use propsheet::observable::{ObservableBoolean, ObservableObject, ObservableOption, ObservableString, Trigger};
use propsheet::sheet::layout::PROPERTY_PANE_CLASS;
use propsheet::sheet::{CellContent, EditorWidget, MIN_COLUMN_WIDTH, SheetError};
use propsheet::tui::TuiToolkit;
use propsheet::{BundleLocalizer, PropertySheetBuilder};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn localizer() -> BundleLocalizer {
    BundleLocalizer::new()
        .with("server.host.label", "Host")
        .with("server.tls.label", "Use TLS")
}

fn three_options() -> Vec<ObservableOption> {
    vec![
        ObservableString::new("server.host", "localhost").into(),
        ObservableString::new("server.port", "5432").into(),
        ObservableBoolean::new("server.tls", true).into(),
    ]
}

#[test]
fn test_layout_shape_with_unlabeled_row() {
    let toolkit = RecordingToolkit::new();
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&three_options())
        .unwrap();
    let pane = sheet.pane();

    assert_eq!(pane.row_count(), 3);
    assert_eq!(pane.cells().len(), 5);
    assert_eq!(pane.style_classes(), [PROPERTY_PANE_CLASS.to_string()]);

    for row in [0, 2] {
        let label = pane.cell_at(0, row).and_then(|c| c.label()).unwrap();
        let editor = pane.cell_at(1, row).unwrap();
        assert_eq!(label.label_for, Some(editor.editor().unwrap().id()));
        assert!(editor.hgrow);
        assert_eq!(editor.min_width, Some(MIN_COLUMN_WIDTH));
        assert_eq!(editor.max_width, None);
    }
    assert_eq!(pane.label_at(0).unwrap().text, "Host");
    assert_eq!(pane.label_at(2).unwrap().text, "Use TLS");

    assert!(pane.cell_at(0, 1).is_none());
    assert!(matches!(pane.cell_at(1, 1).unwrap().content, CellContent::Editor(_)));
    assert!(sheet.rows()[1].label.is_none());
}

#[test]
fn test_rows_follow_input_order() {
    let toolkit = RecordingToolkit::new();
    let options = three_options();
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&options)
        .unwrap();

    let ids: Vec<_> = sheet.options().map(|o| o.id().to_string()).collect();
    assert_eq!(ids, vec!["server.host", "server.port", "server.tls"]);
    let editors = sheet.pane().editors();
    assert_eq!(editors[1].id(), toolkit.text(1).id());
    assert!(sheet.editor_for(&"server.tls".into()).is_some());
}

#[test]
fn test_object_option_fails_whole_sheet() {
    let toolkit = RecordingToolkit::new();
    let first = ObservableBoolean::new("ui.dark", false);
    let options: Vec<ObservableOption> = vec![
        first.clone().into(),
        ObservableObject::new("ui.layout", serde_json::json!({"columns": 2})).into(),
        ObservableString::new("ui.name", "").into(),
    ];

    let err = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&options)
        .unwrap_err();
    assert_eq!(err, SheetError::UnsupportedOption { id: "ui.layout".to_string() });
    assert!(err.to_string().contains("ui.layout"));

    // No row after the failing one was built, and earlier bindings are gone
    assert_eq!(toolkit.created(), 1);
    first.set(true, Trigger::Program);
    assert_eq!(toolkit.toggle(0).sets.get(), 1);
}

#[test]
fn test_initial_focus_forwarded_once() {
    let toolkit = RecordingToolkit::new();
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&three_options())
        .unwrap();
    let first = toolkit.text(0);

    sheet.request_focus();
    assert!(first.has_focus());
    assert_eq!(first.base.focus_requests.get(), 1);

    toolkit.text(1).request_focus();
    sheet.pane().clear_focus();
    sheet.request_focus();
    assert_eq!(first.base.focus_requests.get(), 1);
    assert!(toolkit.text(1).has_focus());
}

#[test]
fn test_initial_focus_on_unlabeled_first_row() {
    let toolkit = RecordingToolkit::new();
    let sheet = PropertySheetBuilder::new(&toolkit, &BundleLocalizer::new())
        .create_property_sheet(&three_options())
        .unwrap();

    assert!(sheet.pane().label_at(0).is_none());
    sheet.request_focus();
    assert!(toolkit.text(0).has_focus());
}

#[test]
fn test_disabled_cascades_to_editors() {
    let toolkit = RecordingToolkit::new();
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&three_options())
        .unwrap();

    assert!(!sheet.is_disabled());
    sheet.set_disabled(true);
    assert!(sheet.is_disabled());
    for editor in sheet.pane().editors() {
        assert!(!editor.is_enabled());
        assert!(sheet.pane().is_editor_disabled(editor));
    }

    sheet.set_disabled(false);
    sheet.options().next().unwrap().core().set_writable(false);
    let editors = sheet.pane().editors();
    assert!(!editors[0].is_enabled());
    assert!(editors[1].is_enabled());
    assert!(editors[2].is_enabled());
}

#[test]
fn test_enabling_sheet_keeps_read_only_editor_disabled() {
    let toolkit = RecordingToolkit::new();
    let options = three_options();
    options[1].core().set_writable(false);
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&options)
        .unwrap();

    sheet.set_disabled(true);
    sheet.set_disabled(false);
    assert!(toolkit.text(0).is_enabled());
    assert!(!toolkit.text(1).is_enabled());

    options[1].core().set_writable(true);
    assert!(toolkit.text(1).is_enabled());
}

#[test]
fn test_disabled_sheet_rejects_terminal_input() {
    let toolkit = TuiToolkit::new();
    let host = ObservableString::new("server.host", "db");
    let tls = ObservableBoolean::new("server.tls", false);
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[host.clone().into(), tls.clone().into()])
        .unwrap();
    sheet.request_focus();
    sheet.set_disabled(true);

    assert!(!toolkit.handle_key(key(KeyCode::Char('x'))));
    toolkit.handle_key(key(KeyCode::Tab));
    assert!(!toolkit.handle_key(key(KeyCode::Char(' '))));
    assert_eq!(host.value(), "db");
    assert!(!tls.value());

    sheet.set_disabled(false);
    assert!(toolkit.handle_key(key(KeyCode::Char('x'))));
    assert_eq!(host.value(), "xdb");
}

#[test]
fn test_failed_build_leaves_no_live_widgets() {
    let toolkit = TuiToolkit::new();
    let name = ObservableString::new("ui.name", "a");
    let options: Vec<ObservableOption> = vec![
        name.clone().into(),
        ObservableObject::new("ui.layout", serde_json::json!({})).into(),
    ];
    assert!(PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&options)
        .is_err());
    assert_eq!(toolkit.widget_count(), 0);

    let dark = ObservableBoolean::new("ui.dark", false);
    let _sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[dark.clone().into()])
        .unwrap();
    toolkit.handle_key(key(KeyCode::Tab));
    toolkit.handle_key(key(KeyCode::Char('z')));
    toolkit.handle_key(key(KeyCode::Char(' ')));

    assert_eq!(toolkit.widget_count(), 1);
    assert_eq!(name.value(), "a");
    assert!(dark.value());
}

#[test]
fn test_dropped_sheet_editor_no_longer_writes() {
    let toolkit = TuiToolkit::new();
    let name = ObservableString::new("ui.name", "a");
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[name.clone().into()])
        .unwrap();
    let editor = sheet.rows()[0].editor.clone();
    drop(sheet);

    editor.request_focus();
    assert!(toolkit.handle_key(key(KeyCode::Char('z'))));
    assert_eq!(editor.display_value(), "za");
    assert_eq!(name.value(), "a");

    drop(editor);
    assert_eq!(toolkit.widget_count(), 0);
    assert!(!toolkit.handle_key(key(KeyCode::Char('z'))));
}

#[test]
fn test_empty_sheet() {
    let toolkit = RecordingToolkit::new();
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[])
        .unwrap();

    assert_eq!(sheet.pane().row_count(), 0);
    sheet.request_focus();
    assert!(sheet.is_valid());
}
