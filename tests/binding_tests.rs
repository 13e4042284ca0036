//! Two-way binding between options and editor widgets

mod common;

use common::RecordingToolkit;
use propsheet::observable::{
    ChangeEvent, ObservableBoolean, ObservableEnum, ObservableOption, ObservableString, Trigger,
};
use propsheet::sheet::{EditorWidget, ToggleWidget};
use propsheet::{BundleLocalizer, PropertySheetBuilder};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Priority {
    Low,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => f.write_str("priority.low"),
            Priority::High => f.write_str("priority.high"),
        }
    }
}

fn localizer() -> BundleLocalizer {
    BundleLocalizer::new()
        .with("priority.low.label", "Low")
        .with("priority.high.label", "High")
}

fn record<T: Clone + 'static>(events: &Rc<RefCell<Vec<ChangeEvent<T>>>>) -> impl Fn(&ChangeEvent<T>) + 'static {
    let events = events.clone();
    move |evt| events.borrow_mut().push(evt.clone())
}

#[test]
fn test_programmatic_set_updates_toggle_exactly_once() {
    let toolkit = RecordingToolkit::new();
    let option = ObservableBoolean::new("ui.dark", false);
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[option.clone().into()])
        .unwrap();

    let toggle = toolkit.toggle(0);
    assert_eq!(toggle.sets.get(), 1);
    assert!(!toggle.is_selected());

    let events = Rc::new(RefCell::new(Vec::new()));
    let _sub = option.subscribe(record(&events));

    option.set(true, Trigger::Program);

    assert_eq!(toggle.sets.get(), 2);
    assert!(toggle.is_selected());
    // No write back: the only event is the programmatic one
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(events.borrow()[0].trigger, Trigger::Program);
    drop(sheet);
}

#[test]
fn test_widget_write_is_not_echoed_back() {
    let toolkit = RecordingToolkit::new();
    let option = ObservableBoolean::new("ui.dark", false);
    let _sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[option.clone().into()])
        .unwrap();

    let toggle = toolkit.toggle(0);
    let events = Rc::new(RefCell::new(Vec::new()));
    let _sub = option.subscribe(record(&events));

    toggle.click();

    assert!(option.value());
    assert_eq!(toggle.sets.get(), 1);
    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].trigger, Trigger::Widget(toggle.id()));
    assert!(!events[0].old_value);
    assert!(events[0].new_value);
}

#[test]
fn test_text_round_trip() {
    let toolkit = RecordingToolkit::new();
    let option = ObservableString::new("server.host", "localhost");
    let _sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[option.clone().into()])
        .unwrap();

    let text = toolkit.text(0);
    assert_eq!(*text.text.borrow(), "localhost");
    assert!(!text.masked);

    text.type_text("example.org");
    assert_eq!(option.value(), "example.org");
    assert_eq!(text.sets.get(), 1);

    option.set("db1", Trigger::Program);
    assert_eq!(*text.text.borrow(), "db1");
    assert_eq!(text.sets.get(), 2);
}

#[test]
fn test_screened_string_gets_masked_editor() {
    let toolkit = RecordingToolkit::new();
    let option = ObservableString::new("server.password", "secret").screened(true);
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[option.into()])
        .unwrap();

    assert!(toolkit.text(0).masked);
    assert_eq!(sheet.pane().editor_at(0).unwrap().display_value(), "••••••");
}

#[test]
fn test_enumeration_binding() {
    let toolkit = RecordingToolkit::new();
    let option = ObservableEnum::new("task.priority", Priority::Low, [Priority::Low, Priority::High]);
    let _sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[ObservableOption::enumeration(option.clone())])
        .unwrap();

    let choice = toolkit.choice(0);
    assert_eq!(*choice.items.borrow(), vec!["Low".to_string(), "High".to_string()]);
    assert_eq!(choice.selected.borrow().as_deref(), Some("Low"));
    assert_eq!(choice.sets.get(), 1);

    let events = Rc::new(RefCell::new(Vec::new()));
    let _sub = option.subscribe(record(&events));

    choice.pick("High");
    assert_eq!(option.value(), Priority::High);
    assert_eq!(choice.sets.get(), 1);
    assert_eq!(events.borrow()[0].trigger, Trigger::Widget(choice.id()));

    option.set(Priority::Low, Trigger::Program);
    assert_eq!(choice.selected.borrow().as_deref(), Some("Low"));
    assert_eq!(choice.sets.get(), 2);
}

#[test]
fn test_unknown_label_leaves_option_unchanged() {
    let toolkit = RecordingToolkit::new();
    let option = ObservableEnum::new("task.priority", Priority::Low, [Priority::Low, Priority::High]);
    let _sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[ObservableOption::enumeration(option.clone())])
        .unwrap();

    toolkit.choice(0).pick("Urgent");
    assert_eq!(option.value(), Priority::Low);
}

#[test]
fn test_writability_follows_option() {
    let toolkit = RecordingToolkit::new();
    let locked = ObservableBoolean::new("ui.locked", true);
    locked.core().set_writable(false);
    let open = ObservableString::new("ui.name", "x");
    let _sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[locked.clone().into(), open.clone().into()])
        .unwrap();

    assert!(!toolkit.toggle(0).is_enabled());
    assert!(toolkit.text(0).is_enabled());

    locked.core().set_writable(true);
    open.core().set_writable(false);
    assert!(toolkit.toggle(0).is_enabled());
    assert!(!toolkit.text(0).is_enabled());
}

#[test]
fn test_dropping_sheet_detaches_bindings() {
    let toolkit = RecordingToolkit::new();
    let option = ObservableBoolean::new("ui.dark", false);
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&[option.clone().into()])
        .unwrap();
    drop(sheet);

    option.set(true, Trigger::Program);
    option.core().set_writable(false);

    let toggle = toolkit.toggle(0);
    assert_eq!(toggle.sets.get(), 1);
    assert!(toggle.is_enabled());
}

#[test]
fn test_one_widget_per_option() {
    let toolkit = RecordingToolkit::new();
    let options: Vec<ObservableOption> = vec![
        ObservableBoolean::new("a", true).into(),
        ObservableString::new("b", "").into(),
        ObservableOption::enumeration(ObservableEnum::new("c", Priority::High, [Priority::Low, Priority::High])),
    ];
    let sheet = PropertySheetBuilder::new(&toolkit, &localizer())
        .create_property_sheet(&options)
        .unwrap();

    assert_eq!(toolkit.created(), 3);
    assert_eq!(sheet.rows().len(), 3);
}
