//! Editor construction and two-way bindings
//!
//! Every binding follows the same rule: a widget writes to its option with
//! `Trigger::Widget(widget.id())`, and the option watcher updates the widget
//! only when the event trigger is a different agent. That comparison runs
//! before any widget mutation and is the only thing preventing a write from
//! echoing back into the widget that made it.

use super::error::SheetError;
use super::validation::{ValidationRegistry, apply_validation, validate};
use super::widget::{ChoiceWidget, Editor, TextWidget, ToggleWidget, WidgetToolkit};
use crate::i18n::Localizer;
use crate::observable::{
    ChangeEvent, EnumOption, ObservableBoolean, ObservableOption, ObservableProperty,
    ObservableString, Subscription, Trigger,
};
use std::rc::Rc;

/// Suffix appended to option ids and enum values to form localization keys
pub const LABEL_KEY_SUFFIX: &str = ".label";

/// An editor together with the subscriptions that keep it bound
pub struct BoundEditor {
    pub editor: Editor,
    pub label: Option<String>,
    pub(crate) subscriptions: Vec<Subscription>,
}

impl std::fmt::Debug for BoundEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundEditor")
            .field("editor", &self.editor)
            .field("label", &self.label)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

/// Builds one bound editor per option
pub struct EditorFactory<'a> {
    toolkit: &'a dyn WidgetToolkit,
    localizer: &'a dyn Localizer,
    registry: &'a ValidationRegistry,
    disabled: ObservableProperty<bool>,
}

impl<'a> EditorFactory<'a> {
    pub fn new(
        toolkit: &'a dyn WidgetToolkit,
        localizer: &'a dyn Localizer,
        registry: &'a ValidationRegistry,
    ) -> Self {
        Self {
            toolkit,
            localizer,
            registry,
            disabled: ObservableProperty::new(false),
        }
    }

    /// Disable every built editor while `flag` is true
    pub fn disabled_by(mut self, flag: &ObservableProperty<bool>) -> Self {
        self.disabled = flag.clone();
        self
    }

    /// Build and bind the editor for `option`, resolving its row label
    pub fn build_editor(&self, option: &ObservableOption) -> Result<BoundEditor, SheetError> {
        let mut subscriptions = Vec::new();
        let editor = match option {
            ObservableOption::Boolean(o) => Editor::Toggle(self.bind_boolean(o, &mut subscriptions)),
            ObservableOption::String(o) => Editor::Text(self.bind_string(o, &mut subscriptions)),
            ObservableOption::Enumeration(o) => {
                Editor::Choice(self.bind_enumeration(o, &mut subscriptions))
            }
            ObservableOption::Object(o) => {
                return Err(SheetError::UnsupportedOption {
                    id: o.core().id().to_string(),
                });
            }
        };

        subscriptions.extend(bind_enabled(option, &editor, &self.disabled));
        subscriptions.push(detach_user_change(&editor));

        let label = self.option_label(option);
        log::debug!(
            "Built {:?} editor for '{}' (label: {:?})",
            editor,
            option.id(),
            label
        );

        Ok(BoundEditor { editor, label, subscriptions })
    }

    fn option_label(&self, option: &ObservableOption) -> Option<String> {
        self.localizer
            .format_text_or_none(&format!("{}{}", option.id(), LABEL_KEY_SUFFIX))
    }

    fn bind_boolean(&self, option: &ObservableBoolean, subs: &mut Vec<Subscription>) -> Rc<dyn ToggleWidget> {
        let check_box = self.toolkit.create_toggle();
        let widget_id = check_box.id();
        check_box.set_selected(option.value());

        check_box.on_user_change(Box::new({
            let option = option.clone();
            move |selected: bool| option.set(selected, Trigger::Widget(widget_id))
        }));

        let weak = Rc::downgrade(&check_box);
        subs.push(option.subscribe(move |evt| {
            if evt.trigger.is_widget(widget_id) {
                return;
            }
            if let Some(check_box) = weak.upgrade() {
                check_box.set_selected(evt.new_value);
            }
        }));

        check_box
    }

    fn bind_string(&self, option: &ObservableString, subs: &mut Vec<Subscription>) -> Rc<dyn TextWidget> {
        let text_field = self.toolkit.create_text(option.is_screened());
        let widget_id = text_field.id();
        let id = option.core().id().clone();

        let initial = option.value();
        text_field.set_text(&initial);
        apply_validation(
            text_field.as_ref(),
            self.registry,
            &id,
            &validate(option.validator(), &initial),
        );

        text_field.on_user_change(Box::new({
            let option = option.clone();
            let registry = self.registry.clone();
            let id = id.clone();
            let weak = Rc::downgrade(&text_field);
            move |text: &str| {
                let Some(text_field) = weak.upgrade() else {
                    return;
                };
                let outcome = validate(option.validator(), text);
                apply_validation(text_field.as_ref(), &registry, &id, &outcome);
                if outcome.is_valid() {
                    option.set(text, Trigger::Widget(widget_id));
                }
            }
        }));

        let weak = Rc::downgrade(&text_field);
        let registry = self.registry.clone();
        let validator = option.validator().cloned();
        subs.push(option.subscribe(move |evt| {
            if evt.trigger.is_widget(widget_id) {
                return;
            }
            if let Some(text_field) = weak.upgrade() {
                text_field.set_text(&evt.new_value);
                let outcome = validate(validator.as_ref(), &evt.new_value);
                apply_validation(text_field.as_ref(), &registry, &id, &outcome);
            }
        }));

        text_field
    }

    fn bind_enumeration(&self, option: &Rc<dyn EnumOption>, subs: &mut Vec<Subscription>) -> Rc<dyn ChoiceWidget> {
        let choices = EnumChoices::new(option.value_names(), self.localizer);
        let combo_box = self.toolkit.create_choice();
        let widget_id = combo_box.id();

        combo_box.set_items(choices.labels());
        combo_box.select_label(option.selected_index().and_then(|i| choices.label_at(i)));

        combo_box.on_user_change(Box::new({
            let option = option.clone();
            let choices = choices.clone();
            move |label: &str| match choices.index_of(label) {
                Some(index) => option.select_index(index, Trigger::Widget(widget_id)),
                None => log::warn!(
                    "Selected label '{}' matches no value of '{}'",
                    label,
                    option.core().id()
                ),
            }
        }));

        let weak = Rc::downgrade(&combo_box);
        subs.push(option.subscribe_index(Box::new(move |evt: &ChangeEvent<Option<usize>>| {
            if evt.trigger.is_widget(widget_id) {
                return;
            }
            if let Some(combo_box) = weak.upgrade() {
                combo_box.select_label(evt.new_value.and_then(|i| choices.label_at(i)));
            }
        })));

        combo_box
    }
}

/// Keep the editor enabled only while its option is writable and `disabled` is false
fn bind_enabled(
    option: &ObservableOption,
    editor: &Editor,
    disabled: &ObservableProperty<bool>,
) -> [Subscription; 2] {
    let writable = option.core().writable().clone();
    let refresh: Rc<dyn Fn()> = Rc::new({
        let writable = writable.clone();
        let disabled = disabled.clone();
        let editor = editor.clone();
        move || editor.set_enabled(writable.get() && !disabled.get())
    });
    refresh();

    let on_writable = {
        let refresh = refresh.clone();
        writable.subscribe(move |_| refresh())
    };
    let on_disabled = disabled.subscribe(move |_| refresh());
    [on_writable, on_disabled]
}

/// Silence the widget's user-change callback once the bindings go away
fn detach_user_change(editor: &Editor) -> Subscription {
    match editor {
        Editor::Toggle(w) => {
            let weak = Rc::downgrade(w);
            Subscription::new(move || {
                if let Some(w) = weak.upgrade() {
                    w.on_user_change(Box::new(|_: bool| {}));
                }
            })
        }
        Editor::Text(w) => {
            let weak = Rc::downgrade(w);
            Subscription::new(move || {
                if let Some(w) = weak.upgrade() {
                    w.on_user_change(Box::new(|_: &str| {}));
                }
            })
        }
        Editor::Choice(w) => {
            let weak = Rc::downgrade(w);
            Subscription::new(move || {
                if let Some(w) = weak.upgrade() {
                    w.on_user_change(Box::new(|_: &str| {}));
                }
            })
        }
    }
}

/// Ordered `(value name, localized label)` pairs of an enumeration option
///
/// Labels convert back to values by exact match; the first pair wins when two
/// values share a label.
#[derive(Debug, Clone)]
pub struct EnumChoices {
    pairs: Rc<[(String, String)]>,
}

impl EnumChoices {
    pub fn new(value_names: Vec<String>, localizer: &dyn Localizer) -> Self {
        let pairs = value_names
            .into_iter()
            .map(|name| {
                let label = localizer.format_text(&format!("{}{}", name, LABEL_KEY_SUFFIX));
                (name, label)
            })
            .collect();
        Self { pairs }
    }

    pub fn labels(&self) -> Vec<String> {
        self.pairs.iter().map(|(_, label)| label.clone()).collect()
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.pairs.get(index).map(|(_, label)| label.as_str())
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.pairs.iter().position(|(_, l)| l == label)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::BundleLocalizer;

    #[test]
    fn test_enum_choices_round_trip_through_labels() {
        let localizer = BundleLocalizer::new()
            .with("low.label", "Low")
            .with("high.label", "High");
        let choices = EnumChoices::new(vec!["low".into(), "high".into()], &localizer);

        assert_eq!(choices.labels(), vec!["Low", "High"]);
        for index in 0..choices.len() {
            let label = choices.label_at(index).unwrap();
            assert_eq!(choices.index_of(label), Some(index));
        }
        assert_eq!(choices.index_of("low"), None);
    }

    #[test]
    fn test_enum_choices_duplicate_label_resolves_to_first() {
        let localizer = BundleLocalizer::new()
            .with("a.label", "Same")
            .with("b.label", "Same");
        let choices = EnumChoices::new(vec!["a".into(), "b".into()], &localizer);
        assert_eq!(choices.index_of("Same"), Some(0));
    }

    #[test]
    fn test_missing_enum_label_falls_back_to_key() {
        let choices = EnumChoices::new(vec!["fast".into()], &BundleLocalizer::new());
        assert_eq!(choices.label_at(0), Some("fast.label"));
    }
}
