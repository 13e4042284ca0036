//! The closed set of option variants a property sheet can be built from

use super::{ChangeEvent, ObservableProperty, Subscription, Trigger};
use std::fmt;
use std::rc::Rc;

/// Stable option identity, used as the validation key and the localization key prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(Rc<str>);

impl OptionId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Rc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for OptionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Text validator: returns an error message for rejected text, `None` when valid
pub type Validator = Rc<dyn Fn(&str) -> Option<String>>;

/// Attributes shared by every option variant
#[derive(Clone, Debug)]
pub struct OptionCore {
    id: OptionId,
    writable: ObservableProperty<bool>,
}

impl OptionCore {
    pub fn new(id: impl Into<OptionId>) -> Self {
        Self {
            id: id.into(),
            writable: ObservableProperty::new(true),
        }
    }

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    /// Observable writability flag
    pub fn writable(&self) -> &ObservableProperty<bool> {
        &self.writable
    }

    pub fn is_writable(&self) -> bool {
        self.writable.get()
    }

    pub fn set_writable(&self, writable: bool) {
        self.writable.set(writable, Trigger::Program);
    }
}

/// Boolean option
#[derive(Clone, Debug)]
pub struct ObservableBoolean {
    core: OptionCore,
    value: ObservableProperty<bool>,
}

impl ObservableBoolean {
    pub fn new(id: impl Into<OptionId>, value: bool) -> Self {
        Self {
            core: OptionCore::new(id),
            value: ObservableProperty::new(value),
        }
    }

    pub fn core(&self) -> &OptionCore {
        &self.core
    }

    pub fn value(&self) -> bool {
        self.value.get()
    }

    pub fn set(&self, value: bool, trigger: Trigger) {
        self.value.set(value, trigger);
    }

    pub fn subscribe(&self, watcher: impl Fn(&ChangeEvent<bool>) + 'static) -> Subscription {
        self.value.subscribe(watcher)
    }
}

/// Text option, optionally screened (masked input) and validated
#[derive(Clone)]
pub struct ObservableString {
    core: OptionCore,
    value: ObservableProperty<String>,
    screened: bool,
    validator: Option<Validator>,
}

impl ObservableString {
    pub fn new(id: impl Into<OptionId>, value: impl Into<String>) -> Self {
        Self {
            core: OptionCore::new(id),
            value: ObservableProperty::new(value.into()),
            screened: false,
            validator: None,
        }
    }

    /// Mark as screened; editors mask the text
    pub fn screened(mut self, screened: bool) -> Self {
        self.screened = screened;
        self
    }

    pub fn with_validator(mut self, validator: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    pub fn with_shared_validator(mut self, validator: Option<Validator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn core(&self) -> &OptionCore {
        &self.core
    }

    pub fn is_screened(&self) -> bool {
        self.screened
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    pub fn set(&self, value: impl Into<String>, trigger: Trigger) {
        self.value.set(value.into(), trigger);
    }

    pub fn subscribe(&self, watcher: impl Fn(&ChangeEvent<String>) + 'static) -> Subscription {
        self.value.subscribe(watcher)
    }
}

impl fmt::Debug for ObservableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableString")
            .field("id", self.core.id())
            .field("screened", &self.screened)
            .field("validated", &self.validator.is_some())
            .finish()
    }
}

/// Option holding one value out of a fixed, ordered set
#[derive(Clone, Debug)]
pub struct ObservableEnum<E> {
    core: OptionCore,
    value: ObservableProperty<E>,
    all_values: Rc<[E]>,
}

impl<E: Clone + PartialEq + fmt::Display + 'static> ObservableEnum<E> {
    pub fn new(id: impl Into<OptionId>, value: E, all_values: impl IntoIterator<Item = E>) -> Self {
        Self {
            core: OptionCore::new(id),
            value: ObservableProperty::new(value),
            all_values: all_values.into_iter().collect(),
        }
    }

    pub fn core(&self) -> &OptionCore {
        &self.core
    }

    pub fn value(&self) -> E {
        self.value.get()
    }

    pub fn all_values(&self) -> &[E] {
        &self.all_values
    }

    pub fn set(&self, value: E, trigger: Trigger) {
        self.value.set(value, trigger);
    }

    pub fn subscribe(&self, watcher: impl Fn(&ChangeEvent<E>) + 'static) -> Subscription {
        self.value.subscribe(watcher)
    }

    fn index_of(&self, value: &E) -> Option<usize> {
        self.all_values.iter().position(|v| v == value)
    }
}

/// Type-erased view of an [`ObservableEnum`], addressed by position in `all_values`
pub trait EnumOption {
    fn core(&self) -> &OptionCore;

    /// Textual form of every allowed value, in order
    fn value_names(&self) -> Vec<String>;

    /// Position of the current value, `None` if it is not among the allowed values
    fn selected_index(&self) -> Option<usize>;

    /// Set the value at `index`; out-of-range indexes are ignored
    fn select_index(&self, index: usize, trigger: Trigger);

    /// Watch value changes, reported as positions
    fn subscribe_index(&self, watcher: Box<dyn Fn(&ChangeEvent<Option<usize>>)>) -> Subscription;
}

impl<E: Clone + PartialEq + fmt::Display + 'static> EnumOption for ObservableEnum<E> {
    fn core(&self) -> &OptionCore {
        &self.core
    }

    fn value_names(&self) -> Vec<String> {
        self.all_values.iter().map(|v| v.to_string()).collect()
    }

    fn selected_index(&self) -> Option<usize> {
        self.value.with(|v| self.index_of(v))
    }

    fn select_index(&self, index: usize, trigger: Trigger) {
        match self.all_values.get(index) {
            Some(value) => self.value.set(value.clone(), trigger),
            None => log::warn!(
                "Ignoring out-of-range selection {} for option '{}'",
                index,
                self.core.id()
            ),
        }
    }

    fn subscribe_index(&self, watcher: Box<dyn Fn(&ChangeEvent<Option<usize>>)>) -> Subscription {
        let all_values = self.all_values.clone();
        self.value.subscribe(move |evt| {
            let position = |value: &E| all_values.iter().position(|v| v == value);
            watcher(&ChangeEvent {
                old_value: position(&evt.old_value),
                new_value: position(&evt.new_value),
                trigger: evt.trigger,
            });
        })
    }
}

/// Option holding an opaque value; no editor can be built for it
#[derive(Clone, Debug)]
pub struct ObservableObject {
    core: OptionCore,
    value: ObservableProperty<serde_json::Value>,
}

impl ObservableObject {
    pub fn new(id: impl Into<OptionId>, value: serde_json::Value) -> Self {
        Self {
            core: OptionCore::new(id),
            value: ObservableProperty::new(value),
        }
    }

    pub fn core(&self) -> &OptionCore {
        &self.core
    }

    pub fn value(&self) -> serde_json::Value {
        self.value.get()
    }

    pub fn set(&self, value: serde_json::Value, trigger: Trigger) {
        self.value.set(value, trigger);
    }
}

/// Any option a property sheet accepts as input
#[derive(Clone)]
pub enum ObservableOption {
    Boolean(ObservableBoolean),
    String(ObservableString),
    Enumeration(Rc<dyn EnumOption>),
    Object(ObservableObject),
}

impl ObservableOption {
    pub fn enumeration<E: Clone + PartialEq + fmt::Display + 'static>(option: ObservableEnum<E>) -> Self {
        ObservableOption::Enumeration(Rc::new(option))
    }

    pub fn core(&self) -> &OptionCore {
        match self {
            ObservableOption::Boolean(o) => o.core(),
            ObservableOption::String(o) => o.core(),
            ObservableOption::Enumeration(o) => o.core(),
            ObservableOption::Object(o) => o.core(),
        }
    }

    pub fn id(&self) -> &OptionId {
        self.core().id()
    }

    /// Short variant name, as used in option definition files
    pub fn kind(&self) -> &'static str {
        match self {
            ObservableOption::Boolean(_) => "bool",
            ObservableOption::String(_) => "string",
            ObservableOption::Enumeration(_) => "enum",
            ObservableOption::Object(_) => "object",
        }
    }
}

impl From<ObservableBoolean> for ObservableOption {
    fn from(option: ObservableBoolean) -> Self {
        ObservableOption::Boolean(option)
    }
}

impl From<ObservableString> for ObservableOption {
    fn from(option: ObservableString) -> Self {
        ObservableOption::String(option)
    }
}

impl From<ObservableObject> for ObservableOption {
    fn from(option: ObservableObject) -> Self {
        ObservableOption::Object(option)
    }
}

impl fmt::Debug for ObservableOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableOption")
            .field("id", self.id())
            .field("kind", &self.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Level {
        Low,
        High,
    }

    impl fmt::Display for Level {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Level::Low => f.write_str("level.low"),
                Level::High => f.write_str("level.high"),
            }
        }
    }

    #[test]
    fn test_clones_share_value_and_writability() {
        let option = ObservableBoolean::new("ui.dark", false);
        let handle = option.clone();

        handle.set(true, Trigger::Program);
        handle.core().set_writable(false);

        assert!(option.value());
        assert!(!option.core().is_writable());
    }

    #[test]
    fn test_enum_erasure_reports_positions() {
        let option = ObservableEnum::new("ui.level", Level::Low, [Level::Low, Level::High]);
        let erased: Rc<dyn EnumOption> = Rc::new(option.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _sub = {
            let seen = seen.clone();
            erased.subscribe_index(Box::new(move |evt| {
                seen.borrow_mut().push((evt.old_value, evt.new_value))
            }))
        };

        assert_eq!(erased.value_names(), vec!["level.low", "level.high"]);
        assert_eq!(erased.selected_index(), Some(0));

        erased.select_index(1, Trigger::Program);
        assert_eq!(option.value(), Level::High);
        assert_eq!(*seen.borrow(), vec![(Some(0), Some(1))]);
    }

    #[test]
    fn test_enum_out_of_range_selection_is_ignored() {
        let option = ObservableEnum::new("ui.level", Level::High, [Level::Low, Level::High]);
        option.select_index(5, Trigger::Program);
        assert_eq!(option.value(), Level::High);
    }

    #[test]
    fn test_option_kind_and_id() {
        let option: ObservableOption = ObservableString::new("server.host", "localhost").into();
        assert_eq!(option.kind(), "string");
        assert_eq!(option.id().as_str(), "server.host");
    }
}
