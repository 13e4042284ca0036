//! Validation registry and validity marking
//!
//! The registry maps option ids to their current error message. String editor
//! bindings are its only writers; callers get a read-only live view and can
//! subscribe to changes, e.g. to disable a save action while errors exist.

use super::widget::EditorWidget;
use crate::observable::{OptionId, Subscription, Validator, WatcherList};
use regex::Regex;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A change to the registry contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationChange {
    /// An entry was added or its message replaced
    Upserted { id: OptionId, message: String },
    /// An entry was removed
    Removed { id: OptionId },
}

struct RegistryInner {
    errors: RefCell<BTreeMap<OptionId, String>>,
    watchers: WatcherList<ValidationChange>,
}

/// Live mapping from option id to validation error message
///
/// Cloning yields another handle onto the same registry.
#[derive(Clone)]
pub struct ValidationRegistry {
    inner: Rc<RegistryInner>,
}

impl ValidationRegistry {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                errors: RefCell::new(BTreeMap::new()),
                watchers: WatcherList::new(),
            }),
        }
    }

    pub fn get(&self, id: &OptionId) -> Option<String> {
        self.inner.errors.borrow().get(id).cloned()
    }

    pub fn contains(&self, id: &OptionId) -> bool {
        self.inner.errors.borrow().contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.errors.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.errors.borrow().len()
    }

    /// Current entries, ordered by option id
    pub fn snapshot(&self) -> BTreeMap<OptionId, String> {
        self.inner.errors.borrow().clone()
    }

    /// Watch every upsert and removal
    pub fn subscribe(&self, watcher: impl Fn(&ValidationChange) + 'static) -> Subscription {
        self.inner.watchers.subscribe(watcher)
    }

    pub(crate) fn upsert(&self, id: &OptionId, message: &str) {
        let previous = self
            .inner
            .errors
            .borrow_mut()
            .insert(id.clone(), message.to_string());
        if previous.as_deref() == Some(message) {
            return;
        }
        log::debug!("Validation error for '{}': {}", id, message);
        self.inner.watchers.notify(&ValidationChange::Upserted {
            id: id.clone(),
            message: message.to_string(),
        });
    }

    pub(crate) fn remove(&self, id: &OptionId) {
        let removed = self.inner.errors.borrow_mut().remove(id);
        if removed.is_some() {
            log::debug!("Validation error cleared for '{}'", id);
            self.inner
                .watchers
                .notify(&ValidationChange::Removed { id: id.clone() });
        }
    }
}

impl std::fmt::Debug for ValidationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.inner.errors.borrow().iter()).finish()
    }
}

/// Result of running a validator over a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(String),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// Run an optional validator; empty messages count as valid
pub fn validate(validator: Option<&Validator>, text: &str) -> Validation {
    match validator.and_then(|v| v(text)) {
        Some(message) if !message.is_empty() => Validation::Invalid(message),
        _ => Validation::Valid,
    }
}

/// Reflect a validation outcome on the widget and in the registry, together
pub(crate) fn apply_validation<W: EditorWidget + ?Sized>(
    widget: &W,
    registry: &ValidationRegistry,
    id: &OptionId,
    outcome: &Validation,
) {
    match outcome {
        Validation::Valid => {
            widget.mark_valid();
            registry.remove(id);
        }
        Validation::Invalid(message) => {
            widget.mark_invalid();
            registry.upsert(id, message);
        }
    }
}

/// Reusable validators for text options
pub mod validators {
    use super::*;

    /// Reject empty or whitespace-only text
    pub fn not_empty(message: impl Into<String>) -> Validator {
        let message = message.into();
        Rc::new(move |text: &str| text.trim().is_empty().then(|| message.clone()))
    }

    /// Reject text longer than `max` characters
    pub fn max_length(max: usize) -> Validator {
        Rc::new(move |text: &str| {
            let len = text.chars().count();
            (len > max).then(|| format!("Length {} exceeds maximum {}", len, max))
        })
    }

    /// Reject text that does not match `pattern`
    pub fn pattern(pattern: Regex, message: impl Into<String>) -> Validator {
        let message = message.into();
        Rc::new(move |text: &str| (!pattern.is_match(text)).then(|| message.clone()))
    }

    /// First failing validator wins
    pub fn all_of(validators: Vec<Validator>) -> Validator {
        Rc::new(move |text: &str| validators.iter().find_map(|v| v(text)))
    }
}
