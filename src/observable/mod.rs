//! Observable values with synchronous change notification
//!
//! Everything in a property sheet runs on one thread, so watchers are plain
//! `Rc` closures. A notification is delivered to a snapshot of the watcher list
//! taken when the mutation happens: watchers may subscribe, unsubscribe or set
//! other properties from inside their callback without invalidating the
//! dispatch in progress.

pub mod option;

pub use option::{
    EnumOption, ObservableBoolean, ObservableEnum, ObservableObject, ObservableOption,
    ObservableString, OptionCore, OptionId, Validator,
};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity of an editor widget, used as the trigger of the writes it performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    /// Allocate a fresh, process-unique widget id
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

/// The agent that performed a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Programmatic change with no originating widget
    Program,
    /// Change made through an editor widget
    Widget(WidgetId),
}

impl Trigger {
    /// True when the write originated from the given widget
    pub fn is_widget(&self, id: WidgetId) -> bool {
        *self == Trigger::Widget(id)
    }
}

/// Delivered to watchers on every `set`
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent<T> {
    pub old_value: T,
    pub new_value: T,
    pub trigger: Trigger,
}

type Watcher<E> = Rc<dyn Fn(&E)>;

struct WatcherSlots<E> {
    next_id: Cell<u64>,
    slots: RefCell<Vec<(u64, Watcher<E>)>>,
}

/// Ordered list of watchers for one event type
pub struct WatcherList<E> {
    inner: Rc<WatcherSlots<E>>,
}

impl<E: 'static> WatcherList<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(WatcherSlots {
                next_id: Cell::new(0),
                slots: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a watcher; it stays registered until the returned guard is dropped
    pub fn subscribe(&self, watcher: impl Fn(&E) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.slots.borrow_mut().push((id, Rc::new(watcher)));

        let weak: Weak<WatcherSlots<E>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(slots) = weak.upgrade() {
                slots.slots.borrow_mut().retain(|(slot_id, _)| *slot_id != id);
            }
        })
    }

    /// Deliver an event to every watcher, in registration order
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Watcher<E>> = self
            .inner
            .slots
            .borrow()
            .iter()
            .map(|(_, watcher)| watcher.clone())
            .collect();
        for watcher in snapshot {
            watcher(event);
        }
    }
}

impl<E> WatcherList<E> {
    pub fn len(&self) -> usize {
        self.inner.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for WatcherList<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a registered watcher. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the watcher"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Unsubscribe now instead of on drop
    pub fn cancel(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

struct PropertyInner<T> {
    value: RefCell<T>,
    watchers: WatcherList<ChangeEvent<T>>,
}

/// A shared, mutable value that notifies watchers on every write
///
/// Cloning yields another handle to the same value.
pub struct ObservableProperty<T> {
    inner: Rc<PropertyInner<T>>,
}

impl<T> Clone for ObservableProperty<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> ObservableProperty<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(PropertyInner {
                value: RefCell::new(value),
                watchers: WatcherList::new(),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value and notify all watchers, even when the value is unchanged
    pub fn set(&self, value: T, trigger: Trigger) {
        let old_value = self.inner.value.replace(value.clone());
        let event = ChangeEvent {
            old_value,
            new_value: value,
            trigger,
        };
        self.inner.watchers.notify(&event);
    }

    pub fn subscribe(&self, watcher: impl Fn(&ChangeEvent<T>) + 'static) -> Subscription {
        self.inner.watchers.subscribe(watcher)
    }

    pub fn watcher_count(&self) -> usize {
        self.inner.watchers.len()
    }

    /// True when both handles point at the same value
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableProperty")
            .field("value", &*self.inner.value.borrow())
            .field("watchers", &self.inner.watchers.len())
            .finish()
    }
}
