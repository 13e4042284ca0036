//! Reactive property sheets
//!
//! Build a two-column editor grid from a list of observable options, keep
//! every editor bound to its option in both directions, and collect text
//! validation failures into one live registry.

pub mod config;
pub mod i18n;
pub mod observable;
pub mod sheet;
pub mod tui;

pub use i18n::{BundleLocalizer, Localizer};
pub use observable::{ObservableOption, OptionId, Trigger};
pub use sheet::{PropertySheet, PropertySheetBuilder, SheetError};
