//! Option definitions
//!
//! Definitions are the serializable description of an option; instantiating
//! one produces the live observable option a property sheet binds to.

pub mod builder;
pub mod types;

pub use builder::OptionDefBuilder;
pub use types::{OptionDefinition, OptionType, OptionValue, ValidationRules};
