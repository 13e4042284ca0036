//! Core types for option definitions

use crate::observable::{
    ObservableBoolean, ObservableEnum, ObservableObject, ObservableOption, ObservableString,
    Validator,
};
use crate::sheet::validators;
use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A plain option value, as read from or written to a values file
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    String(String),
    Object(serde_json::Value),
}

impl OptionValue {
    /// Get as bool, returning error if wrong type
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            OptionValue::Bool(v) => Ok(*v),
            _ => anyhow::bail!("Expected Bool, got {:?}", self),
        }
    }

    /// Get as string, returning error if wrong type
    pub fn as_string(&self) -> Result<String> {
        match self {
            OptionValue::String(v) => Ok(v.clone()),
            _ => anyhow::bail!("Expected String, got {:?}", self),
        }
    }

    pub fn from_toml(value: &toml::Value) -> Result<Self> {
        Ok(match value {
            toml::Value::Boolean(b) => OptionValue::Bool(*b),
            toml::Value::String(s) => OptionValue::String(s.clone()),
            other => OptionValue::Object(
                serde_json::to_value(other).context("Failed to convert TOML value")?,
            ),
        })
    }

    pub fn to_toml(&self) -> Result<toml::Value> {
        Ok(match self {
            OptionValue::Bool(b) => toml::Value::Boolean(*b),
            OptionValue::String(s) => toml::Value::String(s.clone()),
            OptionValue::Object(v) => {
                toml::Value::try_from(v).context("Object value has no TOML representation")?
            }
        })
    }

    /// Current value of a live option
    ///
    /// Enumerations report the textual form of the selected value, or `None`
    /// when the current value is outside the allowed set.
    pub fn of(option: &ObservableOption) -> Option<Self> {
        match option {
            ObservableOption::Boolean(o) => Some(OptionValue::Bool(o.value())),
            ObservableOption::String(o) => Some(OptionValue::String(o.value())),
            ObservableOption::Enumeration(o) => {
                let index = o.selected_index()?;
                o.value_names().into_iter().nth(index).map(OptionValue::String)
            }
            ObservableOption::Object(o) => Some(OptionValue::Object(o.value())),
        }
    }
}

/// Declarative text validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationRules {
    /// Message reported for empty or blank text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_empty: Option<String>,

    /// Maximum length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Regular expression the whole text must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Message reported when `pattern` does not match; requires `pattern`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<String>,
}

impl ValidationRules {
    pub fn is_empty(&self) -> bool {
        self.not_empty.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.pattern_message.is_none()
    }

    /// Compile the rules into one validator, checked in declaration order
    pub fn to_validator(&self) -> Result<Option<Validator>> {
        if self.pattern.is_none() && self.pattern_message.is_some() {
            bail!("pattern_message is set but there is no pattern");
        }
        let mut checks = Vec::new();
        if let Some(message) = &self.not_empty {
            checks.push(validators::not_empty(message.as_str()));
        }
        if let Some(max) = self.max_length {
            checks.push(validators::max_length(max));
        }
        if let Some(pattern) = &self.pattern {
            let regex = Regex::new(pattern)
                .with_context(|| format!("Invalid validation pattern '{}'", pattern))?;
            let message = self
                .pattern_message
                .clone()
                .unwrap_or_else(|| format!("Value must match {}", pattern));
            checks.push(validators::pattern(regex, message));
        }

        Ok(match checks.len() {
            0 => None,
            1 => checks.pop(),
            _ => Some(validators::all_of(checks)),
        })
    }
}

/// Type definition with its default value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OptionType {
    Bool {
        #[serde(default)]
        default: bool,
    },
    String {
        #[serde(default)]
        default: String,
        #[serde(default)]
        screened: bool,
        #[serde(default, skip_serializing_if = "ValidationRules::is_empty")]
        validation: ValidationRules,
    },
    Enum {
        variants: Vec<String>,
        /// First variant when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    Object {
        #[serde(default)]
        default: serde_json::Value,
    },
}

impl OptionType {
    /// Short name, as written in sheet files
    pub fn name(&self) -> &'static str {
        match self {
            OptionType::Bool { .. } => "bool",
            OptionType::String { .. } => "string",
            OptionType::Enum { .. } => "enum",
            OptionType::Object { .. } => "object",
        }
    }
}

fn default_writable() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Complete definition of one option of a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Full id with namespace (e.g., "server.host")
    pub id: String,

    #[serde(default = "default_writable", skip_serializing_if = "is_true")]
    pub writable: bool,

    #[serde(flatten)]
    pub ty: OptionType,
}

impl OptionDefinition {
    /// Create the live option described by this definition
    pub fn instantiate(&self) -> Result<ObservableOption> {
        let option: ObservableOption = match &self.ty {
            OptionType::Bool { default } => ObservableBoolean::new(self.id.as_str(), *default).into(),
            OptionType::String { default, screened, validation } => {
                let validator = validation
                    .to_validator()
                    .with_context(|| format!("Option '{}'", self.id))?;
                ObservableString::new(self.id.as_str(), default.as_str())
                    .screened(*screened)
                    .with_shared_validator(validator)
                    .into()
            }
            OptionType::Enum { variants, default } => {
                if variants.is_empty() {
                    anyhow::bail!("Enum option '{}' has no variants", self.id);
                }
                let initial = match default {
                    Some(value) if variants.contains(value) => value.clone(),
                    Some(value) => anyhow::bail!(
                        "Default '{}' of option '{}' is not a valid variant. Valid values: {:?}",
                        value,
                        self.id,
                        variants
                    ),
                    None => variants[0].clone(),
                };
                ObservableOption::enumeration(ObservableEnum::new(
                    self.id.as_str(),
                    initial,
                    variants.iter().cloned(),
                ))
            }
            OptionType::Object { default } => {
                ObservableObject::new(self.id.as_str(), default.clone()).into()
            }
        };

        if !self.writable {
            option.core().set_writable(false);
        }
        Ok(option)
    }
}
