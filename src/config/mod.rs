//! Sheet files, values files and option definitions

pub mod options;
pub mod values;

pub use options::{OptionDefBuilder, OptionDefinition, OptionType, OptionValue, ValidationRules};
pub use values::{apply_value, apply_values, export_values, load_values};

use crate::observable::ObservableOption;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Ordered list of option definitions, as stored in a sheet file
///
/// ```toml
/// [[option]]
/// id = "server.host"
/// type = "string"
/// default = "localhost"
///
/// [option.validation]
/// not_empty = "Host is required"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetDefinition {
    #[serde(rename = "option", default)]
    pub options: Vec<OptionDefinition>,
}

impl SheetDefinition {
    pub fn new(options: Vec<OptionDefinition>) -> Result<Self> {
        let sheet = Self { options };
        sheet.check_unique_ids()?;
        Ok(sheet)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let sheet: Self = toml::from_str(source).context("Failed to parse sheet definition")?;
        sheet.check_unique_ids()?;
        log::debug!("Parsed sheet definition with {} options", sheet.options.len());
        Ok(sheet)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sheet file {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("Invalid sheet file {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize sheet definition")
    }

    /// Create the live options, in definition order
    pub fn instantiate(&self) -> Result<Vec<ObservableOption>> {
        self.options.iter().map(OptionDefinition::instantiate).collect()
    }

    fn check_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for def in &self.options {
            if !seen.insert(def.id.as_str()) {
                anyhow::bail!("Option '{}' is defined more than once", def.id);
            }
        }
        Ok(())
    }
}
