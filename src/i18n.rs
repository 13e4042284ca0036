//! Text lookup used for row labels and enum value labels

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Localization capability consumed by the property sheet builder
pub trait Localizer {
    /// Resolve a key that is expected to exist
    fn format_text(&self, key: &str) -> String;

    /// Resolve a key that may be missing
    fn format_text_or_none(&self, key: &str) -> Option<String>;
}

/// Key → text bundle
///
/// Missing keys passed to [`Localizer::format_text`] resolve to the key itself.
#[derive(Debug, Clone, Default)]
pub struct BundleLocalizer {
    texts: HashMap<String, String>,
}

impl BundleLocalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, text: &str) -> Self {
        self.insert(key, text);
        self
    }

    pub fn insert(&mut self, key: &str, text: &str) {
        self.texts.insert(key.to_string(), text.to_string());
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Parse a TOML locale document; nested tables become dotted keys
    ///
    /// ```toml
    /// [server.host]
    /// label = "Host name"
    /// ```
    /// yields `server.host.label = "Host name"`.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::Table = source.parse().context("Failed to parse locale file")?;
        let mut bundle = Self::new();
        for (key, value) in flatten_table(&table) {
            match value {
                toml::Value::String(text) => bundle.insert(&key, text),
                other => anyhow::bail!(
                    "Locale entry '{}' must be a string, got {}",
                    key,
                    other.type_str()
                ),
            }
        }
        Ok(bundle)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read locale file: {:?}", path))?;
        let bundle = Self::from_toml_str(&source)
            .with_context(|| format!("Invalid locale file: {:?}", path))?;
        log::debug!("Loaded {} locale entries from {:?}", bundle.len(), path);
        Ok(bundle)
    }
}

impl Localizer for BundleLocalizer {
    fn format_text(&self, key: &str) -> String {
        match self.texts.get(key) {
            Some(text) => text.clone(),
            None => {
                log::warn!("Missing localized text for '{}'", key);
                key.to_string()
            }
        }
    }

    fn format_text_or_none(&self, key: &str) -> Option<String> {
        self.texts.get(key).cloned()
    }
}

/// Flatten nested TOML tables into `(dotted.key, leaf)` pairs
fn flatten_table(table: &toml::Table) -> Vec<(String, &toml::Value)> {
    let mut out = Vec::new();
    flatten_into(None, table, &mut out);
    out
}

fn flatten_into<'a>(prefix: Option<&str>, table: &'a toml::Table, out: &mut Vec<(String, &'a toml::Value)>) {
    for (key, value) in table {
        let full_key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };
        match value {
            toml::Value::Table(nested) => flatten_into(Some(&full_key), nested, out),
            leaf => out.push((full_key, leaf)),
        }
    }
}
