//! Reading and writing option values as TOML

use super::options::OptionValue;
use crate::observable::{ObservableOption, Trigger};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a values file
pub fn load_values(path: impl AsRef<Path>) -> Result<toml::Table> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file {}", path.display()))?;
    source
        .parse::<toml::Table>()
        .with_context(|| format!("Failed to parse values file {}", path.display()))
}

/// Apply every value in `table` to the matching option, programmatically
///
/// Keys may be written flat (`"server.host" = ".."`) or as nested tables. A
/// table whose dotted path names an option is taken as that option's value
/// instead of being descended into. Unknown keys are logged and skipped.
/// Returns the number of values applied.
pub fn apply_values(table: &toml::Table, options: &[ObservableOption]) -> Result<usize> {
    let mut applied = 0;
    apply_table("", table, options, &mut applied)?;
    log::info!("Applied {} option values", applied);
    Ok(applied)
}

fn apply_table(prefix: &str, table: &toml::Table, options: &[ObservableOption], applied: &mut usize) -> Result<()> {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        if let Some(option) = options.iter().find(|o| o.id().as_str() == path) {
            let value = OptionValue::from_toml(value)?;
            apply_value(option, value).with_context(|| format!("Invalid value for '{}'", path))?;
            *applied += 1;
            continue;
        }

        match value {
            toml::Value::Table(nested) => apply_table(&path, nested, options, applied)?,
            _ => log::warn!("Ignoring value for unknown option '{}'", path),
        }
    }
    Ok(())
}

/// Set one option from a plain value, checking it against the option variant
pub fn apply_value(option: &ObservableOption, value: OptionValue) -> Result<()> {
    log::debug!("Setting '{}' to {:?}", option.id(), value);
    match option {
        ObservableOption::Boolean(o) => o.set(value.as_bool()?, Trigger::Program),
        ObservableOption::String(o) => o.set(value.as_string()?, Trigger::Program),
        ObservableOption::Enumeration(o) => {
            let name = value.as_string()?;
            let names = o.value_names();
            let index = names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| anyhow::anyhow!("Value '{}' is not a valid variant. Valid values: {:?}", name, names))?;
            o.select_index(index, Trigger::Program);
        }
        ObservableOption::Object(o) => {
            let json = match value {
                OptionValue::Bool(b) => serde_json::Value::Bool(b),
                OptionValue::String(s) => serde_json::Value::String(s),
                OptionValue::Object(v) => v,
            };
            o.set(json, Trigger::Program);
        }
    }
    Ok(())
}

/// Current values of `options` as a flat table keyed by option id
///
/// Enumerations outside their allowed set are left out.
pub fn export_values<'a>(options: impl IntoIterator<Item = &'a ObservableOption>) -> Result<toml::Table> {
    let mut table = toml::Table::new();
    for option in options {
        match OptionValue::of(option) {
            Some(value) => {
                let value = value
                    .to_toml()
                    .with_context(|| format!("Failed to export '{}'", option.id()))?;
                table.insert(option.id().to_string(), value);
            }
            None => log::warn!("Option '{}' has no exportable value", option.id()),
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::{ObservableBoolean, ObservableEnum, ObservableObject, ObservableString};

    fn options() -> Vec<ObservableOption> {
        vec![
            ObservableString::new("server.host", "localhost").into(),
            ObservableBoolean::new("server.tls", false).into(),
            ObservableOption::enumeration(ObservableEnum::new(
                "ui.theme",
                "mocha".to_string(),
                ["mocha".to_string(), "latte".to_string()],
            )),
            ObservableObject::new("ui.layout", serde_json::Value::Null).into(),
        ]
    }

    #[test]
    fn test_apply_nested_and_flat_keys() {
        let options = options();
        let table: toml::Table = r#"
            "ui.theme" = "latte"
            unknown = 1

            [server]
            host = "example.org"
            tls = true

            [ui.layout]
            columns = 2
        "#
        .parse()
        .unwrap();

        assert_eq!(apply_values(&table, &options).unwrap(), 4);

        let exported = export_values(&options).unwrap();
        assert_eq!(exported["server.host"].as_str(), Some("example.org"));
        assert_eq!(exported["server.tls"].as_bool(), Some(true));
        assert_eq!(exported["ui.theme"].as_str(), Some("latte"));
        assert_eq!(exported["ui.layout"]["columns"].as_integer(), Some(2));
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let options = options();
        let table: toml::Table = "\"server.tls\" = \"yes\"".parse().unwrap();
        let err = apply_values(&table, &options).unwrap_err();
        assert!(format!("{:#}", err).contains("server.tls"));
    }

    #[test]
    fn test_unknown_enum_variant_rejected() {
        let options = options();
        let table: toml::Table = "\"ui.theme\" = \"solarized\"".parse().unwrap();
        assert!(apply_values(&table, &options).is_err());
    }
}
