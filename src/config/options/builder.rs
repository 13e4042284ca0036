//! Fluent builder API for creating option definitions

use super::types::{OptionDefinition, OptionType, ValidationRules};
use anyhow::Result;

/// Builder for creating option definitions with a fluent API
pub struct OptionDefBuilder {
    namespace: String,
    local_key: String,
    ty: Option<OptionType>,
    writable: bool,
    screened: bool,
    rules: ValidationRules,
}

impl OptionDefBuilder {
    /// Create a new builder for an option in a namespace
    pub fn new(namespace: &str, local_key: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            local_key: local_key.to_string(),
            ty: None,
            writable: true,
            screened: false,
            rules: ValidationRules::default(),
        }
    }

    /// Define as a boolean type with default value
    pub fn bool_type(mut self, default: bool) -> Self {
        self.ty = Some(OptionType::Bool { default });
        self
    }

    /// Define as a text type with default value
    pub fn string_type(mut self, default: &str) -> Self {
        self.ty = Some(OptionType::String {
            default: default.to_string(),
            screened: false,
            validation: ValidationRules::default(),
        });
        self
    }

    /// Define as an enum type with allowed variants and default value
    pub fn enum_type(mut self, variants: Vec<&str>, default: &str) -> Self {
        self.ty = Some(OptionType::Enum {
            variants: variants.iter().map(|s| s.to_string()).collect(),
            default: Some(default.to_string()),
        });
        self
    }

    /// Define as an opaque object; sheets cannot edit it
    pub fn object_type(mut self, default: serde_json::Value) -> Self {
        self.ty = Some(OptionType::Object { default });
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Mask the text in editors (passwords, tokens)
    pub fn screened(mut self) -> Self {
        self.screened = true;
        self
    }

    pub fn not_empty(mut self, message: &str) -> Self {
        self.rules.not_empty = Some(message.to_string());
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.rules.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: &str, message: &str) -> Self {
        self.rules.pattern = Some(pattern.to_string());
        self.rules.pattern_message = Some(message.to_string());
        self
    }

    /// Build the option definition
    ///
    /// Returns an error if the type is missing or text-only settings were
    /// applied to another type
    pub fn build(self) -> Result<OptionDefinition> {
        let ty = self
            .ty
            .ok_or_else(|| anyhow::anyhow!("type is required (use bool_type, string_type, enum_type, etc.)"))?;

        let id = format!("{}.{}", self.namespace, self.local_key);

        let ty = match ty {
            OptionType::String { default, .. } => OptionType::String {
                default,
                screened: self.screened,
                validation: self.rules,
            },
            other => {
                if self.screened || !self.rules.is_empty() {
                    anyhow::bail!(
                        "Option '{}': screening and validation apply only to string options, not {}",
                        id,
                        other.name()
                    );
                }
                other
            }
        };

        Ok(OptionDefinition {
            id,
            writable: self.writable,
            ty,
        })
    }
}
