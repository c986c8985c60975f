//! Marker definitions and the registry that catalogs them.
//!
//! Generators and output rules are exposed on the command line as markers:
//! `obj:year=2024` selects the `obj` generator with its `year` field set,
//! `output:obj:dir=out` routes its output. Each marker is a [`Definition`]
//! carrying a field schema and a [`Binding`] that says what selecting it
//! means.

mod help;
mod registry;

pub use help::{DefinitionHelp, DetailedHelp};
pub use registry::Registry;

use crate::error::RegistryError;
use crate::plugin::{GeneratorPlugin, OutputRulePlugin};
use serde::Serialize;
use std::fmt;

/// What kind of declaration a marker describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTarget {
    Package,
    Type,
    Field,
}

impl fmt::Display for MarkerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarkerTarget::Package => "package",
            MarkerTarget::Type => "type",
            MarkerTarget::Field => "field",
        })
    }
}

/// One argument accepted by a marker.
///
/// A field with an empty name is the anonymous field, written as
/// `name=value` instead of `name:field=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub type_name: String,
    pub optional: bool,
    pub help: Option<DetailedHelp>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            optional: false,
            help: None,
        }
    }

    pub fn anonymous(type_name: impl Into<String>) -> Self {
        Self::new("", type_name)
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_help(mut self, summary: impl Into<String>) -> Self {
        self.help = Some(DetailedHelp::new(summary));
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// What selecting a marker on the command line does.
#[derive(Clone, Default)]
pub enum Binding {
    /// A marker understood in source code, not an option.
    #[default]
    Source,
    /// Selects a generator.
    Generator(GeneratorPlugin),
    /// Routes output; `generator` is `None` for the tool-wide default.
    Output {
        generator: Option<String>,
        rule: OutputRulePlugin,
    },
    /// Adds package roots to load.
    Paths,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Source => f.write_str("Source"),
            Binding::Generator(_) => f.write_str("Generator"),
            Binding::Output { generator, .. } => {
                f.debug_struct("Output").field("generator", generator).finish()
            }
            Binding::Paths => f.write_str("Paths"),
        }
    }
}

/// A named marker with its field schema.
#[derive(Debug, Clone)]
pub struct Definition {
    name: String,
    target: MarkerTarget,
    fields: Vec<FieldSpec>,
    binding: Binding,
}

impl Definition {
    /// Create a source marker definition.
    ///
    /// Fails when the name is empty or contains characters that would make
    /// it ambiguous on the command line (whitespace, `=` or `,`).
    pub fn new(
        name: impl Into<String>,
        target: MarkerTarget,
        fields: Vec<FieldSpec>,
    ) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::InvalidName {
                name,
                reason: "name is empty",
            });
        }
        if name.chars().any(|c| c.is_whitespace() || c == '=' || c == ',') {
            return Err(RegistryError::InvalidName {
                name,
                reason: "name contains whitespace, '=' or ','",
            });
        }
        if name.starts_with(':') || name.ends_with(':') || name.contains("::") {
            return Err(RegistryError::InvalidName {
                name,
                reason: "name has an empty ':' segment",
            });
        }
        Ok(Self {
            name,
            target,
            fields,
            binding: Binding::Source,
        })
    }

    pub fn bound_to(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> MarkerTarget {
        self.target
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        let err = Definition::new("", MarkerTarget::Package, Vec::new()).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName { .. }));
    }

    #[test]
    fn rejects_separator_characters() {
        for name in ["a b", "a=b", "a,b", ":a", "a:", "a::b"] {
            assert!(
                Definition::new(name, MarkerTarget::Package, Vec::new()).is_err(),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_colon_separated_names() {
        let def = Definition::new("output:obj:dir", MarkerTarget::Package, Vec::new()).unwrap();
        assert_eq!(def.name(), "output:obj:dir");
        assert!(matches!(def.binding(), Binding::Source));
    }

    #[test]
    fn finds_fields_by_name() {
        let def = Definition::new(
            "obj",
            MarkerTarget::Package,
            vec![FieldSpec::new("year", "string").optional(), FieldSpec::anonymous("string")],
        )
        .unwrap();
        assert!(def.field("year").unwrap().optional);
        assert!(def.field("").unwrap().is_anonymous());
        assert!(def.field("missing").is_none());
    }
}
