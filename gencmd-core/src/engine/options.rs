//! Resolution of raw command-line options against a marker registry.
//!
//! Each raw option names a registered marker, optionally followed by
//! arguments:
//!
//! | Form | Meaning |
//! |------|---------|
//! | `obj` | select marker `obj` with no arguments |
//! | `obj:year=2024,headerFile=h.txt` | named arguments |
//! | `obj:verbose` | bare argument, same as `verbose=true` |
//! | `output:dir=out` | anonymous argument |
//!
//! Marker names may themselves contain `:`, so the longest registered name
//! that prefixes the option wins.

use crate::error::OptionsError;
use crate::markers::{Binding, Definition, Registry};
use crate::plugin::{GeneratorPlugin, OutputRulePlugin};
use std::collections::{BTreeMap, HashMap};

/// Arguments given to a marker on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerArgs {
    values: BTreeMap<String, String>,
}

impl MarkerArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Value of the anonymous field (`name=value`).
    pub fn anonymous(&self) -> Option<&str> {
        self.get("")
    }

    /// Whether a boolean field was set to `true`.
    pub fn flag(&self, field: &str) -> bool {
        self.get(field) == Some("true")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }
}

/// An output rule together with the arguments it was selected with.
#[derive(Clone)]
pub struct OutputBinding {
    pub rule: OutputRulePlugin,
    pub args: MarkerArgs,
}

pub(crate) struct SelectedGenerator {
    pub name: String,
    pub plugin: GeneratorPlugin,
    pub args: MarkerArgs,
}

#[derive(Default)]
pub(crate) struct ResolvedOptions {
    /// In the order they were first given.
    pub generators: Vec<SelectedGenerator>,
    pub generator_outputs: HashMap<String, OutputBinding>,
    pub default_output: Option<OutputBinding>,
    pub paths: Vec<String>,
}

pub(crate) fn resolve(registry: &Registry, raw: &[String]) -> Result<ResolvedOptions, OptionsError> {
    let mut resolved = ResolvedOptions::default();

    for option in raw {
        let (definition, args) = parse_option(registry, option)?;
        match definition.binding() {
            Binding::Generator(plugin) => {
                let name = definition.name().to_string();
                match resolved.generators.iter_mut().find(|g| g.name == name) {
                    Some(existing) => existing.args = args,
                    None => resolved.generators.push(SelectedGenerator {
                        name,
                        plugin: plugin.clone(),
                        args,
                    }),
                }
            }
            Binding::Output { generator, rule } => {
                let binding = OutputBinding {
                    rule: rule.clone(),
                    args,
                };
                match generator {
                    Some(generator) => {
                        resolved.generator_outputs.insert(generator.clone(), binding);
                    }
                    None => resolved.default_output = Some(binding),
                }
            }
            Binding::Paths => {
                if let Some(paths) = args.anonymous() {
                    resolved
                        .paths
                        .extend(paths.split(';').filter(|p| !p.is_empty()).map(str::to_string));
                }
            }
            Binding::Source => return Err(OptionsError::UnknownOption(option.clone())),
        }
    }

    Ok(resolved)
}

/// Match an option against the registry and parse its arguments.
pub(crate) fn parse_option<'r>(
    registry: &'r Registry,
    option: &str,
) -> Result<(&'r Definition, MarkerArgs), OptionsError> {
    let definition = registry
        .definitions()
        .filter(|d| names_option(d.name(), option))
        .max_by_key(|d| d.name().len())
        .ok_or_else(|| OptionsError::UnknownOption(option.to_string()))?;

    let rest = &option[definition.name().len()..];
    let args = parse_args(definition, rest)?;
    check_required(definition, &args)?;
    Ok((definition, args))
}

fn names_option(name: &str, option: &str) -> bool {
    match option.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with(':') || rest.starts_with('='),
        None => false,
    }
}

fn parse_args(definition: &Definition, rest: &str) -> Result<MarkerArgs, OptionsError> {
    let mut args = MarkerArgs::new();
    let malformed = || OptionsError::MalformedArgument {
        option: definition.name().to_string(),
        argument: rest.to_string(),
    };

    if rest.is_empty() {
        return Ok(args);
    }

    if let Some(value) = rest.strip_prefix('=') {
        if definition.field("").is_none() {
            return Err(OptionsError::UnknownField {
                option: definition.name().to_string(),
                field: String::new(),
            });
        }
        args.insert("", value);
        return Ok(args);
    }

    let list = rest.strip_prefix(':').ok_or_else(malformed)?;
    for argument in list.split(',') {
        let (field, value) = match argument.split_once('=') {
            Some((field, value)) => (field, value),
            None => (argument, "true"),
        };
        if field.is_empty() {
            return Err(malformed());
        }
        if definition.field(field).is_none() {
            return Err(OptionsError::UnknownField {
                option: definition.name().to_string(),
                field: field.to_string(),
            });
        }
        args.insert(field, value);
    }
    Ok(args)
}

fn check_required(definition: &Definition, args: &MarkerArgs) -> Result<(), OptionsError> {
    match definition
        .fields()
        .iter()
        .find(|f| !f.optional && args.get(&f.name).is_none())
    {
        Some(missing) => Err(OptionsError::MissingField {
            option: definition.name().to_string(),
            field: missing.name.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{FieldSpec, MarkerTarget};

    fn registry() -> Registry {
        let mut reg = Registry::new();
        reg.register_all([
            Definition::new(
                "obj",
                MarkerTarget::Package,
                vec![
                    FieldSpec::new("year", "string").optional(),
                    FieldSpec::new("verbose", "bool").optional(),
                ],
            )
            .unwrap(),
            Definition::new("output:dir", MarkerTarget::Package, vec![FieldSpec::anonymous("string")])
                .unwrap(),
            Definition::new(
                "output:obj:dir",
                MarkerTarget::Package,
                vec![FieldSpec::anonymous("string")],
            )
            .unwrap(),
            Definition::new("strict", MarkerTarget::Package, vec![FieldSpec::new("level", "int")])
                .unwrap(),
        ])
        .unwrap();
        reg
    }

    #[test]
    fn bare_marker_has_no_args() {
        let reg = registry();
        let (def, args) = parse_option(&reg, "obj").unwrap();
        assert_eq!(def.name(), "obj");
        assert!(args.is_empty());
    }

    #[test]
    fn named_and_bare_arguments() {
        let reg = registry();
        let (_, args) = parse_option(&reg, "obj:year=2024,verbose").unwrap();
        assert_eq!(args.get("year"), Some("2024"));
        assert!(args.flag("verbose"));
    }

    #[test]
    fn anonymous_argument() {
        let reg = registry();
        let (def, args) = parse_option(&reg, "output:dir=out/generated").unwrap();
        assert_eq!(def.name(), "output:dir");
        assert_eq!(args.anonymous(), Some("out/generated"));
    }

    #[test]
    fn longest_name_wins() {
        let reg = registry();
        let (def, args) = parse_option(&reg, "output:obj:dir=x").unwrap();
        assert_eq!(def.name(), "output:obj:dir");
        assert_eq!(args.anonymous(), Some("x"));
    }

    #[test]
    fn prefix_must_end_on_a_separator() {
        let reg = registry();
        let err = parse_option(&reg, "objects").unwrap_err();
        assert!(matches!(err, OptionsError::UnknownOption(o) if o == "objects"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let reg = registry();
        let err = parse_option(&reg, "obj:color=red").unwrap_err();
        assert!(matches!(err, OptionsError::UnknownField { field, .. } if field == "color"));
    }

    #[test]
    fn anonymous_value_needs_anonymous_field() {
        let reg = registry();
        assert!(matches!(
            parse_option(&reg, "obj=x").unwrap_err(),
            OptionsError::UnknownField { .. }
        ));
    }

    #[test]
    fn empty_field_name_is_malformed() {
        let reg = registry();
        assert!(matches!(
            parse_option(&reg, "obj:=3").unwrap_err(),
            OptionsError::MalformedArgument { .. }
        ));
    }

    #[test]
    fn required_fields_are_enforced() {
        let reg = registry();
        assert!(matches!(
            parse_option(&reg, "strict").unwrap_err(),
            OptionsError::MissingField { field, .. } if field == "level"
        ));
        assert!(parse_option(&reg, "strict:level=2").is_ok());
    }

    #[test]
    fn source_markers_are_not_options() {
        let reg = registry();
        let err = resolve(&reg, &["obj".to_string()]).err().unwrap();
        assert!(matches!(err, OptionsError::UnknownOption(_)));
    }
}
