//! Projection of a [`Config`] into the marker [`Registry`].
//!
//! For a command with generators `g` and output rules `r`, the registry ends
//! up with:
//!
//! - `g` for every generator, with the generator's fields;
//! - `output:g:r` for every generator and rule pair;
//! - `output:r` for every rule, the tool-wide default;
//! - the engine's own option markers (`paths`).

use crate::config::{Collision, Config};
use crate::engine::register_option_markers;
use crate::error::ConfigurationError;
use crate::markers::{Binding, Definition, DefinitionHelp, MarkerTarget, Registry};
use tracing::debug;

/// Register every marker derived from `config` into `registry`.
///
/// Any failure is an authoring mistake and the first one aborts
/// registration; callers must treat it as fatal.
pub fn register(config: &Config, mut registry: Registry) -> Result<Registry, ConfigurationError> {
    if let Some(collision) = config.collisions().first() {
        return Err(match collision {
            Collision::Generator(name) => ConfigurationError::DuplicateGenerator { name: name.clone() },
            Collision::OutputRule(name) => ConfigurationError::DuplicateOutputRule { name: name.clone() },
        });
    }

    for (gen_name, generator) in config.generators() {
        let definition = Definition::new(gen_name.as_str(), MarkerTarget::Package, generator.fields())?
            .bound_to(Binding::Generator(generator.clone()));
        register_with_help(&mut registry, definition, generator.help())?;

        for (rule_name, rule) in config.output_rules() {
            let definition = Definition::new(
                format!("output:{gen_name}:{rule_name}"),
                MarkerTarget::Package,
                rule.fields(),
            )?
            .bound_to(Binding::Output {
                generator: Some(gen_name.clone()),
                rule: rule.clone(),
            });
            register_with_help(&mut registry, definition, rule.help())?;
        }
    }

    for (rule_name, rule) in config.output_rules() {
        let definition = Definition::new(format!("output:{rule_name}"), MarkerTarget::Package, rule.fields())?
            .bound_to(Binding::Output {
                generator: None,
                rule: rule.clone(),
            });
        register_with_help(&mut registry, definition, rule.help())?;
    }

    register_option_markers(&mut registry)?;

    debug!(command = config.name(), markers = registry.len(), "registered command markers");
    Ok(registry)
}

fn register_with_help(
    registry: &mut Registry,
    definition: Definition,
    help: Option<DefinitionHelp>,
) -> Result<(), ConfigurationError> {
    let name = definition.name().to_string();
    registry.register(definition)?;
    if let Some(help) = help {
        registry.add_help(name, help);
    }
    Ok(())
}
