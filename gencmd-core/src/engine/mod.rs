//! The generation engine: option resolution, package roots, output rules
//! and the runtime that drives the selected generators.

mod context;
mod options;
mod output;
mod runtime;

pub use context::{GenerationContext, Root};
pub use options::{MarkerArgs, OutputBinding};
pub use output::{default_output_rules, OutputToDirectory, OutputToStdout};
pub use runtime::{registry_from_options, Runtime};

use crate::error::RegistryError;
use crate::markers::{Binding, Definition, DefinitionHelp, FieldSpec, MarkerTarget, Registry};

/// Name of the built-in option listing package roots.
pub const PATHS_OPTION: &str = "paths";

/// Register the engine's own option markers (`paths`).
///
/// They sit in the empty help category, so marker listings skip them.
pub fn register_option_markers(into: &mut Registry) -> Result<(), RegistryError> {
    let paths = Definition::new(
        PATHS_OPTION,
        MarkerTarget::Package,
        vec![FieldSpec::anonymous("[]string")],
    )?
    .bound_to(Binding::Paths);
    into.register(paths)?;
    into.add_help(
        PATHS_OPTION,
        DefinitionHelp::simple(
            "",
            "directories (or `dir/...` patterns) to load as package roots, separated by ';'",
        ),
    );
    Ok(())
}
