use super::{module_path, render};
use crate::commands::init::{CmdSpec, GeneratorSpec};
use crate::config::ScaffoldConfig;
use std::fmt::Write as _;

const TEMPLATE: &str = r#"//! Entry point of `{{name}}`.

use gencmd_core::prelude::*;
use std::process::ExitCode;
{{modules}}
const NAME: &str = {{name_literal}};
const DESCRIPTION: &str = {{description}};
const HELPER: &str = {{helper}};
{{generator_names}}
fn main() -> ExitCode {
    CmdBuilder::new(NAME)
        .with_description(DESCRIPTION)
        .with_helper(HELPER){{with_generators}}
        .apply()
        .run()
}
"#;

/// Source of `cmd/<NAME>/main.rs`, wiring every generator in `generators`.
pub fn main_rs(cmd: &CmdSpec, generators: &[GeneratorSpec], config: &ScaffoldConfig) -> String {
    let mut modules = String::new();
    let mut generator_names = String::new();
    let mut with_generators = String::new();

    if !generators.is_empty() {
        modules.push('\n');
        generator_names.push('\n');
    }

    for generator in generators {
        let module = generator.module();
        let _ = writeln!(
            modules,
            "#[path = {:?}]\nmod {module};",
            module_path(&cmd.dir, &generator.file())
        );
        let _ = writeln!(
            generator_names,
            "const {}: &str = {:?};",
            generator.name_const(),
            generator.name
        );
        let _ = write!(
            with_generators,
            "\n        .with_generator({}, GeneratorPlugin::with_help({module}::{}::default()))",
            generator.name_const(),
            generator.type_name()
        );
    }

    let name_literal = format!("{:?}", cmd.name);
    let description = format!("{:?}", config.description);
    let helper = format!("{:?}", config.example);

    render(
        TEMPLATE,
        &[
            ("name", cmd.name.as_str()),
            ("name_literal", name_literal.as_str()),
            ("description", description.as_str()),
            ("helper", helper.as_str()),
            ("modules", modules.as_str()),
            ("generator_names", generator_names.as_str()),
            ("with_generators", with_generators.as_str()),
        ],
    )
}
