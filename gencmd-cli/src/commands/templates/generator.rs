use super::render;
use crate::commands::init::GeneratorSpec;

const TEMPLATE: &str = r#"//! The `{{name}}` generator.

use gencmd_core::prelude::*;
use std::path::Path;

/// Source marker selecting the types `{{name}}` generates code for.
pub const {{marker_const}}: &str = {{marker}};

/// Header prepended to generated files when none is configured.
const HEADER_FILE: Option<&str> = {{header_file}};

#[derive(Debug, Clone, Default)]
pub struct {{type_name}} {
    pub header_file: Option<String>,
    pub year: Option<String>,
}

impl Generator for {{type_name}} {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("header_file", "string")
                .optional()
                .with_help("file whose contents are prepended to every generated file"),
            FieldSpec::new("year", "string")
                .optional()
                .with_help("year stamped into the generated files"),
        ]
    }

    fn register_markers(&self, into: &mut Registry) -> Result<(), RegistryError> {
        into.register(Definition::new({{marker_const}}, MarkerTarget::Type, Vec::new())?)?;
        into.add_help({{marker_const}}, DefinitionHelp::simple("object", ""));
        Ok(())
    }

    fn generate(&self, ctx: &GenerationContext<'_>, args: &MarkerArgs) -> Result<(), GenerateError> {
        let header_file = args
            .get("header_file")
            .or(self.header_file.as_deref())
            .or(HEADER_FILE);
        let year = args.get("year").or(self.year.as_deref()).unwrap_or_default();

        // TODO: add your code here
        for root in ctx.roots() {
            // TODO: or here, once per package
            let body = format!("// {} output for package {} {year}\n", {{marker_const}}, root.name());
            write_file(WriteFileOptions {
                cmd_name: Some({{cmd_name}}),
                filename: &generated_filename({{cmd_name}}, {{name_literal}}),
                header_file: header_file.map(Path::new),
                body: body.as_bytes(),
                ctx,
                root,
            })?;
        }
        // TODO: or also here
        Ok(())
    }
}

impl HasHelp for {{type_name}} {
    fn help(&self) -> Option<DefinitionHelp> {
        Some(DefinitionHelp::simple("generators", "TODO: describe what {{name}} generates"))
    }
}
"#;

/// Source of a generator stub.
///
/// The marker is `<cmd>:<generator>` when the stub is scaffolded together
/// with a command, else just the generator name.
pub fn generator_rs(spec: &GeneratorSpec, cmd_name: Option<&str>, header_file: Option<&str>) -> String {
    let marker = match cmd_name {
        Some(cmd) => format!("{cmd}:{}", spec.name),
        None => spec.name.clone(),
    };
    let header_file = match header_file {
        Some(path) => format!("Some({path:?})"),
        None => "None".to_string(),
    };
    let name_literal = format!("{:?}", spec.name);
    let marker_literal = format!("{marker:?}");
    let cmd_literal = format!("{:?}", cmd_name.unwrap_or(&spec.name));
    let marker_const = spec.marker_const();
    let type_name = spec.type_name();

    render(
        TEMPLATE,
        &[
            ("name", spec.name.as_str()),
            ("name_literal", name_literal.as_str()),
            ("marker_const", marker_const.as_str()),
            ("marker", marker_literal.as_str()),
            ("type_name", type_name.as_str()),
            ("cmd_name", cmd_literal.as_str()),
            ("header_file", header_file.as_str()),
        ],
    )
}
