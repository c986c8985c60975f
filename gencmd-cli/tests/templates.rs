use gencmd_cli::commands::init::{CmdSpec, GeneratorSpec};
use gencmd_cli::commands::templates::{
    cmd::main_rs, generator::generator_rs, module_path, render, to_pascal_case, to_snake_case,
};
use gencmd_cli::config::ScaffoldConfig;
use std::path::{Path, PathBuf};

fn generator(name: &str, path: &str) -> GeneratorSpec {
    GeneratorSpec {
        name: name.into(),
        path: PathBuf::from(path),
    }
}

fn cmd(name: &str) -> CmdSpec {
    CmdSpec {
        name: name.into(),
        dir: Path::new("cmd").join(name),
    }
}

// ── naming ──────────────────────────────────────────────────────────

#[test]
fn to_snake_case_camel() {
    assert_eq!(to_snake_case("myGenerator"), "my_generator");
}

#[test]
fn to_snake_case_pascal_and_kebab() {
    assert_eq!(to_snake_case("DeepCopy"), "deep_copy");
    assert_eq!(to_snake_case("deep-copy"), "deep_copy");
    assert_eq!(to_snake_case("deep_Copy"), "deep_copy");
}

#[test]
fn to_snake_case_acronym() {
    assert_eq!(to_snake_case("HTTPClient"), "h_t_t_p_client");
}

#[test]
fn to_snake_case_empty() {
    assert_eq!(to_snake_case(""), "");
}

#[test]
fn to_pascal_case_words() {
    assert_eq!(to_pascal_case("deep_copy"), "DeepCopy");
    assert_eq!(to_pascal_case("obj"), "Obj");
    assert_eq!(to_pascal_case(""), "");
}

#[test]
fn generator_spec_names() {
    let spec = generator("deepCopy", "./gen/deepcopy");
    assert_eq!(spec.module(), "deep_copy");
    assert_eq!(spec.type_name(), "DeepCopyGenerator");
    assert_eq!(spec.name_const(), "DEEP_COPY_GENERATOR_NAME");
    assert_eq!(spec.marker_const(), "DEEP_COPY_MARKER");
    assert_eq!(spec.file(), Path::new("./gen/deepcopy/deep_copy.rs"));
}

// ── render / module_path ────────────────────────────────────────────

#[test]
fn render_replaces_every_occurrence() {
    assert_eq!(
        render("{{a}} and {{b}} and {{a}}", &[("a", "x"), ("b", "y")]),
        "x and y and x"
    );
}

#[test]
fn render_leaves_unknown_keys() {
    assert_eq!(render("{{a}} {{c}}", &[("a", "x")]), "x {{c}}");
}

#[test]
fn module_path_from_cmd_dir() {
    assert_eq!(
        module_path(Path::new("cmd/mycmd"), Path::new("./gen/obj/obj.rs")),
        "../../gen/obj/obj.rs"
    );
    assert_eq!(
        module_path(Path::new("cmd/mycmd"), Path::new("gen/obj.rs")),
        "../../gen/obj.rs"
    );
}

#[test]
fn module_path_keeps_absolute_targets() {
    assert_eq!(
        module_path(Path::new("cmd/mycmd"), Path::new("/src/gen/obj.rs")),
        "/src/gen/obj.rs"
    );
}

// ── entry point ─────────────────────────────────────────────────────

#[test]
fn main_rs_without_generators() {
    let src = main_rs(&cmd("mycmd"), &[], &ScaffoldConfig::default());
    assert!(src.contains("const NAME: &str = \"mycmd\";"));
    assert!(src.contains("const DESCRIPTION: &str = \"TODO: write a description here.\";"));
    assert!(src.contains("const HELPER: &str = \"TODO: write an example here.\";"));
    assert!(src.contains("CmdBuilder::new(NAME)"));
    assert!(src.contains(".with_helper(HELPER)\n        .apply()\n        .run()"));
    assert!(!src.contains("#[path"));
    assert!(!src.contains("with_generator"));
}

#[test]
fn main_rs_wires_generators() {
    let generators = [generator("obj", "./gen/obj"), generator("deepCopy", "gen/copy")];
    let src = main_rs(&cmd("mycmd"), &generators, &ScaffoldConfig::default());

    assert!(src.contains("#[path = \"../../gen/obj/obj.rs\"]\nmod obj;"));
    assert!(src.contains("#[path = \"../../gen/copy/deep_copy.rs\"]\nmod deep_copy;"));
    assert!(src.contains("const OBJ_GENERATOR_NAME: &str = \"obj\";"));
    assert!(src.contains("const DEEP_COPY_GENERATOR_NAME: &str = \"deepCopy\";"));
    assert!(src.contains(
        ".with_generator(OBJ_GENERATOR_NAME, GeneratorPlugin::with_help(obj::ObjGenerator::default()))"
    ));
    assert!(src.contains(
        ".with_generator(DEEP_COPY_GENERATOR_NAME, GeneratorPlugin::with_help(deep_copy::DeepCopyGenerator::default()))"
    ));
    assert!(src.trim_end().ends_with(".apply()\n        .run()\n}"));
}

#[test]
fn main_rs_escapes_configured_text() {
    let config = ScaffoldConfig {
        description: "says \"hi\"".into(),
        example: "mycmd obj\nmycmd obj paths=./...".into(),
        header_file: None,
    };
    let src = main_rs(&cmd("mycmd"), &[], &config);
    assert!(src.contains(r#"const DESCRIPTION: &str = "says \"hi\"";"#));
    assert!(src.contains(r#"const HELPER: &str = "mycmd obj\nmycmd obj paths=./...";"#));
}

// ── generator stub ──────────────────────────────────────────────────

#[test]
fn generator_stub_standalone() {
    let src = generator_rs(&generator("obj", "./gen/obj"), None, None);
    assert!(src.contains("pub const OBJ_MARKER: &str = \"obj\";"));
    assert!(src.contains("pub struct ObjGenerator {"));
    assert!(src.contains("impl Generator for ObjGenerator {"));
    assert!(src.contains("const HEADER_FILE: Option<&str> = None;"));
    assert!(src.contains("MarkerTarget::Type"));
    assert!(src.contains("DefinitionHelp::simple(\"object\", \"\")"));
    assert!(src.contains("generated_filename(\"obj\", \"obj\")"));
    assert!(!src.contains("{{"));
}

#[test]
fn generator_stub_with_command() {
    let src = generator_rs(
        &generator("deepCopy", "./gen/copy"),
        Some("mycmd"),
        Some("hack/boilerplate.txt"),
    );
    assert!(src.contains("pub const DEEP_COPY_MARKER: &str = \"mycmd:deepCopy\";"));
    assert!(src.contains("pub struct DeepCopyGenerator {"));
    assert!(src.contains("const HEADER_FILE: Option<&str> = Some(\"hack/boilerplate.txt\");"));
    assert!(src.contains("cmd_name: Some(\"mycmd\")"));
    assert!(src.contains("generated_filename(\"mycmd\", \"deepCopy\")"));
}
