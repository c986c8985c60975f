use super::manifest;
use super::templates::{cmd::main_rs, generator::generator_rs, to_pascal_case, to_snake_case};
use crate::config::ScaffoldConfig;
use crate::error::ScaffoldError;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CMD_FLAG: &str = "cmd";
pub const GENERATORS_FLAG: &str = "generators";

pub const CMD_USAGE: &str = "\
Initialize a new command under \"./cmd/<CMD_NAME>/main.rs\":

    gencmd --cmd <CMD_NAME>

Initialize a new command together with two generators wired into it:

    gencmd --cmd mycmd --generators=deepcopy:./gen/deepcopy,rbac:./gen/rbac";

pub const GENERATORS_USAGE: &str = "\
Initialize generators under \"./<PATH>/<GENERATOR_NAME>.rs\". Without
--cmd the generators are not wired into any command:

    gencmd --generators \"<GENERATOR_NAME>:<PATH>,<ANOTHER_NAME>:<ANOTHER_PATH>\"";

/// The command to scaffold, from `--cmd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdSpec {
    pub name: String,
    /// `cmd/<name>`
    pub dir: PathBuf,
}

impl CmdSpec {
    pub fn main_file(&self) -> PathBuf {
        self.dir.join("main.rs")
    }
}

/// One `<name>:<path>` pair from `--generators`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSpec {
    pub name: String,
    pub path: PathBuf,
}

impl GeneratorSpec {
    /// Rust module holding the stub.
    pub fn module(&self) -> String {
        to_snake_case(&self.name)
    }

    pub fn file(&self) -> PathBuf {
        self.path.join(format!("{}.rs", self.module()))
    }

    pub fn type_name(&self) -> String {
        format!("{}Generator", to_pascal_case(&self.module()))
    }

    /// `<NAME>_GENERATOR_NAME`, the option name constant in the entry point.
    pub fn name_const(&self) -> String {
        format!("{}_GENERATOR_NAME", self.module().to_uppercase())
    }

    /// `<NAME>_MARKER`, the source marker constant in the stub.
    pub fn marker_const(&self) -> String {
        format!("{}_MARKER", self.module().to_uppercase())
    }
}

/// Run the scaffolding for the given flags. Returns the files written.
pub fn run(cmd: Option<&str>, generators: Option<&str>) -> Result<Vec<PathBuf>, ScaffoldError> {
    let config = ScaffoldConfig::load(Path::new("."))?;
    let cmd = cmd.map(parse_cmd).transpose()?;
    let generators = generators.map(parse_generators).transpose()?.unwrap_or_default();

    match cmd {
        None if generators.is_empty() => Err(ScaffoldError::NothingToDo),
        None => generate_generators(&generators, None, &config),
        Some(cmd) => {
            let mut written = generate_generators(&generators, Some(&cmd.name), &config)?;
            written.push(generate_cmd(&cmd, &generators, &config)?);
            Ok(written)
        }
    }
}

/// Validate `--cmd`: a non-empty name usable as a directory and bin name,
/// whose entry point does not exist yet.
pub fn parse_cmd(input: &str) -> Result<CmdSpec, ScaffoldError> {
    let invalid = |reason: &str| ScaffoldError::InvalidFlag {
        flag: CMD_FLAG,
        reason: reason.to_string(),
        received: input.to_string(),
        usage: CMD_USAGE,
    };

    let name = input.trim();
    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(invalid("name may only contain ASCII letters, digits, '-' and '_'"));
    }

    let spec = CmdSpec {
        name: name.to_string(),
        dir: Path::new("cmd").join(name),
    };
    file_should_not_exist(&spec.main_file())?;
    Ok(spec)
}

/// Validate `--generators`: comma-separated `<name>:<path>` pairs. An
/// empty list is valid and means "no generators".
pub fn parse_generators(input: &str) -> Result<Vec<GeneratorSpec>, ScaffoldError> {
    let invalid = |reason: String| ScaffoldError::InvalidFlag {
        flag: GENERATORS_FLAG,
        reason,
        received: input.to_string(),
        usage: GENERATORS_USAGE,
    };

    let mut generators: Vec<GeneratorSpec> = Vec::new();
    for pair in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let parts: Vec<&str> = pair.split(':').collect();
        let [name, path] = parts[..] else {
            return Err(invalid(format!(
                "expected 2 sub-arguments separated by a colon (\":\") in {pair:?}"
            )));
        };
        if name.is_empty() {
            return Err(invalid("name cannot be empty".into()));
        }
        if path.is_empty() {
            return Err(invalid("path cannot be empty".into()));
        }
        if !is_identifier(name) {
            return Err(invalid(format!(
                "name {name:?} must start with a letter and contain only ASCII letters, digits and '_'"
            )));
        }

        let spec = GeneratorSpec {
            name: name.to_string(),
            path: PathBuf::from(path),
        };
        if generators.iter().any(|g| g.module() == spec.module()) {
            return Err(invalid(format!("generator {name:?} is given twice")));
        }
        if spec.file().exists() {
            return Err(invalid(format!(
                "file {} already exists, refusing to overwrite it",
                spec.file().display()
            )));
        }
        generators.push(spec);
    }
    Ok(generators)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn file_should_not_exist(path: &Path) -> Result<(), ScaffoldError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Err(ScaffoldError::AlreadyExists(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Write the entry point and register it in `Cargo.toml` when there is one.
pub fn generate_cmd(
    cmd: &CmdSpec,
    generators: &[GeneratorSpec],
    config: &ScaffoldConfig,
) -> Result<PathBuf, ScaffoldError> {
    let path = cmd.main_file();
    write_new(&path, &main_rs(cmd, generators, config))?;
    info!(command = %cmd.name, path = %path.display(), generators = generators.len(), "scaffolded command");
    println!(
        "{} Generated command: {}",
        "✓".green(),
        path.display().to_string().cyan()
    );

    let cargo_path = Path::new("Cargo.toml");
    if cargo_path.exists() {
        let update = manifest::register_command(cargo_path, &cmd.name, &path)?;
        if update.bin_added {
            println!("{} Added [[bin]] {} to Cargo.toml", "✓".green(), cmd.name.cyan());
        } else {
            println!(
                "{} A [[bin]] named '{}' is already in Cargo.toml",
                "!".yellow(),
                cmd.name.cyan()
            );
        }
        if update.dependency_added {
            println!("{} Added {} to Cargo.toml dependencies", "✓".green(), "gencmd-core".cyan());
        }
    }

    Ok(path)
}

/// Write one stub per generator. With a command name, each stub's marker
/// is prefixed by it.
pub fn generate_generators(
    generators: &[GeneratorSpec],
    cmd_name: Option<&str>,
    config: &ScaffoldConfig,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut written = Vec::with_capacity(generators.len());
    for generator in generators {
        let path = generator.file();
        write_new(&path, &generator_rs(generator, cmd_name, config.header_file.as_deref()))?;
        info!(generator = %generator.name, path = %path.display(), "scaffolded generator");
        println!(
            "{} Generated generator: {}",
            "✓".green(),
            path.display().to_string().cyan()
        );
        written.push(path);
    }
    Ok(written)
}

fn write_new(path: &Path, content: &str) -> Result<(), ScaffoldError> {
    file_should_not_exist(path)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, content)?;
    Ok(())
}
