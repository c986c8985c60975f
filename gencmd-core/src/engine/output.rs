use super::{MarkerArgs, Root};
use crate::markers::{DefinitionHelp, FieldSpec};
use crate::plugin::{HasHelp, OutputRule, OutputRulePlugin};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

/// Writes every file into one directory, regardless of package.
///
/// The directory comes from the anonymous argument (`output:dir=out`),
/// falling back to the directory given at construction, then to the
/// current directory.
#[derive(Debug, Clone, Default)]
pub struct OutputToDirectory {
    default_dir: PathBuf,
}

impl OutputToDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            default_dir: dir.into(),
        }
    }
}

impl OutputRule for OutputToDirectory {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::anonymous("string").optional()]
    }

    fn open(&self, args: &MarkerArgs, _root: &Root, filename: &str) -> io::Result<Box<dyn Write>> {
        let dir = args
            .anonymous()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.default_dir.clone());
        let dir = if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        };
        fs::create_dir_all(&dir)?;
        let file = File::create(dir.join(filename))?;
        Ok(Box::new(file))
    }
}

impl HasHelp for OutputToDirectory {
    fn help(&self) -> Option<DefinitionHelp> {
        Some(
            DefinitionHelp::simple("output", "outputs each artifact to the given directory, regardless of package")
                .with_field_help("", "the directory to write to"),
        )
    }
}

/// Writes everything to standard output, with no separation between files.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputToStdout;

impl OutputRule for OutputToStdout {
    fn open(&self, _args: &MarkerArgs, _root: &Root, _filename: &str) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(io::stdout()))
    }
}

impl HasHelp for OutputToStdout {
    fn help(&self) -> Option<DefinitionHelp> {
        Some(DefinitionHelp::simple(
            "output",
            "outputs everything to standard-out, with no separation",
        ))
    }
}

/// The output rules every command starts with: `dir` and `stdout`.
pub fn default_output_rules() -> BTreeMap<String, OutputRulePlugin> {
    BTreeMap::from([
        (
            "dir".to_string(),
            OutputRulePlugin::with_help(OutputToDirectory::new("")),
        ),
        ("stdout".to_string(), OutputRulePlugin::with_help(OutputToStdout)),
    ])
}
