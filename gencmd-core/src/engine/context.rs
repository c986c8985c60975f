use super::options::OutputBinding;
use crate::markers::Registry;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A package root loaded from the `paths` option.
///
/// Errors found while generating for this root are attached to it and
/// reported once every generator has run.
#[derive(Debug)]
pub struct Root {
    name: String,
    path: PathBuf,
    errors: RefCell<Vec<String>>,
}

impl Root {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .canonicalize()
            .ok()
            .as_deref()
            .and_then(Path::file_name)
            .or_else(|| path.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path,
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Package name: the last path component.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_error(&self, err: impl fmt::Display) {
        self.errors.borrow_mut().push(err.to_string());
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.borrow().is_empty()
    }
}

/// Everything a generator sees while it runs.
pub struct GenerationContext<'a> {
    roots: &'a [Root],
    markers: &'a Registry,
    output: &'a OutputBinding,
}

impl<'a> GenerationContext<'a> {
    pub(crate) fn new(roots: &'a [Root], markers: &'a Registry, output: &'a OutputBinding) -> Self {
        Self {
            roots,
            markers,
            output,
        }
    }

    pub fn roots(&self) -> &'a [Root] {
        self.roots
    }

    /// Source markers registered by the selected generators.
    pub fn markers(&self) -> &'a Registry {
        self.markers
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    /// Open `filename` for `root` through the generator's output rule.
    pub fn open(&self, root: &Root, filename: &str) -> io::Result<Box<dyn Write>> {
        self.output.rule.open(&self.output.args, root, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_name_is_last_component() {
        let root = Root::new("some/pkg/api");
        assert_eq!(root.name(), "api");
        assert_eq!(root.path(), Path::new("some/pkg/api"));
    }

    #[test]
    fn root_collects_errors() {
        let root = Root::new("pkg");
        assert!(!root.has_errors());
        root.add_error("first");
        root.add_error(format_args!("second {}", 2));
        assert_eq!(root.errors(), ["first", "second 2"]);
    }

    #[test]
    fn current_dir_root_has_a_name() {
        let root = Root::new(".");
        assert!(!root.name().is_empty());
        assert_ne!(root.name(), ".");
    }
}
