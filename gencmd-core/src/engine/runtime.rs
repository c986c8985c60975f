use super::options::{self, OutputBinding, ResolvedOptions};
use super::output::OutputToStdout;
use super::{GenerationContext, MarkerArgs, Root};
use crate::error::OptionsError;
use crate::markers::Registry;
use crate::plugin::{GeneratorPlugin, OutputRulePlugin};
use std::collections::HashSet;
use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error};
use walkdir::{DirEntry, WalkDir};

struct BoundGenerator {
    name: String,
    plugin: GeneratorPlugin,
    args: MarkerArgs,
    output: OutputBinding,
}

/// Generators selected on the command line, bound to their outputs and to
/// the loaded package roots.
pub struct Runtime {
    generators: Vec<BoundGenerator>,
    roots: Vec<Root>,
    markers: Registry,
}

impl Runtime {
    /// Resolve `raw` options against `registry` and load the requested roots.
    ///
    /// A generator writes through its own output rule
    /// (`output:<generator>:<rule>`) if one was given, else through the
    /// default rule (`output:<rule>`), else to standard output.
    pub fn from_options(registry: &Registry, raw: &[String]) -> Result<Self, OptionsError> {
        let resolved = options::resolve(registry, raw)?;
        let markers = collect_markers(&resolved)?;
        let roots = load_roots(&resolved.paths)?;

        let ResolvedOptions {
            generators,
            mut generator_outputs,
            default_output,
            ..
        } = resolved;

        let fallback = default_output.unwrap_or_else(|| OutputBinding {
            rule: OutputRulePlugin::new(OutputToStdout),
            args: MarkerArgs::new(),
        });

        let generators = generators
            .into_iter()
            .map(|selected| {
                let output = generator_outputs
                    .remove(&selected.name)
                    .unwrap_or_else(|| fallback.clone());
                BoundGenerator {
                    name: selected.name,
                    plugin: selected.plugin,
                    args: selected.args,
                    output,
                }
            })
            .collect();

        Ok(Self {
            generators,
            roots,
            markers,
        })
    }

    /// Names of the selected generators, in the order they run.
    pub fn generator_names(&self) -> Vec<&str> {
        self.generators.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    /// Run every selected generator. Returns `true` if anything failed.
    ///
    /// Failures are written to `diag` as they are collected, so callers only
    /// need to report the aggregate outcome.
    pub fn run(&self, diag: &mut dyn Write) -> bool {
        let mut had_errors = false;

        for generator in &self.generators {
            debug!(generator = %generator.name, roots = self.roots.len(), "running generator");
            let ctx = GenerationContext::new(&self.roots, &self.markers, &generator.output);
            if let Err(err) = generator.plugin.generate(&ctx, &generator.args) {
                had_errors = true;
                error!(generator = %generator.name, error = %err, "generator failed");
                report(diag, &generator.name, &err);
            }
        }

        for root in &self.roots {
            for err in root.errors() {
                had_errors = true;
                error!(root = %root.path().display(), error = %err, "package error");
                report(diag, &root.path().display(), &err);
            }
        }

        had_errors
    }
}

fn report(diag: &mut dyn Write, source: &dyn fmt::Display, err: &dyn fmt::Display) {
    if let Err(io_err) = writeln!(diag, "{source}: {err}") {
        error!(error = %io_err, "cannot write to the diagnostic stream");
    }
}

/// Registry of the source markers understood by the generators selected in
/// `raw`. Roots are not loaded.
pub fn registry_from_options(registry: &Registry, raw: &[String]) -> Result<Registry, OptionsError> {
    let resolved = options::resolve(registry, raw)?;
    collect_markers(&resolved)
}

fn collect_markers(resolved: &ResolvedOptions) -> Result<Registry, OptionsError> {
    let mut markers = Registry::new();
    for generator in &resolved.generators {
        generator.plugin.register_markers(&mut markers)?;
    }
    Ok(markers)
}

/// Load package roots. `dir/...` includes `dir` and every directory below
/// it, skipping hidden directories and `target`.
fn load_roots(patterns: &[String]) -> Result<Vec<Root>, OptionsError> {
    let mut roots = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        let (base, recursive) = match pattern.strip_suffix("...") {
            Some(base) => (base.trim_end_matches('/'), true),
            None => (pattern.as_str(), false),
        };
        let base = Path::new(if base.is_empty() { "." } else { base });
        if !base.is_dir() {
            return Err(OptionsError::MissingRoot(base.to_path_buf()));
        }

        if recursive {
            let walker = WalkDir::new(base)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_skipped(e));
            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_dir() && seen.insert(entry.path().to_path_buf()) {
                    roots.push(Root::new(entry.path()));
                }
            }
        } else if seen.insert(base.to_path_buf()) {
            roots.push(Root::new(base));
        }
    }

    Ok(roots)
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "target"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths(tmp: &TempDir, pattern: &str) -> Vec<String> {
        vec![format!("{}/{pattern}", tmp.path().display())]
    }

    #[test]
    fn single_root() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("api/v1")).unwrap();
        let roots = load_roots(&paths(&tmp, "api")).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name(), "api");
    }

    #[test]
    fn recursive_roots_skip_hidden_and_target() {
        let tmp = TempDir::new().unwrap();
        for dir in ["api/v1", "api/v2", "api/.git", "api/target/debug"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        let roots = load_roots(&paths(&tmp, "api/...")).unwrap();
        let names: Vec<_> = roots.iter().map(Root::name).collect();
        assert_eq!(names, ["api", "v1", "v2"]);
    }

    #[test]
    fn duplicate_patterns_load_once() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("api")).unwrap();
        let mut patterns = paths(&tmp, "api");
        patterns.extend(paths(&tmp, "api"));
        assert_eq!(load_roots(&patterns).unwrap().len(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_roots(&paths(&tmp, "nope")).unwrap_err();
        assert!(matches!(err, OptionsError::MissingRoot(_)));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unwritable_diagnostics_still_fail_the_run() {
        let root = Root::new("pkg");
        root.add_error("cannot parse package");
        let runtime = Runtime {
            generators: Vec::new(),
            roots: vec![root],
            markers: Registry::new(),
        };
        assert!(runtime.run(&mut BrokenPipe));
    }
}
