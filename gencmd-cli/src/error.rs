use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a scaffolding run.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("invalid input for flag \"--{flag}\": {reason}\nreceived: {received:?}\nusage: {usage}")]
    InvalidFlag {
        flag: &'static str,
        reason: String,
        received: String,
        usage: &'static str,
    },

    #[error("file `{}` already exists, refusing to overwrite it", .0.display())]
    AlreadyExists(PathBuf),

    #[error("nothing to do: pass --cmd, --generators, or both (see --help)")]
    NothingToDo,

    #[error("failed to load `{}`: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid Cargo.toml: {0}")]
    Manifest(String),

    #[error("failed to parse Cargo.toml: {0}")]
    Toml(#[from] toml_edit::TomlError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
