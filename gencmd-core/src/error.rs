//! Error types for gencmd.
//!
//! Errors are split by who is at fault:
//!
//! - [`RegistryError`] and [`ConfigurationError`] are authoring mistakes made
//!   by the tool author. They are detected while registering markers and are
//!   never recovered from.
//! - [`OptionsError`] comes from the raw command-line options of a user.
//! - [`GenerateError`] is returned by generator plugins.
//! - [`CommandError`] is what the dispatcher bubbles up to the top level,
//!   which alone decides whether usage text is printed.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to insert a marker definition into a [`Registry`](crate::markers::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A definition with the same name is already registered.
    #[error("marker `{name}` is already registered")]
    Duplicate { name: String },

    /// The name cannot be used as a marker or option name.
    #[error("invalid marker name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },
}

/// A command was assembled incorrectly. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The same generator name was added twice with `with_generator`.
    #[error("generator `{name}` was added more than once")]
    DuplicateGenerator { name: String },

    /// The same output rule name was added twice with `with_output_rule`.
    #[error("output rule `{name}` was added more than once")]
    DuplicateOutputRule { name: String },

    /// Two derived markers ended up with the same name.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The raw options given on the command line could not be resolved.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("malformed argument `{argument}` for option `{option}`")]
    MalformedArgument { option: String, argument: String },

    #[error("option `{option}` has no field `{field}`")]
    UnknownField { option: String, field: String },

    #[error("option `{option}` requires field `{field}`")]
    MissingField { option: String, field: String },

    #[error("root `{}` is not a directory", .0.display())]
    MissingRoot(PathBuf),

    #[error("failed to load roots: {0}")]
    Walk(#[from] walkdir::Error),

    /// A selected generator failed to register its source markers.
    #[error(transparent)]
    Markers(#[from] RegistryError),
}

/// Error returned by a [`Generator`](crate::plugin::Generator).
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl GenerateError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Error surfaced by the command dispatcher.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command line itself could not be parsed.
    #[error("{}", .0.to_string().trim_end())]
    Cli(#[from] clap::Error),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("no generators specified")]
    NoGenerators,

    #[error("not all generators ran successfully")]
    GenerationFailed,

    /// Wraps an error for which usage text must not be printed.
    #[error("{0}")]
    NoUsage(Box<CommandError>),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Mark this error so the top level skips the usage dump.
    pub fn without_usage(self) -> Self {
        match self {
            already @ Self::NoUsage(_) => already,
            other => Self::NoUsage(Box::new(other)),
        }
    }

    /// Whether the top level should skip printing usage for this error.
    pub fn suppresses_usage(&self) -> bool {
        matches!(self, Self::NoUsage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_usage_wrapper_keeps_message() {
        let err = CommandError::GenerationFailed.without_usage();
        assert!(err.suppresses_usage());
        assert_eq!(err.to_string(), "not all generators ran successfully");
    }

    #[test]
    fn ordinary_errors_print_usage() {
        assert!(!CommandError::NoGenerators.suppresses_usage());
    }

    #[test]
    fn wrapping_twice_is_a_no_op() {
        let err = CommandError::NoGenerators.without_usage().without_usage();
        match err {
            CommandError::NoUsage(inner) => assert!(matches!(*inner, CommandError::NoGenerators)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
