//! Compose generator plugins into a marker-driven code-generation CLI.
//!
//! A tool author names a set of [`Generator`]s and [`OutputRule`]s on a
//! [`CmdBuilder`], freezes it into a [`Cmd`] and runs it. Every plugin name
//! becomes a command-line option, and the tool gets marker discovery (`-w`),
//! leveled usage (`-h`) and version reporting for free.

pub mod builder;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod help;
pub mod logging;
pub mod markers;
pub mod plugin;
pub mod prelude;
pub mod registrar;
pub mod writer;

pub use builder::CmdBuilder;
pub use command::Cmd;
pub use config::{Config, DEVEL_VERSION};
pub use engine::{GenerationContext, MarkerArgs, OutputToDirectory, OutputToStdout, Root};
pub use error::{CommandError, ConfigurationError, GenerateError, OptionsError, RegistryError};
pub use help::{HelpLevel, SortOrder};
pub use logging::init_tracing;
pub use markers::{Definition, DefinitionHelp, DetailedHelp, FieldSpec, MarkerTarget, Registry};
pub use plugin::{Generator, GeneratorPlugin, HasHelp, OutputRule, OutputRulePlugin, Plugin};
pub use writer::{generated_filename, title, write_file, WriteFileOptions};
