//! Everything a generator author needs with a single `use`.
//!
//! ```ignore
//! use gencmd_core::prelude::*;
//!
//! fn main() -> std::process::ExitCode {
//!     CmdBuilder::new("demo")
//!         .with_description("generates demo objects")
//!         .with_generator("obj", GeneratorPlugin::with_help(ObjGenerator))
//!         .apply()
//!         .run()
//! }
//! ```

// Composition
pub use crate::builder::CmdBuilder;
pub use crate::command::Cmd;

// Plugins
pub use crate::plugin::{Generator, GeneratorPlugin, HasHelp, OutputRule, OutputRulePlugin, Plugin};
pub use crate::engine::{OutputToDirectory, OutputToStdout};

// Generation
pub use crate::engine::{GenerationContext, MarkerArgs, Root};
pub use crate::error::{GenerateError, RegistryError};
pub use crate::markers::{Definition, DefinitionHelp, DetailedHelp, FieldSpec, MarkerTarget, Registry};
pub use crate::writer::{generated_filename, title, write_file, WriteFileOptions};
