//! Command implementations for the `gencmd` CLI.

/// Command and generator scaffolding, the tool's only action.
///
/// Validates `--cmd` and `--generators`, then writes the entry point and
/// generator stubs and registers the command in `Cargo.toml`.
pub mod init;

/// `Cargo.toml` edits: `[[bin]]` targets and the `gencmd-core` dependency.
pub mod manifest;

/// Naming helpers and the code templates for entry points and generators.
pub mod templates;
