//! # gencmd-cli
//!
//! Scaffolding tool for commands built on `gencmd-core`.
//!
//! This crate provides the `gencmd` binary:
//!
//! | Invocation | Result |
//! |------------|--------|
//! | `gencmd --cmd <NAME>` | entry point at `cmd/<NAME>/main.rs` |
//! | `gencmd --generators <NAME>:<PATH>,...` | one generator stub per pair, at `<PATH>/<name>.rs` |
//! | `gencmd --cmd <NAME> --generators ...` | both, with every generator wired into the entry point |
//!
//! The generated code is a starting point meant to be edited.
//!
//! ## Architecture
//!
//! - [`commands::init`]: flag validation and file generation
//! - [`commands::manifest`]: `Cargo.toml` updates
//! - [`commands::templates`]: naming helpers and code templates
//! - [`config`]: optional `gencmd.yaml` defaults
//! - [`error`]: the [`ScaffoldError`](error::ScaffoldError) type

pub mod commands;
pub mod config;
pub mod error;
