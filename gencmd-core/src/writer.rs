//! Helpers for generators that write source files.

use crate::engine::{GenerationContext, Root};
use std::io::{self, Write};
use std::path::Path;

/// Where and what [`write_file`] writes.
pub struct WriteFileOptions<'a> {
    /// Name of the generating command, used in the "Code generated" notice.
    pub cmd_name: Option<&'a str>,
    pub filename: &'a str,
    /// File whose contents are written first, typically a license header.
    pub header_file: Option<&'a Path>,
    pub body: &'a [u8],
    pub ctx: &'a GenerationContext<'a>,
    pub root: &'a Root,
}

/// Write a generated file for `root` through the context's output rule.
///
/// The file holds the header (if any), the "Code generated ... DO NOT EDIT."
/// notice (if a command name is given), then the body. Errors raised while
/// flushing are attached to the root instead of being returned.
pub fn write_file(opts: WriteFileOptions<'_>) -> io::Result<()> {
    let mut buffer = Vec::with_capacity(opts.body.len() + 128);

    if let Some(header_file) = opts.header_file {
        buffer.extend_from_slice(&opts.ctx.read_file(header_file)?);
        buffer.push(b'\n');
    }

    if let Some(cmd_name) = opts.cmd_name.filter(|n| !n.is_empty()) {
        write!(buffer, "\n// Code generated by {cmd_name}. DO NOT EDIT.\n")?;
    }

    buffer.extend_from_slice(opts.body);

    let mut output = opts.ctx.open(opts.root, opts.filename)?;
    output.write_all(&buffer)?;
    if let Err(err) = output.flush() {
        opts.root.add_error(err);
    }
    Ok(())
}

/// Uppercase the first character: `"object"` becomes `"Object"`.
pub fn title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Conventional name for a generated file: `zz_generated.<prefix>.<name>.rs`.
pub fn generated_filename(prefix: &str, name: &str) -> String {
    format!("zz_generated.{prefix}.{name}.rs")
}
