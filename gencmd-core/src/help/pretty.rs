//! Plain-text rendering of marker documentation.

use super::{FieldDoc, MarkerDoc};
use std::fmt::Write as _;

/// Compact listing: a category header, then one line per marker.
pub fn markers_summary(category: &str, markers: &[MarkerDoc]) -> String {
    let mut out = header(category);
    let width = markers.iter().map(|m| m.name.len()).max().unwrap_or(0);
    for marker in markers {
        let _ = writeln!(
            out,
            "  {:<width$}  {:<7}  {}",
            marker.name,
            marker.target.to_string(),
            marker.help.summary,
        );
    }
    out.push('\n');
    out
}

/// Per-marker blocks with usage syntax and fields.
///
/// `full` adds the long-form details of markers and fields.
pub fn markers_details(full: bool, category: &str, markers: &[MarkerDoc]) -> String {
    let mut out = header(category);
    for marker in markers {
        let _ = writeln!(out, "{}  ({})", syntax(marker), marker.target);
        if !marker.help.summary.is_empty() {
            let _ = writeln!(out, "    {}", marker.help.summary);
        }
        if full && !marker.help.details.is_empty() {
            for line in marker.help.details.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
        for field in &marker.fields {
            write_field(&mut out, field, full);
        }
        out.push('\n');
    }
    out
}

fn header(category: &str) -> String {
    format!("{category}\n{}\n\n", "=".repeat(category.chars().count()))
}

/// Usage syntax, e.g. `obj[:year=<string>]` or `output:dir=<string>`.
fn syntax(marker: &MarkerDoc) -> String {
    let mut syntax = marker.name.clone();
    let named = marker.fields.iter().filter(|f| !f.name.is_empty());

    if let Some(anonymous) = marker.fields.iter().find(|f| f.name.is_empty()) {
        let value = format!("=<{}>", anonymous.type_name);
        if anonymous.optional {
            let _ = write!(syntax, "[{value}]");
        } else {
            syntax.push_str(&value);
        }
        return syntax;
    }

    let mut separator = ':';
    for field in named {
        let arg = format!("{separator}{}=<{}>", field.name, field.type_name);
        if field.optional {
            let _ = write!(syntax, "[{arg}]");
        } else {
            syntax.push_str(&arg);
        }
        separator = ',';
    }
    syntax
}

fn write_field(out: &mut String, field: &FieldDoc, full: bool) {
    let name = if field.name.is_empty() { "<value>" } else { &field.name };
    let optional = if field.optional { " (optional)" } else { "" };
    let _ = write!(out, "      {name}  {}{optional}", field.type_name);
    if !field.help.summary.is_empty() {
        let _ = write!(out, "  {}", field.help.summary);
    }
    out.push('\n');
    if full && !field.help.details.is_empty() {
        for line in field.help.details.lines() {
            let _ = writeln!(out, "          {line}");
        }
    }
}
