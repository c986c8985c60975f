pub mod cmd;
pub mod generator;

use std::path::{Component, Path};

/// Replace every `{{key}}` in `template` with its value.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |output, (key, value)| {
        output.replace(&format!("{{{{{key}}}}}"), value)
    })
}

/// Convert camelCase, PascalCase or kebab-case to snake_case.
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c == '-' {
            result.push('_');
        } else if c.is_uppercase() {
            if i > 0 && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert snake_case to PascalCase.
pub fn to_pascal_case(name: &str) -> String {
    name.split('_').map(gencmd_core::title).collect()
}

/// Path of `target` as seen from a file in `from_dir`, for `#[path]`
/// attributes. Both are relative to the project root unless `target` is
/// absolute. Always uses forward slashes.
pub fn module_path(from_dir: &Path, target: &Path) -> String {
    if target.is_absolute() {
        return target.display().to_string().replace('\\', "/");
    }

    let depth = from_dir
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();
    let parts = std::iter::repeat("..".to_string())
        .take(depth)
        .chain(target.components().filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        }));
    parts.collect::<Vec<_>>().join("/")
}
