use crate::error::ScaffoldError;
use std::path::Path;
use toml_edit::{value, ArrayOfTables, DocumentMut, Item, Table};

/// Version requirement written for the `gencmd-core` dependency.
pub const CORE_VERSION: &str = "0.1";

/// What [`register_command`] changed in the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestUpdate {
    pub bin_added: bool,
    pub dependency_added: bool,
}

/// Register `name` as a `[[bin]]` target built from `path`, and make sure
/// `gencmd-core` is a dependency.
///
/// An existing bin with the same name, or an existing dependency, is left
/// untouched.
pub fn register_command(manifest: &Path, name: &str, path: &Path) -> Result<ManifestUpdate, ScaffoldError> {
    let content = std::fs::read_to_string(manifest)?;
    let mut doc = content.parse::<DocumentMut>()?;

    let update = ManifestUpdate {
        bin_added: add_bin(&mut doc, name, path)?,
        dependency_added: add_core_dependency(&mut doc)?,
    };

    if update.bin_added || update.dependency_added {
        std::fs::write(manifest, doc.to_string())?;
    }
    Ok(update)
}

fn add_bin(doc: &mut DocumentMut, name: &str, path: &Path) -> Result<bool, ScaffoldError> {
    let bins = doc
        .entry("bin")
        .or_insert_with(|| Item::ArrayOfTables(ArrayOfTables::new()))
        .as_array_of_tables_mut()
        .ok_or_else(|| ScaffoldError::Manifest("`bin` is not an array of tables".into()))?;

    if bins
        .iter()
        .any(|bin| bin.get("name").and_then(Item::as_str) == Some(name))
    {
        return Ok(false);
    }

    let mut bin = Table::new();
    bin.insert("name", value(name));
    bin.insert("path", value(path.display().to_string().replace('\\', "/")));
    bins.push(bin);
    Ok(true)
}

fn add_core_dependency(doc: &mut DocumentMut) -> Result<bool, ScaffoldError> {
    let deps = doc
        .entry("dependencies")
        .or_insert_with(|| Item::Table(Table::new()))
        .as_table_mut()
        .ok_or_else(|| ScaffoldError::Manifest("`dependencies` is not a table".into()))?;

    if deps.contains_key("gencmd-core") {
        return Ok(false);
    }
    deps.insert("gencmd-core", value(CORE_VERSION));
    Ok(true)
}
