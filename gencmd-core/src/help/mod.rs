//! Marker documentation at four levels of detail.
//!
//! | Level | Flag | Stream | Output |
//! |-------|------|--------|--------|
//! | [`HelpLevel::Summary`] | `-w` | diagnostic | one line per marker |
//! | [`HelpLevel::Detailed`] | `-ww` | diagnostic | markers with field summaries |
//! | [`HelpLevel::Full`] | `-www` | diagnostic | everything, including long details |
//! | [`HelpLevel::Json`] | `-wwww` | primary | one JSON document |
//!
//! Markers in the empty category are internal and never rendered as text.

pub mod pretty;

use crate::markers::{DetailedHelp, MarkerTarget, Registry};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HelpLevel {
    Summary = 1,
    Detailed = 2,
    Full = 3,
    Json = 4,
}

impl HelpLevel {
    /// Level selected by repeating a flag `count` times. Zero means none;
    /// anything above four is capped at [`HelpLevel::Json`].
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(HelpLevel::Summary),
            2 => Some(HelpLevel::Detailed),
            3 => Some(HelpLevel::Full),
            _ => Some(HelpLevel::Json),
        }
    }
}

/// How markers are ordered inside a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Alphabetically by marker name.
    ByCategory,
    /// Generators first, then per-generator output markers, then default
    /// output markers, then everything else; alphabetical within each group.
    ByOption,
}

/// Documentation of one marker field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub optional: bool,
    #[serde(flatten)]
    pub help: DetailedHelp,
}

/// Documentation of one marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerDoc {
    pub name: String,
    pub target: MarkerTarget,
    #[serde(flatten)]
    pub help: DetailedHelp,
    pub fields: Vec<FieldDoc>,
}

/// Markers sharing a help category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDoc {
    pub category: String,
    pub markers: Vec<MarkerDoc>,
}

/// Group every registered marker by help category.
///
/// Categories come out in name order; markers without help land in the
/// empty category.
pub fn by_category(registry: &Registry, order: SortOrder) -> Vec<CategoryDoc> {
    let mut categories: BTreeMap<String, Vec<MarkerDoc>> = BTreeMap::new();

    for definition in registry.definitions() {
        let help = registry.help_for(definition.name());
        let fields = definition
            .fields()
            .iter()
            .map(|field| FieldDoc {
                name: field.name.clone(),
                type_name: field.type_name.clone(),
                optional: field.optional,
                help: help
                    .and_then(|h| h.field_help.get(&field.name).cloned())
                    .or_else(|| field.help.clone())
                    .unwrap_or_default(),
            })
            .collect();

        categories
            .entry(help.map(|h| h.category.clone()).unwrap_or_default())
            .or_default()
            .push(MarkerDoc {
                name: definition.name().to_string(),
                target: definition.target(),
                help: help.map(|h| h.detail.clone()).unwrap_or_default(),
                fields,
            });
    }

    categories
        .into_iter()
        .map(|(category, mut markers)| {
            match order {
                SortOrder::ByCategory => markers.sort_by(|a, b| a.name.cmp(&b.name)),
                SortOrder::ByOption => {
                    markers.sort_by(|a, b| option_rank(&a.name).cmp(&option_rank(&b.name)))
                }
            }
            CategoryDoc { category, markers }
        })
        .collect()
}

fn option_rank(name: &str) -> (u8, &str) {
    let group = match name.strip_prefix("output:") {
        None => 0,
        Some(rest) if rest.contains(':') => 1,
        Some(_) => 2,
    };
    (group, name)
}

/// Render the markers of `registry` at `level`.
///
/// JSON goes to `out`; every text level goes to `diag`.
pub fn render(
    level: HelpLevel,
    out: &mut dyn Write,
    diag: &mut dyn Write,
    registry: &Registry,
    order: SortOrder,
) -> io::Result<()> {
    let categories = by_category(registry, order);

    if level == HelpLevel::Json {
        serde_json::to_writer(&mut *out, &categories)?;
        writeln!(out)?;
        return Ok(());
    }

    for category in categories.iter().filter(|c| !c.category.is_empty()) {
        let contents = match level {
            HelpLevel::Summary => pretty::markers_summary(&category.category, &category.markers),
            _ => pretty::markers_details(
                level == HelpLevel::Full,
                &category.category,
                &category.markers,
            ),
        };
        diag.write_all(contents.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{Definition, DefinitionHelp, FieldSpec};

    fn registry() -> Registry {
        let mut reg = Registry::new();
        let defs = [
            ("obj", vec![FieldSpec::new("year", "string").optional().with_help("copyright year")]),
            ("output:obj:dir", vec![FieldSpec::anonymous("string")]),
            ("output:dir", vec![FieldSpec::anonymous("string")]),
            ("paths", vec![FieldSpec::anonymous("[]string")]),
            ("alpha", Vec::new()),
        ];
        for (name, fields) in defs {
            reg.register(Definition::new(name, MarkerTarget::Package, fields).unwrap())
                .unwrap();
        }
        reg.add_help("obj", DefinitionHelp::simple("generators", "generates objects").with_details("long text"));
        reg.add_help("alpha", DefinitionHelp::simple("generators", "first by name"));
        reg.add_help("output:obj:dir", DefinitionHelp::simple("output", "obj to a directory"));
        reg.add_help("output:dir", DefinitionHelp::simple("output", "all to a directory"));
        reg.add_help("paths", DefinitionHelp::simple("", "package roots"));
        reg
    }

    fn names(doc: &CategoryDoc) -> Vec<&str> {
        doc.markers.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn levels_from_count() {
        assert_eq!(HelpLevel::from_count(0), None);
        assert_eq!(HelpLevel::from_count(1), Some(HelpLevel::Summary));
        assert_eq!(HelpLevel::from_count(2), Some(HelpLevel::Detailed));
        assert_eq!(HelpLevel::from_count(3), Some(HelpLevel::Full));
        assert_eq!(HelpLevel::from_count(4), Some(HelpLevel::Json));
        assert_eq!(HelpLevel::from_count(9), Some(HelpLevel::Json));
    }

    #[test]
    fn groups_by_category_in_name_order() {
        let docs = by_category(&registry(), SortOrder::ByCategory);
        let categories: Vec<_> = docs.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, ["", "generators", "output"]);
        assert_eq!(names(&docs[1]), ["alpha", "obj"]);
        assert_eq!(names(&docs[2]), ["output:dir", "output:obj:dir"]);
    }

    #[test]
    fn option_order_puts_per_generator_outputs_first() {
        let docs = by_category(&registry(), SortOrder::ByOption);
        assert_eq!(names(&docs[2]), ["output:obj:dir", "output:dir"]);
    }

    #[test]
    fn markers_without_help_are_uncategorized() {
        let mut reg = registry();
        reg.register(Definition::new("bare", MarkerTarget::Type, Vec::new()).unwrap())
            .unwrap();
        let docs = by_category(&reg, SortOrder::ByCategory);
        assert!(names(&docs[0]).contains(&"bare"));
    }

    #[test]
    fn field_help_falls_back_to_schema() {
        let docs = by_category(&registry(), SortOrder::ByCategory);
        let obj = docs[1].markers.iter().find(|m| m.name == "obj").unwrap();
        assert_eq!(obj.fields[0].help.summary, "copyright year");
    }

    #[test]
    fn json_goes_to_primary_stream() {
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        render(HelpLevel::Json, &mut out, &mut diag, &registry(), SortOrder::ByCategory).unwrap();
        assert!(diag.is_empty());
        let docs: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(docs.as_array().unwrap().len(), 3);
        assert_eq!(docs[1]["markers"][1]["name"], "obj");
        assert_eq!(docs[1]["markers"][1]["fields"][0]["type"], "string");
    }

    #[test]
    fn text_levels_skip_empty_category() {
        for level in [HelpLevel::Summary, HelpLevel::Detailed, HelpLevel::Full] {
            let (mut out, mut diag) = (Vec::new(), Vec::new());
            render(level, &mut out, &mut diag, &registry(), SortOrder::ByCategory).unwrap();
            let text = String::from_utf8(diag).unwrap();
            assert!(out.is_empty());
            assert!(text.contains("generators"));
            assert!(text.contains("output:obj:dir"));
            assert!(!text.contains("package roots"), "{level:?} listed an internal marker");
        }
    }

    #[test]
    fn only_full_level_shows_details() {
        let render_text = |level| {
            let (mut out, mut diag) = (Vec::new(), Vec::new());
            render(level, &mut out, &mut diag, &registry(), SortOrder::ByCategory).unwrap();
            String::from_utf8(diag).unwrap()
        };
        assert!(render_text(HelpLevel::Full).contains("long text"));
        assert!(!render_text(HelpLevel::Detailed).contains("long text"));
        assert!(!render_text(HelpLevel::Summary).contains("long text"));
    }
}
