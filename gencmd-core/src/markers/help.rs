use serde::Serialize;
use std::collections::BTreeMap;

/// Summary plus long-form description of a marker or one of its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailedHelp {
    pub summary: String,
    pub details: String,
}

impl DetailedHelp {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            details: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.details.is_empty()
    }
}

/// Help attached to a marker definition in the registry.
///
/// The `category` groups markers in listings; markers in the empty category
/// are internal and never listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefinitionHelp {
    pub category: String,
    #[serde(flatten)]
    pub detail: DetailedHelp,
    #[serde(rename = "fields", skip_serializing_if = "BTreeMap::is_empty")]
    pub field_help: BTreeMap<String, DetailedHelp>,
}

impl DefinitionHelp {
    /// Help with just a category and a one-line summary.
    pub fn simple(category: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            detail: DetailedHelp::new(summary),
            field_help: BTreeMap::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.detail.details = details.into();
        self
    }

    pub fn with_field_help(mut self, field: impl Into<String>, summary: impl Into<String>) -> Self {
        self.field_help.insert(field.into(), DetailedHelp::new(summary));
        self
    }

    /// An empty help object carries nothing worth attaching.
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.detail.is_empty() && self.field_help.is_empty()
    }
}
