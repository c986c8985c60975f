use crate::engine::default_output_rules;
use crate::plugin::{GeneratorPlugin, OutputRulePlugin};
use std::collections::{BTreeMap, BTreeSet};

/// Version printed by `--version` when the tool author did not set one.
pub const DEVEL_VERSION: &str = "(devel)";

/// A name that was added individually while already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Collision {
    Generator(String),
    OutputRule(String),
}

/// Frozen description of a command: its texts, generators and output rules.
///
/// Produced by [`CmdBuilder`](crate::builder::CmdBuilder); never mutated
/// once built. Generators and output rules are keyed by the name used on
/// the command line and iterate in name order.
#[derive(Clone)]
pub struct Config {
    name: String,
    description: String,
    helper: String,
    version: String,
    generators: BTreeMap<String, GeneratorPlugin>,
    output_rules: BTreeMap<String, OutputRulePlugin>,
    /// Output rules that still hold their built-in default.
    default_rules: BTreeSet<String>,
    collisions: Vec<Collision>,
}

impl Config {
    /// A command with no generators and the default `dir` and `stdout` rules.
    pub fn new(name: impl Into<String>) -> Self {
        let output_rules = default_output_rules();
        Self {
            name: name.into(),
            description: String::new(),
            helper: String::new(),
            version: DEVEL_VERSION.to_string(),
            default_rules: output_rules.keys().cloned().collect(),
            generators: BTreeMap::new(),
            output_rules,
            collisions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Example text shown after the usage.
    pub fn helper(&self) -> &str {
        &self.helper
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn generators(&self) -> &BTreeMap<String, GeneratorPlugin> {
        &self.generators
    }

    pub fn output_rules(&self) -> &BTreeMap<String, OutputRulePlugin> {
        &self.output_rules
    }

    pub(crate) fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    // ── Mutations, applied only by the builder ─────────────────────────────

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_helper(&mut self, helper: String) {
        self.helper = helper;
    }

    pub(crate) fn set_version(&mut self, version: String) {
        self.version = version;
    }

    pub(crate) fn add_generator(&mut self, name: String, generator: GeneratorPlugin) {
        if self.generators.insert(name.clone(), generator).is_some() {
            self.collisions.push(Collision::Generator(name));
        }
    }

    pub(crate) fn replace_generators(&mut self, generators: BTreeMap<String, GeneratorPlugin>) {
        self.generators = generators;
        self.collisions.retain(|c| !matches!(c, Collision::Generator(_)));
    }

    /// Adding over a built-in default replaces it; adding over anything
    /// else is a collision.
    pub(crate) fn add_output_rule(&mut self, name: String, rule: OutputRulePlugin) {
        let replaced_default = self.default_rules.remove(&name);
        if self.output_rules.insert(name.clone(), rule).is_some() && !replaced_default {
            self.collisions.push(Collision::OutputRule(name));
        }
    }

    pub(crate) fn replace_output_rules(&mut self, rules: BTreeMap<String, OutputRulePlugin>) {
        self.output_rules = rules;
        self.default_rules.clear();
        self.collisions.retain(|c| !matches!(c, Collision::OutputRule(_)));
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("version", &self.version)
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .field("output_rules", &self.output_rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
