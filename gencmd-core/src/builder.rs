use crate::command::Cmd;
use crate::config::Config;
use crate::plugin::{GeneratorPlugin, OutputRulePlugin};
use std::collections::BTreeMap;

/// One recorded builder step.
#[derive(Clone)]
enum Step {
    Description(String),
    Helper(String),
    Version(String),
    Generator(String, GeneratorPlugin),
    Generators(BTreeMap<String, GeneratorPlugin>),
    OutputRule(String, OutputRulePlugin),
    OutputRules(BTreeMap<String, OutputRulePlugin>),
}

impl Step {
    fn apply(self, config: &mut Config) {
        match self {
            Step::Description(description) => config.set_description(description),
            Step::Helper(helper) => config.set_helper(helper),
            Step::Version(version) => config.set_version(version),
            Step::Generator(name, generator) => config.add_generator(name, generator),
            Step::Generators(generators) => config.replace_generators(generators),
            Step::OutputRule(name, rule) => config.add_output_rule(name, rule),
            Step::OutputRules(rules) => config.replace_output_rules(rules),
        }
    }
}

/// Fluent builder for a [`Cmd`].
///
/// Every method returns a new builder and leaves the receiver untouched, so
/// a partially configured builder can be shared and extended in different
/// directions. Steps are only replayed over a fresh [`Config`] when
/// [`config()`](Self::config) or [`apply()`](Self::apply) is called.
///
/// Replacing a whole mapping (`with_generators`, `with_output_rules`)
/// discards every entry added before it; entries added afterwards are
/// added on top.
///
/// # Example
///
/// ```ignore
/// CmdBuilder::new("demo")
///     .with_description("generates helpers")
///     .with_generator("obj", GeneratorPlugin::new(ObjGenerator))
///     .apply()
///     .run();
/// ```
#[derive(Clone)]
pub struct CmdBuilder {
    name: String,
    steps: Vec<Step>,
}

impl CmdBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    fn then(&self, step: Step) -> Self {
        let mut next = self.clone();
        next.steps.push(step);
        next
    }

    /// One-line description shown at the top of the usage.
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        self.then(Step::Description(description.into()))
    }

    /// Example text shown after the usage.
    pub fn with_helper(&self, helper: impl Into<String>) -> Self {
        self.then(Step::Helper(helper.into()))
    }

    /// Version printed by `--version`.
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        self.then(Step::Version(version.into()))
    }

    pub fn with_generator(&self, name: impl Into<String>, generator: GeneratorPlugin) -> Self {
        self.then(Step::Generator(name.into(), generator))
    }

    /// Replace every generator added so far.
    pub fn with_generators<I, K>(&self, generators: I) -> Self
    where
        I: IntoIterator<Item = (K, GeneratorPlugin)>,
        K: Into<String>,
    {
        let generators = generators.into_iter().map(|(k, g)| (k.into(), g)).collect();
        self.then(Step::Generators(generators))
    }

    pub fn with_output_rule(&self, name: impl Into<String>, rule: OutputRulePlugin) -> Self {
        self.then(Step::OutputRule(name.into(), rule))
    }

    /// Replace every output rule, including the default `dir` and `stdout`.
    pub fn with_output_rules<I, K>(&self, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, OutputRulePlugin)>,
        K: Into<String>,
    {
        let rules = rules.into_iter().map(|(k, r)| (k.into(), r)).collect();
        self.then(Step::OutputRules(rules))
    }

    /// Replay every step over a fresh configuration.
    pub fn config(&self) -> Config {
        let mut config = Config::new(self.name.clone());
        for step in self.steps.iter().cloned() {
            step.apply(&mut config);
        }
        config
    }

    /// Freeze the builder into a runnable command.
    pub fn apply(&self) -> Cmd {
        Cmd::new(self.config())
    }
}
