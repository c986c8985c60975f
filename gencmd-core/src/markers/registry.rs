use super::{Definition, DefinitionHelp};
use crate::error::RegistryError;
use std::collections::{BTreeMap, HashMap};

/// Catalog of marker definitions and their help.
///
/// The registry is filled during the single-threaded setup phase and only
/// read afterwards. Definitions iterate in name order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: BTreeMap<String, Definition>,
    help: HashMap<String, DefinitionHelp>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition. A second definition with the same name is rejected.
    pub fn register(&mut self, definition: Definition) -> Result<(), RegistryError> {
        if self.definitions.contains_key(definition.name()) {
            return Err(RegistryError::Duplicate {
                name: definition.name().to_string(),
            });
        }
        tracing::debug!(marker = definition.name(), "registered marker");
        self.definitions.insert(definition.name().to_string(), definition);
        Ok(())
    }

    /// Insert several definitions, stopping at the first failure.
    pub fn register_all(
        &mut self,
        definitions: impl IntoIterator<Item = Definition>,
    ) -> Result<(), RegistryError> {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    /// Attach help to the marker named `name`, replacing any previous help.
    pub fn add_help(&mut self, name: impl Into<String>, help: DefinitionHelp) {
        self.help.insert(name.into(), help);
    }

    pub fn lookup(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn help_for(&self, name: &str) -> Option<&DefinitionHelp> {
        self.help.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::MarkerTarget;

    fn def(name: &str) -> Definition {
        Definition::new(name, MarkerTarget::Package, Vec::new()).unwrap()
    }

    #[test]
    fn register_and_lookup() {
        let mut reg = Registry::new();
        reg.register(def("obj")).unwrap();
        assert!(reg.contains("obj"));
        assert_eq!(reg.lookup("obj").unwrap().name(), "obj");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut reg = Registry::new();
        reg.register(def("obj")).unwrap();
        let err = reg.register(def("obj")).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate { name: "obj".into() });
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn register_all_stops_at_first_duplicate() {
        let mut reg = Registry::new();
        let result = reg.register_all([def("a"), def("a"), def("b")]);
        assert!(result.is_err());
        assert!(!reg.contains("b"));
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = Registry::new();
        reg.register_all([def("zeta"), def("alpha"), def("output:alpha:dir")]).unwrap();
        let names: Vec<_> = reg.names().collect();
        assert_eq!(names, ["alpha", "output:alpha:dir", "zeta"]);
    }

    #[test]
    fn help_is_keyed_by_name() {
        let mut reg = Registry::new();
        reg.register(def("obj")).unwrap();
        reg.add_help("obj", DefinitionHelp::simple("object", "generates objects"));
        assert_eq!(reg.help_for("obj").unwrap().category, "object");
        assert!(reg.help_for("other").is_none());
    }
}
