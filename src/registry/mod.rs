mod catalog;
pub mod definition;

pub use definition::*;

use ahash::AHashMap;

/// An ordered collection of `NodeDefinition`s, indexed by key.
///
/// The registry is read-only to the compiler. Custom definitions (for example
/// user-authored `NodeKind::Custom` stages) are merged in with [`register`],
/// which replaces any earlier definition carrying the same key.
///
/// [`register`]: NodeRegistry::register
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    defs: Vec<NodeDefinition>,
    by_key: AHashMap<String, usize>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            by_key: AHashMap::new(),
        }
    }

    /// Creates a registry populated with the built-in node catalog.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for def in catalog::builtin_definitions() {
            registry.register(def);
        }
        registry
    }

    /// Adds a definition, replacing any existing one with the same key.
    pub fn register(&mut self, def: NodeDefinition) {
        match self.by_key.get(&def.key) {
            Some(&slot) => self.defs[slot] = def,
            None => {
                self.by_key.insert(def.key.clone(), self.defs.len());
                self.defs.push(def);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&NodeDefinition> {
        self.by_key.get(key).map(|&slot| &self.defs[slot])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
