use std::collections::HashMap;

use crate::ability::{Ability, AbilityCategory};

/// Resolves configured action names to ability descriptors.
pub trait ActionCatalog: Send + Sync {
    /// Finds an ability by name, ignoring case.
    fn resolve(&self, name: &str) -> Option<Ability>;

    fn by_category(&self, category: AbilityCategory) -> Vec<Ability>;
}

/// [`ActionCatalog`] backed by an in-memory map.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    abilities: HashMap<String, Ability>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an ability.
    pub fn insert(&mut self, ability: Ability) {
        self.abilities
            .insert(ability.name.to_ascii_lowercase(), ability);
    }

    #[must_use]
    pub fn with(mut self, ability: Ability) -> Self {
        self.insert(ability);
        self
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl FromIterator<Ability> for MemoryCatalog {
    fn from_iter<T: IntoIterator<Item = Ability>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for ability in iter {
            catalog.insert(ability);
        }
        catalog
    }
}

impl ActionCatalog for MemoryCatalog {
    fn resolve(&self, name: &str) -> Option<Ability> {
        self.abilities.get(&name.to_ascii_lowercase()).cloned()
    }

    fn by_category(&self, category: AbilityCategory) -> Vec<Ability> {
        let mut found: Vec<Ability> = self
            .abilities
            .values()
            .filter(|ability| ability.category == category)
            .cloned()
            .collect();
        found.sort_by_key(|ability| ability.id);
        found
    }
}
