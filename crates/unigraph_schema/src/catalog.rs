//! Read-only entity catalog.

use crate::entity::EntitySchema;
use crate::uniswap;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

static UNISWAP_V3: Lazy<Catalog> = Lazy::new(|| {
    uniswap::ENTITIES
        .iter()
        .fold(CatalogBuilder::new(), |builder, entity| builder.entity(*entity))
        .build()
});

/// A registry of entity schemas keyed by entity name.
///
/// A catalog is immutable once built. References between entities are not
/// checked here; a dangling reference only surfaces when a query touches it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: IndexMap<&'static str, EntitySchema>,
}

impl Catalog {
    /// Returns the built-in Uniswap v3 subgraph catalog.
    pub fn uniswap_v3() -> &'static Catalog {
        &UNISWAP_V3
    }

    /// Gets an entity by name.
    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.get(name)
    }

    /// Returns true if an entity with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Returns all entities in registration order.
    pub fn entities(&self) -> impl Iterator<Item = &EntitySchema> {
        self.entities.values()
    }

    /// Returns the number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Catalog builder.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Creates a new, empty catalog builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity. A later entity with the same name replaces the earlier one.
    pub fn entity(mut self, schema: EntitySchema) -> Self {
        self.catalog.entities.insert(schema.name, schema);
        self
    }

    /// Builds the catalog.
    pub fn build(self) -> Catalog {
        self.catalog
    }
}
