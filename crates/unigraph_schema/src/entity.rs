//! Entity schema definitions.

use std::fmt;

/// Irregular plural forms used by list queries.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[("factory", "factories"), ("flash", "flashes")];

/// Returns the plural form of an entity name as used by list queries.
///
/// ```
/// use unigraph_schema::pluralize;
///
/// assert_eq!(pluralize("pool"), "pools");
/// assert_eq!(pluralize("factory"), "factories");
/// ```
pub fn pluralize(name: &str) -> String {
    IRREGULAR_PLURALS
        .iter()
        .find(|(singular, _)| *singular == name)
        .map_or_else(|| format!("{name}s"), |(_, plural)| (*plural).to_string())
}

/// The static description of one entity type.
///
/// `direct` lists the scalar fields selectable as leaves. `references` maps a
/// field name to the name of the entity it points at; declaration order is
/// significant and drives the order of generated selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub name: &'static str,
    pub direct: &'static [&'static str],
    pub references: &'static [(&'static str, &'static str)],
}

impl EntitySchema {
    /// Creates a new entity schema.
    pub const fn new(
        name: &'static str,
        direct: &'static [&'static str],
        references: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            direct,
            references,
        }
    }

    /// Returns the entity name (the singular query field).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the direct scalar fields in declaration order.
    pub fn direct_fields(&self) -> &'static [&'static str] {
        self.direct
    }

    /// Returns the reference fields as `(field, entity)` pairs in declaration order.
    pub fn references(&self) -> &'static [(&'static str, &'static str)] {
        self.references
    }

    /// Returns the entity referenced by `field`, if `field` is a reference.
    pub fn reference(&self, field: &str) -> Option<&'static str> {
        self.references
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, target)| *target)
    }

    /// Returns true if `field` is a direct scalar field of this entity.
    pub fn has_direct_field(&self, field: &str) -> bool {
        self.direct.contains(&field)
    }

    /// Returns true if the entity has no reference fields.
    pub fn is_leaf(&self) -> bool {
        self.references.is_empty()
    }

    /// Returns the GraphQL type name (`poolDayData` -> `PoolDayData`).
    pub fn type_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        }
    }

    /// Returns the plural query field used for list queries.
    pub fn plural_name(&self) -> String {
        pluralize(self.name)
    }
}

impl fmt::Display for EntitySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
