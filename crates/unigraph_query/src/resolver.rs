//! Field resolution and validation against entity schemas.

use crate::error::{QueryError, QueryResult};
use crate::path::FieldPath;
use rustc_hash::FxHashSet;
use unigraph_schema::{Catalog, EntitySchema};

/// How far `resolve` descends into reference fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Reference fields contribute only `ref.id`.
    Shallow,
    /// Reference fields are expanded one hop: `ref.field` for each direct
    /// field of the referenced entity and `ref.subref.id` for its references.
    #[default]
    OneHop,
}

/// Returns true if `field` is a direct scalar field of `entity`.
///
/// Reference field names are not direct fields, so a bare `token0` on a pool
/// is rejected; traversal always needs the dotted form.
pub fn is_valid_direct_field(entity: &EntitySchema, field: &str) -> bool {
    entity.has_direct_field(field)
}

/// Enumerates every field path of `entity`, minus the paths in `exclude`.
///
/// Direct fields come first in declaration order, followed by the paths of
/// each reference field in declaration order. Exclusions match full dotted
/// paths; excluding a path that is never produced has no effect.
///
/// Fails with [`QueryError::UnknownReference`] when one-hop expansion needs
/// an entity missing from `catalog`.
pub fn resolve(
    catalog: &Catalog,
    entity: &EntitySchema,
    exclude: &[FieldPath],
    expansion: Expansion,
) -> QueryResult<Vec<FieldPath>> {
    let exclude: FxHashSet<&FieldPath> = exclude.iter().collect();
    let mut fields = Vec::new();
    let prefix = FieldPath::root();
    collect(catalog, entity, &prefix, expansion, &exclude, &mut fields)?;
    Ok(fields)
}

fn collect(
    catalog: &Catalog,
    entity: &EntitySchema,
    prefix: &FieldPath,
    expansion: Expansion,
    exclude: &FxHashSet<&FieldPath>,
    out: &mut Vec<FieldPath>,
) -> QueryResult<()> {
    let mut push = |path: FieldPath| {
        if !exclude.contains(&path) {
            out.push(path);
        }
    };

    for field in entity.direct_fields() {
        push(prefix.child(field));
    }

    let mut expanded = Vec::new();
    for (field, target) in entity.references() {
        let ref_prefix = prefix.child(field);
        match expansion {
            Expansion::Shallow => push(ref_prefix.child("id")),
            Expansion::OneHop => {
                let target_schema = catalog
                    .get(target)
                    .ok_or_else(|| QueryError::unknown_reference(entity.name(), *field, *target))?;
                expanded.push((ref_prefix, target_schema));
            }
        }
    }

    for (ref_prefix, target_schema) in expanded {
        collect(
            catalog,
            target_schema,
            &ref_prefix,
            Expansion::Shallow,
            exclude,
            out,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use unigraph_schema::CatalogBuilder;

    fn test_catalog() -> Catalog {
        CatalogBuilder::new()
            .entity(EntitySchema::new(
                "pool",
                &["id", "liquidity", "sqrtPrice"],
                &[("token0", "token")],
            ))
            .entity(EntitySchema::new(
                "token",
                &["id", "symbol"],
                &[("whitelistPools", "pool")],
            ))
            .entity(EntitySchema::new("bundle", &["id", "ethPriceUSD"], &[]))
            .build()
    }

    fn paths(fields: &[FieldPath]) -> Vec<String> {
        fields.iter().map(ToString::to_string).collect()
    }

    fn parse_all(raw: &[&str]) -> Vec<FieldPath> {
        raw.iter().map(|r| FieldPath::parse(r).unwrap()).collect()
    }

    #[test]
    fn test_leaf_entity_yields_direct_fields() {
        let catalog = test_catalog();
        let bundle = catalog.get("bundle").unwrap();
        let fields = resolve(&catalog, bundle, &[], Expansion::OneHop).unwrap();
        assert_eq!(paths(&fields), vec!["id", "ethPriceUSD"]);
    }

    #[test]
    fn test_one_hop_expansion() {
        let catalog = test_catalog();
        let pool = catalog.get("pool").unwrap();
        let fields = resolve(&catalog, pool, &[], Expansion::OneHop).unwrap();
        assert_eq!(
            paths(&fields),
            vec![
                "id",
                "liquidity",
                "sqrtPrice",
                "token0.id",
                "token0.symbol",
                "token0.whitelistPools.id",
            ]
        );
    }

    #[test]
    fn test_shallow_expansion() {
        let catalog = test_catalog();
        let pool = catalog.get("pool").unwrap();
        let fields = resolve(&catalog, pool, &[], Expansion::Shallow).unwrap();
        assert_eq!(paths(&fields), vec!["id", "liquidity", "sqrtPrice", "token0.id"]);
    }

    #[test]
    fn test_exclusion_matches_full_paths() {
        let catalog = test_catalog();
        let pool = catalog.get("pool").unwrap();
        let exclude = parse_all(&["liquidity", "token0.symbol", "symbol", "notAField"]);
        let fields = resolve(&catalog, pool, &exclude, Expansion::OneHop).unwrap();
        assert_eq!(
            paths(&fields),
            vec!["id", "sqrtPrice", "token0.id", "token0.whitelistPools.id"]
        );
    }

    #[test]
    fn test_unknown_reference() {
        let catalog = CatalogBuilder::new()
            .entity(EntitySchema::new("pool", &["id"], &[("token0", "token")]))
            .build();
        let pool = catalog.get("pool").unwrap();

        let err = resolve(&catalog, pool, &[], Expansion::OneHop).unwrap_err();
        assert_eq!(err, QueryError::unknown_reference("pool", "token0", "token"));

        // shallow resolution never looks the target up
        let fields = resolve(&catalog, pool, &[], Expansion::Shallow).unwrap();
        assert_eq!(paths(&fields), vec!["id", "token0.id"]);
    }

    #[test]
    fn test_is_valid_direct_field() {
        let catalog = test_catalog();
        let pool = catalog.get("pool").unwrap();
        assert!(is_valid_direct_field(pool, "sqrtPrice"));
        assert!(!is_valid_direct_field(pool, "poolCount"));
        assert!(!is_valid_direct_field(pool, "token0"));
    }
}
