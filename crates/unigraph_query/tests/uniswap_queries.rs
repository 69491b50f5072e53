//! Query construction against the built-in Uniswap v3 catalog.

use std::collections::BTreeSet;
use unigraph_query::{
    Expansion, FieldPath, OptionsError, QueryBuilder, QueryError, RequestOptions,
};
use unigraph_schema::Catalog;

fn builder() -> QueryBuilder<'static> {
    QueryBuilder::new(Catalog::uniswap_v3())
}

fn paths(raw: &[&str]) -> Vec<FieldPath> {
    raw.iter().map(|r| FieldPath::parse(r).unwrap()).collect()
}

#[test]
fn test_resolution_counts() {
    let builder = builder();
    let cases: &[(&str, &[&str], Expansion, usize)] = &[
        ("factory", &[], Expansion::OneHop, 13),
        ("factory", &["owner", "txCount"], Expansion::OneHop, 11),
        ("pool", &[], Expansion::Shallow, 29),
        ("pool", &["feeTier", "token0.id"], Expansion::Shallow, 27),
        ("pool", &[], Expansion::OneHop, 59),
        ("pool", &["feeTier", "token0.id"], Expansion::OneHop, 57),
    ];

    for (entity, exclude, expansion, expected) in cases {
        let fields = builder
            .resolve(entity, &paths(exclude), *expansion)
            .unwrap();
        assert_eq!(fields.len(), *expected, "{entity} {exclude:?} {expansion:?}");
    }
}

#[test]
fn test_leaf_entities_resolve_to_direct_fields() {
    let catalog = Catalog::uniswap_v3();
    for entity in catalog.entities().filter(|e| e.references().is_empty()) {
        let fields = builder()
            .resolve(entity.name(), &[], Expansion::OneHop)
            .unwrap();
        assert_eq!(fields.len(), entity.direct_fields().len(), "{entity}");
        assert!(fields.iter().all(FieldPath::is_direct));
    }
}

#[test]
fn test_full_resolution_size() {
    let catalog = Catalog::uniswap_v3();
    for entity in catalog.entities() {
        let expected = entity.direct_fields().len()
            + entity
                .references()
                .iter()
                .map(|(_, target)| {
                    let target = catalog.get(target).unwrap();
                    target.direct_fields().len() + target.references().len()
                })
                .sum::<usize>();

        let fields = builder()
            .resolve(entity.name(), &[], Expansion::OneHop)
            .unwrap();
        assert_eq!(fields.len(), expected, "{entity}");
    }
}

#[test]
fn test_exclusion_removes_exactly_the_excluded_paths() {
    let builder = builder();
    let full: BTreeSet<String> = builder
        .resolve("position", &[], Expansion::OneHop)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();

    let exclude = paths(&[
        "liquidity",
        "pool.feeTier",
        "tickLower.pool.id",
        "transaction.blockNumber",
        "notFound",
        "token0.whitelistPools.txCount",
    ]);
    let remaining: BTreeSet<String> = builder
        .resolve("position", &exclude, Expansion::OneHop)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();

    let removed: BTreeSet<String> = full.difference(&remaining).cloned().collect();
    let expected: BTreeSet<String> = exclude
        .iter()
        .map(ToString::to_string)
        .filter(|p| full.contains(p))
        .collect();
    assert_eq!(removed, expected);
    assert_eq!(removed.len(), 4);
}

#[test]
fn test_every_entity_builds() {
    let catalog = Catalog::uniswap_v3();
    let builder = builder();
    let options = RequestOptions::new().block(12_369_621);

    for entity in catalog.entities() {
        let by_id = builder.by_id(entity.name(), "0x1", &options).unwrap();
        assert!(by_id
            .query
            .starts_with(&format!("query {}($id: ID!) {{", entity.name())));
        assert!(by_id.query.contains("block: {number: 12369621}"));
        assert_eq!(by_id.variables.len(), 1);

        let list = builder.list(entity.name(), &options).unwrap();
        assert!(list.query.contains(&format!("{}_orderBy!", entity.type_name())));
        assert_eq!(list.operation_name, entity.plural_name());
        assert_eq!(list.variables.len(), 4);
    }
}

#[test]
fn test_field_combinations() {
    let builder = builder();
    let valid: &[(&str, &[&str], &[&str])] = &[
        ("factory", &["id", "owner"], &[]),
        (
            "factory",
            &["*"],
            &["totalValueLockedUSDUntracked", "totalValueLockedETHUntracked"],
        ),
        (
            "pool",
            &["id", "txCount", "token0.id", "token1.derivedETH", "token1.whitelistPools.txCount"],
            &[],
        ),
        ("pool", &["*"], &["feeTier", "token0.symbol", "token1.whitelistPools.txCount"]),
        ("token", &["*", "id", "decimals", "whitelistPools.txCount"], &[]),
        ("token", &["*"], &["id", "derivedETH", "notFound"]),
    ];

    for (entity, include, exclude) in valid {
        let options = RequestOptions::new()
            .include(include.iter().copied())
            .exclude(exclude.iter().copied());
        assert!(builder.by_id(entity, "0x1", &options).is_ok(), "{entity} {include:?}");
        assert!(builder.list(entity, &options).is_ok(), "{entity} {include:?}");
    }

    let options = RequestOptions::new().include(["id", "txCount", "token1.whitelistPools.notFound"]);
    let err = builder.by_id("pool", "0x1", &options).unwrap_err();
    assert!(err.to_string().contains("unrecognized field"));
    assert!(err.to_string().contains("token1.whitelistPools.notFound"));
}

#[test]
fn test_not_a_field_is_rejected_everywhere() {
    let catalog = Catalog::uniswap_v3();
    let options = RequestOptions::new().include(["notAField"]);
    for entity in catalog.entities() {
        let err = builder().by_id(entity.name(), "0x1", &options).unwrap_err();
        assert_eq!(err, QueryError::invalid_field("notAField"));
    }
}

#[test]
fn test_list_options() {
    let builder = builder();

    let err = builder
        .list("pool", &RequestOptions::new().first(1001))
        .unwrap_err();
    assert_eq!(err, QueryError::InvalidOptions(OptionsError::FirstTooLarge(1001)));

    let document = builder.list("pool", &RequestOptions::new().first(0)).unwrap();
    assert_eq!(document.variables["first"], 100);

    let err = builder
        .by_id("pool", "0x1", &RequestOptions::new().first(100))
        .unwrap_err();
    assert!(err.to_string().contains("list query options"));
}

#[test]
fn test_deep_paths_fail_loudly() {
    let options = RequestOptions::new().include(["token0.whitelistPools.token1.id"]);
    let err = builder().by_id("pool", "0x1", &options).unwrap_err();
    assert_eq!(err, QueryError::invalid_field("token0.whitelistPools.token1.id"));
}

#[test]
fn test_bare_reference_name_is_rejected() {
    let options = RequestOptions::new().include(["id", "token0"]);
    let err = builder().by_id("pool", "0x1", &options).unwrap_err();
    assert_eq!(err, QueryError::invalid_field("token0"));
}

#[test]
fn test_pool_day_data_list() {
    let options = RequestOptions::new()
        .include(["date", "volumeUSD", "pool.id", "pool.token0.symbol"])
        .first(7)
        .order_by("date")
        .order_dir("desc");
    let document = builder().list("poolDayData", &options).unwrap();

    insta::assert_snapshot!(document.query, @r"
    query poolDayDatas($first: Int!, $skip: Int!, $orderBy: PoolDayData_orderBy!, $orderDir: OrderDirection!) {
      poolDayDatas(first: $first, skip: $skip, orderBy: $orderBy, orderDirection: $orderDir) {
        date
        volumeUSD
        pool {
          id
          token0 {
            symbol
          }
        }
      }
    }
    ");
    assert_eq!(document.variables["orderBy"], "date");
    assert_eq!(document.variables["orderDir"], "desc");
}
