//! Uniswap v3 subgraph entities.
//!
//! Field lists mirror the entity types published by the Uniswap v3 subgraph.
//! Derived (back-reference) fields are not modelled.

use crate::entity::EntitySchema;

/// Every entity in registration order.
pub const ENTITIES: &[EntitySchema] = &[
    FACTORY,
    POOL,
    TOKEN,
    BUNDLE,
    TICK,
    POSITION,
    POSITION_SNAPSHOT,
    TRANSACTION,
    MINT,
    BURN,
    SWAP,
    COLLECT,
    FLASH,
    UNISWAP_DAY_DATA,
    POOL_DAY_DATA,
    POOL_HOUR_DATA,
    TICK_HOUR_DATA,
    TICK_DAY_DATA,
    TOKEN_DAY_DATA,
    TOKEN_HOUR_DATA,
];

pub const FACTORY: EntitySchema = EntitySchema::new(
    "factory",
    &[
        "id",
        "poolCount",
        "txCount",
        "totalVolumeUSD",
        "totalVolumeETH",
        "totalFeesUSD",
        "totalFeesETH",
        "untrackedVolumeUSD",
        "totalValueLockedUSD",
        "totalValueLockedETH",
        "totalValueLockedUSDUntracked",
        "totalValueLockedETHUntracked",
        "owner",
    ],
    &[],
);

pub const POOL: EntitySchema = EntitySchema::new(
    "pool",
    &[
        "id",
        "createdAtTimestamp",
        "createdAtBlockNumber",
        "feeTier",
        "liquidity",
        "sqrtPrice",
        "feeGrowthGlobal0X128",
        "feeGrowthGlobal1X128",
        "token0Price",
        "token1Price",
        "tick",
        "observationIndex",
        "volumeToken0",
        "volumeToken1",
        "volumeUSD",
        "untrackedVolumeUSD",
        "feesUSD",
        "txCount",
        "collectedFeesToken0",
        "collectedFeesToken1",
        "collectedFeesUSD",
        "totalValueLockedToken0",
        "totalValueLockedToken1",
        "totalValueLockedETH",
        "totalValueLockedUSD",
        "totalValueLockedUSDUntracked",
        "liquidityProviderCount",
    ],
    &[
        ("token0", "token"),
        ("token1", "token"),
    ],
);

pub const TOKEN: EntitySchema = EntitySchema::new(
    "token",
    &[
        "id",
        "symbol",
        "name",
        "decimals",
        "totalSupply",
        "volume",
        "volumeUSD",
        "untrackedVolumeUSD",
        "feesUSD",
        "txCount",
        "poolCount",
        "totalValueLocked",
        "totalValueLockedUSD",
        "totalValueLockedUSDUntracked",
        "derivedETH",
    ],
    &[
        ("whitelistPools", "pool"),
    ],
);

pub const BUNDLE: EntitySchema = EntitySchema::new(
    "bundle",
    &[
        "id",
        "ethPriceUSD",
    ],
    &[],
);

pub const TICK: EntitySchema = EntitySchema::new(
    "tick",
    &[
        "id",
        "poolAddress",
        "tickIdx",
        "liquidityGross",
        "liquidityNet",
        "price0",
        "price1",
        "volumeToken0",
        "volumeToken1",
        "volumeUSD",
        "untrackedVolumeUSD",
        "feesUSD",
        "collectedFeesToken0",
        "collectedFeesToken1",
        "collectedFeesUSD",
        "createdAtTimestamp",
        "createdAtBlockNumber",
        "liquidityProviderCount",
        "feeGrowthOutside0X128",
        "feeGrowthOutside1X128",
    ],
    &[
        ("pool", "pool"),
    ],
);

pub const POSITION: EntitySchema = EntitySchema::new(
    "position",
    &[
        "id",
        "owner",
        "liquidity",
        "depositedToken0",
        "depositedToken1",
        "withdrawnToken0",
        "withdrawnToken1",
        "collectedFeesToken0",
        "collectedFeesToken1",
        "feeGrowthInside0LastX128",
        "feeGrowthInside1LastX128",
    ],
    &[
        ("pool", "pool"),
        ("token0", "token"),
        ("token1", "token"),
        ("tickLower", "tick"),
        ("tickUpper", "tick"),
        ("transaction", "transaction"),
    ],
);

pub const POSITION_SNAPSHOT: EntitySchema = EntitySchema::new(
    "positionSnapshot",
    &[
        "id",
        "owner",
        "blockNumber",
        "timestamp",
        "liquidity",
        "depositedToken0",
        "depositedToken1",
        "withdrawnToken0",
        "withdrawnToken1",
        "collectedFeesToken0",
        "collectedFeesToken1",
        "feeGrowthInside0LastX128",
        "feeGrowthInside1LastX128",
    ],
    &[
        ("pool", "pool"),
        ("position", "position"),
        ("transaction", "transaction"),
    ],
);

pub const TRANSACTION: EntitySchema = EntitySchema::new(
    "transaction",
    &[
        "id",
        "blockNumber",
        "timestamp",
        "gasUsed",
        "gasPrice",
    ],
    &[],
);

pub const MINT: EntitySchema = EntitySchema::new(
    "mint",
    &[
        "id",
        "timestamp",
        "owner",
        "sender",
        "origin",
        "amount",
        "amount0",
        "amount1",
        "amountUSD",
        "tickLower",
        "tickUpper",
        "logIndex",
    ],
    &[
        ("transaction", "transaction"),
        ("pool", "pool"),
        ("token0", "token"),
        ("token1", "token"),
    ],
);

pub const BURN: EntitySchema = EntitySchema::new(
    "burn",
    &[
        "id",
        "timestamp",
        "owner",
        "origin",
        "amount",
        "amount0",
        "amount1",
        "amountUSD",
        "tickLower",
        "tickUpper",
        "logIndex",
    ],
    &[
        ("transaction", "transaction"),
        ("pool", "pool"),
        ("token0", "token"),
        ("token1", "token"),
    ],
);

pub const SWAP: EntitySchema = EntitySchema::new(
    "swap",
    &[
        "id",
        "timestamp",
        "sender",
        "recipient",
        "origin",
        "amount0",
        "amount1",
        "amountUSD",
        "sqrtPriceX96",
        "tick",
        "logIndex",
    ],
    &[
        ("transaction", "transaction"),
        ("pool", "pool"),
        ("token0", "token"),
        ("token1", "token"),
    ],
);

pub const COLLECT: EntitySchema = EntitySchema::new(
    "collect",
    &[
        "id",
        "timestamp",
        "owner",
        "amount0",
        "amount1",
        "amountUSD",
        "tickLower",
        "tickUpper",
        "logIndex",
    ],
    &[
        ("transaction", "transaction"),
        ("pool", "pool"),
    ],
);

pub const FLASH: EntitySchema = EntitySchema::new(
    "flash",
    &[
        "id",
        "timestamp",
        "sender",
        "recipient",
        "amount0",
        "amount1",
        "amountUSD",
        "amount0Paid",
        "amount1Paid",
        "logIndex",
    ],
    &[
        ("transaction", "transaction"),
        ("pool", "pool"),
    ],
);

pub const UNISWAP_DAY_DATA: EntitySchema = EntitySchema::new(
    "uniswapDayData",
    &[
        "id",
        "date",
        "volumeETH",
        "volumeUSD",
        "volumeUSDUntracked",
        "feesUSD",
        "txCount",
        "tvlUSD",
    ],
    &[],
);

pub const POOL_DAY_DATA: EntitySchema = EntitySchema::new(
    "poolDayData",
    &[
        "id",
        "date",
        "liquidity",
        "sqrtPrice",
        "token0Price",
        "token1Price",
        "tick",
        "feeGrowthGlobal0X128",
        "feeGrowthGlobal1X128",
        "tvlUSD",
        "volumeToken0",
        "volumeToken1",
        "volumeUSD",
        "feesUSD",
        "txCount",
        "open",
        "high",
        "low",
        "close",
    ],
    &[
        ("pool", "pool"),
    ],
);

pub const POOL_HOUR_DATA: EntitySchema = EntitySchema::new(
    "poolHourData",
    &[
        "id",
        "periodStartUnix",
        "liquidity",
        "sqrtPrice",
        "token0Price",
        "token1Price",
        "tick",
        "feeGrowthGlobal0X128",
        "feeGrowthGlobal1X128",
        "tvlUSD",
        "volumeToken0",
        "volumeToken1",
        "volumeUSD",
        "feesUSD",
        "txCount",
        "open",
        "high",
        "low",
        "close",
    ],
    &[
        ("pool", "pool"),
    ],
);

pub const TICK_HOUR_DATA: EntitySchema = EntitySchema::new(
    "tickHourData",
    &[
        "id",
        "periodStartUnix",
        "liquidityGross",
        "liquidityNet",
        "volumeToken0",
        "volumeToken1",
        "volumeUSD",
        "feesUSD",
    ],
    &[
        ("pool", "pool"),
        ("tick", "tick"),
    ],
);

pub const TICK_DAY_DATA: EntitySchema = EntitySchema::new(
    "tickDayData",
    &[
        "id",
        "date",
        "liquidityGross",
        "liquidityNet",
        "volumeToken0",
        "volumeToken1",
        "volumeUSD",
        "feesUSD",
        "feeGrowthOutside0X128",
        "feeGrowthOutside1X128",
    ],
    &[
        ("pool", "pool"),
        ("tick", "tick"),
    ],
);

pub const TOKEN_DAY_DATA: EntitySchema = EntitySchema::new(
    "tokenDayData",
    &[
        "id",
        "date",
        "volume",
        "volumeUSD",
        "untrackedVolumeUSD",
        "totalValueLocked",
        "totalValueLockedUSD",
        "priceUSD",
        "feesUSD",
        "open",
        "high",
        "low",
        "close",
    ],
    &[
        ("token", "token"),
    ],
);

pub const TOKEN_HOUR_DATA: EntitySchema = EntitySchema::new(
    "tokenHourData",
    &[
        "id",
        "periodStartUnix",
        "volume",
        "volumeUSD",
        "untrackedVolumeUSD",
        "totalValueLocked",
        "totalValueLockedUSD",
        "priceUSD",
        "feesUSD",
        "open",
        "high",
        "low",
        "close",
    ],
    &[
        ("token", "token"),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_field_counts() {
        assert_eq!(FACTORY.direct_fields().len(), 13);
        assert_eq!(POOL.direct_fields().len(), 27);
        assert_eq!(TOKEN.direct_fields().len(), 15);
        assert_eq!(POSITION.references().len(), 6);
        assert!(BUNDLE.is_leaf());
    }

    #[test]
    fn test_references_resolve() {
        let catalog = Catalog::uniswap_v3();
        for entity in ENTITIES {
            for (field, target) in entity.references() {
                assert!(
                    catalog.contains(target),
                    "{}.{} points at unknown entity {}",
                    entity.name(),
                    field,
                    target
                );
            }
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ENTITIES.iter().map(EntitySchema::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ENTITIES.len());
    }
}
