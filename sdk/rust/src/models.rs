//! Typed Uniswap v3 subgraph entities.
//!
//! Scalars keep the subgraph's string encoding (`BigInt`, `BigDecimal` and
//! `Bytes` all arrive as JSON strings); see [`crate::converter`] for numeric
//! conversion. Every field defaults when it was not selected, so a struct
//! decoded from a narrow query simply leaves the unselected fields empty.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts the subgraph's `Int` scalars (JSON numbers) alongside strings.
fn int_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(i64),
        Text(String),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => n.to_string(),
        Scalar::Text(s) => s,
    })
}

/// Decodes an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Uniswap v3 factory: protocol-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Factory {
    pub id: String,
    pub pool_count: String,
    pub tx_count: String,
    #[serde(rename = "totalVolumeUSD")]
    pub total_volume_usd: String,
    #[serde(rename = "totalVolumeETH")]
    pub total_volume_eth: String,
    #[serde(rename = "totalFeesUSD")]
    pub total_fees_usd: String,
    #[serde(rename = "totalFeesETH")]
    pub total_fees_eth: String,
    #[serde(rename = "untrackedVolumeUSD")]
    pub untracked_volume_usd: String,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
    #[serde(rename = "totalValueLockedETH")]
    pub total_value_locked_eth: String,
    #[serde(rename = "totalValueLockedUSDUntracked")]
    pub total_value_locked_usd_untracked: String,
    #[serde(rename = "totalValueLockedETHUntracked")]
    pub total_value_locked_eth_untracked: String,
    pub owner: String,
}

/// A Uniswap v3 pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub created_at_timestamp: String,
    pub created_at_block_number: String,
    pub token0: Option<Box<Token>>,
    pub token1: Option<Box<Token>>,
    pub fee_tier: String,
    pub liquidity: String,
    pub sqrt_price: String,
    pub fee_growth_global0_x128: String,
    pub fee_growth_global1_x128: String,
    pub token0_price: String,
    pub token1_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tick: String,
    pub observation_index: String,
    pub volume_token0: String,
    pub volume_token1: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "untrackedVolumeUSD")]
    pub untracked_volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub tx_count: String,
    pub collected_fees_token0: String,
    pub collected_fees_token1: String,
    #[serde(rename = "collectedFeesUSD")]
    pub collected_fees_usd: String,
    pub total_value_locked_token0: String,
    pub total_value_locked_token1: String,
    #[serde(rename = "totalValueLockedETH")]
    pub total_value_locked_eth: String,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
    #[serde(rename = "totalValueLockedUSDUntracked")]
    pub total_value_locked_usd_untracked: String,
    pub liquidity_provider_count: String,
}

/// An ERC-20 token traded on Uniswap v3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub decimals: String,
    pub total_supply: String,
    pub volume: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "untrackedVolumeUSD")]
    pub untracked_volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub tx_count: String,
    pub pool_count: String,
    pub total_value_locked: String,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
    #[serde(rename = "totalValueLockedUSDUntracked")]
    pub total_value_locked_usd_untracked: String,
    #[serde(rename = "derivedETH")]
    pub derived_eth: String,
    pub whitelist_pools: Vec<Pool>,
}

/// Global ETH price in USD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bundle {
    pub id: String,
    #[serde(rename = "ethPriceUSD")]
    pub eth_price_usd: String,
}

/// An initialized tick of a pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tick {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pool_address: String,
    pub tick_idx: String,
    pub pool: Option<Box<Pool>>,
    pub liquidity_gross: String,
    pub liquidity_net: String,
    pub price0: String,
    pub price1: String,
    pub volume_token0: String,
    pub volume_token1: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "untrackedVolumeUSD")]
    pub untracked_volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub collected_fees_token0: String,
    pub collected_fees_token1: String,
    #[serde(rename = "collectedFeesUSD")]
    pub collected_fees_usd: String,
    pub created_at_timestamp: String,
    pub created_at_block_number: String,
    pub liquidity_provider_count: String,
    pub fee_growth_outside0_x128: String,
    pub fee_growth_outside1_x128: String,
}

/// A liquidity position NFT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub owner: String,
    pub pool: Option<Box<Pool>>,
    pub token0: Option<Box<Token>>,
    pub token1: Option<Box<Token>>,
    pub tick_lower: Option<Box<Tick>>,
    pub tick_upper: Option<Box<Tick>>,
    pub liquidity: String,
    pub deposited_token0: String,
    pub deposited_token1: String,
    pub withdrawn_token0: String,
    pub withdrawn_token1: String,
    pub collected_fees_token0: String,
    pub collected_fees_token1: String,
    pub transaction: Option<Box<Transaction>>,
    pub fee_growth_inside0_last_x128: String,
    pub fee_growth_inside1_last_x128: String,
}

/// Position state captured at a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PositionSnapshot {
    pub id: String,
    pub owner: String,
    pub pool: Option<Box<Pool>>,
    pub position: Option<Box<Position>>,
    pub block_number: String,
    pub timestamp: String,
    pub liquidity: String,
    pub deposited_token0: String,
    pub deposited_token1: String,
    pub withdrawn_token0: String,
    pub withdrawn_token1: String,
    pub collected_fees_token0: String,
    pub collected_fees_token1: String,
    pub transaction: Option<Box<Transaction>>,
    pub fee_growth_inside0_last_x128: String,
    pub fee_growth_inside1_last_x128: String,
}

/// An Ethereum transaction touching Uniswap v3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub block_number: String,
    pub timestamp: String,
    pub gas_used: String,
    pub gas_price: String,
}

/// A liquidity mint event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mint {
    pub id: String,
    pub transaction: Option<Box<Transaction>>,
    pub timestamp: String,
    pub pool: Option<Box<Pool>>,
    pub token0: Option<Box<Token>>,
    pub token1: Option<Box<Token>>,
    pub owner: String,
    pub sender: String,
    pub origin: String,
    pub amount: String,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD", deserialize_with = "null_as_default")]
    pub amount_usd: String,
    pub tick_lower: String,
    pub tick_upper: String,
    #[serde(deserialize_with = "null_as_default")]
    pub log_index: String,
}

/// A liquidity burn event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Burn {
    pub id: String,
    pub transaction: Option<Box<Transaction>>,
    pub pool: Option<Box<Pool>>,
    pub token0: Option<Box<Token>>,
    pub token1: Option<Box<Token>>,
    pub timestamp: String,
    pub owner: String,
    pub origin: String,
    pub amount: String,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD", deserialize_with = "null_as_default")]
    pub amount_usd: String,
    pub tick_lower: String,
    pub tick_upper: String,
    #[serde(deserialize_with = "null_as_default")]
    pub log_index: String,
}

/// A swap event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Swap {
    pub id: String,
    pub transaction: Option<Box<Transaction>>,
    pub timestamp: String,
    pub pool: Option<Box<Pool>>,
    pub token0: Option<Box<Token>>,
    pub token1: Option<Box<Token>>,
    pub sender: String,
    pub recipient: String,
    pub origin: String,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD", deserialize_with = "null_as_default")]
    pub amount_usd: String,
    pub sqrt_price_x96: String,
    pub tick: String,
    #[serde(deserialize_with = "null_as_default")]
    pub log_index: String,
}

/// A fee collection event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collect {
    pub id: String,
    pub transaction: Option<Box<Transaction>>,
    pub timestamp: String,
    pub pool: Option<Box<Pool>>,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD", deserialize_with = "null_as_default")]
    pub amount_usd: String,
    pub tick_lower: String,
    pub tick_upper: String,
    #[serde(deserialize_with = "null_as_default")]
    pub log_index: String,
}

/// A flash loan event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flash {
    pub id: String,
    pub transaction: Option<Box<Transaction>>,
    pub timestamp: String,
    pub pool: Option<Box<Pool>>,
    pub sender: String,
    pub recipient: String,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD", deserialize_with = "null_as_default")]
    pub amount_usd: String,
    pub amount0_paid: String,
    pub amount1_paid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub log_index: String,
}

/// Protocol-wide daily aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UniswapDayData {
    pub id: String,
    #[serde(deserialize_with = "int_as_string")]
    pub date: String,
    #[serde(rename = "volumeETH")]
    pub volume_eth: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "volumeUSDUntracked")]
    pub volume_usd_untracked: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub tx_count: String,
    #[serde(rename = "tvlUSD")]
    pub tvl_usd: String,
}

/// Daily pool aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolDayData {
    pub id: String,
    #[serde(deserialize_with = "int_as_string")]
    pub date: String,
    pub pool: Option<Box<Pool>>,
    pub liquidity: String,
    pub sqrt_price: String,
    pub token0_price: String,
    pub token1_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tick: String,
    pub fee_growth_global0_x128: String,
    pub fee_growth_global1_x128: String,
    #[serde(rename = "tvlUSD")]
    pub tvl_usd: String,
    pub volume_token0: String,
    pub volume_token1: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub tx_count: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// Hourly pool aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolHourData {
    pub id: String,
    #[serde(deserialize_with = "int_as_string")]
    pub period_start_unix: String,
    pub pool: Option<Box<Pool>>,
    pub liquidity: String,
    pub sqrt_price: String,
    pub token0_price: String,
    pub token1_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tick: String,
    pub fee_growth_global0_x128: String,
    pub fee_growth_global1_x128: String,
    #[serde(rename = "tvlUSD")]
    pub tvl_usd: String,
    pub volume_token0: String,
    pub volume_token1: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub tx_count: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// Hourly tick aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TickHourData {
    pub id: String,
    #[serde(deserialize_with = "int_as_string")]
    pub period_start_unix: String,
    pub pool: Option<Box<Pool>>,
    pub tick: Option<Box<Tick>>,
    pub liquidity_gross: String,
    pub liquidity_net: String,
    pub volume_token0: String,
    pub volume_token1: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
}

/// Daily tick aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TickDayData {
    pub id: String,
    #[serde(deserialize_with = "int_as_string")]
    pub date: String,
    pub pool: Option<Box<Pool>>,
    pub tick: Option<Box<Tick>>,
    pub liquidity_gross: String,
    pub liquidity_net: String,
    pub volume_token0: String,
    pub volume_token1: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub fee_growth_outside0_x128: String,
    pub fee_growth_outside1_x128: String,
}

/// Daily token aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenDayData {
    pub id: String,
    #[serde(deserialize_with = "int_as_string")]
    pub date: String,
    pub token: Option<Box<Token>>,
    pub volume: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "untrackedVolumeUSD")]
    pub untracked_volume_usd: String,
    pub total_value_locked: String,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// Hourly token aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenHourData {
    pub id: String,
    #[serde(deserialize_with = "int_as_string")]
    pub period_start_unix: String,
    pub token: Option<Box<Token>>,
    pub volume: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "untrackedVolumeUSD")]
    pub untracked_volume_usd: String,
    pub total_value_locked: String,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// Declares the by-id and list response wrappers for each entity.
///
/// By-id responses hold `None` when the subgraph has no entity with the id.
macro_rules! responses {
    ($($model:ident => $single:ident { $one:ident }, $list:ident { $many:ident };)*) => {
        $(
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            #[serde(rename_all = "camelCase")]
            pub struct $single {
                #[serde(default)]
                pub $one: Option<$model>,
            }

            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            #[serde(rename_all = "camelCase")]
            pub struct $list {
                #[serde(default)]
                pub $many: Vec<$model>,
            }
        )*
    };
}

responses! {
    Factory => FactoryResponse { factory }, ListFactoriesResponse { factories };
    Pool => PoolResponse { pool }, ListPoolsResponse { pools };
    Token => TokenResponse { token }, ListTokensResponse { tokens };
    Bundle => BundleResponse { bundle }, ListBundlesResponse { bundles };
    Tick => TickResponse { tick }, ListTicksResponse { ticks };
    Position => PositionResponse { position }, ListPositionsResponse { positions };
    PositionSnapshot => PositionSnapshotResponse { position_snapshot },
        ListPositionSnapshotsResponse { position_snapshots };
    Transaction => TransactionResponse { transaction }, ListTransactionsResponse { transactions };
    Mint => MintResponse { mint }, ListMintsResponse { mints };
    Burn => BurnResponse { burn }, ListBurnsResponse { burns };
    Swap => SwapResponse { swap }, ListSwapsResponse { swaps };
    Collect => CollectResponse { collect }, ListCollectsResponse { collects };
    Flash => FlashResponse { flash }, ListFlashesResponse { flashes };
    UniswapDayData => UniswapDayDataResponse { uniswap_day_data },
        ListUniswapDayDatasResponse { uniswap_day_datas };
    PoolDayData => PoolDayDataResponse { pool_day_data },
        ListPoolDayDatasResponse { pool_day_datas };
    PoolHourData => PoolHourDataResponse { pool_hour_data },
        ListPoolHourDatasResponse { pool_hour_datas };
    TickHourData => TickHourDataResponse { tick_hour_data },
        ListTickHourDatasResponse { tick_hour_datas };
    TickDayData => TickDayDataResponse { tick_day_data },
        ListTickDayDatasResponse { tick_day_datas };
    TokenDayData => TokenDayDataResponse { token_day_data },
        ListTokenDayDatasResponse { token_day_datas };
    TokenHourData => TokenHourDataResponse { token_hour_data },
        ListTokenHourDatasResponse { token_hour_datas };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_pool_decodes() {
        let response: PoolResponse = serde_json::from_value(json!({
            "pool": {
                "id": "0x8ad5",
                "feeTier": "3000",
                "totalValueLockedUSD": "12.5",
                "token0": { "symbol": "USDC" }
            }
        }))
        .unwrap();

        let pool = response.pool.unwrap();
        assert_eq!(pool.id, "0x8ad5");
        assert_eq!(pool.fee_tier, "3000");
        assert_eq!(pool.total_value_locked_usd, "12.5");
        assert_eq!(pool.token0.as_ref().map(|t| t.symbol.as_str()), Some("USDC"));
        assert!(pool.token1.is_none());
        assert!(pool.liquidity.is_empty());
    }

    #[test]
    fn test_missing_entity_is_none() {
        let response: TokenResponse = serde_json::from_value(json!({ "token": null })).unwrap();
        assert!(response.token.is_none());
    }

    #[test]
    fn test_list_keys() {
        let response: ListPoolDayDatasResponse = serde_json::from_value(json!({
            "poolDayDatas": [{ "date": "1620172800", "volumeUSD": "1.0" }]
        }))
        .unwrap();
        assert_eq!(response.pool_day_datas[0].volume_usd, "1.0");

        let response: ListPoolDayDatasResponse = serde_json::from_value(json!({
            "poolDayDatas": [{ "date": 1620172800 }]
        }))
        .unwrap();
        assert_eq!(response.pool_day_datas[0].date, "1620172800");

        let response: ListFlashesResponse =
            serde_json::from_value(json!({ "flashes": [{ "id": "0x1" }, { "id": "0x2" }] }))
                .unwrap();
        assert_eq!(response.flashes.len(), 2);

        let response: PositionSnapshotResponse =
            serde_json::from_value(json!({ "positionSnapshot": { "id": "0x1#2" } })).unwrap();
        assert_eq!(response.position_snapshot.unwrap().id, "0x1#2");
    }

    #[test]
    fn test_token_whitelist_pools() {
        let token: Token = serde_json::from_value(json!({
            "id": "0xc02a",
            "derivedETH": "1",
            "whitelistPools": [{ "id": "0x1" }, { "id": "0x2" }]
        }))
        .unwrap();
        assert_eq!(token.derived_eth, "1");
        assert_eq!(token.whitelist_pools.len(), 2);
    }

    #[test]
    fn test_serializes_subgraph_names() {
        let bundle = Bundle {
            id: "1".to_string(),
            eth_price_usd: "3000.5".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&bundle).unwrap(),
            json!({ "id": "1", "ethPriceUSD": "3000.5" })
        );
    }

    #[test]
    fn test_nullable_scalars_decode_as_empty() {
        let response: ListPoolDayDatasResponse = serde_json::from_value(json!({
            "poolDayDatas": [
                { "id": "0x1-19000", "date": 1641600000, "tick": null },
                { "id": "0x1-19001", "tick": "-201000" }
            ]
        }))
        .unwrap();
        assert_eq!(response.pool_day_datas[0].tick, "");
        assert_eq!(response.pool_day_datas[0].date, "1641600000");
        assert_eq!(response.pool_day_datas[1].tick, "-201000");

        let response: MintResponse =
            serde_json::from_value(json!({ "mint": { "id": "0x1#1", "logIndex": null } }))
                .unwrap();
        assert!(response.mint.unwrap().log_index.is_empty());

        let collect: Collect = serde_json::from_value(json!({
            "id": "0x2#7",
            "owner": null,
            "amountUSD": null,
            "logIndex": "7"
        }))
        .unwrap();
        assert!(collect.owner.is_empty());
        assert!(collect.amount_usd.is_empty());
        assert_eq!(collect.log_index, "7");

        let response: PoolHourDataResponse = serde_json::from_value(json!({
            "poolHourData": { "periodStartUnix": 1641600000, "tick": null }
        }))
        .unwrap();
        let hour = response.pool_hour_data.unwrap();
        assert_eq!(hour.period_start_unix, "1641600000");
        assert!(hour.tick.is_empty());
    }
}
