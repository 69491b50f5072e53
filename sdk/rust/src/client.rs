//! Uniswap v3 subgraph client.
//!
//! ```no_run
//! use unigraph_sdk::{RequestOptions, UnigraphClient};
//!
//! # async fn run() -> unigraph_sdk::SdkResult<()> {
//! let client = UnigraphClient::new("https://example.com/subgraphs/uniswap-v3")?;
//! let options = RequestOptions::new().include(["id", "feeTier", "token0.symbol"]);
//! let response = client.get_pool_by_id("0x8ad5", &options).await?;
//! if let Some(pool) = response.pool {
//!     println!("{} {}", pool.id, pool.fee_tier);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{SdkError, SdkResult};
use crate::models::*;
use crate::transport::{HttpTransport, Transport};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use unigraph_query::{QueryBuilder, QueryDocument, RequestOptions};
use unigraph_schema::Catalog;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Subgraph endpoint.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Headers sent with every request.
    pub headers: HashMap<String, String>,
    /// Sent as a bearer token when set.
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout: Duration::from_secs(30),
            headers: HashMap::new(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    /// Creates a new config with a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// A GraphQL request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl From<&QueryDocument> for Request {
    fn from(document: &QueryDocument) -> Self {
        Self {
            query: document.query.clone(),
            variables: Some(serde_json::Value::Object(document.variables.clone())),
            operation_name: Some(document.operation_name.clone()),
        }
    }
}

/// A GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

/// A GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

/// Client for the Uniswap v3 subgraph.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct UnigraphClient {
    transport: Arc<dyn Transport>,
    builder: QueryBuilder<'static>,
}

impl UnigraphClient {
    /// Creates a client for `url` with default configuration.
    pub fn new(url: impl Into<String>) -> SdkResult<Self> {
        Self::with_config(ClientConfig::new(url))
    }

    /// Creates an HTTP client from `config`.
    pub fn with_config(config: ClientConfig) -> SdkResult<Self> {
        Ok(Self::with_transport(HttpTransport::new(&config)?))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            builder: QueryBuilder::new(Catalog::uniswap_v3()),
        }
    }

    /// Returns the query builder used by this client.
    pub fn query_builder(&self) -> QueryBuilder<'static> {
        self.builder
    }

    /// Fetches one entity by id and decodes the `data` payload as `R`.
    pub async fn fetch_by_id<R: DeserializeOwned>(
        &self,
        entity: &str,
        id: &str,
        options: &RequestOptions,
    ) -> SdkResult<R> {
        let document = self.builder.by_id(entity, id, options)?;
        self.execute(&document).await
    }

    /// Lists entities and decodes the `data` payload as `R`.
    pub async fn fetch_list<R: DeserializeOwned>(
        &self,
        entity: &str,
        options: &RequestOptions,
    ) -> SdkResult<R> {
        let document = self.builder.list(entity, options)?;
        self.execute(&document).await
    }

    /// Executes an assembled document and decodes the `data` payload as `R`.
    pub async fn execute<R: DeserializeOwned>(&self, document: &QueryDocument) -> SdkResult<R> {
        let data = self.execute_raw(document).await?;
        serde_json::from_value(data).map_err(|e| {
            warn!(operation = %document.operation_name, error = %e, "failed to decode response");
            SdkError::deserialize(e.to_string())
        })
    }

    /// Executes an assembled document and returns the raw `data` payload.
    pub async fn execute_raw(&self, document: &QueryDocument) -> SdkResult<serde_json::Value> {
        debug!(operation = %document.operation_name, "executing query");
        self.transport
            .execute(&Request::from(document))
            .await
            .map_err(|e| {
                warn!(operation = %document.operation_name, code = %e.code, "query failed");
                e
            })
    }
}

/// Declares `get_<entity>_by_id` and `list_<plural>` for each entity.
macro_rules! entity_methods {
    ($($entity:literal => $get:ident -> $single:ident, $list:ident -> $many:ident;)*) => {
        impl UnigraphClient {
            $(
                #[doc = concat!("Fetches one `", $entity, "` by id.")]
                pub async fn $get(&self, id: &str, options: &RequestOptions) -> SdkResult<$single> {
                    self.fetch_by_id($entity, id, options).await
                }

                #[doc = concat!("Lists `", $entity, "` entities.")]
                pub async fn $list(&self, options: &RequestOptions) -> SdkResult<$many> {
                    self.fetch_list($entity, options).await
                }
            )*
        }
    };
}

entity_methods! {
    "factory" => get_factory_by_id -> FactoryResponse, list_factories -> ListFactoriesResponse;
    "pool" => get_pool_by_id -> PoolResponse, list_pools -> ListPoolsResponse;
    "token" => get_token_by_id -> TokenResponse, list_tokens -> ListTokensResponse;
    "bundle" => get_bundle_by_id -> BundleResponse, list_bundles -> ListBundlesResponse;
    "tick" => get_tick_by_id -> TickResponse, list_ticks -> ListTicksResponse;
    "position" => get_position_by_id -> PositionResponse, list_positions -> ListPositionsResponse;
    "positionSnapshot" => get_position_snapshot_by_id -> PositionSnapshotResponse,
        list_position_snapshots -> ListPositionSnapshotsResponse;
    "transaction" => get_transaction_by_id -> TransactionResponse,
        list_transactions -> ListTransactionsResponse;
    "mint" => get_mint_by_id -> MintResponse, list_mints -> ListMintsResponse;
    "burn" => get_burn_by_id -> BurnResponse, list_burns -> ListBurnsResponse;
    "swap" => get_swap_by_id -> SwapResponse, list_swaps -> ListSwapsResponse;
    "collect" => get_collect_by_id -> CollectResponse, list_collects -> ListCollectsResponse;
    "flash" => get_flash_by_id -> FlashResponse, list_flashes -> ListFlashesResponse;
    "uniswapDayData" => get_uniswap_day_data_by_id -> UniswapDayDataResponse,
        list_uniswap_day_datas -> ListUniswapDayDatasResponse;
    "poolDayData" => get_pool_day_data_by_id -> PoolDayDataResponse,
        list_pool_day_datas -> ListPoolDayDatasResponse;
    "poolHourData" => get_pool_hour_data_by_id -> PoolHourDataResponse,
        list_pool_hour_datas -> ListPoolHourDatasResponse;
    "tickHourData" => get_tick_hour_data_by_id -> TickHourDataResponse,
        list_tick_hour_datas -> ListTickHourDatasResponse;
    "tickDayData" => get_tick_day_data_by_id -> TickDayDataResponse,
        list_tick_day_datas -> ListTickDayDatasResponse;
    "tokenDayData" => get_token_day_data_by_id -> TokenDayDataResponse,
        list_token_day_datas -> ListTokenDayDatasResponse;
    "tokenHourData" => get_token_hour_data_by_id -> TokenHourDataResponse,
        list_token_hour_datas -> ListTokenHourDatasResponse;
}
