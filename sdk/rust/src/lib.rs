//! Typed client for the Uniswap v3 subgraph.
//!
//! Queries are assembled from include/exclude field selectors by
//! [`unigraph_query`], sent over a [`Transport`] and decoded into the typed
//! entities in [`models`].
//!
//! # Example
//!
//! ```no_run
//! use unigraph_sdk::{ClientConfig, RequestOptions, UnigraphClient};
//! use std::time::Duration;
//!
//! # async fn run() -> unigraph_sdk::SdkResult<()> {
//! let config = ClientConfig::new("https://example.com/subgraphs/uniswap-v3")
//!     .timeout(Duration::from_secs(10));
//! let client = UnigraphClient::with_config(config)?;
//!
//! let options = RequestOptions::new()
//!     .include(["id", "volumeUSD"])
//!     .first(10)
//!     .order_by("volumeUSD")
//!     .order_dir("desc");
//! let top = client.list_pools(&options).await?;
//! for pool in top.pools {
//!     let volume = unigraph_sdk::converter::to_decimal(&pool.volume_usd)?;
//!     println!("{} {volume}", pool.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod converter;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{ClientConfig, GraphQLError, Request, Response, UnigraphClient};
pub use error::{ErrorCode, ResultExt, SdkError, SdkResult};
pub use transport::{decode_response, HttpTransport, Transport};

pub use unigraph_query::{OrderDirection, QueryDocument, RequestOptions};
pub use unigraph_schema::Catalog;
