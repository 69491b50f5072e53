//! Query construction for unigraph.
//!
//! Turns an entity name plus include/exclude field selectors and list options
//! into a GraphQL document with bound variables:
//! - `path`: Parsed field paths (`token0.symbol`)
//! - `resolver`: Wildcard expansion and direct-field validation
//! - `options`: Request option validation and defaulting
//! - `assembler`: Nested selection-set rendering
//! - `builder`: By-id and list query orchestration
//! - `error`: Error types
//!
//! ```
//! use unigraph_query::{QueryBuilder, RequestOptions};
//! use unigraph_schema::Catalog;
//!
//! let builder = QueryBuilder::new(Catalog::uniswap_v3());
//! let options = RequestOptions::new().include(["id", "token0.symbol"]);
//! let document = builder.by_id("pool", "0x8ad5", &options).unwrap();
//!
//! assert!(document.query.contains("token0 {"));
//! assert_eq!(document.variables["id"], "0x8ad5");
//! ```

pub mod assembler;
pub mod builder;
pub mod error;
pub mod options;
pub mod path;
pub mod resolver;

pub use assembler::assemble;
pub use builder::{QueryBuilder, QueryDocument};
pub use error::{OptionsError, QueryError, QueryResult};
pub use options::{
    OrderDirection, Pagination, QueryKind, RequestOptions, Selection, ValidatedOptions,
    DEFAULT_FIRST, DEFAULT_ORDER_BY, MAX_FIRST, WILDCARD,
};
pub use path::FieldPath;
pub use resolver::{is_valid_direct_field, resolve, Expansion};
