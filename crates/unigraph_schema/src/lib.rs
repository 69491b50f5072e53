//! Entity schema catalog for unigraph.
//!
//! This crate provides the static description of the remote data model:
//! - `entity`: Entity schemas (direct and reference fields)
//! - `catalog`: Read-only registry of entities keyed by name
//! - `uniswap`: The built-in Uniswap v3 subgraph entities

pub mod catalog;
pub mod entity;
pub mod uniswap;

pub use catalog::{Catalog, CatalogBuilder};
pub use entity::{pluralize, EntitySchema};
