//! By-id and list query orchestration.

use crate::assembler;
use crate::error::{QueryError, QueryResult};
use crate::options::{QueryKind, RequestOptions, Selection, ValidatedOptions};
use crate::path::FieldPath;
use crate::resolver::{self, Expansion};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use unigraph_schema::{Catalog, EntitySchema};

/// An assembled query plus the variables it declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDocument {
    pub operation_name: String,
    pub query: String,
    pub variables: Map<String, Value>,
}

/// Builds query documents against a catalog.
///
/// The builder holds no state besides the catalog reference, so one builder
/// can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'c> {
    catalog: &'c Catalog,
}

impl<'c> QueryBuilder<'c> {
    /// Creates a builder over `catalog`.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog this builder reads.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Looks up an entity by name.
    pub fn entity(&self, name: &str) -> QueryResult<&'c EntitySchema> {
        self.catalog
            .get(name)
            .ok_or_else(|| QueryError::UnknownEntity(name.to_string()))
    }

    /// Resolves every field path of `entity` minus `exclude`.
    pub fn resolve(
        &self,
        entity: &str,
        exclude: &[FieldPath],
        expansion: Expansion,
    ) -> QueryResult<Vec<FieldPath>> {
        let schema = self.entity(entity)?;
        resolver::resolve(self.catalog, schema, exclude, expansion)
    }

    /// Validates and normalizes request options.
    pub fn validate(
        &self,
        kind: QueryKind,
        options: &RequestOptions,
    ) -> QueryResult<ValidatedOptions> {
        options.validate(kind)
    }

    /// Assembles query text for explicit field paths.
    pub fn assemble(
        &self,
        kind: QueryKind,
        entity: &str,
        fields: &[FieldPath],
        block: Option<u64>,
    ) -> QueryResult<String> {
        let schema = self.entity(entity)?;
        assembler::assemble(self.catalog, kind, schema, fields, block)
    }

    /// Builds a single-entity lookup binding `$id`.
    pub fn by_id(
        &self,
        entity: &str,
        id: &str,
        options: &RequestOptions,
    ) -> QueryResult<QueryDocument> {
        let (schema, _, query) = self.build(QueryKind::ById, entity, options)?;

        let mut variables = Map::new();
        variables.insert("id".to_string(), Value::from(id));

        Ok(QueryDocument {
            operation_name: schema.name().to_string(),
            query,
            variables,
        })
    }

    /// Builds a paginated listing binding `$first`, `$skip`, `$orderBy` and
    /// `$orderDir`.
    pub fn list(&self, entity: &str, options: &RequestOptions) -> QueryResult<QueryDocument> {
        let (schema, validated, query) = self.build(QueryKind::List, entity, options)?;
        let pagination = validated.pagination.unwrap_or_default();

        let mut variables = Map::new();
        variables.insert("first".to_string(), Value::from(pagination.first));
        variables.insert("skip".to_string(), Value::from(pagination.skip));
        variables.insert("orderBy".to_string(), Value::from(pagination.order_by));
        variables.insert(
            "orderDir".to_string(),
            Value::from(pagination.order_dir.as_str()),
        );

        Ok(QueryDocument {
            operation_name: schema.plural_name(),
            query,
            variables,
        })
    }

    fn build(
        &self,
        kind: QueryKind,
        entity: &str,
        options: &RequestOptions,
    ) -> QueryResult<(&'c EntitySchema, ValidatedOptions, String)> {
        let schema = self.entity(entity)?;
        let validated = options.validate(kind)?;

        let resolved;
        let fields = match &validated.selection {
            Selection::All { exclude } => {
                resolved = resolver::resolve(self.catalog, schema, exclude, Expansion::OneHop)?;
                &resolved
            }
            Selection::Fields(fields) => fields,
        };
        debug!(entity, ?kind, fields = fields.len(), "resolved selection");

        let query = assembler::assemble(self.catalog, kind, schema, fields, validated.block)?;
        debug!(entity, query = %query, "assembled query");

        Ok((schema, validated, query))
    }
}
