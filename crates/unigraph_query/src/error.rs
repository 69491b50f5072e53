//! Query construction errors.

use thiserror::Error;

/// Errors raised while building a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The requested entity is not in the catalog.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// A reference field points at an entity missing from the catalog.
    #[error("reference field not found: {entity}.{field} points at unknown entity '{target}'")]
    UnknownReference {
        entity: String,
        field: String,
        target: String,
    },

    /// A requested field path does not exist on its entity.
    #[error("unrecognized field in include fields: {path}")]
    InvalidField { path: String },

    /// Every field of the entity was excluded.
    #[error("no fields selected for {entity}")]
    EmptySelection { entity: String },

    /// The request options break one of the option rules.
    #[error("request options error: {0}")]
    InvalidOptions(#[from] OptionsError),
}

impl QueryError {
    pub fn unknown_reference(
        entity: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::UnknownReference {
            entity: entity.into(),
            field: field.into(),
            target: target.into(),
        }
    }

    pub fn invalid_field(path: impl ToString) -> Self {
        Self::InvalidField {
            path: path.to_string(),
        }
    }
}

/// The option rule a request broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("exclude fields can only be provided when include fields is set to '*'")]
    ExcludeWithoutWildcard,

    #[error("list query options (first, skip, orderBy, orderDir) should not be provided for by-id queries")]
    ListOptionsOnById,

    #[error("first is too large: {0} (maximum is {max})", max = crate::options::MAX_FIRST)]
    FirstTooLarge(u32),

    #[error("'asc' and 'desc' are the only valid options for orderDir, got '{0}'")]
    InvalidOrderDirection(String),

    #[error("block must be a positive block number")]
    BlockNotPositive,
}

pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = QueryError::invalid_field("token0.notFound");
        assert_eq!(
            err.to_string(),
            "unrecognized field in include fields: token0.notFound"
        );

        let err = QueryError::unknown_reference("pool", "token0", "token");
        assert!(err.to_string().contains("reference field not found"));

        let err: QueryError = OptionsError::FirstTooLarge(10_000).into();
        assert!(err.to_string().contains("first is too large"));
        assert!(err.to_string().starts_with("request options error"));
    }
}
