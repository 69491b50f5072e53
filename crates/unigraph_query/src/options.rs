//! Request options and their validation.

use crate::error::{OptionsError, QueryResult};
use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Include selector meaning "every field, one reference hop down".
pub const WILDCARD: &str = "*";

/// Page size used when a list query does not set `first`.
pub const DEFAULT_FIRST: u32 = 100;

/// Largest page size the subgraph accepts.
pub const MAX_FIRST: u32 = 1000;

/// Ordering field used when a list query does not set `order_by`.
pub const DEFAULT_ORDER_BY: &str = "id";

/// The two query shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Single entity looked up by identifier.
    ById,
    /// Paginated, ordered listing.
    List,
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(OptionsError::InvalidOrderDirection(other.to_string())),
        }
    }
}

/// Options controlling a single request.
///
/// `include_fields` accepts direct fields (`id`), reference sub-fields
/// (`token0.symbol`), two-hop paths (`token1.whitelistPools.id`) or the
/// wildcard `*`. `exclude_fields` is only valid alongside the wildcard.
/// `first`, `skip`, `order_by` and `order_dir` are list-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub include_fields: Vec<String>,
    pub exclude_fields: Vec<String>,
    pub block: Option<u64>,
    pub first: Option<u32>,
    pub skip: Option<u32>,
    pub order_by: Option<String>,
    pub order_dir: Option<String>,
}

impl RequestOptions {
    /// Creates empty options (wildcard selection, default paging).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fields to include.
    #[must_use]
    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the fields to exclude from a wildcard selection.
    #[must_use]
    pub fn exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Queries the state as of a block number.
    #[must_use]
    pub fn block(mut self, block: u64) -> Self {
        self.block = Some(block);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn first(mut self, first: u32) -> Self {
        self.first = Some(first);
        self
    }

    /// Sets the number of results to skip.
    #[must_use]
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the ordering field.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Sets the ordering direction (`asc` or `desc`).
    #[must_use]
    pub fn order_dir(mut self, direction: impl Into<String>) -> Self {
        self.order_dir = Some(direction.into());
        self
    }

    fn has_wildcard(&self) -> bool {
        self.include_fields.iter().any(|f| f == WILDCARD)
    }

    fn has_list_options(&self) -> bool {
        self.first.is_some_and(|v| v > 0)
            || self.skip.is_some_and(|v| v > 0)
            || self.order_by.as_deref().is_some_and(|v| !v.is_empty())
            || self.order_dir.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Checks the option rules for `kind` and returns normalized options.
    ///
    /// Rules, in order:
    /// 1. An empty include list means `*`.
    /// 2. Exclusions require the wildcard.
    /// 3. By-id queries reject list options.
    /// 4. List queries cap `first` at [`MAX_FIRST`], default `first`,
    ///    `order_by` and `order_dir`, and reject unknown directions.
    pub fn validate(&self, kind: QueryKind) -> QueryResult<ValidatedOptions> {
        let wildcard = self.include_fields.is_empty() || self.has_wildcard();

        if !wildcard && !self.exclude_fields.is_empty() {
            return Err(OptionsError::ExcludeWithoutWildcard.into());
        }

        if self.block == Some(0) {
            return Err(OptionsError::BlockNotPositive.into());
        }

        let pagination = match kind {
            QueryKind::ById => {
                if self.has_list_options() {
                    return Err(OptionsError::ListOptionsOnById.into());
                }
                None
            }
            QueryKind::List => Some(self.pagination()?),
        };

        let selection = if wildcard {
            Selection::All {
                exclude: parse_paths(&self.exclude_fields)?,
            }
        } else {
            Selection::Fields(parse_paths(&self.include_fields)?)
        };

        Ok(ValidatedOptions {
            selection,
            block: self.block,
            pagination,
        })
    }

    fn pagination(&self) -> QueryResult<Pagination> {
        let first = match self.first {
            None | Some(0) => DEFAULT_FIRST,
            Some(first) if first > MAX_FIRST => {
                return Err(OptionsError::FirstTooLarge(first).into());
            }
            Some(first) => first,
        };

        let order_by = match self.order_by.as_deref() {
            None | Some("") => DEFAULT_ORDER_BY.to_string(),
            Some(field) => field.to_string(),
        };

        let order_dir = match self.order_dir.as_deref() {
            None | Some("") => OrderDirection::default(),
            Some(dir) => dir.parse()?,
        };

        Ok(Pagination {
            first,
            skip: self.skip.unwrap_or(0),
            order_by,
            order_dir,
        })
    }
}

fn parse_paths(raw: &[String]) -> QueryResult<Vec<FieldPath>> {
    raw.iter().map(|r| FieldPath::parse(r)).collect()
}

/// The fields a validated request selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Everything one hop down, minus `exclude`.
    All { exclude: Vec<FieldPath> },
    /// Exactly these paths.
    Fields(Vec<FieldPath>),
}

/// Normalized list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub first: u32,
    pub skip: u32,
    pub order_by: String,
    pub order_dir: OrderDirection,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            first: DEFAULT_FIRST,
            skip: 0,
            order_by: DEFAULT_ORDER_BY.to_string(),
            order_dir: OrderDirection::Asc,
        }
    }
}

/// Request options after validation and defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    pub selection: Selection,
    pub block: Option<u64>,
    /// Present exactly for list queries.
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    fn options_err(result: QueryResult<ValidatedOptions>) -> OptionsError {
        match result {
            Err(QueryError::InvalidOptions(err)) => err,
            other => panic!("expected options error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_options_select_everything() {
        for kind in [QueryKind::ById, QueryKind::List] {
            let validated = RequestOptions::new().validate(kind).unwrap();
            assert_eq!(validated.selection, Selection::All { exclude: vec![] });
        }
    }

    #[test]
    fn test_exclude_with_empty_include_is_allowed() {
        let validated = RequestOptions::new()
            .exclude(["liquidity", "txCount"])
            .validate(QueryKind::ById)
            .unwrap();

        match validated.selection {
            Selection::All { exclude } => assert_eq!(exclude.len(), 2),
            Selection::Fields(_) => panic!("expected wildcard selection"),
        }
    }

    #[test]
    fn test_exclude_without_wildcard() {
        let opts = RequestOptions::new().include(["id"]).exclude(["liquidity"]);
        for kind in [QueryKind::ById, QueryKind::List] {
            assert_eq!(
                options_err(opts.validate(kind)),
                OptionsError::ExcludeWithoutWildcard
            );
        }
    }

    #[test]
    fn test_explicit_fields() {
        let validated = RequestOptions::new()
            .include(["id", "token0.symbol"])
            .validate(QueryKind::ById)
            .unwrap();

        assert_eq!(
            validated.selection,
            Selection::Fields(vec![
                FieldPath::parse("id").unwrap(),
                FieldPath::parse("token0.symbol").unwrap(),
            ])
        );
        assert!(validated.pagination.is_none());
    }

    #[test]
    fn test_list_options_rejected_for_by_id() {
        let opts = RequestOptions::new()
            .include(["*"])
            .first(100)
            .skip(1000)
            .order_by("id")
            .order_dir("desc");
        assert_eq!(
            options_err(opts.validate(QueryKind::ById)),
            OptionsError::ListOptionsOnById
        );

        let opts = RequestOptions::new().first(100);
        let err = opts.validate(QueryKind::ById).unwrap_err();
        assert!(err.to_string().contains("list query options"));
    }

    #[test]
    fn test_zero_list_options_are_unset_for_by_id() {
        let opts = RequestOptions::new().first(0).skip(0).order_by("");
        assert!(opts.validate(QueryKind::ById).is_ok());
    }

    #[test]
    fn test_list_defaults() {
        let validated = RequestOptions::new()
            .first(0)
            .validate(QueryKind::List)
            .unwrap();

        assert_eq!(validated.pagination, Some(Pagination::default()));
        let pagination = validated.pagination.unwrap();
        assert_eq!(pagination.first, 100);
        assert_eq!(pagination.order_by, "id");
        assert_eq!(pagination.order_dir, OrderDirection::Asc);
    }

    #[test]
    fn test_list_options_kept() {
        let validated = RequestOptions::new()
            .first(1000)
            .skip(200)
            .order_by("volumeUSD")
            .order_dir("desc")
            .validate(QueryKind::List)
            .unwrap();

        assert_eq!(
            validated.pagination,
            Some(Pagination {
                first: 1000,
                skip: 200,
                order_by: "volumeUSD".to_string(),
                order_dir: OrderDirection::Desc,
            })
        );
    }

    #[test]
    fn test_first_too_large() {
        let opts = RequestOptions::new().first(1001);
        assert_eq!(
            options_err(opts.validate(QueryKind::List)),
            OptionsError::FirstTooLarge(1001)
        );
    }

    #[test]
    fn test_invalid_order_direction() {
        let opts = RequestOptions::new().order_dir("hello world");
        assert_eq!(
            options_err(opts.validate(QueryKind::List)),
            OptionsError::InvalidOrderDirection("hello world".to_string())
        );
    }

    #[test]
    fn test_block() {
        let validated = RequestOptions::new()
            .block(13_380_584)
            .validate(QueryKind::ById)
            .unwrap();
        assert_eq!(validated.block, Some(13_380_584));

        let opts = RequestOptions::new().block(0);
        assert_eq!(
            options_err(opts.validate(QueryKind::List)),
            OptionsError::BlockNotPositive
        );
    }

    #[test]
    fn test_malformed_path() {
        let err = RequestOptions::new()
            .include(["token0..id"])
            .validate(QueryKind::ById)
            .unwrap_err();
        assert_eq!(err, QueryError::invalid_field("token0..id"));
    }

    #[test]
    fn test_order_direction_serde() {
        assert_eq!(
            serde_json::to_value(OrderDirection::Desc).unwrap(),
            serde_json::json!("desc")
        );
        assert_eq!("asc".parse::<OrderDirection>(), Ok(OrderDirection::Asc));
    }
}
