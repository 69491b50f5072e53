//! Field paths.

use crate::error::{QueryError, QueryResult};
use std::fmt;
use std::str::FromStr;

/// A dot-separated field address such as `id`, `token0.symbol` or
/// `token1.whitelistPools.id`.
///
/// Every segment but the last names a reference field to traverse; the last
/// names a direct field of the entity reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dotted path. Empty paths and empty segments are rejected.
    pub fn parse(raw: &str) -> QueryResult<Self> {
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(QueryError::invalid_field(raw));
        }
        Ok(Self { segments })
    }

    /// The empty path addressing the entity itself.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Builds a path from already separated segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Returns the segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for [`FieldPath::root`]. Parsed paths are never empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if this is a single direct field with no reference hop.
    pub fn is_direct(&self) -> bool {
        self.segments.len() == 1
    }
}

impl FromStr for FieldPath {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let path = FieldPath::parse("token1.whitelistPools.txCount").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments()[1], "whitelistPools");
        assert_eq!(path.to_string(), "token1.whitelistPools.txCount");

        let path: FieldPath = "id".parse().unwrap();
        assert!(path.is_direct());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for raw in ["", ".", "token0.", ".id", "token0..id"] {
            let err = FieldPath::parse(raw).unwrap_err();
            assert_eq!(err, QueryError::invalid_field(raw));
        }
    }

    #[test]
    fn test_child() {
        let path = FieldPath::from_segments(["token0"]).child("symbol");
        assert_eq!(path, FieldPath::parse("token0.symbol").unwrap());

        let root = FieldPath::root();
        assert!(root.is_empty());
        assert_eq!(root.to_string(), "");
        assert_eq!(root.child("id"), FieldPath::parse("id").unwrap());
        assert!(!root.child("id").is_empty());
    }
}
