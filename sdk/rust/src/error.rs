//! Typed errors for the subgraph client.
//!
//! Every failure carries an [`ErrorCode`] so callers can branch on the kind
//! of failure without matching message text.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use unigraph_query::QueryError;

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // Transport
    NetworkError,
    Timeout,
    HttpError,
    InvalidUrl,
    InvalidConfig,
    InvalidResponse,

    // GraphQL envelope
    #[serde(rename = "GRAPHQL_ERROR")]
    GraphQLError,
    NoData,

    // Response decoding
    DeserializeError,

    // Query construction
    UnknownEntity,
    UnknownReference,
    InvalidField,
    InvalidOptions,

    // Value conversion
    ConversionError,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::HttpError => "HTTP_ERROR",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::GraphQLError => "GRAPHQL_ERROR",
            Self::NoData => "NO_DATA",
            Self::DeserializeError => "DESERIALIZE_ERROR",
            Self::UnknownEntity => "UNKNOWN_ENTITY",
            Self::UnknownReference => "UNKNOWN_REFERENCE",
            Self::InvalidField => "INVALID_FIELD",
            Self::InvalidOptions => "INVALID_OPTIONS",
            Self::ConversionError => "CONVERSION_ERROR",
        }
    }

    /// Returns true for failures that might succeed if the caller tried again.
    ///
    /// The client itself never retries.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::Timeout)
    }

    /// Returns true if the request was rejected before reaching the network.
    pub const fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownEntity | Self::UnknownReference | Self::InvalidField | Self::InvalidOptions
        )
    }

    /// Returns true if this is a transport-level failure.
    pub const fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::NetworkError
                | Self::Timeout
                | Self::HttpError
                | Self::InvalidUrl
                | Self::InvalidResponse
                | Self::GraphQLError
                | Self::NoData
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client error.
#[derive(Error, Debug, Clone)]
#[error("[{code}] {message}")]
pub struct SdkError {
    /// Typed error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Underlying error, if any.
    #[source]
    pub source: Option<Box<SdkError>>,
    /// Structured details such as the HTTP status or GraphQL error list.
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl SdkError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
            extensions: None,
        }
    }

    /// Adds a source error.
    pub fn with_source(mut self, source: SdkError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Adds extension data.
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let extensions = self.extensions.get_or_insert_with(HashMap::new);
        if let Ok(v) = serde_json::to_value(value) {
            extensions.insert(key.into(), v);
        }
        self
    }

    /// Returns an extension value.
    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        self.extensions.as_ref()?.get(key)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Creates a timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorCode::Timeout, "request timed out")
    }

    /// Creates an error for a non-success HTTP status.
    pub fn http(status: u16) -> Self {
        Self::new(ErrorCode::HttpError, format!("subgraph returned HTTP {status}"))
            .with_extension("status", status)
    }

    /// Creates an error for a body that is not a GraphQL response.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidResponse, message)
    }

    /// Creates a deserialization error.
    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeserializeError, message)
    }

    /// Creates a value conversion error.
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConversionError, message)
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Returns the HTTP status for [`ErrorCode::HttpError`] failures.
    pub fn status(&self) -> Option<u16> {
        self.extension("status")
            .and_then(serde_json::Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
    }
}

impl From<QueryError> for SdkError {
    fn from(err: QueryError) -> Self {
        let code = match &err {
            QueryError::UnknownEntity(_) => ErrorCode::UnknownEntity,
            QueryError::UnknownReference { .. } => ErrorCode::UnknownReference,
            QueryError::InvalidField { .. } => ErrorCode::InvalidField,
            QueryError::EmptySelection { .. } | QueryError::InvalidOptions(_) => {
                ErrorCode::InvalidOptions
            }
        };
        Self::new(code, err.to_string())
    }
}

impl Serialize for SdkError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SdkError", 3)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        if let Some(ref ext) = self.extensions {
            state.serialize_field("extensions", ext)?;
        }
        state.end()
    }
}

/// Result alias for client operations.
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Result extension for mapping foreign errors onto an [`ErrorCode`].
pub trait ResultExt<T> {
    /// Maps the error to an SdkError with the given code.
    fn map_sdk_err(self, code: ErrorCode) -> SdkResult<T>;

    /// Maps the error to an SdkError with the given code and message, keeping
    /// the original text as the `original_error` extension.
    fn map_sdk_err_with(self, code: ErrorCode, message: impl Into<String>) -> SdkResult<T>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn map_sdk_err(self, code: ErrorCode) -> SdkResult<T> {
        self.map_err(|e| SdkError::new(code, e.to_string()))
    }

    fn map_sdk_err_with(self, code: ErrorCode, message: impl Into<String>) -> SdkResult<T> {
        self.map_err(|e| {
            SdkError::new(code, message).with_extension("original_error", e.to_string())
        })
    }
}
