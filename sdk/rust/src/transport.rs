//! Request transport.

use crate::client::{ClientConfig, Request, Response};
use crate::error::{ErrorCode, ResultExt, SdkError, SdkResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

/// Executes GraphQL requests and returns the `data` payload.
///
/// Implementations own timeouts and cancellation; errors are returned to the
/// caller as-is and never retried.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &Request) -> SdkResult<Value>;
}

/// HTTP transport posting JSON bodies with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Builds a transport from client configuration.
    pub fn new(config: &ClientConfig) -> SdkResult<Self> {
        let url = Url::parse(&config.url).map_err(|e| {
            SdkError::new(
                ErrorCode::InvalidUrl,
                format!("invalid endpoint '{}': {e}", config.url),
            )
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_sdk_err_with(ErrorCode::InvalidConfig, format!("invalid header name: {name}"))?;
            let header_value = HeaderValue::from_str(value).map_sdk_err_with(
                ErrorCode::InvalidConfig,
                format!("invalid value for header {name}"),
            )?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_sdk_err(ErrorCode::InvalidConfig)?;

        Ok(Self {
            client,
            url,
            api_key: config.api_key.clone(),
        })
    }

    /// Returns the endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &Request) -> SdkResult<Value> {
        let mut http = self.client.post(self.url.clone()).json(request);
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }

        let response = http.send().await.map_err(request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(request_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "subgraph responded");

        decode_response(status.as_u16(), &body)
    }
}

fn request_error(err: reqwest::Error) -> SdkError {
    if err.is_timeout() {
        SdkError::timeout().with_source(SdkError::network(err.to_string()))
    } else {
        SdkError::network(err.to_string())
    }
}

/// Extracts the `data` payload from a raw HTTP response.
///
/// A GraphQL `errors` array takes precedence over the HTTP status: its first
/// message becomes the error message and every message is kept under the
/// `messages` extension. A non-2xx status without a usable envelope is an
/// [`ErrorCode::HttpError`], an unparseable 2xx body is an
/// [`ErrorCode::InvalidResponse`], and a missing or null `data` is
/// [`ErrorCode::NoData`].
pub fn decode_response(status: u16, body: &str) -> SdkResult<Value> {
    let success = (200..300).contains(&status);

    let response: Response = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !success => return Err(SdkError::http(status)),
        Err(e) => {
            return Err(SdkError::invalid_response(format!(
                "malformed response body: {e}"
            )))
        }
    };

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        let mut err = SdkError::new(ErrorCode::GraphQLError, messages[0])
            .with_extension("messages", &messages);
        if !success {
            err = err.with_extension("status", status);
        }
        return Err(err);
    }

    if !success {
        return Err(SdkError::http(status));
    }

    response
        .data
        .ok_or_else(|| SdkError::new(ErrorCode::NoData, "no data in response"))
}
