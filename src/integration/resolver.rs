//! API Integration Resolver
//!
//! Executes an [`IntegrationDescriptor`] against its live endpoint:
//!
//! ```text
//! Validating -> Requesting -> ParsingPath -> Succeeded
//!     |             |              |
//!  Validation   Network/Http   Extraction
//! ```
//!
//! Each invocation sends exactly one request. There is no retry, backoff or
//! caching, and no timeout unless the transport was configured with one.

use super::descriptor::{IntegrationDescriptor, DATA_RETURN_KEY};
use super::extract::extract;
use super::types::IntegrationError;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RawResponse, RequestConfig};
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Transport used by the resolver
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform a GET with the given headers and return the full response
    async fn fetch(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> std::result::Result<RawResponse, IntegrationError>;
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> std::result::Result<RawResponse, IntegrationError> {
        let request = headers
            .iter()
            .fold(RequestConfig::new(), |request, (name, value)| {
                request.header(name, value)
            });
        self.get(url, &request)
            .await
            .map_err(|e| IntegrationError::network(error_chain(&e)))
    }
}

/// Resolver for integration descriptors
#[derive(Clone)]
pub struct Resolver {
    fetcher: Arc<dyn Fetcher>,
}

impl Resolver {
    /// Create a resolver over any transport
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Create a resolver over a reqwest client built from `config`
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpClient::with_config(config)?)))
    }

    /// Run the descriptor without touching it
    pub async fn resolve(
        &self,
        descriptor: &IntegrationDescriptor,
    ) -> std::result::Result<JsonValue, IntegrationError> {
        let (url, headers) = validate(descriptor)?;

        debug!(
            "Requesting {} with headers [{}]",
            url,
            headers
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let response = self.fetcher.fetch(url.as_str(), &headers).await?;

        let parsed = serde_json::from_str::<JsonValue>(&response.body);
        if !response.is_success() {
            return Err(IntegrationError::http(
                response.status,
                response.status_text,
                parsed.ok(),
            ));
        }
        let body = parsed.map_err(|e| {
            IntegrationError::extraction(format!("response body is not valid JSON: {e}"))
        })?;

        extract(&body, descriptor.effective_json_path())
    }

    /// Run the descriptor and overwrite its `dataReturn` with the outcome.
    ///
    /// On failure `dataReturn` holds `{"error": ...}`. Concurrent calls for
    /// the same object are not coordinated: whichever finishes last wins.
    pub async fn try_integration(
        &self,
        descriptor: &mut IntegrationDescriptor,
    ) -> std::result::Result<JsonValue, IntegrationError> {
        let outcome = self.resolve(descriptor).await;
        descriptor.data_return = Some(data_return_for(&outcome));
        log_outcome(descriptor.api_url.as_deref().unwrap_or_default(), &outcome);
        outcome
    }

    /// Run a raw integration object and overwrite its `dataReturn` key.
    ///
    /// Every other key of the object is left as-is.
    pub async fn try_object(
        &self,
        object: &mut JsonValue,
    ) -> std::result::Result<JsonValue, IntegrationError> {
        let Some(map) = object.as_object_mut() else {
            return Err(IntegrationError::validation(
                "integration object must be a JSON object",
            ));
        };

        let outcome = match IntegrationDescriptor::from_object(map) {
            Ok(descriptor) => {
                let outcome = self.resolve(&descriptor).await;
                log_outcome(descriptor.api_url.as_deref().unwrap_or_default(), &outcome);
                outcome
            }
            Err(e) => Err(e),
        };

        map.insert(DATA_RETURN_KEY.to_string(), data_return_for(&outcome));
        outcome
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

/// Check the descriptor before any network activity
fn validate(
    descriptor: &IntegrationDescriptor,
) -> std::result::Result<(Url, Vec<(String, String)>), IntegrationError> {
    let raw_url = descriptor
        .api_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| IntegrationError::validation("apiUrl required"))?;

    let url = Url::parse(raw_url)
        .map_err(|e| IntegrationError::validation(format!("invalid apiUrl: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(IntegrationError::validation(format!(
            "unsupported apiUrl scheme '{}'",
            url.scheme()
        )));
    }

    let mut headers = Vec::new();
    if let Some((name, value)) = &descriptor.header {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| IntegrationError::validation(format!("invalid header name '{name}'")))?;
        HeaderValue::from_str(value).map_err(|_| {
            IntegrationError::validation(format!("invalid value for header '{name}'"))
        })?;
        headers.push((name.clone(), value.clone()));
    }

    Ok((url, headers))
}

fn data_return_for(outcome: &std::result::Result<JsonValue, IntegrationError>) -> JsonValue {
    match outcome {
        Ok(value) => value.clone(),
        Err(e) => e.to_data_return(),
    }
}

fn log_outcome(url: &str, outcome: &std::result::Result<JsonValue, IntegrationError>) {
    match outcome {
        Ok(_) => info!("Integration {} succeeded", url),
        Err(e) => warn!("Integration {} failed: {}", url, e),
    }
}

/// Flatten an error and its sources into one message
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
