//! HTTP client with service tagging, timeouts and cancellation.

use std::time::Instant;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::service::ServiceTag;
use crate::timeout::TimeoutConfig;

/// Outbound request client.
///
/// Every request is bounded by its service's total timeout and by a child of
/// the caller's cancellation token. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client. Cookies set by the login service are kept and sent
    /// back on later requests.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(std::time::Duration::from_millis(config.connect_timeout_ms))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        tag: ServiceTag,
        cancel: &CancellationToken,
    ) -> Result<T, FetchError> {
        let bytes = self.execute(Method::GET, url, None::<&()>, tag, cancel).await?;
        decode(&bytes)
    }

    /// Send a JSON body and decode a JSON reply.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        tag: ServiceTag,
        cancel: &CancellationToken,
    ) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.execute(method, url, Some(body), tag, cancel).await?;
        decode(&bytes)
    }

    /// Send a request whose reply body is not needed; only the status counts.
    pub async fn send<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        tag: ServiceTag,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, FetchError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, url, body, tag, cancel).await
    }

    async fn execute<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        tag: ServiceTag,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, FetchError>
    where
        B: Serialize + ?Sized,
    {
        let TimeoutConfig { total, .. } = self.config.timeout_for(tag);
        let token = cancel.child_token();
        let started = Instant::now();
        let url_text = url.to_string();

        if token.is_cancelled() {
            debug!(service = %tag, %method, url = %url_text, "request skipped, already cancelled");
            return Err(FetchError::Cancelled);
        }

        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Http {
                    status: status.as_u16(),
                    url: url_text.clone(),
                });
            }
            Ok(response.bytes().await?.to_vec())
        };

        let result = tokio::select! {
            _ = token.cancelled() => Err(FetchError::Cancelled),
            outcome = tokio::time::timeout(total, exchange) => {
                outcome.unwrap_or(Err(FetchError::Timeout(total)))
            }
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(bytes) => debug!(
                service = %tag,
                %method,
                url = %url_text,
                elapsed_ms,
                bytes = bytes.len(),
                "request completed"
            ),
            Err(err) => warn!(
                service = %tag,
                %method,
                url = %url_text,
                elapsed_ms,
                error = %err,
                "request failed"
            ),
        }

        result
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(bytes).map_err(FetchError::from)
}
