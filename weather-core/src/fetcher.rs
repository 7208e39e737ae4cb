//! Single-shot GET + JSON decode.
//!
//! [`Transport`] is the network seam: one GET, body returned as text.
//! [`DataFetcher`] layers the schema-parameterized decode on top of it, so
//! any `DeserializeOwned` type can be fetched the same way.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, sync::Arc};

use crate::error::FetchError;

const USER_AGENT: &str = concat!("weathernow/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Issue exactly one GET and return the body of a 2xx response.
    async fn get(&self, url: &Url) -> Result<String, FetchError>;
}

/// `reqwest`-backed transport. Timeouts are the client defaults.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self { http })
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Transport)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Clone)]
pub struct DataFetcher {
    transport: Arc<dyn Transport>,
}

impl DataFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http() -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(HttpTransport::new()?)))
    }

    /// Fetch `url` once and decode the body as `T`.
    ///
    /// No retries: a transport or decode failure is returned as-is.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let body = self.transport.get(url).await.inspect_err(|e| {
            tracing::debug!(error = %e, "fetch failed at transport level");
        })?;

        decode(&body).inspect_err(|e| {
            tracing::debug!(error = %e, "failed to decode response body");
        })
    }

    /// Same as [`DataFetcher::fetch`] for a URL given as text.
    pub async fn fetch_str<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        self.fetch(&url).await
    }
}

/// Decode a JSON body into `T`; any missing or mistyped field fails the whole decode.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    Ok(serde_json::from_str(body)?)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
