use tokio::sync::oneshot;

use crate::{
    config::ApiConfig,
    endpoint::{onecall_url, redacted},
    error::FetchError,
    fetcher::DataFetcher,
    model::{Coordinates, WeatherSnapshot},
};

pub type FetchOutcome = Result<WeatherSnapshot, FetchError>;

/// Coordinates in, snapshot out: URL composition plus one typed fetch.
///
/// Holds only the fixed API configuration and the fetcher; cloning is cheap
/// and clones share the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct WeatherService {
    api: ApiConfig,
    fetcher: DataFetcher,
}

impl WeatherService {
    pub fn new(api: ApiConfig) -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(api, DataFetcher::http()?))
    }

    pub fn with_fetcher(api: ApiConfig, fetcher: DataFetcher) -> Self {
        Self { api, fetcher }
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub async fn fetch_weather(&self, coords: Coordinates) -> FetchOutcome {
        let url = onecall_url(&self.api, coords)?;
        tracing::debug!(url = %redacted(&url), "fetching weather");

        self.fetcher.fetch(&url).await
    }

    /// Spawn the fetch and deliver its outcome on `completion`.
    ///
    /// Must be called from within a tokio runtime. A dropped receiver is not
    /// an error; the outcome is discarded.
    pub fn fetch_weather_into(&self, coords: Coordinates, completion: oneshot::Sender<FetchOutcome>) {
        let service = self.clone();
        tokio::spawn(async move {
            let outcome = service.fetch_weather(coords).await;
            if completion.send(outcome).is_err() {
                tracing::debug!(%coords, "weather result dropped, receiver is gone");
            }
        });
    }
}
