use std::sync::Arc;

use crate::{
    error::{FetchError, LocationError},
    location::LocationSource,
    model::{Coordinates, WeatherSnapshot},
    service::WeatherService,
    store::SnapshotStore,
};

/// What one refresh produced.
#[derive(Debug)]
pub enum RefreshOutcome {
    Updated(Arc<WeatherSnapshot>),
    /// Fetched fine, but a later refresh already published.
    Superseded,
    FetchFailed(FetchError),
    /// No fix, so nothing was fetched.
    NoLocation(LocationError),
}

/// Location fix -> one fetch -> store.
#[derive(Debug, Clone)]
pub struct WeatherSession {
    service: WeatherService,
    store: Arc<SnapshotStore>,
}

impl WeatherSession {
    pub fn new(service: WeatherService) -> Self {
        Self { service, store: Arc::new(SnapshotStore::new()) }
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    pub async fn refresh(&self, source: &dyn LocationSource) -> RefreshOutcome {
        match source.current_location().await {
            Ok(coords) => self.refresh_at(coords).await,
            Err(e) => {
                tracing::warn!(error = %e, "can't get location, skipping weather fetch");
                RefreshOutcome::NoLocation(e)
            }
        }
    }

    pub async fn refresh_at(&self, coords: Coordinates) -> RefreshOutcome {
        let ticket = self.store.begin();

        match self.service.fetch_weather(coords).await {
            Ok(snapshot) => match self.store.publish(ticket, snapshot) {
                Some(stored) => RefreshOutcome::Updated(stored),
                None => {
                    tracing::debug!(seq = ticket.seq(), %coords, "discarding superseded weather result");
                    RefreshOutcome::Superseded
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, %coords, "weather fetch failed");
                RefreshOutcome::FetchFailed(e)
            }
        }
    }
}
