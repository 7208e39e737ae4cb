//! Shared "current weather" holder.
//!
//! Fetches take a [`FetchTicket`] when they start. A finished fetch may only
//! replace the stored snapshot if no fetch started after it has already
//! published, so overlapping fetches settle on the most recently issued one
//! regardless of completion order.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::watch;

use crate::model::WeatherSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Published {
    pub ticket: FetchTicket,
    pub snapshot: Arc<WeatherSnapshot>,
}

#[derive(Debug)]
pub struct SnapshotStore {
    issued: AtomicU64,
    current: watch::Sender<Option<Published>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { issued: AtomicU64::new(0), current }
    }

    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Store `snapshot` unless a later ticket already published.
    ///
    /// Returns the stored snapshot, or `None` when it was discarded.
    pub fn publish(
        &self,
        ticket: FetchTicket,
        snapshot: WeatherSnapshot,
    ) -> Option<Arc<WeatherSnapshot>> {
        let snapshot = Arc::new(snapshot);
        let stored = self.current.send_if_modified(|current| match current {
            Some(existing) if existing.ticket > ticket => false,
            _ => {
                *current = Some(Published { ticket, snapshot: Arc::clone(&snapshot) });
                true
            }
        });

        stored.then_some(snapshot)
    }

    pub fn latest(&self) -> Option<Arc<WeatherSnapshot>> {
        self.current.borrow().as_ref().map(|p| Arc::clone(&p.snapshot))
    }

    pub fn latest_ticket(&self) -> Option<FetchTicket> {
        self.current.borrow().as_ref().map(|p| p.ticket)
    }

    /// Receiver that wakes on every stored snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Published>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentReading, WeatherSnapshot};

    fn snapshot(timezone: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            timezone: timezone.to_string(),
            current: CurrentReading {
                dt: 0,
                sunrise: 0,
                sunset: 0,
                temp: 0.0,
                feels_like: 0.0,
                pressure: 1013,
                humidity: 50,
                uvi: 0.0,
                visibility: 10000.0,
                wind_speed: 0.0,
                weather: vec![],
            },
            hourly: vec![],
            daily: vec![],
        }
    }

    #[test]
    fn tickets_increase() {
        let store = SnapshotStore::new();
        let a = store.begin();
        let b = store.begin();

        assert!(b > a);
        assert_eq!(a.seq(), 1);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let store = SnapshotStore::new();
        let older = store.begin();
        let newer = store.begin();

        assert!(store.publish(newer, snapshot("Europe/Paris")).is_some());
        assert!(store.publish(older, snapshot("Asia/Tokyo")).is_none());

        assert_eq!(store.latest().unwrap().timezone, "Europe/Paris");
        assert_eq!(store.latest_ticket(), Some(newer));
    }

    #[test]
    fn newer_completion_replaces_older() {
        let store = SnapshotStore::new();
        let older = store.begin();
        let newer = store.begin();

        assert!(store.publish(older, snapshot("Asia/Tokyo")).is_some());
        assert!(store.publish(newer, snapshot("Europe/Paris")).is_some());

        assert_eq!(store.latest().unwrap().timezone, "Europe/Paris");
    }

    #[tokio::test]
    async fn subscribers_see_published_snapshot() {
        let store = SnapshotStore::new();
        let mut rx = store.subscribe();

        let ticket = store.begin();
        store.publish(ticket, snapshot("Europe/Berlin"));

        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone().unwrap();
        assert_eq!(seen.ticket, ticket);
        assert_eq!(seen.snapshot.timezone, "Europe/Berlin");
    }
}
