//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - OneCall request URL composition
//! - A typed single-shot fetcher over a pluggable transport
//! - The weather snapshot model and the fetch facade built on both
//! - Location sources, the shared snapshot store and refresh sessions
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod location;
pub mod model;
pub mod service;
pub mod session;
pub mod store;

pub use config::{ApiConfig, Config, Units};
pub use endpoint::onecall_url;
pub use error::{FetchError, LocationError};
pub use fetcher::{DataFetcher, HttpTransport, Transport};
pub use location::{FixedLocation, LocationSource};
pub use model::{
    Condition, Coordinates, CoordinatesError, CurrentReading, DailyReading, DailyTemperature,
    HourlyReading, WeatherSnapshot,
};
pub use service::{FetchOutcome, WeatherService};
pub use session::{RefreshOutcome, WeatherSession};
pub use store::{FetchTicket, Published, SnapshotStore};
