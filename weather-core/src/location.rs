use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::LocationError, model::Coordinates};

/// Producer of a single location fix.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_location(&self) -> Result<Coordinates, LocationError>;
}

/// Location known up front, e.g. from the command line or configuration.
#[derive(Debug, Clone)]
pub struct FixedLocation(Option<Coordinates>);

impl FixedLocation {
    pub fn new(coords: Coordinates) -> Self {
        Self(Some(coords))
    }

    pub fn unset() -> Self {
        Self(None)
    }
}

impl From<Option<Coordinates>> for FixedLocation {
    fn from(coords: Option<Coordinates>) -> Self {
        Self(coords)
    }
}

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        self.0
            .ok_or_else(|| LocationError::Unavailable("no coordinates configured".to_string()))
    }
}
