use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::engine::{Engine, EngineError};
use crate::model::{Booking, BookingId, Resource};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("reading seed: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing seed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("loading seed resource: {0}")]
    Resource(#[from] EngineError),
}

/// Initial resources and bookings, in the same JSON shape the booking UI uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Default)]
pub struct SeedReport {
    pub resources: usize,
    pub bookings: usize,
    pub rejected: Vec<(BookingId, EngineError)>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Register every resource, then submit every booking through the
    /// validator. A bad resource aborts; a refused booking is only reported.
    pub async fn apply(self, engine: &Engine) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();
        for resource in self.resources {
            engine.add_resource(resource).await?;
            report.resources += 1;
        }
        for booking in self.bookings {
            let id = booking.id.clone();
            match engine.book(booking).await {
                Ok(()) => report.bookings += 1,
                Err(e) => {
                    warn!(booking = %id, "seed booking skipped: {e}");
                    report.rejected.push((id, e));
                }
            }
        }
        Ok(report)
    }
}
