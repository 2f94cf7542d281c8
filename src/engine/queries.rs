use chrono::NaiveDate;

use crate::model::*;

use super::conflict::validate;
use super::{BookingError, BookingLedger, Engine};

impl Engine {
    /// Dry-run validation against the current ledger; nothing is committed.
    pub async fn check(&self, candidate: &Booking, exclude: Option<&str>) -> Result<(), BookingError> {
        let state = self.state.read().await;
        validate(&state.ledger, candidate, &state.resources, exclude)
    }

    pub async fn occupancy(&self, resource_id: &str, date: NaiveDate) -> Vec<OccupancySegment> {
        metrics::counter!(crate::observability::PROJECTIONS_TOTAL).increment(1);
        let state = self.state.read().await;
        self.projector.project(&state.ledger, resource_id, date)
    }

    pub async fn percent_booked(&self, resource_id: &str, date: NaiveDate) -> f64 {
        let state = self.state.read().await;
        self.projector.percent_booked(&state.ledger, resource_id, date)
    }

    pub async fn day_schedule(
        &self,
        resource_id: &str,
        date: NaiveDate,
        exclude: Option<&str>,
    ) -> Vec<Booking> {
        let state = self.state.read().await;
        state.ledger.day_schedule(resource_id, date, exclude)
    }

    pub async fn bookings_for_user(&self, user_id: &str) -> Vec<Booking> {
        let state = self.state.read().await;
        state.ledger.bookings_for_user(user_id)
    }

    pub async fn attendance(&self, date: NaiveDate) -> Vec<Attendee> {
        let state = self.state.read().await;
        state.ledger.attendance(date)
    }

    pub async fn get_booking(&self, id: &str) -> Option<Booking> {
        let state = self.state.read().await;
        state.ledger.get(id).cloned()
    }

    pub async fn get_resource(&self, id: &str) -> Option<Resource> {
        let state = self.state.read().await;
        state.resources.get(id).cloned()
    }

    /// All resources, ordered by id.
    pub async fn list_resources(&self) -> Vec<Resource> {
        let state = self.state.read().await;
        let mut resources: Vec<Resource> = state.resources.values().cloned().collect();
        resources.sort_by(|a, b| a.id.cmp(&b.id));
        resources
    }

    /// Point-in-time copy of the ledger.
    pub async fn snapshot(&self) -> BookingLedger {
        self.state.read().await.ledger.clone()
    }
}
