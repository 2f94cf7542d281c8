use std::time::Instant;

use tracing::{debug, info};

use crate::limits::*;
use crate::model::*;

use super::conflict::validate;
use super::{BookingError, Engine, EngineError, OfficeState};

fn check_id(id: &str) -> Result<(), EngineError> {
    if id.is_empty() {
        return Err(EngineError::LimitExceeded("empty id"));
    }
    if id.len() > MAX_ID_LEN {
        return Err(EngineError::LimitExceeded("id too long"));
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), EngineError> {
    if name.len() > MAX_NAME_LEN {
        return Err(EngineError::LimitExceeded("resource name too long"));
    }
    Ok(())
}

impl Engine {
    pub async fn add_resource(&self, resource: Resource) -> Result<(), EngineError> {
        check_id(&resource.id)?;
        check_name(&resource.name)?;
        let mut state = self.state.write().await;
        if state.resources.len() >= MAX_RESOURCES {
            return Err(EngineError::LimitExceeded("too many resources"));
        }
        if state.resources.contains_key(&resource.id) {
            return Err(EngineError::AlreadyExists(resource.id));
        }

        info!(resource = %resource.id, kind = resource.kind.label(), "resource added");
        self.commit(&mut state, Event::ResourceAdded { resource });
        Ok(())
    }

    pub async fn rename_resource(&self, id: &str, name: String) -> Result<(), EngineError> {
        check_name(&name)?;
        let mut state = self.state.write().await;
        if !state.resources.contains_key(id) {
            return Err(EngineError::NotFound(id.to_string()));
        }

        let event = Event::ResourceRenamed { id: id.to_string(), name };
        self.commit(&mut state, event);
        Ok(())
    }

    /// Delete a resource together with all of its bookings, which are returned.
    pub async fn remove_resource(&self, id: &str) -> Result<Vec<Booking>, EngineError> {
        let mut state = self.state.write().await;
        if !state.resources.contains_key(id) {
            return Err(EngineError::NotFound(id.to_string()));
        }

        let doomed: Vec<Booking> = state.ledger.on_resource(id).cloned().collect();
        for booking in &doomed {
            self.commit(&mut state, Event::BookingCancelled { booking: booking.clone() });
        }
        self.commit(&mut state, Event::ResourceRemoved { id: id.to_string() });
        self.notify.remove(id);

        info!(resource = %id, cancelled = doomed.len(), "resource removed");
        Ok(doomed)
    }

    /// Validate a new booking and insert it in the same critical section.
    pub async fn book(&self, candidate: Booking) -> Result<(), EngineError> {
        check_id(&candidate.id)?;
        let mut state = self.state.write().await;
        if !state.resources.contains_key(&candidate.resource_id) {
            return Err(EngineError::NotFound(candidate.resource_id));
        }
        if state.ledger.contains(&candidate.id) {
            return Err(EngineError::AlreadyExists(candidate.id));
        }
        if state.ledger.len() >= MAX_BOOKINGS {
            return Err(EngineError::LimitExceeded("too many bookings"));
        }

        self.admit(&state, &candidate, None)?;

        info!(
            booking = %candidate.id,
            resource = %candidate.resource_id,
            user = %candidate.user_id,
            date = %candidate.date,
            "booked {}-{}", candidate.start_time, candidate.end_time
        );
        self.commit(&mut state, Event::BookingCreated { booking: candidate });
        Ok(())
    }

    /// Replace an existing booking (matched by id) after re-validating it
    /// against everything except itself. Returns the previous version.
    pub async fn reschedule(&self, booking: Booking) -> Result<Booking, EngineError> {
        let mut state = self.state.write().await;
        let previous = state
            .ledger
            .get(&booking.id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(booking.id.clone()))?;
        if !state.resources.contains_key(&booking.resource_id) {
            return Err(EngineError::NotFound(booking.resource_id));
        }

        self.admit(&state, &booking, Some(booking.id.as_str()))?;

        info!(
            booking = %booking.id,
            resource = %booking.resource_id,
            date = %booking.date,
            "rescheduled {}-{} -> {}-{}",
            previous.start_time, previous.end_time, booking.start_time, booking.end_time
        );
        let event = Event::BookingUpdated {
            previous: previous.clone(),
            current: booking,
        };
        self.commit(&mut state, event);
        Ok(previous)
    }

    pub async fn cancel(&self, id: &str) -> Result<Booking, EngineError> {
        let mut state = self.state.write().await;
        let booking = state
            .ledger
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        info!(booking = %id, resource = %booking.resource_id, "booking cancelled");
        self.commit(&mut state, Event::BookingCancelled { booking: booking.clone() });
        Ok(booking)
    }

    /// Run the validator and record the outcome.
    fn admit(
        &self,
        state: &OfficeState,
        candidate: &Booking,
        exclude: Option<&str>,
    ) -> Result<(), BookingError> {
        let started = Instant::now();
        let verdict = validate(&state.ledger, candidate, &state.resources, exclude);
        metrics::histogram!(crate::observability::VALIDATION_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        match &verdict {
            Ok(()) => {
                let operation = if exclude.is_some() { "reschedule" } else { "book" };
                metrics::counter!(crate::observability::BOOKINGS_ACCEPTED_TOTAL, "operation" => operation)
                    .increment(1);
            }
            Err(e) => {
                metrics::counter!(crate::observability::BOOKINGS_REJECTED_TOTAL, "reason" => e.code())
                    .increment(1);
                debug!(booking = %candidate.id, reason = e.code(), "rejected: {e}");
            }
        }
        verdict
    }
}
