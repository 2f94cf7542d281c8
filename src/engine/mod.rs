mod conflict;
mod error;
mod ledger;
mod mutations;
mod occupancy;
mod queries;

pub use conflict::{ResourceDirectory, validate};
pub use error::{BookingError, EngineError};
pub use ledger::BookingLedger;
pub use occupancy::{OccupancyProjector, coalesce, mark_busy};

use std::sync::Arc;

use tokio::sync::RwLock;
use ulid::Ulid;

use crate::model::*;
use crate::notify::NotifyHub;

/// Resource directory and ledger, always locked together.
///
/// The one-desk-per-user rule reads bookings across resources, so
/// validate-then-commit needs a single exclusive scope over both.
#[derive(Debug, Default)]
pub(super) struct OfficeState {
    pub(super) resources: ResourceDirectory,
    pub(super) ledger: BookingLedger,
}

/// Apply an event to the state (caller holds the write guard).
fn apply_to_state(state: &mut OfficeState, event: &Event) {
    match event {
        Event::ResourceAdded { resource } => {
            state.resources.insert(resource.id.clone(), resource.clone());
        }
        Event::ResourceRenamed { id, name } => {
            if let Some(resource) = state.resources.get_mut(id) {
                resource.name = name.clone();
            }
        }
        Event::ResourceRemoved { id } => {
            state.resources.remove(id);
        }
        Event::BookingCreated { booking } => {
            state.ledger.insert(booking.clone());
        }
        Event::BookingUpdated { current, .. } => {
            state.ledger.replace(current.clone());
        }
        Event::BookingCancelled { booking } => {
            state.ledger.remove(&booking.id);
        }
    }
}

/// Resources whose subscribers should see this event.
fn affected_resources(event: &Event) -> Vec<&str> {
    match event {
        Event::ResourceAdded { resource } => vec![resource.id.as_str()],
        Event::ResourceRenamed { id, .. } | Event::ResourceRemoved { id } => vec![id.as_str()],
        Event::BookingCreated { booking } | Event::BookingCancelled { booking } => {
            vec![booking.resource_id.as_str()]
        }
        Event::BookingUpdated { previous, current } => {
            if previous.resource_id == current.resource_id {
                vec![current.resource_id.as_str()]
            } else {
                vec![previous.resource_id.as_str(), current.resource_id.as_str()]
            }
        }
    }
}

/// Booking service: owns the directory and ledger and serializes every
/// validate-then-commit sequence behind one write lock.
pub struct Engine {
    pub(super) state: RwLock<OfficeState>,
    pub(super) projector: OccupancyProjector,
    pub notify: Arc<NotifyHub>,
}

impl Engine {
    pub fn new(window: WorkingWindow, notify: Arc<NotifyHub>) -> Self {
        Self {
            state: RwLock::new(OfficeState::default()),
            projector: OccupancyProjector::new(window),
            notify,
        }
    }

    pub fn window(&self) -> &WorkingWindow {
        self.projector.window()
    }

    /// Fresh id for a booking the caller is about to submit.
    pub fn new_booking_id() -> BookingId {
        Ulid::new().to_string()
    }

    /// Apply + notify in one call. Caller holds the write guard.
    pub(super) fn commit(&self, state: &mut OfficeState, event: Event) {
        apply_to_state(state, &event);
        metrics::counter!(
            crate::observability::LEDGER_EVENTS_TOTAL,
            "event" => crate::observability::event_label(&event)
        )
        .increment(1);
        metrics::gauge!(crate::observability::LEDGER_BOOKINGS).set(state.ledger.len() as f64);
        metrics::gauge!(crate::observability::RESOURCES_ACTIVE).set(state.resources.len() as f64);
        for resource_id in affected_resources(&event) {
            self.notify.send(resource_id, &event);
        }
    }
}
