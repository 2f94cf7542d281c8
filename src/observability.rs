use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::model::Event;

// ── Booking decisions ───────────────────────────────────────────

/// Counter: bookings that passed validation. Labels: operation.
pub const BOOKINGS_ACCEPTED_TOTAL: &str = "hotdesk_bookings_accepted_total";

/// Counter: bookings refused by the validator. Labels: reason.
pub const BOOKINGS_REJECTED_TOTAL: &str = "hotdesk_bookings_rejected_total";

/// Histogram: validator run time in seconds.
pub const VALIDATION_DURATION_SECONDS: &str = "hotdesk_validation_duration_seconds";

/// Counter: occupancy projections served.
pub const PROJECTIONS_TOTAL: &str = "hotdesk_projections_total";

// ── Ledger state ────────────────────────────────────────────────

/// Counter: committed ledger/directory events. Labels: event.
pub const LEDGER_EVENTS_TOTAL: &str = "hotdesk_ledger_events_total";

/// Gauge: bookings currently in the ledger.
pub const LEDGER_BOOKINGS: &str = "hotdesk_ledger_bookings";

/// Gauge: resources currently registered.
pub const RESOURCES_ACTIVE: &str = "hotdesk_resources_active";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), BuildError> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Map an Event variant to a short label for metrics.
pub fn event_label(event: &Event) -> &'static str {
    match event {
        Event::ResourceAdded { .. } => "resource_added",
        Event::ResourceRenamed { .. } => "resource_renamed",
        Event::ResourceRemoved { .. } => "resource_removed",
        Event::BookingCreated { .. } => "booking_created",
        Event::BookingUpdated { .. } => "booking_updated",
        Event::BookingCancelled { .. } => "booking_cancelled",
    }
}
