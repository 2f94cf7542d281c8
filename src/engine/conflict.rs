use std::collections::HashMap;

use crate::model::*;

use super::BookingError;
use super::ledger::BookingLedger;

/// Resource lookup by id, as seen by the validator.
pub type ResourceDirectory = HashMap<ResourceId, Resource>;

/// Decide whether `candidate` may be committed to `ledger`.
///
/// Checks run in order and stop at the first failure: interval validity,
/// resource availability, then the one-desk-per-user rule. `exclude` names the
/// booking being edited; it is ignored by both overlap checks.
pub fn validate(
    ledger: &BookingLedger,
    candidate: &Booking,
    resources: &ResourceDirectory,
    exclude: Option<&str>,
) -> Result<(), BookingError> {
    let span = validate_interval(candidate)?;
    check_resource_free(ledger, candidate, &span, exclude)?;
    check_user_desk(ledger, candidate, &span, resources, exclude)
}

pub(crate) fn validate_interval(candidate: &Booking) -> Result<Span, BookingError> {
    candidate.span().ok_or(BookingError::InvalidInterval {
        start: candidate.start_time,
        end: candidate.end_time,
    })
}

pub(crate) fn check_resource_free(
    ledger: &BookingLedger,
    candidate: &Booking,
    span: &Span,
    exclude: Option<&str>,
) -> Result<(), BookingError> {
    let clash = ledger
        .on_day(&candidate.resource_id, candidate.date)
        .filter(|b| !is_excluded(b, exclude))
        .find(|b| b.overlaps(span));
    match clash {
        Some(b) => Err(BookingError::ResourceConflict(b.id.clone())),
        None => Ok(()),
    }
}

pub(crate) fn check_user_desk(
    ledger: &BookingLedger,
    candidate: &Booking,
    span: &Span,
    resources: &ResourceDirectory,
    exclude: Option<&str>,
) -> Result<(), BookingError> {
    let kind = resources
        .get(&candidate.resource_id)
        .map(|r| r.kind)
        .ok_or_else(|| BookingError::UnknownResource(candidate.resource_id.clone()))?;
    if !kind.is_desk_category() {
        return Ok(());
    }

    // Bookings on resources missing from the directory count as non-desk.
    let clash = ledger
        .for_user_on(&candidate.user_id, candidate.date)
        .filter(|b| !is_excluded(b, exclude))
        .filter(|b| {
            resources
                .get(&b.resource_id)
                .is_some_and(|r| r.kind.is_desk_category())
        })
        .find(|b| b.overlaps(span));
    match clash {
        Some(b) => Err(BookingError::UserDeskConflict(b.id.clone())),
        None => Ok(()),
    }
}

fn is_excluded(booking: &Booking, exclude: Option<&str>) -> bool {
    exclude.is_some_and(|id| booking.id == id)
}
