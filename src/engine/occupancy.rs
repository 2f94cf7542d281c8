use chrono::NaiveDate;

use crate::model::*;

use super::ledger::BookingLedger;

// ── Occupancy projection ──────────────────────────────────────────

/// Renders a resource's day as busy/free segments over the working window.
///
/// Bookings are trusted to be pre-validated; the projector never rejects
/// anything and silently skips bookings that fall outside the window or are
/// malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyProjector {
    window: WorkingWindow,
}

impl OccupancyProjector {
    pub fn new(window: WorkingWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &WorkingWindow {
        &self.window
    }

    /// Gap-free, sorted segments covering the window, with no two adjacent
    /// segments sharing the same `busy` value.
    pub fn project(
        &self,
        ledger: &BookingLedger,
        resource_id: &str,
        date: NaiveDate,
    ) -> Vec<OccupancySegment> {
        let window = self.window.span();
        let initial = vec![OccupancySegment::free(window)];
        let segments = ledger
            .on_day(resource_id, date)
            .filter_map(|b| clip(b, &window))
            .fold(initial, |segments, busy| mark_busy(&segments, &busy));
        coalesce(segments)
    }

    /// Busy share of the window as a percentage in `[0, 100]`.
    pub fn percent_booked(&self, ledger: &BookingLedger, resource_id: &str, date: NaiveDate) -> f64 {
        let busy: u32 = self
            .project(ledger, resource_id, date)
            .iter()
            .filter(|s| s.busy)
            .map(|s| s.duration_minutes() as u32)
            .sum();
        let pct = busy as f64 / self.window.duration_minutes() as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }
}

/// Booking interval intersected with the window; `None` if empty or malformed.
fn clip(booking: &Booking, window: &Span) -> Option<Span> {
    Span::try_new(
        booking.start_time.max(window.start),
        booking.end_time.min(window.end),
    )
}

/// One fold step: carve `busy` out of every free segment it touches.
pub fn mark_busy(segments: &[OccupancySegment], busy: &Span) -> Vec<OccupancySegment> {
    segments
        .iter()
        .flat_map(|seg| split_free(seg, busy))
        .collect()
}

fn split_free(seg: &OccupancySegment, busy: &Span) -> Vec<OccupancySegment> {
    if seg.busy || !seg.span().overlaps(busy) {
        return vec![*seg];
    }
    let mut parts = Vec::with_capacity(3);
    if busy.start > seg.start {
        parts.push(OccupancySegment::free(Span::new(seg.start, busy.start)));
    }
    parts.push(OccupancySegment::busy(Span::new(
        seg.start.max(busy.start),
        seg.end.min(busy.end),
    )));
    if busy.end < seg.end {
        parts.push(OccupancySegment::free(Span::new(busy.end, seg.end)));
    }
    parts
}

/// Merge touching segments with the same `busy` value into maximal runs.
pub fn coalesce(segments: Vec<OccupancySegment>) -> Vec<OccupancySegment> {
    let mut merged: Vec<OccupancySegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        if let Some(last) = merged.last_mut()
            && last.busy == seg.busy
            && last.end == seg.start {
                last.end = seg.end;
                continue;
            }
        merged.push(seg);
    }
    merged
}
