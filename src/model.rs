use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type BookingId = String;
pub type ResourceId = String;
pub type UserId = String;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock time of day with minute granularity, stored as minutes since midnight.
///
/// Textual form is always `HH:MM` (24-hour); `24:00` is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day {0:?}: expected HH:MM between 00:00 and 23:59")]
pub struct ParseTimeError(pub String);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self(hour as u16 * 60 + minute as u16))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTimeError(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(h) || !two_digits(m) {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Half-open interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct Span {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawSpan {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("span {start}-{end} is empty")]
pub struct EmptySpanError {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TryFrom<RawSpan> for Span {
    type Error = EmptySpanError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        Span::try_new(raw.start, raw.end).ok_or(EmptySpanError {
            start: raw.start,
            end: raw.end,
        })
    }
}

impl Span {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    /// `None` when the interval would be empty or inverted.
    pub fn try_new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection with `window`, or `None` if nothing is left.
    pub fn clamp(&self, window: &Span) -> Option<Span> {
        Span::try_new(self.start.max(window.start), self.end.min(window.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The daily range in which occupancy is tracked. Defaults to 06:00-18:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    span: Span,
}

impl WorkingWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        Span::try_new(start, end).map(|span| Self { span })
    }

    pub fn start(&self) -> TimeOfDay {
        self.span.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.span.end
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn duration_minutes(&self) -> u16 {
        self.span.duration_minutes()
    }

    pub fn midpoint(&self) -> TimeOfDay {
        TimeOfDay(self.span.start.minutes() + self.duration_minutes() / 2)
    }
}

impl Default for WorkingWindow {
    fn default() -> Self {
        Self {
            span: Span::new(TimeOfDay(6 * 60), TimeOfDay(18 * 60)),
        }
    }
}

/// Quick-pick intervals offered when booking a desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeskPreset {
    Morning,
    Afternoon,
    FullDay,
}

impl DeskPreset {
    pub const ALL: [DeskPreset; 3] = [DeskPreset::Morning, DeskPreset::Afternoon, DeskPreset::FullDay];

    /// Morning and afternoon split the window at its midpoint.
    pub fn span(self, window: &WorkingWindow) -> Option<Span> {
        match self {
            DeskPreset::Morning => Span::try_new(window.start(), window.midpoint()),
            DeskPreset::Afternoon => Span::try_new(window.midpoint(), window.end()),
            DeskPreset::FullDay => Some(window.span()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Desk,
    Room,
    Parking,
}

impl ResourceKind {
    /// Kinds subject to the one-desk-per-person rule.
    pub fn is_desk_category(self) -> bool {
        match self {
            ResourceKind::Desk => true,
            ResourceKind::Room | ResourceKind::Parking => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Desk => "desk",
            ResourceKind::Room => "room",
            ResourceKind::Parking => "parking",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// A reservation of one resource by one user for an interval on one date.
///
/// `start_time < end_time` is not enforced here; the validator reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl Booking {
    /// The booked interval, or `None` for a malformed booking.
    pub fn span(&self) -> Option<Span> {
        Span::try_new(self.start_time, self.end_time)
    }

    pub fn is_on(&self, resource_id: &str, date: NaiveDate) -> bool {
        self.resource_id == resource_id && self.date == date
    }

    /// Half-open overlap against the raw boundaries of this booking.
    pub fn overlaps(&self, span: &Span) -> bool {
        span.start < self.end_time && self.start_time < span.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancySegment {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub busy: bool,
}

impl OccupancySegment {
    pub fn free(span: Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
            busy: false,
        }
    }

    pub fn busy(span: Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
            busy: true,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Fraction of the working window this segment takes up.
    pub fn share(&self, window: &WorkingWindow) -> f64 {
        self.duration_minutes() as f64 / window.duration_minutes() as f64
    }
}

/// Ledger and directory changes, published per resource by the notify hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    ResourceAdded {
        resource: Resource,
    },
    ResourceRenamed {
        id: ResourceId,
        name: String,
    },
    ResourceRemoved {
        id: ResourceId,
    },
    BookingCreated {
        booking: Booking,
    },
    BookingUpdated {
        previous: Booking,
        current: Booking,
    },
    BookingCancelled {
        booking: Booking,
    },
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub user_id: UserId,
    pub bookings: Vec<Booking>,
}
