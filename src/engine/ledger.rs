use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::*;

/// Ordered collection of every booking across resources, users and dates.
///
/// The validator and projector only ever read it; callers mutate it after a
/// booking has been accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    // ── Mutation ─────────────────────────────────────────────

    pub fn insert(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Replace the entry with the same id in place, returning the previous one.
    pub fn replace(&mut self, booking: Booking) -> Option<Booking> {
        let slot = self.bookings.iter_mut().find(|b| b.id == booking.id)?;
        Some(std::mem::replace(slot, booking))
    }

    pub fn remove(&mut self, id: &str) -> Option<Booking> {
        let pos = self.bookings.iter().position(|b| b.id == id)?;
        Some(self.bookings.remove(pos))
    }

    /// Every booking on a resource, any date, in ledger order.
    pub fn on_resource<'a>(&'a self, resource_id: &'a str) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings.iter().filter(move |b| b.resource_id == resource_id)
    }

    // ── Queries ──────────────────────────────────────────────

    /// Bookings on one resource for one date, in ledger order.
    pub fn on_day<'a>(
        &'a self,
        resource_id: &'a str,
        date: NaiveDate,
    ) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings.iter().filter(move |b| b.is_on(resource_id, date))
    }

    /// A user's bookings for one date, any resource.
    pub fn for_user_on<'a>(
        &'a self,
        user_id: &'a str,
        date: NaiveDate,
    ) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |b| b.user_id == user_id && b.date == date)
    }

    /// The other bookings on a resource that day, earliest first.
    pub fn day_schedule(
        &self,
        resource_id: &str,
        date: NaiveDate,
        exclude: Option<&str>,
    ) -> Vec<Booking> {
        let mut schedule: Vec<Booking> = self
            .on_day(resource_id, date)
            .filter(|b| Some(b.id.as_str()) != exclude)
            .cloned()
            .collect();
        schedule.sort_by_key(|b| b.start_time);
        schedule
    }

    /// Everything a user has booked, ordered by date then start time.
    pub fn bookings_for_user(&self, user_id: &str) -> Vec<Booking> {
        let mut mine: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by_key(|b| (b.date, b.start_time));
        mine
    }

    /// Users with at least one booking on `date`, ordered by user id.
    pub fn attendance(&self, date: NaiveDate) -> Vec<Attendee> {
        let mut by_user: BTreeMap<&str, Vec<Booking>> = BTreeMap::new();
        for b in self.bookings.iter().filter(|b| b.date == date) {
            by_user.entry(b.user_id.as_str()).or_default().push(b.clone());
        }
        by_user
            .into_iter()
            .map(|(user_id, bookings)| Attendee {
                user_id: user_id.to_string(),
                bookings,
            })
            .collect()
    }
}

impl From<Vec<Booking>> for BookingLedger {
    fn from(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }
}

impl FromIterator<Booking> for BookingLedger {
    fn from_iter<I: IntoIterator<Item = Booking>>(iter: I) -> Self {
        Self {
            bookings: iter.into_iter().collect(),
        }
    }
}
