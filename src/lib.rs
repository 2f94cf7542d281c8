//! Desk, room and parking booking engine.
//!
//! The core is two pure pieces over a [`engine::BookingLedger`]: the
//! validator ([`engine::validate`]) that accepts or rejects a candidate
//! booking, and the [`engine::OccupancyProjector`] that turns a resource's
//! day into busy/free segments. [`engine::Engine`] wraps both behind one lock
//! so validate-then-commit cannot race.

pub mod config;
pub mod engine;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod seed;
