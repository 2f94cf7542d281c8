use thiserror::Error;

use crate::model::{BookingId, ResourceId, TimeOfDay};

/// Why a candidate booking was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("end time {end} is not after start time {start}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },
    #[error("resource already booked by {0}")]
    ResourceConflict(BookingId),
    #[error("user already holds a desk at that time: {0}")]
    UserDeskConflict(BookingId),
    #[error("unknown resource: {0}")]
    UnknownResource(ResourceId),
}

impl BookingError {
    /// Stable reason code for message lookup and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidInterval { .. } => "invalid_interval",
            BookingError::ResourceConflict(_) => "resource_conflict",
            BookingError::UserDeskConflict(_) => "user_desk_conflict",
            BookingError::UnknownResource(_) => "unknown_resource",
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("booking rejected: {0}")]
    Rejected(#[from] BookingError),
    #[error("limit exceeded: {0}")]
    LimitExceeded(&'static str),
}
