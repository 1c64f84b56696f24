//! Error types for slot-engine operations.
//!
//! The pure availability and conflict functions never fail: a rejected booking
//! is a `false`, an unavailable slot is an absent key. These errors only come
//! from parsing boundaries (times, days, JSON, config) and the session layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid day: {0:?} (expected Monday through Friday)")]
    InvalidDay(String),

    #[error("Invalid availability range {start}-{end}: start must precede end")]
    InvalidAvailability { start: String, end: String },

    #[error("Invalid duration: {0} minutes")]
    InvalidDuration(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown candidate: {0}")]
    UnknownCandidate(String),

    #[error("Unknown engineer: {0}")]
    UnknownEngineer(String),

    #[error("No candidate selected")]
    NoCandidateSelected,

    #[error("Slot {day} {start} is no longer available for {duration} minutes")]
    SlotUnavailable {
        day: String,
        start: String,
        duration: u32,
    },

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
