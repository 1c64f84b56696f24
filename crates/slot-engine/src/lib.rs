//! # slot-engine
//!
//! Availability intersection and booking-conflict engine for interview scheduling.
//!
//! Given a candidate's and several engineers' weekly availability, the engine
//! computes which 30-minute slots are mutually free, decides whether a booking
//! request is legal against the existing bookings, and records accepted bookings
//! in an in-memory ledger. The core functions are pure: a rejected request is a
//! `false`, never an error.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{can_book_slot, get_available_slots, AvailabilitySlot, Candidate, Day,
//!     Engineer, SlotKey, TimeOfDay, WeeklyAvailability};
//!
//! let morning = WeeklyAvailability::new()
//!     .with(Day::Monday, AvailabilitySlot::parse("09:00", "11:00").unwrap());
//! let candidate = Candidate { id: "c1".into(), name: "Alice Johnson".into(), availability: morning.clone() };
//! let engineers = vec![Engineer {
//!     id: "e1".into(),
//!     name: "David Wilson".into(),
//!     role: "Backend Engineer".into(),
//!     availability: morning,
//! }];
//!
//! let slots = get_available_slots(&candidate, &engineers);
//! assert!(slots.contains_key(&SlotKey::new(Day::Monday, TimeOfDay::hm(10, 30))));
//! assert!(can_book_slot(&candidate, &engineers[0], Day::Monday, TimeOfDay::hm(9, 0), 60, &[]));
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` ↔ minutes since midnight
//! - [`slots`] — availability ranges → 30-minute slot starts
//! - [`availability`] — candidate × engineers intersection per weekday slot
//! - [`conflict`] — double-booking and mutual-availability checks
//! - [`ledger`] — in-memory booking records, chunking and cancellation
//! - [`session`] — selection state, memoized intersection, click-to-book flow
//! - [`config`] — meeting lengths, business hours, retry policy
//! - [`roster`] — candidate/engineer directory
//! - [`display`] — deterministic badge colors and initials
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod display;
pub mod error;
pub mod ledger;
pub mod roster;
pub mod session;
pub mod slots;
pub mod time;
pub mod types;

pub use availability::{get_available_slots, AvailableSlots};
pub use config::SchedulerConfig;
pub use conflict::{can_book_slot, is_slot_booked};
pub use error::SchedulerError;
pub use ledger::{BookingIntent, BookingLedger};
pub use roster::Roster;
pub use session::{Scheduler, SlotDecision};
pub use slots::{generate_time_slots, SLOT_MINUTES};
pub use time::{minutes_to_time, time_to_minutes, TimeOfDay};
pub use types::{
    AvailabilitySlot, BookingGroupId, BookingId, BookingRecord, BookingStatus, Candidate, Day,
    Engineer, InterviewType, Participant, SlotKey, WeeklyAvailability,
};
