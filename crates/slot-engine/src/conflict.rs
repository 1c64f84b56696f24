//! Decide whether a requested booking is legal against the existing ledger.
//!
//! A request passes when neither party has an overlapping confirmed booking on
//! that day and every 30-minute tick of the request lies inside both parties'
//! generated slots. Adjacent bookings (one ends exactly when the other starts)
//! are NOT conflicts. Rejection is a plain `false`.

use tracing::debug;

use crate::slots::{slot_set, SLOT_MINUTES};
use crate::time::TimeOfDay;
use crate::types::{BookingRecord, Candidate, Day, Engineer, Participant};

/// Overlap test between the requested `[start, end)` and a booking's
/// `[booking_start, booking_end)`.
///
/// Equivalent to `start < booking_end && booking_start < end` for non-empty
/// intervals; touching endpoints do not overlap.
pub fn intervals_overlap(start: u32, end: u32, booking_start: u32, booking_end: u32) -> bool {
    (start >= booking_start && start < booking_end)
        || (end > booking_start && end <= booking_end)
        || (start <= booking_start && end >= booking_end)
}

/// Confirmed bookings on `day` matching `party` that overlap the request.
fn has_overlap<F>(bookings: &[BookingRecord], day: Day, start: TimeOfDay, duration: u32, party: F) -> bool
where
    F: Fn(&BookingRecord) -> bool,
{
    let start = start.minutes();
    let end = start.saturating_add(duration);

    bookings.iter().any(|b| {
        if !b.is_confirmed() || b.day != day || !party(b) {
            return false;
        }
        let (booking_start, booking_end) = b.interval();
        intervals_overlap(start, end, booking_start, booking_end)
    })
}

/// Whether `engineer_id` already holds a confirmed booking overlapping the range.
pub fn is_engineer_booked_in_range(
    bookings: &[BookingRecord],
    engineer_id: &str,
    day: Day,
    start: TimeOfDay,
    duration: u32,
) -> bool {
    has_overlap(bookings, day, start, duration, |b| b.engineer_id == engineer_id)
}

/// Whether `candidate_id` already holds a confirmed booking overlapping the range.
pub fn is_candidate_booked(
    bookings: &[BookingRecord],
    candidate_id: &str,
    day: Day,
    start: TimeOfDay,
    duration: u32,
) -> bool {
    has_overlap(bookings, day, start, duration, |b| b.candidate_id == candidate_id)
}

/// Whether any confirmed booking on `day` overlaps the range, whoever holds it.
pub fn is_slot_booked(bookings: &[BookingRecord], day: Day, start: TimeOfDay, duration: u32) -> bool {
    has_overlap(bookings, day, start, duration, |_| true)
}

/// Validate a requested booking for `candidate` with `engineer`.
///
/// 1. Neither party has an overlapping confirmed booking on `day`.
/// 2. Every tick `t` in `start, start+30, ...` with `t < start + duration` is a
///    generated slot for both parties. An unaligned duration such as 45 checks
///    the ticks 0 and 30 only.
pub fn can_book_slot(
    candidate: &Candidate,
    engineer: &Engineer,
    day: Day,
    start: TimeOfDay,
    duration: u32,
    bookings: &[BookingRecord],
) -> bool {
    if is_engineer_booked_in_range(bookings, engineer.id(), day, start, duration) {
        debug!(engineer = engineer.id(), %day, %start, duration, "engineer already booked");
        return false;
    }
    if is_candidate_booked(bookings, candidate.id(), day, start, duration) {
        debug!(candidate = candidate.id(), %day, %start, duration, "candidate already booked");
        return false;
    }

    let candidate_slots = slot_set(candidate.availability().for_day(day));
    let engineer_slots = slot_set(engineer.availability().for_day(day));

    let end = start.minutes().saturating_add(duration);
    let mut tick = start.minutes();
    while tick < end {
        let slot = TimeOfDay::from_minutes(tick);
        if !candidate_slots.contains(&slot) || !engineer_slots.contains(&slot) {
            debug!(
                candidate = candidate.id(),
                engineer = engineer.id(),
                %day,
                %slot,
                "tick outside mutual availability"
            );
            return false;
        }
        tick = tick.saturating_add(SLOT_MINUTES);
    }

    true
}

/// Confirmed bookings starting exactly at `start` on `day`.
pub fn slot_bookings(bookings: &[BookingRecord], day: Day, start: TimeOfDay) -> Vec<&BookingRecord> {
    bookings
        .iter()
        .filter(|b| b.is_confirmed() && b.day == day && b.start_time == start)
        .collect()
}

/// Engineers from `engineers` holding a confirmed booking that starts at the slot.
///
/// Follows booking order; ids not present in `engineers` are skipped.
pub fn booked_engineers_in_slot<'a>(
    bookings: &[BookingRecord],
    engineers: &'a [Engineer],
    day: Day,
    start: TimeOfDay,
) -> Vec<&'a Engineer> {
    slot_bookings(bookings, day, start)
        .into_iter()
        .filter_map(|b| engineers.iter().find(|e| e.id == b.engineer_id))
        .collect()
}
