//! Expand declared availability ranges into discrete 30-minute slot starts.
//!
//! Each range is stepped from its start toward its end in [`SLOT_MINUTES`]
//! increments while `t < end`. A trailing piece shorter than a full slot is
//! never offered: `09:00-09:45` yields only `09:00`.

use std::collections::BTreeSet;

use crate::time::TimeOfDay;
use crate::types::AvailabilitySlot;

/// Base booking granularity in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Generate the slot start times covered by `ranges`, in input order.
///
/// Overlapping ranges produce repeated values; callers that need membership
/// should use [`slot_set`].
pub fn generate_time_slots(ranges: &[AvailabilitySlot]) -> Vec<TimeOfDay> {
    let mut slots = Vec::new();

    for range in ranges {
        let end = range.end.minutes();
        let mut minutes = range.start.minutes();
        // Only slots that fit entirely before `end` are emitted.
        while minutes + SLOT_MINUTES <= end {
            slots.push(TimeOfDay::from_minutes(minutes));
            minutes += SLOT_MINUTES;
        }
    }

    slots
}

/// Membership view over generated slots.
pub type SlotSet = BTreeSet<TimeOfDay>;

/// Generate the slots for `ranges` and collapse duplicates.
pub fn slot_set(ranges: &[AvailabilitySlot]) -> SlotSet {
    generate_time_slots(ranges).into_iter().collect()
}
