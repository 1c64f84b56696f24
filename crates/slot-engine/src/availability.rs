//! Intersect a candidate's weekly availability with a set of engineers.
//!
//! For every weekday and every slot the candidate offers, the result lists the
//! engineers whose own generated slots contain that start time. Cells nobody
//! can take are omitted entirely, so an absent key and an empty list mean the
//! same thing to callers.

use std::collections::BTreeMap;

use crate::slots::{slot_set, SlotSet};
use crate::types::{Candidate, Day, Engineer, Participant, SlotKey};

/// Per-cell list of engineers free at the same time as the candidate.
///
/// Never contains an empty list. Engineer order follows the input slice.
pub type AvailableSlots<'a> = BTreeMap<SlotKey, Vec<&'a Engineer>>;

/// Compute, for each weekday slot the candidate offers, which engineers share it.
///
/// Returns an empty map when `engineers` is empty. The result is a snapshot:
/// recompute it whenever the candidate or the engineer selection changes.
pub fn get_available_slots<'a>(candidate: &Candidate, engineers: &'a [Engineer]) -> AvailableSlots<'a> {
    let mut available = AvailableSlots::new();
    if engineers.is_empty() {
        return available;
    }

    for day in Day::ALL {
        let candidate_slots = slot_set(candidate.availability().for_day(day));
        if candidate_slots.is_empty() {
            continue;
        }

        // Each engineer's set is generated once per day, not once per slot.
        let engineer_slots: Vec<(&'a Engineer, SlotSet)> = engineers
            .iter()
            .map(|e| (e, slot_set(e.availability().for_day(day))))
            .collect();

        for slot in candidate_slots {
            let free: Vec<&'a Engineer> = engineer_slots
                .iter()
                .filter(|(_, slots)| slots.contains(&slot))
                .map(|(engineer, _)| *engineer)
                .collect();

            if !free.is_empty() {
                available.insert(SlotKey::new(day, slot), free);
            }
        }
    }

    available
}

/// Engineers free at `key`, treating an absent cell as nobody.
pub fn available_engineers<'m, 'a>(available: &'m AvailableSlots<'a>, key: &SlotKey) -> &'m [&'a Engineer] {
    available.get(key).map(Vec::as_slice).unwrap_or(&[])
}
