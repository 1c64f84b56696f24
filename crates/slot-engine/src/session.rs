//! A single scheduling session: selection state, the booking ledger, and the
//! click-to-book flow built on top of the pure availability and conflict checks.
//!
//! The session is the only owner of mutable state. It memoizes the last
//! availability intersection keyed on the selected candidate and engineer ids.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace};

use crate::availability::get_available_slots;
use crate::config::SchedulerConfig;
use crate::conflict::{booked_engineers_in_slot, can_book_slot, is_slot_booked, slot_bookings};
use crate::error::{Result, SchedulerError};
use crate::ledger::{BookingIntent, BookingLedger};
use crate::roster::Roster;
use crate::slots::SLOT_MINUTES;
use crate::time::TimeOfDay;
use crate::types::{BookingGroupId, BookingRecord, Candidate, Day, Engineer, SlotKey};

/// Owned snapshot of an intersection: slot → ids of engineers free there.
pub type SlotAvailability = BTreeMap<SlotKey, Vec<String>>;

/// Selected candidate id and engineer ids, in selection order.
type SelectionKey = (Option<String>, Vec<String>);

/// Outcome of clicking a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum SlotDecision {
    /// The slot can be booked as requested.
    Bookable { intent: BookingIntent },
    /// The requested slot fails, but starting 30 minutes earlier works.
    SuggestEarlier {
        requested: BookingIntent,
        suggested: BookingIntent,
    },
    Unavailable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewSettings {
    /// Show only engineers holding a booking in each cell.
    pub show_booked_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStatus {
    Available,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerSlotState {
    pub engineer_id: String,
    pub status: BadgeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingRecord>,
}

/// Render model of one weekly-grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub key: SlotKey,
    pub engineers: Vec<EngineerSlotState>,
    /// Every engineer free in this cell already holds a booking here.
    pub is_fully_booked: bool,
    /// Any confirmed booking overlaps this cell for the selected duration.
    pub is_booked: bool,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    roster: Roster,
    config: SchedulerConfig,
    ledger: BookingLedger,
    view: ViewSettings,
    candidate: Option<Candidate>,
    engineers: Vec<Engineer>,
    duration: u32,
    memo: Option<(SelectionKey, SlotAvailability)>,
}

impl Scheduler {
    /// Start a session. The config is validated before use.
    pub fn new(roster: Roster, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        roster.validate()?;
        let duration = config.default_duration;
        Ok(Scheduler {
            roster,
            config,
            ledger: BookingLedger::new(),
            view: ViewSettings::default(),
            candidate: None,
            engineers: Vec::new(),
            duration,
            memo: None,
        })
    }

    /// Replace the ledger, e.g. with bookings loaded from a file.
    pub fn with_ledger(mut self, ledger: BookingLedger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> BookingLedger {
        self.ledger
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    pub fn selected_engineers(&self) -> &[Engineer] {
        &self.engineers
    }

    pub fn set_view(&mut self, view: ViewSettings) {
        self.view = view;
    }

    pub fn select_candidate(&mut self, id: &str) -> Result<()> {
        let candidate = self
            .roster
            .candidate(id)
            .cloned()
            .ok_or_else(|| SchedulerError::UnknownCandidate(id.to_string()))?;
        self.candidate = Some(candidate);
        self.memo = None;
        Ok(())
    }

    pub fn clear_candidate(&mut self) {
        self.candidate = None;
        self.memo = None;
    }

    /// Replace the engineer filter. Unknown ids leave the selection untouched.
    pub fn select_engineers<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<()> {
        let engineers = ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.roster
                    .engineer(id)
                    .cloned()
                    .ok_or_else(|| SchedulerError::UnknownEngineer(id.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.engineers = engineers;
        self.memo = None;
        Ok(())
    }

    pub fn set_duration(&mut self, duration: u32) -> Result<()> {
        if !self.config.is_allowed_duration(duration) {
            return Err(SchedulerError::InvalidDuration(duration));
        }
        self.duration = duration;
        Ok(())
    }

    /// Intersection for the current selection, recomputed only when it changed.
    ///
    /// Empty when no candidate or no engineer is selected.
    pub fn available_slots(&mut self) -> &SlotAvailability {
        let key: SelectionKey = (
            self.candidate.as_ref().map(|c| c.id.clone()),
            self.engineers.iter().map(|e| e.id.clone()).collect(),
        );

        let memo = match self.memo.take() {
            Some((memo_key, snapshot)) if memo_key == key => {
                trace!(cells = snapshot.len(), "availability memo hit");
                (memo_key, snapshot)
            }
            _ => {
                let snapshot: SlotAvailability = match &self.candidate {
                    Some(candidate) => get_available_slots(candidate, &self.engineers)
                        .into_iter()
                        .map(|(slot, engineers)| {
                            (slot, engineers.iter().map(|e| e.id.clone()).collect())
                        })
                        .collect(),
                    None => SlotAvailability::new(),
                };
                debug!(cells = snapshot.len(), engineers = key.1.len(), "availability recomputed");
                (key, snapshot)
            }
        };

        &self.memo.insert(memo).1
    }

    /// Check whether the selected candidate can meet `engineer_id` at the slot.
    ///
    /// On rejection, probes the start 30 minutes earlier (never before the
    /// configured opening time) and offers it as a suggestion.
    pub fn request_slot(&self, day: Day, start: TimeOfDay, engineer_id: &str) -> Result<SlotDecision> {
        let candidate = self.candidate.as_ref().ok_or(SchedulerError::NoCandidateSelected)?;
        let engineer = self
            .roster
            .engineer(engineer_id)
            .ok_or_else(|| SchedulerError::UnknownEngineer(engineer_id.to_string()))?;
        let bookings = self.ledger.records();

        let requested = BookingIntent {
            candidate_id: candidate.id.clone(),
            engineer_id: engineer.id.clone(),
            day,
            start_time: start,
            duration: self.duration,
            interview_type: None,
        };

        if can_book_slot(candidate, engineer, day, start, self.duration, bookings) {
            return Ok(SlotDecision::Bookable { intent: requested });
        }

        if self.config.suggest_earlier {
            let earlier = start
                .checked_sub_minutes(SLOT_MINUTES)
                .filter(|t| *t >= self.config.opening_time);
            if let Some(earlier) = earlier {
                if can_book_slot(candidate, engineer, day, earlier, self.duration, bookings) {
                    debug!(%day, requested = %start, suggested = %earlier, "suggesting earlier slot");
                    let suggested = BookingIntent {
                        start_time: earlier,
                        ..requested.clone()
                    };
                    return Ok(SlotDecision::SuggestEarlier {
                        requested,
                        suggested,
                    });
                }
            }
        }

        Ok(SlotDecision::Unavailable)
    }

    /// Click a grid cell: book with the first engineer shown as available there.
    pub fn click_slot(&mut self, day: Day, start: TimeOfDay) -> Result<SlotDecision> {
        if self.candidate.is_none() {
            return Err(SchedulerError::NoCandidateSelected);
        }
        let view = self.slot_view(day, start);
        let first_free = view
            .engineers
            .into_iter()
            .find(|s| s.status == BadgeStatus::Available);
        match first_free {
            Some(state) => self.request_slot(day, start, &state.engineer_id),
            None => Ok(SlotDecision::Unavailable),
        }
    }

    /// Record `intent` after re-validating it against the current ledger.
    ///
    /// A second confirmation of the same intent fails with `SlotUnavailable`.
    pub fn confirm(&mut self, intent: &BookingIntent, booked_at: DateTime<Utc>) -> Result<Vec<BookingRecord>> {
        if !self.config.is_allowed_duration(intent.duration) {
            return Err(SchedulerError::InvalidDuration(intent.duration));
        }
        let candidate = self
            .roster
            .candidate(&intent.candidate_id)
            .ok_or_else(|| SchedulerError::UnknownCandidate(intent.candidate_id.clone()))?;
        let engineer = self
            .roster
            .engineer(&intent.engineer_id)
            .ok_or_else(|| SchedulerError::UnknownEngineer(intent.engineer_id.clone()))?;

        if !can_book_slot(
            candidate,
            engineer,
            intent.day,
            intent.start_time,
            intent.duration,
            self.ledger.records(),
        ) {
            return Err(SchedulerError::SlotUnavailable {
                day: intent.day.to_string(),
                start: intent.start_time.to_string(),
                duration: intent.duration,
            });
        }

        Ok(self.ledger.book(intent, booked_at))
    }

    pub fn cancel(&mut self, group: BookingGroupId) -> Result<usize> {
        self.ledger.cancel(group)
    }

    pub fn remove(&mut self, group: BookingGroupId) -> Result<usize> {
        self.ledger.remove(group)
    }

    /// Build the render model for one grid cell under the current view settings.
    pub fn slot_view(&mut self, day: Day, start: TimeOfDay) -> SlotView {
        let key = SlotKey::new(day, start);
        let duration = self.duration;
        let show_booked_only = self.view.show_booked_only;
        let free_ids = self.available_slots().get(&key).cloned().unwrap_or_default();

        let bookings = self.ledger.records();
        let in_slot = slot_bookings(bookings, day, start);
        let booking_for = |engineer_id: &str| {
            in_slot
                .iter()
                .find(|b| b.engineer_id == engineer_id)
                .map(|b| (*b).clone())
        };

        let (engineers, is_fully_booked) = if show_booked_only {
            let states = booked_engineers_in_slot(bookings, &self.roster.engineers, day, start)
                .into_iter()
                .map(|e| EngineerSlotState {
                    engineer_id: e.id.clone(),
                    status: BadgeStatus::Booked,
                    booking: booking_for(&e.id),
                })
                .collect();
            (states, false)
        } else {
            let states: Vec<EngineerSlotState> = free_ids
                .iter()
                .map(|id| {
                    let booking = booking_for(id);
                    EngineerSlotState {
                        engineer_id: id.clone(),
                        status: if booking.is_some() {
                            BadgeStatus::Booked
                        } else {
                            BadgeStatus::Available
                        },
                        booking,
                    }
                })
                .collect();
            let fully = !states.is_empty() && states.iter().all(|s| s.status == BadgeStatus::Booked);
            (states, fully)
        };

        SlotView {
            key,
            engineers,
            is_fully_booked,
            is_booked: is_slot_booked(bookings, day, start, duration),
        }
    }
}
