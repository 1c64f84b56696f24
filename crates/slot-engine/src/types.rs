//! Shared data model: weekdays, availability, people and booking records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Result, SchedulerError};
use crate::time::TimeOfDay;

/// A bookable weekday. Weekends are never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All weekdays in calendar order.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Day {
    type Err = SchedulerError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                lower == name || lower == name[..3]
            })
            .ok_or_else(|| SchedulerError::InvalidDay(s.to_string()))
    }
}

/// A half-open `[start, end)` range a person declares as free within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl AvailabilitySlot {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        let slot = AvailabilitySlot { start, end };
        slot.validate()?;
        Ok(slot)
    }

    /// Parse a range from two `"HH:MM"` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        AvailabilitySlot::new(start.parse()?, end.parse()?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(SchedulerError::InvalidAvailability {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }
}

/// Declared free ranges per weekday. Order within a day carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability(BTreeMap<Day, Vec<AvailabilitySlot>>);

impl WeeklyAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper: append a range to `day`.
    pub fn with(mut self, day: Day, slot: AvailabilitySlot) -> Self {
        self.add(day, slot);
        self
    }

    pub fn add(&mut self, day: Day, slot: AvailabilitySlot) {
        self.0.entry(day).or_default().push(slot);
    }

    /// Ranges declared for `day`; empty when the day has none.
    pub fn for_day(&self, day: Day) -> &[AvailabilitySlot] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &[AvailabilitySlot])> {
        self.0.iter().map(|(day, slots)| (*day, slots.as_slice()))
    }

    pub fn validate(&self) -> Result<()> {
        self.0.values().flatten().try_for_each(AvailabilitySlot::validate)
    }
}

/// Either side of an interview pairing. Candidates and engineers are identical
/// as far as availability is concerned.
pub trait Participant {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn availability(&self) -> &WeeklyAvailability;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub availability: WeeklyAvailability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engineer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub availability: WeeklyAvailability,
}

impl Participant for Candidate {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn availability(&self) -> &WeeklyAvailability {
        &self.availability
    }
}

impl Participant for Engineer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn availability(&self) -> &WeeklyAvailability {
        &self.availability
    }
}

/// Lookup composite for one 30-minute cell of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: Day,
    pub start: TimeOfDay,
}

impl SlotKey {
    pub fn new(day: Day, start: TimeOfDay) -> Self {
        SlotKey { day, start }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    Video,
    Phone,
    InPerson,
}

/// Unique id of one stored booking record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub Ulid);

impl BookingId {
    pub fn new() -> Self {
        BookingId(Ulid::new())
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shared id of every chunk belonging to one logical booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingGroupId(pub Ulid);

impl BookingGroupId {
    pub fn new() -> Self {
        BookingGroupId(Ulid::new())
    }
}

impl Default for BookingGroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BookingGroupId {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        Ulid::from_string(s)
            .map(BookingGroupId)
            .map_err(|_| SchedulerError::BookingNotFound(s.to_string()))
    }
}

/// One stored reservation of a candidate's and an engineer's time.
///
/// Bookings longer than one slot are stored as several contiguous records that
/// share a `group` and each carry the full logical `duration`. Each such chunk
/// records the minutes it covers itself in `span`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: BookingId,
    /// Records loaded without a group each form their own logical booking.
    #[serde(default)]
    pub group: BookingGroupId,
    pub candidate_id: String,
    pub engineer_id: String,
    pub day: Day,
    pub start_time: TimeOfDay,
    /// Total logical duration in minutes, not the per-chunk length.
    pub duration: u32,
    /// Minutes covered by this record alone. Absent when the record covers the
    /// whole `duration`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<u32>,
    pub booked_at: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<InterviewType>,
}

impl BookingRecord {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Half-open `[start, end)` interval in minutes this record occupies.
    ///
    /// A chunk occupies only its own span, so the chunks of one booking tile
    /// `[start, start + duration)` without overlapping each other.
    pub fn interval(&self) -> (u32, u32) {
        let start = self.start_time.minutes();
        (start, start.saturating_add(self.span.unwrap_or(self.duration)))
    }
}
