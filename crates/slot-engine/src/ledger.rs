//! In-memory booking ledger for one scheduling session.
//!
//! Records are appended when a booking is confirmed and only ever change by
//! cancellation. A booking longer than one slot is materialized as one record
//! per 30-minute chunk. Every chunk shares a [`BookingGroupId`], reports the
//! full logical duration and occupies only its own span in overlap checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SchedulerError};
use crate::slots::SLOT_MINUTES;
use crate::time::TimeOfDay;
use crate::types::{
    BookingGroupId, BookingId, BookingRecord, BookingStatus, Day, InterviewType,
};

/// A booking the caller intends to confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIntent {
    pub candidate_id: String,
    pub engineer_id: String,
    pub day: Day,
    pub start_time: TimeOfDay,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<InterviewType>,
}

/// One logical booking reassembled from its chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub group: BookingGroupId,
    pub candidate_id: String,
    pub engineer_id: String,
    pub day: Day,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub duration: u32,
    pub status: BookingStatus,
    pub chunks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingLedger {
    records: Vec<BookingRecord>,
}

/// Split an intent into its per-slot records.
///
/// Durations up to one slot yield a single record; longer ones yield one record
/// per started 30-minute chunk of `[start, start + duration)`, the last one
/// spanning whatever remains.
pub fn booking_records(intent: &BookingIntent, booked_at: DateTime<Utc>) -> Vec<BookingRecord> {
    let group = BookingGroupId::new();
    let chunks = intent.duration.div_ceil(SLOT_MINUTES).max(1);

    (0..chunks)
        .map(|i| {
            let offset = i * SLOT_MINUTES;
            let span = (chunks > 1).then(|| SLOT_MINUTES.min(intent.duration - offset));
            BookingRecord {
                id: BookingId::new(),
                group,
                candidate_id: intent.candidate_id.clone(),
                engineer_id: intent.engineer_id.clone(),
                day: intent.day,
                start_time: intent.start_time.add_minutes(offset),
                duration: intent.duration,
                span,
                booked_at,
                status: BookingStatus::Confirmed,
                interview_type: intent.interview_type,
            }
        })
        .collect()
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records loaded from elsewhere, keeping their order.
    pub fn from_records(records: Vec<BookingRecord>) -> Self {
        BookingLedger { records }
    }

    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<BookingRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn confirmed(&self) -> impl Iterator<Item = &BookingRecord> {
        self.records.iter().filter(|r| r.is_confirmed())
    }

    /// Append the records for `intent` and return copies of what was stored.
    ///
    /// No conflict check happens here; callers validate with
    /// [`can_book_slot`](crate::conflict::can_book_slot) first.
    pub fn book(&mut self, intent: &BookingIntent, booked_at: DateTime<Utc>) -> Vec<BookingRecord> {
        let new_records = booking_records(intent, booked_at);
        if let Some(first) = new_records.first() {
            info!(
                group = %first.group,
                candidate = %intent.candidate_id,
                engineer = %intent.engineer_id,
                day = %intent.day,
                start = %intent.start_time,
                duration = intent.duration,
                chunks = new_records.len(),
                "booking recorded"
            );
        }
        self.records.extend(new_records.iter().cloned());
        new_records
    }

    /// Mark every chunk of `group` as cancelled. Returns how many changed.
    pub fn cancel(&mut self, group: BookingGroupId) -> Result<usize> {
        let mut found = false;
        let mut changed = 0;
        for record in self.records.iter_mut().filter(|r| r.group == group) {
            found = true;
            if record.status != BookingStatus::Cancelled {
                record.status = BookingStatus::Cancelled;
                changed += 1;
            }
        }
        if !found {
            return Err(SchedulerError::BookingNotFound(group.to_string()));
        }
        info!(%group, changed, "booking cancelled");
        Ok(changed)
    }

    /// Drop every chunk of `group` from the ledger. Returns how many were removed.
    pub fn remove(&mut self, group: BookingGroupId) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| r.group != group);
        let removed = before - self.records.len();
        if removed == 0 {
            return Err(SchedulerError::BookingNotFound(group.to_string()));
        }
        info!(%group, removed, "booking removed");
        Ok(removed)
    }

    /// Chunks of `group` in storage order.
    pub fn group(&self, group: BookingGroupId) -> Vec<&BookingRecord> {
        self.records.iter().filter(|r| r.group == group).collect()
    }

    /// One summary per logical booking, in order of first appearance.
    pub fn groups(&self) -> Vec<BookingSummary> {
        let mut summaries: Vec<BookingSummary> = Vec::new();
        for record in &self.records {
            if let Some(summary) = summaries.iter_mut().find(|s| s.group == record.group) {
                summary.chunks += 1;
                summary.start_time = summary.start_time.min(record.start_time);
                summary.end_time = summary.start_time.add_minutes(summary.duration);
                // A group counts as cancelled only once every chunk is.
                if record.status != BookingStatus::Cancelled {
                    summary.status = record.status;
                }
                continue;
            }
            summaries.push(BookingSummary {
                group: record.group,
                candidate_id: record.candidate_id.clone(),
                engineer_id: record.engineer_id.clone(),
                day: record.day,
                start_time: record.start_time,
                end_time: record.start_time.add_minutes(record.duration),
                duration: record.duration,
                status: record.status,
                chunks: 1,
            });
        }
        summaries
    }
}
