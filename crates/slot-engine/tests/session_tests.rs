//! Tests for the scheduling session: selection, memoized availability,
//! click-to-book flow, suggestions and grid cell views.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::session::{BadgeStatus, ViewSettings};
use slot_engine::{
    AvailabilitySlot, BookingLedger, BookingStatus, Candidate, Day, Engineer, Roster, Scheduler,
    SchedulerConfig, SchedulerError, SlotDecision, SlotKey, TimeOfDay, WeeklyAvailability,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap()
}

fn week(ranges: &[(Day, &str, &str)]) -> WeeklyAvailability {
    ranges.iter().fold(WeeklyAvailability::new(), |avail, (day, start, end)| {
        avail.with(*day, AvailabilitySlot::parse(start, end).unwrap())
    })
}

fn roster() -> Roster {
    Roster::new(
        vec![
            Candidate {
                id: "c1".into(),
                name: "Alice Johnson".into(),
                availability: week(&[(Day::Monday, "09:00", "11:00")]),
            },
            Candidate {
                id: "c2".into(),
                name: "Bob Smith".into(),
                availability: week(&[(Day::Monday, "09:00", "11:00")]),
            },
        ],
        vec![
            Engineer {
                id: "e1".into(),
                name: "David Wilson".into(),
                role: "Senior Frontend Engineer".into(),
                availability: week(&[(Day::Monday, "09:00", "11:00")]),
            },
            Engineer {
                id: "e2".into(),
                name: "Emma Brown".into(),
                role: "Backend Engineer".into(),
                availability: week(&[(Day::Monday, "10:00", "12:00")]),
            },
        ],
    )
}

fn session() -> Scheduler {
    let mut s = Scheduler::new(roster(), SchedulerConfig::default()).unwrap();
    s.select_candidate("c1").unwrap();
    s.select_engineers(&["e1", "e2"]).unwrap();
    s
}

fn bookable_intent(decision: SlotDecision) -> slot_engine::BookingIntent {
    match decision {
        SlotDecision::Bookable { intent } => intent,
        other => panic!("expected Bookable, got {other:?}"),
    }
}

// ── Selection ───────────────────────────────────────────────────────────────

#[test]
fn unknown_ids_are_rejected() {
    let mut s = Scheduler::new(roster(), SchedulerConfig::default()).unwrap();
    assert!(matches!(s.select_candidate("nope"), Err(SchedulerError::UnknownCandidate(_))));
    assert!(matches!(
        s.select_engineers(&["e1", "nope"]),
        Err(SchedulerError::UnknownEngineer(_))
    ));
    assert!(s.selected_engineers().is_empty(), "failed selection leaves state untouched");
}

#[test]
fn duration_must_be_configured() {
    let mut s = session();
    assert_eq!(s.duration(), 30);
    s.set_duration(60).unwrap();
    assert!(matches!(s.set_duration(15), Err(SchedulerError::InvalidDuration(15))));
    assert_eq!(s.duration(), 60);
}

#[test]
fn invalid_config_refuses_to_start() {
    let config = SchedulerConfig {
        allowed_durations: vec![15, 30],
        ..SchedulerConfig::default()
    };
    assert!(matches!(
        Scheduler::new(roster(), config),
        Err(SchedulerError::InvalidConfig(_))
    ));
}

// ── Availability ────────────────────────────────────────────────────────────

#[test]
fn available_slots_without_candidate_is_empty() {
    let mut s = Scheduler::new(roster(), SchedulerConfig::default()).unwrap();
    s.select_engineers(&["e1"]).unwrap();
    assert!(s.available_slots().is_empty());
}

#[test]
fn available_slots_lists_engineer_ids() {
    let mut s = session();
    let slots = s.available_slots().clone();

    assert_eq!(slots[&SlotKey::new(Day::Monday, t("09:00"))], vec!["e1"]);
    assert_eq!(slots[&SlotKey::new(Day::Monday, t("10:30"))], vec!["e1", "e2"]);
    assert!(!slots.contains_key(&SlotKey::new(Day::Monday, t("11:00"))));
}

#[test]
fn memo_tracks_selection_changes() {
    let mut s = session();
    let before = s.available_slots().clone();
    assert_eq!(&before, s.available_slots(), "unchanged selection gives identical snapshot");

    s.select_engineers(&["e2"]).unwrap();
    let after = s.available_slots().clone();
    assert_ne!(before, after);
    assert!(!after.contains_key(&SlotKey::new(Day::Monday, t("09:00"))));
}

// ── Booking flow ────────────────────────────────────────────────────────────

#[test]
fn end_to_end_booking_then_rejection() {
    let mut s = session();

    let intent = bookable_intent(s.request_slot(Day::Monday, t("09:00"), "e1").unwrap());
    let stored = s.confirm(&intent, now()).unwrap();

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].start_time.to_string(), "09:00");
    assert_eq!(stored[0].duration, 30);
    assert_eq!(stored[0].status, BookingStatus::Confirmed);
    assert_eq!(s.ledger().len(), 1);

    // Same candidate/engineer/day/time again must fail.
    assert!(matches!(
        s.request_slot(Day::Monday, t("09:00"), "e1").unwrap(),
        SlotDecision::Unavailable
    ));
}

#[test]
fn double_confirm_is_rejected() {
    let mut s = session();
    let intent = bookable_intent(s.request_slot(Day::Monday, t("09:30"), "e1").unwrap());

    s.confirm(&intent, now()).unwrap();
    assert!(matches!(
        s.confirm(&intent, now()),
        Err(SchedulerError::SlotUnavailable { .. })
    ));
    assert_eq!(s.ledger().len(), 1);
}

#[test]
fn request_without_candidate_fails() {
    let mut s = session();
    s.clear_candidate();
    assert!(matches!(
        s.request_slot(Day::Monday, t("09:00"), "e1"),
        Err(SchedulerError::NoCandidateSelected)
    ));
}

#[test]
fn rejected_slot_suggests_thirty_minutes_earlier() {
    let mut s = session();
    s.set_duration(60).unwrap();

    // 10:30 + 60 runs past the 11:00 end; 10:00 fits.
    match s.request_slot(Day::Monday, t("10:30"), "e1").unwrap() {
        SlotDecision::SuggestEarlier { requested, suggested } => {
            assert_eq!(requested.start_time, t("10:30"));
            assert_eq!(suggested.start_time, t("10:00"));
            assert_eq!(suggested.duration, 60);
        }
        other => panic!("expected suggestion, got {other:?}"),
    }
}

#[test]
fn suggestion_never_precedes_opening_time() {
    let mut s = session();
    // Book 09:00-09:30 for the candidate with e1, then ask for 09:00 again.
    let intent = bookable_intent(s.request_slot(Day::Monday, t("09:00"), "e1").unwrap());
    s.confirm(&intent, now()).unwrap();

    assert_eq!(
        s.request_slot(Day::Monday, t("09:00"), "e1").unwrap(),
        SlotDecision::Unavailable
    );
}

#[test]
fn suggestion_can_be_disabled() {
    let config = SchedulerConfig {
        suggest_earlier: false,
        ..SchedulerConfig::default()
    };
    let mut s = Scheduler::new(roster(), config).unwrap();
    s.select_candidate("c1").unwrap();
    s.set_duration(60).unwrap();

    assert_eq!(
        s.request_slot(Day::Monday, t("10:30"), "e1").unwrap(),
        SlotDecision::Unavailable
    );
}

#[test]
fn click_picks_first_available_engineer() {
    let mut s = session();
    let first = bookable_intent(s.click_slot(Day::Monday, t("10:00")).unwrap());
    assert_eq!(first.engineer_id, "e1");

    // Book c2 with e1 at 10:00 so e1 shows as booked in that cell.
    let mut other = first.clone();
    other.candidate_id = "c2".into();
    s.confirm(&other, now()).unwrap();

    // c1 can still take e2 at 10:00.
    let second = bookable_intent(s.click_slot(Day::Monday, t("10:00")).unwrap());
    assert_eq!(second.engineer_id, "e2");
}

#[test]
fn longer_booking_blocks_its_second_half() {
    let mut s = session();
    s.set_duration(60).unwrap();
    let intent = bookable_intent(s.request_slot(Day::Monday, t("09:00"), "e1").unwrap());
    let stored = s.confirm(&intent, now()).unwrap();
    assert_eq!(stored.len(), 2);

    s.set_duration(30).unwrap();
    s.select_candidate("c2").unwrap();
    assert_eq!(
        s.request_slot(Day::Monday, t("09:30"), "e1").unwrap(),
        SlotDecision::Unavailable
    );
}

#[test]
fn slot_after_longer_booking_stays_bookable() {
    let mut s = session();
    s.set_duration(60).unwrap();
    let intent = bookable_intent(s.request_slot(Day::Monday, t("09:00"), "e1").unwrap());
    s.confirm(&intent, now()).unwrap();

    s.set_duration(30).unwrap();
    s.select_candidate("c2").unwrap();
    let next = bookable_intent(s.request_slot(Day::Monday, t("10:00"), "e1").unwrap());
    assert_eq!(next.start_time, t("10:00"));
    assert_eq!(s.confirm(&next, now()).unwrap().len(), 1);
}

#[test]
fn cancel_releases_the_booking() {
    let mut s = session();
    let intent = bookable_intent(s.request_slot(Day::Monday, t("09:00"), "e1").unwrap());
    let stored = s.confirm(&intent, now()).unwrap();

    s.cancel(stored[0].group).unwrap();
    assert!(matches!(
        s.request_slot(Day::Monday, t("09:00"), "e1").unwrap(),
        SlotDecision::Bookable { .. }
    ));
}

#[test]
fn loaded_ledger_is_consulted() {
    let mut other = session();
    let intent = bookable_intent(other.request_slot(Day::Monday, t("09:00"), "e1").unwrap());
    other.confirm(&intent, now()).unwrap();
    let ledger = BookingLedger::from_records(other.into_ledger().into_records());

    let mut s = Scheduler::new(roster(), SchedulerConfig::default())
        .unwrap()
        .with_ledger(ledger);
    s.select_candidate("c1").unwrap();
    assert_eq!(
        s.request_slot(Day::Monday, t("09:00"), "e1").unwrap(),
        SlotDecision::Unavailable
    );
}

// ── Cell views ──────────────────────────────────────────────────────────────

#[test]
fn slot_view_marks_booked_engineers() {
    let mut s = session();
    let mut intent = bookable_intent(s.request_slot(Day::Monday, t("10:00"), "e1").unwrap());
    intent.candidate_id = "c2".into();
    s.confirm(&intent, now()).unwrap();

    let view = s.slot_view(Day::Monday, t("10:00"));
    assert!(view.is_booked);
    assert!(!view.is_fully_booked);
    assert_eq!(view.engineers.len(), 2);
    assert_eq!(view.engineers[0].engineer_id, "e1");
    assert_eq!(view.engineers[0].status, BadgeStatus::Booked);
    assert!(view.engineers[0].booking.is_some());
    assert_eq!(view.engineers[1].status, BadgeStatus::Available);
}

#[test]
fn slot_view_fully_booked_when_every_engineer_is() {
    let mut s = session();
    s.select_engineers(&["e1"]).unwrap();
    let intent = bookable_intent(s.request_slot(Day::Monday, t("09:00"), "e1").unwrap());
    s.confirm(&intent, now()).unwrap();

    let view = s.slot_view(Day::Monday, t("09:00"));
    assert!(view.is_fully_booked);
    assert!(!s.slot_view(Day::Monday, t("09:30")).is_fully_booked);
}

#[test]
fn booked_only_view_lists_bookings_from_whole_roster() {
    let mut s = session();
    let intent = bookable_intent(s.request_slot(Day::Monday, t("10:00"), "e2").unwrap());
    s.confirm(&intent, now()).unwrap();

    // Narrow the filter to e1; the booked-only view still shows e2's booking.
    s.select_engineers(&["e1"]).unwrap();
    s.set_view(ViewSettings { show_booked_only: true });

    let view = s.slot_view(Day::Monday, t("10:00"));
    assert_eq!(view.engineers.len(), 1);
    assert_eq!(view.engineers[0].engineer_id, "e2");
    assert_eq!(view.engineers[0].status, BadgeStatus::Booked);

    assert!(s.slot_view(Day::Monday, t("09:00")).engineers.is_empty());
}

#[test]
fn empty_cell_has_no_engineers() {
    let mut s = session();
    let view = s.slot_view(Day::Tuesday, t("09:00"));
    assert!(view.engineers.is_empty());
    assert!(!view.is_fully_booked);
    assert!(!view.is_booked);
}
