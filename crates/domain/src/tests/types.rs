// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use crate::{Cohort, DomainError, Role, ShiftStatus};
use std::str::FromStr;

#[test]
fn shift_status_round_trips_through_strings() {
    for status in [
        ShiftStatus::Available,
        ShiftStatus::Pending,
        ShiftStatus::Completed,
        ShiftStatus::Cancelled,
    ] {
        assert_eq!(ShiftStatus::from_str(status.as_str()).unwrap(), status);
    }
}

#[test]
fn shift_status_rejects_unknown_strings() {
    let err = ShiftStatus::from_str("sold").unwrap_err();
    assert!(matches!(err, DomainError::InvalidStatus(_)));
}

#[test]
fn available_transitions_only_to_pending() {
    let from = ShiftStatus::Available;
    assert!(from.can_transition_to(ShiftStatus::Pending));
    assert!(!from.can_transition_to(ShiftStatus::Completed));
    assert!(!from.can_transition_to(ShiftStatus::Cancelled));
    assert!(!from.can_transition_to(ShiftStatus::Available));
}

#[test]
fn pending_transitions_to_completed_or_cancelled() {
    let from = ShiftStatus::Pending;
    assert!(from.can_transition_to(ShiftStatus::Completed));
    assert!(from.can_transition_to(ShiftStatus::Cancelled));
    assert!(!from.can_transition_to(ShiftStatus::Available));
}

#[test]
fn terminal_statuses_admit_no_transitions() {
    for from in [ShiftStatus::Completed, ShiftStatus::Cancelled] {
        assert!(from.is_terminal());
        for to in [
            ShiftStatus::Available,
            ShiftStatus::Pending,
            ShiftStatus::Completed,
            ShiftStatus::Cancelled,
        ] {
            assert!(!from.can_transition_to(to));
        }
    }
}

#[test]
fn role_defaults_to_doctor() {
    assert_eq!(Role::default(), Role::Doctor);
    assert!(!Role::Doctor.is_admin());
    assert!(Role::Admin.is_admin());
}

#[test]
fn cohort_parses_both_tracks() {
    assert_eq!(Cohort::from_str("tr").unwrap(), Cohort::Tr);
    assert_eq!(Cohort::from_str("en").unwrap(), Cohort::En);
    assert!(Cohort::from_str("de").is_err());
}

#[test]
fn counterparty_resolves_both_directions() {
    let shift = crate::Shift {
        shift_id: Some(1),
        title: String::from("Acil nöbeti"),
        description: String::new(),
        price: 500,
        shift_date: time::macros::date!(2026 - 09 - 12),
        shift_time: None,
        duration: None,
        medical_field: None,
        status: ShiftStatus::Pending,
        seller_id: 10,
        buyer_id: Some(20),
        created_at: String::from("2026-08-01T00:00:00Z"),
        updated_at: String::from("2026-08-01T00:00:00Z"),
    };
    assert_eq!(shift.counterparty(10), Some(20));
    assert_eq!(shift.counterparty(20), Some(10));
    assert_eq!(shift.counterparty(30), None);
    assert!(shift.is_participant(10));
    assert!(shift.is_participant(20));
    assert!(!shift.is_participant(30));
}
