// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use crate::{can_send_message, days_until, message_window_closes_at};
use time::macros::{date, datetime};

#[test]
fn window_open_during_shift_day() {
    let shift_date = date!(2026 - 09 - 12);
    let now = datetime!(2026 - 09 - 12 23:59:00 UTC);
    assert!(can_send_message(shift_date, now).unwrap());
}

#[test]
fn window_open_before_shift_day() {
    let shift_date = date!(2026 - 09 - 12);
    let now = datetime!(2026 - 08 - 25 10:00:00 UTC);
    assert!(can_send_message(shift_date, now).unwrap());
}

#[test]
fn window_boundary_is_midnight_of_following_day_inclusive() {
    let shift_date = date!(2026 - 09 - 12);
    assert!(can_send_message(shift_date, datetime!(2026 - 09 - 13 00:00:00 UTC)).unwrap());
    assert!(!can_send_message(shift_date, datetime!(2026 - 09 - 13 00:00:01 UTC)).unwrap());
}

#[test]
fn window_closed_well_after_shift() {
    let shift_date = date!(2026 - 09 - 12);
    let now = datetime!(2026 - 09 - 20 12:00:00 UTC);
    assert!(!can_send_message(shift_date, now).unwrap());
}

#[test]
fn closing_instant_ignores_shift_time_of_day() {
    let closes = message_window_closes_at(date!(2026 - 09 - 12)).unwrap();
    assert_eq!(closes, datetime!(2026 - 09 - 13 00:00:00 UTC));
}

#[test]
fn days_until_counts_signed_calendar_days() {
    let today = date!(2026 - 08 - 25);
    assert_eq!(days_until(date!(2026 - 08 - 25), today), 0);
    assert_eq!(days_until(date!(2026 - 08 - 26), today), 1);
    assert_eq!(days_until(date!(2026 - 09 - 01), today), 7);
    assert_eq!(days_until(date!(2026 - 08 - 20), today), -5);
}
