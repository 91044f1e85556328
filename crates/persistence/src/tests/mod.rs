// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod account_tests;

use crate::SqlitePersistence;
use nobet_domain::{Cohort, Profile, Role, Shift};
use time::macros::date;

pub const NOW: &str = "2026-03-01T10:00:00Z";
pub const LATER: &str = "2026-03-01T11:00:00Z";

pub fn store() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

/// Creates an account plus profile and returns the account ID.
pub fn registered_account(store: &mut SqlitePersistence, email: &str, student_number: &str) -> i64 {
    let account_id = store.create_account(email, "hunter2-secret", NOW).unwrap();
    let profile = Profile::new(
        account_id,
        format!("Intern {student_number}"),
        String::from("+905550000000"),
        student_number.to_string(),
        String::from("Ege Üniversitesi"),
        Cohort::Tr,
        Role::Doctor,
        NOW.to_string(),
    );
    store.insert_profile(&profile).unwrap();
    account_id
}

/// A listable shift fixture owned by `seller_id`.
pub fn sample_shift(seller_id: i64) -> Shift {
    Shift::new(
        String::from("Acil servis gece nöbeti"),
        String::from("16 saat, devir dahil"),
        1500,
        date!(2026 - 04 - 12),
        None,
        Some(String::from("16 saat")),
        Some(String::from("Acil")),
        seller_id,
        NOW.to_string(),
    )
}
