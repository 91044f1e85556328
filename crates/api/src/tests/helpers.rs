// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures: an isolated store, a small fixed roster, and
//! pre-registered accounts.

use std::collections::HashMap;

use nobet_domain::{Cohort, Profile, Role};
use nobet_persistence::SqlitePersistence;
use nobet_roster::StudentRoster;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::request_response::{CreateShiftRequest, SignUpRequest};
use crate::{handlers, sign_up};

pub const TR_NUMBER: &str = "2021010001";
pub const TR_NAME: &str = "Ayşe Yılmaz";
pub const TR_NUMBER_2: &str = "2021010002";
pub const TR_NAME_2: &str = "Mehmet Demir";
pub const TR_NUMBER_3: &str = "2021010003";
pub const TR_NAME_3: &str = "Zeynep Kaya";
pub const EN_NUMBER: &str = "2022020001";
pub const EN_NAME: &str = "John Carter";

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-01 10:00:00 UTC)
}

pub fn later() -> OffsetDateTime {
    datetime!(2026-03-01 11:00:00 UTC)
}

pub fn store() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

pub fn roster() -> StudentRoster {
    let tr: HashMap<String, String> = [
        (TR_NUMBER, TR_NAME),
        (TR_NUMBER_2, TR_NAME_2),
        (TR_NUMBER_3, TR_NAME_3),
    ]
    .iter()
    .map(|(n, name)| ((*n).to_string(), (*name).to_string()))
    .collect();
    let en: HashMap<String, String> = [(EN_NUMBER.to_string(), EN_NAME.to_string())]
        .into_iter()
        .collect();
    StudentRoster::from_tables(tr, en)
}

pub fn sign_up_request(student_number: &str, full_name: &str, email: &str) -> SignUpRequest {
    SignUpRequest {
        email: email.to_string(),
        password: String::from("hunter2-secret"),
        full_name: full_name.to_string(),
        phone_number: String::from("+905550000000"),
        student_number: student_number.to_string(),
        university: String::from("Ege Üniversitesi"),
    }
}

/// Registers an account through the full sign-up path and returns its
/// account ID and session token.
pub fn registered(
    persistence: &mut SqlitePersistence,
    roster: &StudentRoster,
    student_number: &str,
    full_name: &str,
    email: &str,
) -> (i64, String) {
    let response = sign_up(
        persistence,
        roster,
        &sign_up_request(student_number, full_name, email),
        false,
        now(),
    )
    .unwrap();
    (response.account_id, response.session_token.unwrap())
}

/// Provisions an administrator account directly, the way operations
/// would: the sign-up path only ever creates doctors.
pub fn admin(persistence: &mut SqlitePersistence) -> Profile {
    let created_at = "2026-03-01T10:00:00Z";
    let account_id = persistence
        .create_account("admin@example.com", "hunter2-secret", created_at)
        .unwrap();
    let profile = Profile::new(
        account_id,
        String::from("Nöbet Yönetici"),
        String::from("+905550000001"),
        String::from("2021999999"),
        String::from("Ege Üniversitesi"),
        Cohort::Tr,
        Role::Admin,
        created_at.to_string(),
    );
    persistence.insert_profile(&profile).unwrap();
    persistence
        .get_profile_by_account(account_id)
        .unwrap()
        .unwrap()
}

pub fn listing_request() -> CreateShiftRequest {
    CreateShiftRequest {
        title: String::from("Acil servis gece nöbeti"),
        description: String::from("16 saat, devir dahil"),
        price: 1500,
        shift_date: String::from("2026-04-12"),
        shift_time: Some(String::from("20:00:00")),
        duration: Some(String::from("16 saat")),
        medical_field: Some(String::from("Acil")),
    }
}

/// Creates a listing owned by `seller_id` and returns its shift ID.
pub fn listed_shift(persistence: &mut SqlitePersistence, seller_id: i64) -> i64 {
    handlers::create_shift(persistence, seller_id, &listing_request(), now())
        .unwrap()
        .shift_id
}
