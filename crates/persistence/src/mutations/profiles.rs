// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Profile mutations.

use diesel::prelude::*;
use nobet_domain::Profile;
use tracing::debug;

use crate::data_models::NewProfile;
use crate::diesel_schema::profiles;
use crate::error::{PersistenceError, classify_insert_error};
use crate::sqlite::get_last_insert_rowid;

/// Inserts a profile for an account.
///
/// # Errors
///
/// Returns [`PersistenceError::UniqueViolation`] when the insert hits
/// the UNIQUE index on `account_id` or `student_number`, and
/// [`PersistenceError::QueryFailed`] for any other failure.
pub fn insert_profile(
    conn: &mut SqliteConnection,
    profile: &Profile,
) -> Result<i64, PersistenceError> {
    debug!("Inserting profile for account: {}", profile.account_id);

    let new_profile = NewProfile {
        account_id: profile.account_id,
        full_name: &profile.full_name,
        phone_number: &profile.phone_number,
        student_number: &profile.student_number,
        university: &profile.university,
        cohort: profile.cohort.as_str(),
        role: profile.role.as_str(),
        phone_verified: i32::from(profile.phone_verified),
        created_at: &profile.created_at,
        updated_at: &profile.updated_at,
    };

    diesel::insert_into(profiles::table)
        .values(&new_profile)
        .execute(conn)
        .map_err(|e| classify_insert_error("insert_profile", e))?;

    get_last_insert_rowid(conn)
}

/// Updates a profile's mutable contact fields.
///
/// Identity fields (full name, student number, cohort, role) are fixed at
/// registration and cannot be changed here.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_profile_contact(
    conn: &mut SqliteConnection,
    account_id: i64,
    phone_number: &str,
    university: &str,
    now: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(profiles::table.filter(profiles::account_id.eq(account_id)))
        .set((
            profiles::phone_number.eq(phone_number),
            profiles::university.eq(university),
            profiles::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_profile_contact: {e}")))
}

/// Marks a profile's phone number as verified.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_phone_verified(
    conn: &mut SqliteConnection,
    account_id: i64,
    now: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(profiles::table.filter(profiles::account_id.eq(account_id)))
        .set((
            profiles::phone_verified.eq(1),
            profiles::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("mark_phone_verified: {e}")))
}
