// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Profile queries.

use diesel::prelude::*;
use nobet_domain::Profile;
use tracing::debug;

use crate::data_models::ProfileRow;
use crate::diesel_schema::profiles;
use crate::error::PersistenceError;

/// Retrieves the profile attached to an account.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is
/// invalid. Returns `Ok(None)` if the account has no profile.
pub fn get_profile_by_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<Profile>, PersistenceError> {
    debug!("Looking up profile for account: {}", account_id);

    let result: Result<ProfileRow, diesel::result::Error> = profiles::table
        .filter(profiles::account_id.eq(account_id))
        .select(ProfileRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_domain()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a profile by student number.
///
/// Used as the duplicate-registration pre-check; the UNIQUE index on
/// `student_number` remains the final arbiter.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is
/// invalid. Returns `Ok(None)` if no profile holds the number.
pub fn get_profile_by_student_number(
    conn: &mut SqliteConnection,
    student_number: &str,
) -> Result<Option<Profile>, PersistenceError> {
    debug!("Looking up profile by student number");

    let result: Result<ProfileRow, diesel::result::Error> = profiles::table
        .filter(profiles::student_number.eq(student_number))
        .select(ProfileRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_domain()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
