// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account mutations.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::NewAccount;
use crate::diesel_schema::accounts;
use crate::error::{PersistenceError, classify_insert_error};
use crate::sqlite::get_last_insert_rowid;

/// Creates a new account with a bcrypt-hashed password.
///
/// # Errors
///
/// Returns [`PersistenceError::UniqueViolation`] when the email is
/// already registered, and another error if hashing or the insert fails.
pub fn create_account(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    now: &str,
) -> Result<i64, PersistenceError> {
    debug!("Creating account for email: {}", email);

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let new_account = NewAccount {
        email,
        password_hash: &password_hash,
        email_verified: 0,
        created_at: now,
    };

    diesel::insert_into(accounts::table)
        .values(&new_account)
        .execute(conn)
        .map_err(|e| classify_insert_error("create_account", e))?;

    get_last_insert_rowid(conn)
}

/// Deletes an account. Sessions and the profile cascade.
///
/// Used to roll back a registration whose profile insert failed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_account(conn: &mut SqliteConnection, account_id: i64) -> Result<usize, PersistenceError> {
    debug!("Deleting account: {}", account_id);

    diesel::delete(accounts::table.filter(accounts::account_id.eq(account_id)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_account: {e}")))
}

/// Marks an account's email address as verified.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_email_verified(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<usize, PersistenceError> {
    diesel::update(accounts::table.filter(accounts::account_id.eq(account_id)))
        .set(accounts::email_verified.eq(1))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("mark_email_verified: {e}")))
}
