// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutations.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::NewSession;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new session for an account.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    account_id: i64,
    now: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!("Creating session for account: {}", account_id);

    let new_session = NewSession {
        session_token,
        account_id,
        created_at: now,
        expires_at,
        last_activity_at: now,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("create_session: {e}")))?;

    get_last_insert_rowid(conn)
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
    now: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(sessions::table.filter(sessions::session_id.eq(session_id)))
        .set(sessions::last_activity_at.eq(now))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_session_activity: {e}")))
}

/// Deletes a session by token.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<usize, PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_session: {e}")))
}

/// Deletes all sessions belonging to an account.
///
/// Used when an account is found to have no profile at sign-in.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_sessions_for_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<usize, PersistenceError> {
    debug!("Deleting all sessions for account: {}", account_id);

    diesel::delete(sessions::table.filter(sessions::account_id.eq(account_id)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_sessions_for_account: {e}")))
}

/// Deletes all sessions whose expiry is at or before `now`.
///
/// Timestamps are ISO 8601 UTC text, so lexicographic comparison matches
/// chronological order.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_expired_sessions: {e}")))
}
