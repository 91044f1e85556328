// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Message queries.

use diesel::prelude::*;
use nobet_domain::Message;
use tracing::debug;

use crate::data_models::MessageRow;
use crate::diesel_schema::messages;
use crate::error::PersistenceError;

/// Lists a shift's conversation in chronological order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn messages_for_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<Vec<Message>, PersistenceError> {
    debug!("Loading conversation for shift: {}", shift_id);

    let rows: Vec<MessageRow> = messages::table
        .filter(messages::shift_id.eq(shift_id))
        .order(messages::created_at.asc())
        .select(MessageRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("messages_for_shift: {e}")))?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Counts `receiver_id`'s unread messages on one shift.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn unread_count(
    conn: &mut SqliteConnection,
    shift_id: i64,
    receiver_id: i64,
) -> Result<i64, PersistenceError> {
    messages::table
        .filter(messages::shift_id.eq(shift_id))
        .filter(messages::receiver_id.eq(receiver_id))
        .filter(messages::read_at.is_null())
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("unread_count: {e}")))
}

/// Counts `receiver_id`'s unread messages across all shifts.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn unread_total(
    conn: &mut SqliteConnection,
    receiver_id: i64,
) -> Result<i64, PersistenceError> {
    messages::table
        .filter(messages::receiver_id.eq(receiver_id))
        .filter(messages::read_at.is_null())
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("unread_total: {e}")))
}

/// Retrieves the most recent message on a shift, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn last_message_for_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<Option<Message>, PersistenceError> {
    let result: Result<MessageRow, diesel::result::Error> = messages::table
        .filter(messages::shift_id.eq(shift_id))
        .order(messages::created_at.desc())
        .select(MessageRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
