// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Message mutations.

use diesel::prelude::*;
use nobet_domain::Message;
use tracing::debug;

use crate::data_models::NewMessage;
use crate::diesel_schema::messages;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a message into a shift conversation.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_message(
    conn: &mut SqliteConnection,
    message: &Message,
) -> Result<i64, PersistenceError> {
    debug!(
        "Inserting message on shift {} from {}",
        message.shift_id, message.sender_id
    );

    let new_message = NewMessage {
        shift_id: message.shift_id,
        sender_id: message.sender_id,
        receiver_id: message.receiver_id,
        content: &message.content,
        created_at: &message.created_at,
        read_at: message.read_at.as_deref(),
    };

    diesel::insert_into(messages::table)
        .values(&new_message)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_message: {e}")))?;

    get_last_insert_rowid(conn)
}

/// Marks all of `receiver_id`'s unread messages on a shift as read.
///
/// Read-repair performed when the receiver opens the conversation.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_messages_read(
    conn: &mut SqliteConnection,
    shift_id: i64,
    receiver_id: i64,
    now: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(
        messages::table
            .filter(messages::shift_id.eq(shift_id))
            .filter(messages::receiver_id.eq(receiver_id))
            .filter(messages::read_at.is_null()),
    )
    .set(messages::read_at.eq(now))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("mark_messages_read: {e}")))
}
