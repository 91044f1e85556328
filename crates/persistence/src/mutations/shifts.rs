// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift listing mutations.
//!
//! Lifecycle transitions are single conditional `UPDATE`s that name the
//! required current status in their `WHERE` clause. Under concurrent
//! access the database serializes the statements and exactly one caller
//! observes an affected-row count of 1; everyone else gets 0 and must
//! re-read the row to classify the refusal.

use diesel::prelude::*;
use nobet_domain::{Shift, ShiftStatus};
use time::Date;
use tracing::debug;

use crate::data_models::{NewDeletedShift, NewShift, format_date, format_time};
use crate::diesel_schema::{deleted_shifts, shifts};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new shift listing.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_shift(conn: &mut SqliteConnection, shift: &Shift) -> Result<i64, PersistenceError> {
    debug!("Inserting shift for seller: {}", shift.seller_id);

    let shift_date = format_date(shift.shift_date)?;
    let shift_time = shift.shift_time.map(format_time).transpose()?;

    let new_shift = NewShift {
        title: &shift.title,
        description: &shift.description,
        price: shift.price,
        shift_date,
        shift_time,
        duration: shift.duration.as_deref(),
        medical_field: shift.medical_field.as_deref(),
        status: shift.status.as_str(),
        seller_id: shift.seller_id,
        buyer_id: shift.buyer_id,
        created_at: &shift.created_at,
        updated_at: &shift.updated_at,
    };

    diesel::insert_into(shifts::table)
        .values(&new_shift)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_shift: {e}")))?;

    get_last_insert_rowid(conn)
}

/// Updates a listing's editable fields while it is still `available`.
///
/// Returns the affected-row count: 0 means the shift no longer exists or
/// has left the `available` state since the caller last read it.
///
/// # Errors
///
/// Returns an error if the update fails.
#[allow(clippy::too_many_arguments)]
pub fn update_shift_listing(
    conn: &mut SqliteConnection,
    shift_id: i64,
    title: &str,
    description: &str,
    price: i64,
    shift_date: Date,
    shift_time: Option<time::Time>,
    duration: Option<&str>,
    medical_field: Option<&str>,
    now: &str,
) -> Result<usize, PersistenceError> {
    let date_text = format_date(shift_date)?;
    let time_text = shift_time.map(format_time).transpose()?;

    diesel::update(
        shifts::table
            .filter(shifts::shift_id.eq(shift_id))
            .filter(shifts::status.eq(ShiftStatus::Available.as_str())),
    )
    .set((
        shifts::title.eq(title),
        shifts::description.eq(description),
        shifts::price.eq(price),
        shifts::shift_date.eq(date_text),
        shifts::shift_time.eq(time_text),
        shifts::duration.eq(duration),
        shifts::medical_field.eq(medical_field),
        shifts::updated_at.eq(now),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("update_shift_listing: {e}")))
}

/// Claims an `available` shift for a buyer, moving it to `pending`.
///
/// The `WHERE` clause excludes the seller's own listings, so a seller can
/// never purchase from themselves even under races. Returns the
/// affected-row count; 0 means the claim lost or was never eligible.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn purchase_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
    buyer_id: i64,
    now: &str,
) -> Result<usize, PersistenceError> {
    debug!("Purchase attempt on shift {} by {}", shift_id, buyer_id);

    diesel::update(
        shifts::table
            .filter(shifts::shift_id.eq(shift_id))
            .filter(shifts::status.eq(ShiftStatus::Available.as_str()))
            .filter(shifts::seller_id.ne(buyer_id)),
    )
    .set((
        shifts::buyer_id.eq(buyer_id),
        shifts::status.eq(ShiftStatus::Pending.as_str()),
        shifts::updated_at.eq(now),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("purchase_shift: {e}")))
}

/// Moves a `pending` shift to `completed`.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn complete_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
    now: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(
        shifts::table
            .filter(shifts::shift_id.eq(shift_id))
            .filter(shifts::status.eq(ShiftStatus::Pending.as_str())),
    )
    .set((
        shifts::status.eq(ShiftStatus::Completed.as_str()),
        shifts::updated_at.eq(now),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("complete_shift: {e}")))
}

/// Moves a `pending` shift to `cancelled`.
///
/// The buyer reference is kept for history.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn cancel_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
    now: &str,
) -> Result<usize, PersistenceError> {
    diesel::update(
        shifts::table
            .filter(shifts::shift_id.eq(shift_id))
            .filter(shifts::status.eq(ShiftStatus::Pending.as_str())),
    )
    .set((
        shifts::status.eq(ShiftStatus::Cancelled.as_str()),
        shifts::updated_at.eq(now),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("cancel_shift: {e}")))
}

/// Hard-deletes a shift. Messages cascade.
///
/// This is the seller's own delete; administrator deletion goes through
/// [`archive_shift`] instead.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_shift(conn: &mut SqliteConnection, shift_id: i64) -> Result<usize, PersistenceError> {
    debug!("Deleting shift: {}", shift_id);

    diesel::delete(shifts::table.filter(shifts::shift_id.eq(shift_id)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_shift: {e}")))
}

/// Administrator deletion: snapshots the shift into `deleted_shifts` and
/// removes it from `shifts`, atomically.
///
/// Returns the ID of the snapshot row.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the shift does not exist, or
/// a database error if the transaction fails.
pub fn archive_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
    deleted_by: i64,
    deletion_reason: Option<&str>,
    now: &str,
) -> Result<i64, PersistenceError> {
    debug!("Archiving shift {} (deleted by {})", shift_id, deleted_by);

    conn.transaction(|conn| {
        let row: crate::data_models::ShiftRow = shifts::table
            .filter(shifts::shift_id.eq(shift_id))
            .select(crate::data_models::ShiftRow::as_select())
            .first(conn)
            .optional()
            .map_err(|e| PersistenceError::QueryFailed(format!("archive_shift: {e}")))?
            .ok_or_else(|| PersistenceError::NotFound(format!("shift {shift_id}")))?;

        let snapshot = NewDeletedShift {
            original_shift_id: row.shift_id,
            title: &row.title,
            description: &row.description,
            price: row.price,
            shift_date: &row.shift_date,
            shift_time: row.shift_time.as_deref(),
            duration: row.duration.as_deref(),
            medical_field: row.medical_field.as_deref(),
            status: &row.status,
            seller_id: row.seller_id,
            buyer_id: row.buyer_id,
            deleted_by,
            deleted_at: now,
            deletion_reason,
            original_created_at: &row.created_at,
        };

        diesel::insert_into(deleted_shifts::table)
            .values(&snapshot)
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("archive_shift insert: {e}")))?;

        let snapshot_id = get_last_insert_rowid(conn)?;

        diesel::delete(shifts::table.filter(shifts::shift_id.eq(shift_id)))
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("archive_shift delete: {e}")))?;

        Ok(snapshot_id)
    })
}

/// Permanently erases a snapshot from the deleted-listing log.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn purge_deleted_shift(
    conn: &mut SqliteConnection,
    deleted_shift_id: i64,
) -> Result<usize, PersistenceError> {
    debug!("Purging deleted-shift snapshot: {}", deleted_shift_id);

    diesel::delete(
        deleted_shifts::table.filter(deleted_shifts::deleted_shift_id.eq(deleted_shift_id)),
    )
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("purge_deleted_shift: {e}")))
}
