// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift listing queries.

use diesel::prelude::*;
use nobet_domain::{DeletedShift, Shift, ShiftStatus};
use tracing::debug;

use crate::data_models::{DeletedShiftRow, ShiftRow};
use crate::diesel_schema::{deleted_shifts, shifts};
use crate::error::PersistenceError;

fn rows_into_domain(rows: Vec<ShiftRow>) -> Result<Vec<Shift>, PersistenceError> {
    rows.into_iter().map(ShiftRow::into_domain).collect()
}

/// Retrieves a shift by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is
/// invalid. Returns `Ok(None)` if the shift does not exist.
pub fn get_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<Option<Shift>, PersistenceError> {
    debug!("Looking up shift: {}", shift_id);

    let result: Result<ShiftRow, diesel::result::Error> = shifts::table
        .filter(shifts::shift_id.eq(shift_id))
        .select(ShiftRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_domain()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists `available` shifts for the marketplace, newest first, optionally
/// filtered by medical specialty.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is
/// invalid.
pub fn list_available_shifts(
    conn: &mut SqliteConnection,
    medical_field: Option<&str>,
) -> Result<Vec<Shift>, PersistenceError> {
    let mut query = shifts::table
        .filter(shifts::status.eq(ShiftStatus::Available.as_str()))
        .into_boxed();

    if let Some(field) = medical_field {
        query = query.filter(shifts::medical_field.eq(field));
    }

    let rows: Vec<ShiftRow> = query
        .order(shifts::created_at.desc())
        .select(ShiftRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_available_shifts: {e}")))?;

    rows_into_domain(rows)
}

/// Lists every shift a seller has listed, newest first, in any state.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is
/// invalid.
pub fn list_shifts_by_seller(
    conn: &mut SqliteConnection,
    seller_id: i64,
) -> Result<Vec<Shift>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::seller_id.eq(seller_id))
        .order(shifts::created_at.desc())
        .select(ShiftRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_shifts_by_seller: {e}")))?;

    rows_into_domain(rows)
}

/// Lists every shift an account has bought or committed to buy, most
/// recently updated first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is
/// invalid.
pub fn list_shifts_by_buyer(
    conn: &mut SqliteConnection,
    buyer_id: i64,
) -> Result<Vec<Shift>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::buyer_id.eq(buyer_id))
        .order(shifts::updated_at.desc())
        .select(ShiftRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_shifts_by_buyer: {e}")))?;

    rows_into_domain(rows)
}

/// Lists a seller's shifts that have (or had) a buyer, most recently
/// updated first. This is the sales side of the trade history.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is
/// invalid.
pub fn list_sales_history(
    conn: &mut SqliteConnection,
    seller_id: i64,
) -> Result<Vec<Shift>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::seller_id.eq(seller_id))
        .filter(shifts::buyer_id.is_not_null())
        .order(shifts::updated_at.desc())
        .select(ShiftRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_sales_history: {e}")))?;

    rows_into_domain(rows)
}

/// Lists every shift an account participates in, as seller or buyer,
/// most recently updated first. Feeds the conversation overview.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is
/// invalid.
pub fn list_participant_shifts(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Vec<Shift>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .filter(
            shifts::seller_id
                .eq(account_id)
                .or(shifts::buyer_id.eq(account_id)),
        )
        .order(shifts::updated_at.desc())
        .select(ShiftRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_participant_shifts: {e}")))?;

    rows_into_domain(rows)
}

/// Lists the deleted-listing log, newest deletion first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is
/// invalid.
pub fn list_deleted_shifts(
    conn: &mut SqliteConnection,
) -> Result<Vec<DeletedShift>, PersistenceError> {
    debug!("Listing deleted-shift snapshots");

    let rows: Vec<DeletedShiftRow> = deleted_shifts::table
        .order(deleted_shifts::deleted_at.desc())
        .select(DeletedShiftRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_deleted_shifts: {e}")))?;

    rows.into_iter().map(DeletedShiftRow::into_domain).collect()
}
