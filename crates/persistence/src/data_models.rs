// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between stored rows and domain types.
//!
//! Dates and clock times are stored as ISO 8601 text (`YYYY-MM-DD` and
//! `HH:MM:SS`). Conversions fail fast: a row that does not parse is
//! reported as [`PersistenceError::InvalidRow`] rather than silently
//! coerced.

use diesel::prelude::*;
use nobet_domain::{DeletedShift, Message, Profile, Shift};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

use crate::diesel_schema::{accounts, deleted_shifts, messages, profiles, sessions, shifts};
use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");

/// Formats a calendar date for storage.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidRow(format!("format_date: {e}")))
}

/// Parses a stored calendar date.
///
/// # Errors
///
/// Returns an error if the stored text is not `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, &DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidRow(format!("parse_date {value:?}: {e}")))
}

/// Formats a clock time for storage.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_time(time: Time) -> Result<String, PersistenceError> {
    time.format(&TIME_FORMAT)
        .map_err(|e| PersistenceError::InvalidRow(format!("format_time: {e}")))
}

/// Parses a stored clock time.
///
/// # Errors
///
/// Returns an error if the stored text is not `HH:MM:SS`.
pub fn parse_time(value: &str) -> Result<Time, PersistenceError> {
    Time::parse(value, &TIME_FORMAT)
        .map_err(|e| PersistenceError::InvalidRow(format!("parse_time {value:?}: {e}")))
}

/// Account credential record. Accounts are the auth principal; the
/// user-facing identity lives in `profiles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub account_id: i64,
    pub email: String,
    pub password_hash: String,
    pub email_verified: bool,
    pub created_at: String,
}

/// Session record attached to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub account_id: i64,
    pub created_at: String,
    pub expires_at: String,
    pub last_activity_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = accounts)]
pub(crate) struct AccountRow {
    pub account_id: i64,
    pub email: String,
    pub password_hash: String,
    pub email_verified: i32,
    pub created_at: String,
}

impl From<AccountRow> for AccountData {
    fn from(row: AccountRow) -> Self {
        Self {
            account_id: row.account_id,
            email: row.email,
            password_hash: row.password_hash,
            email_verified: row.email_verified != 0,
            created_at: row.created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccount<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub email_verified: i32,
    pub created_at: &'a str,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
pub(crate) struct SessionRow {
    pub session_id: i64,
    pub session_token: String,
    pub account_id: i64,
    pub created_at: String,
    pub expires_at: String,
    pub last_activity_at: String,
}

impl From<SessionRow> for SessionData {
    fn from(row: SessionRow) -> Self {
        Self {
            session_id: row.session_id,
            session_token: row.session_token,
            account_id: row.account_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
            last_activity_at: row.last_activity_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = sessions)]
pub(crate) struct NewSession<'a> {
    pub session_token: &'a str,
    pub account_id: i64,
    pub created_at: &'a str,
    pub expires_at: &'a str,
    pub last_activity_at: &'a str,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileRow {
    pub profile_id: i64,
    pub account_id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub student_number: String,
    pub university: String,
    pub cohort: String,
    pub role: String,
    pub phone_verified: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl ProfileRow {
    pub(crate) fn into_domain(self) -> Result<Profile, PersistenceError> {
        let cohort = self
            .cohort
            .parse()
            .map_err(|e| PersistenceError::InvalidRow(format!("profiles.cohort: {e}")))?;
        let role = self
            .role
            .parse()
            .map_err(|e| PersistenceError::InvalidRow(format!("profiles.role: {e}")))?;
        Ok(Profile {
            profile_id: Some(self.profile_id),
            account_id: self.account_id,
            full_name: self.full_name,
            phone_number: self.phone_number,
            student_number: self.student_number,
            university: self.university,
            cohort,
            role,
            phone_verified: self.phone_verified != 0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfile<'a> {
    pub account_id: i64,
    pub full_name: &'a str,
    pub phone_number: &'a str,
    pub student_number: &'a str,
    pub university: &'a str,
    pub cohort: &'a str,
    pub role: &'a str,
    pub phone_verified: i32,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shifts)]
pub(crate) struct ShiftRow {
    pub shift_id: i64,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub shift_date: String,
    pub shift_time: Option<String>,
    pub duration: Option<String>,
    pub medical_field: Option<String>,
    pub status: String,
    pub seller_id: i64,
    pub buyer_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl ShiftRow {
    pub(crate) fn into_domain(self) -> Result<Shift, PersistenceError> {
        let status = self
            .status
            .parse()
            .map_err(|e| PersistenceError::InvalidRow(format!("shifts.status: {e}")))?;
        let shift_date = parse_date(&self.shift_date)?;
        let shift_time = self.shift_time.as_deref().map(parse_time).transpose()?;
        Ok(Shift {
            shift_id: Some(self.shift_id),
            title: self.title,
            description: self.description,
            price: self.price,
            shift_date,
            shift_time,
            duration: self.duration,
            medical_field: self.medical_field,
            status,
            seller_id: self.seller_id,
            buyer_id: self.buyer_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = shifts)]
pub(crate) struct NewShift<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub shift_date: String,
    pub shift_time: Option<String>,
    pub duration: Option<&'a str>,
    pub medical_field: Option<&'a str>,
    pub status: &'a str,
    pub seller_id: i64,
    pub buyer_id: Option<i64>,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = deleted_shifts)]
pub(crate) struct DeletedShiftRow {
    pub deleted_shift_id: i64,
    pub original_shift_id: i64,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub shift_date: String,
    pub shift_time: Option<String>,
    pub duration: Option<String>,
    pub medical_field: Option<String>,
    pub status: String,
    pub seller_id: i64,
    pub buyer_id: Option<i64>,
    pub deleted_by: i64,
    pub deleted_at: String,
    pub deletion_reason: Option<String>,
    pub original_created_at: String,
}

impl DeletedShiftRow {
    pub(crate) fn into_domain(self) -> Result<DeletedShift, PersistenceError> {
        let status = self
            .status
            .parse()
            .map_err(|e| PersistenceError::InvalidRow(format!("deleted_shifts.status: {e}")))?;
        let shift_date = parse_date(&self.shift_date)?;
        let shift_time = self.shift_time.as_deref().map(parse_time).transpose()?;
        Ok(DeletedShift {
            deleted_shift_id: Some(self.deleted_shift_id),
            original_shift_id: self.original_shift_id,
            title: self.title,
            description: self.description,
            price: self.price,
            shift_date,
            shift_time,
            duration: self.duration,
            medical_field: self.medical_field,
            status,
            seller_id: self.seller_id,
            buyer_id: self.buyer_id,
            deleted_by: self.deleted_by,
            deleted_at: self.deleted_at,
            deletion_reason: self.deletion_reason,
            original_created_at: self.original_created_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = deleted_shifts)]
pub(crate) struct NewDeletedShift<'a> {
    pub original_shift_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub shift_date: &'a str,
    pub shift_time: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub medical_field: Option<&'a str>,
    pub status: &'a str,
    pub seller_id: i64,
    pub buyer_id: Option<i64>,
    pub deleted_by: i64,
    pub deleted_at: &'a str,
    pub deletion_reason: Option<&'a str>,
    pub original_created_at: &'a str,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = messages)]
pub(crate) struct MessageRow {
    pub message_id: i64,
    pub shift_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub created_at: String,
    pub read_at: Option<String>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            message_id: Some(row.message_id),
            shift_id: row.shift_id,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            content: row.content,
            created_at: row.created_at,
            read_at: row.read_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = messages)]
pub(crate) struct NewMessage<'a> {
    pub shift_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: &'a str,
    pub created_at: &'a str,
    pub read_at: Option<&'a str>,
}
