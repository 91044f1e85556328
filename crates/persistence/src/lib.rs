// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Nobet Market.
//!
//! This crate provides database persistence for accounts, sessions,
//! profiles, shift listings, the deleted-listing log, and messages. It is
//! built on Diesel over `SQLite`.
//!
//! ## Conventions
//!
//! - Timestamps are ISO 8601 UTC text and are supplied by the caller, so
//!   the clock stays under the service layer's control.
//! - Lifecycle transitions are conditional `UPDATE`s whose affected-row
//!   count is the arbitration result under concurrent access.
//! - Row-to-domain conversion fails fast on corrupt data.
//!
//! ## Testing
//!
//! `new_in_memory()` hands out an isolated shared in-memory database per
//! call via an atomic counter, so tests never collide.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use nobet_domain::{DeletedShift, Message, Profile, Shift};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{AccountData, SessionData};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Creates a new account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the insert fails (including a
    /// duplicate email).
    pub fn create_account(
        &mut self,
        email: &str,
        password: &str,
        now: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_account(&mut self.conn, email, password, now)
    }

    /// Deletes an account; its sessions and profile cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_account(&mut self, account_id: i64) -> Result<usize, PersistenceError> {
        mutations::accounts::delete_account(&mut self.conn, account_id)
    }

    /// Marks an account's email as verified.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_email_verified(&mut self, account_id: i64) -> Result<usize, PersistenceError> {
        mutations::accounts::mark_email_verified(&mut self.conn, account_id)
    }

    /// Retrieves an account by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_account_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_email(&mut self.conn, email)
    }

    /// Retrieves an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_account_by_id(
        &mut self,
        account_id: i64,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_id(&mut self.conn, account_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if verification itself fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::accounts::verify_password(password, password_hash)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a new session for an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        account_id: i64,
        now: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, account_id, now, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::accounts::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(
        &mut self,
        session_id: i64,
        now: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id, now)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions belonging to an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_sessions_for_account(
        &mut self,
        account_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_sessions_for_account(&mut self.conn, account_id)
    }

    /// Deletes all sessions expired at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Inserts a profile for an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including UNIQUE violations
    /// on `account_id` or `student_number`.
    pub fn insert_profile(&mut self, profile: &Profile) -> Result<i64, PersistenceError> {
        mutations::profiles::insert_profile(&mut self.conn, profile)
    }

    /// Retrieves the profile attached to an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored row is
    /// invalid.
    pub fn get_profile_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<Profile>, PersistenceError> {
        queries::profiles::get_profile_by_account(&mut self.conn, account_id)
    }

    /// Retrieves a profile by student number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored row is
    /// invalid.
    pub fn get_profile_by_student_number(
        &mut self,
        student_number: &str,
    ) -> Result<Option<Profile>, PersistenceError> {
        queries::profiles::get_profile_by_student_number(&mut self.conn, student_number)
    }

    /// Updates a profile's mutable contact fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_profile_contact(
        &mut self,
        account_id: i64,
        phone_number: &str,
        university: &str,
        now: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::profiles::update_profile_contact(
            &mut self.conn,
            account_id,
            phone_number,
            university,
            now,
        )
    }

    /// Marks a profile's phone number as verified.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_phone_verified(
        &mut self,
        account_id: i64,
        now: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::profiles::mark_phone_verified(&mut self.conn, account_id, now)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Inserts a new shift listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_shift(&mut self, shift: &Shift) -> Result<i64, PersistenceError> {
        mutations::shifts::insert_shift(&mut self.conn, shift)
    }

    /// Retrieves a shift by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored row is
    /// invalid.
    pub fn get_shift(&mut self, shift_id: i64) -> Result<Option<Shift>, PersistenceError> {
        queries::shifts::get_shift(&mut self.conn, shift_id)
    }

    /// Lists `available` shifts, optionally filtered by specialty.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row is
    /// invalid.
    pub fn list_available_shifts(
        &mut self,
        medical_field: Option<&str>,
    ) -> Result<Vec<Shift>, PersistenceError> {
        queries::shifts::list_available_shifts(&mut self.conn, medical_field)
    }

    /// Lists every shift a seller has listed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row is
    /// invalid.
    pub fn list_shifts_by_seller(
        &mut self,
        seller_id: i64,
    ) -> Result<Vec<Shift>, PersistenceError> {
        queries::shifts::list_shifts_by_seller(&mut self.conn, seller_id)
    }

    /// Lists every shift an account has bought or committed to buy.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row is
    /// invalid.
    pub fn list_shifts_by_buyer(&mut self, buyer_id: i64) -> Result<Vec<Shift>, PersistenceError> {
        queries::shifts::list_shifts_by_buyer(&mut self.conn, buyer_id)
    }

    /// Lists a seller's shifts that have (or had) a buyer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row is
    /// invalid.
    pub fn list_sales_history(&mut self, seller_id: i64) -> Result<Vec<Shift>, PersistenceError> {
        queries::shifts::list_sales_history(&mut self.conn, seller_id)
    }

    /// Lists every shift an account participates in, as seller or buyer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row is
    /// invalid.
    pub fn list_participant_shifts(
        &mut self,
        account_id: i64,
    ) -> Result<Vec<Shift>, PersistenceError> {
        queries::shifts::list_participant_shifts(&mut self.conn, account_id)
    }

    /// Updates a listing's editable fields while it is still `available`.
    ///
    /// Returns the affected-row count; 0 means the shift is gone or no
    /// longer editable.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    #[allow(clippy::too_many_arguments)]
    pub fn update_shift_listing(
        &mut self,
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
        mutations::shifts::update_shift_listing(
            &mut self.conn,
            shift_id,
            title,
            description,
            price,
            shift_date,
            shift_time,
            duration,
            medical_field,
            now,
        )
    }

    /// Claims an `available` shift for a buyer, moving it to `pending`.
    ///
    /// Returns the affected-row count; 0 means the claim lost the race or
    /// was never eligible.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn purchase_shift(
        &mut self,
        shift_id: i64,
        buyer_id: i64,
        now: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::shifts::purchase_shift(&mut self.conn, shift_id, buyer_id, now)
    }

    /// Moves a `pending` shift to `completed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn complete_shift(&mut self, shift_id: i64, now: &str) -> Result<usize, PersistenceError> {
        mutations::shifts::complete_shift(&mut self.conn, shift_id, now)
    }

    /// Moves a `pending` shift to `cancelled`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn cancel_shift(&mut self, shift_id: i64, now: &str) -> Result<usize, PersistenceError> {
        mutations::shifts::cancel_shift(&mut self.conn, shift_id, now)
    }

    /// Hard-deletes a shift; its messages cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_shift(&mut self, shift_id: i64) -> Result<usize, PersistenceError> {
        mutations::shifts::delete_shift(&mut self.conn, shift_id)
    }

    /// Administrator deletion: snapshots the shift into the
    /// deleted-listing log and removes it, atomically.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist, or a database
    /// error if the transaction fails.
    pub fn archive_shift(
        &mut self,
        shift_id: i64,
        deleted_by: i64,
        deletion_reason: Option<&str>,
        now: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::shifts::archive_shift(&mut self.conn, shift_id, deleted_by, deletion_reason, now)
    }

    /// Lists the deleted-listing log, newest deletion first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row is
    /// invalid.
    pub fn list_deleted_shifts(&mut self) -> Result<Vec<DeletedShift>, PersistenceError> {
        queries::shifts::list_deleted_shifts(&mut self.conn)
    }

    /// Permanently erases a snapshot from the deleted-listing log.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge_deleted_shift(
        &mut self,
        deleted_shift_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::shifts::purge_deleted_shift(&mut self.conn, deleted_shift_id)
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Inserts a message into a shift conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_message(&mut self, message: &Message) -> Result<i64, PersistenceError> {
        mutations::messages::insert_message(&mut self.conn, message)
    }

    /// Lists a shift's conversation in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn messages_for_shift(&mut self, shift_id: i64) -> Result<Vec<Message>, PersistenceError> {
        queries::messages::messages_for_shift(&mut self.conn, shift_id)
    }

    /// Marks all of a receiver's unread messages on a shift as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_messages_read(
        &mut self,
        shift_id: i64,
        receiver_id: i64,
        now: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::messages::mark_messages_read(&mut self.conn, shift_id, receiver_id, now)
    }

    /// Counts a receiver's unread messages on one shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn unread_count(
        &mut self,
        shift_id: i64,
        receiver_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::messages::unread_count(&mut self.conn, shift_id, receiver_id)
    }

    /// Counts a receiver's unread messages across all shifts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn unread_total(&mut self, receiver_id: i64) -> Result<i64, PersistenceError> {
        queries::messages::unread_total(&mut self.conn, receiver_id)
    }

    /// Retrieves the most recent message on a shift, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn last_message_for_shift(
        &mut self,
        shift_id: i64,
    ) -> Result<Option<Message>, PersistenceError> {
        queries::messages::last_message_for_shift(&mut self.conn, shift_id)
    }
}
