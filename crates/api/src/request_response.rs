// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! These are plain serializable shapes; dates travel as `YYYY-MM-DD`
//! strings, clock times as `HH:MM:SS`, and instants as RFC 3339 UTC
//! text. Conversion from domain types lives in the handlers.

use serde::{Deserialize, Serialize};

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    /// Login email address; stored lowercased.
    pub email: String,
    /// Plaintext password; only its bcrypt hash is stored.
    pub password: String,
    /// Full name as the applicant typed it.
    pub full_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Ten-digit student number.
    pub student_number: String,
    /// Affiliated university.
    pub university: String,
}

/// Response to a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    /// The new account's ID.
    pub account_id: i64,
    /// The canonical roster name recorded on the profile.
    pub full_name: String,
    /// The matched cohort (`tr` or `en`).
    pub cohort: String,
    /// Session token, absent when email verification is pending.
    pub session_token: Option<String>,
    /// Whether the account must verify its email before signing in.
    pub needs_verification: bool,
}

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Login email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Response to a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Bearer token for subsequent requests.
    pub session_token: String,
    /// The signed-in account's profile.
    pub profile: ProfileView,
}

/// An account profile as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    /// Owning account ID.
    pub account_id: i64,
    /// Canonical full name.
    pub full_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Ten-digit student number.
    pub student_number: String,
    /// Affiliated university.
    pub university: String,
    /// Cohort (`tr` or `en`).
    pub cohort: String,
    /// Role (`doctor` or `admin`).
    pub role: String,
    /// Whether the phone number has been verified.
    pub phone_verified: bool,
    /// Creation timestamp, RFC 3339 UTC.
    pub created_at: String,
}

/// Request to update a profile's mutable contact fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New contact phone number.
    pub phone_number: String,
    /// New affiliated university.
    pub university: String,
}

/// Request to create a shift listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// Listing title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Asking price in whole TL.
    pub price: i64,
    /// Shift date, `YYYY-MM-DD`.
    pub shift_date: String,
    /// Shift start time, `HH:MM:SS`.
    pub shift_time: Option<String>,
    /// Free-text duration, e.g. "16 saat".
    pub duration: Option<String>,
    /// Medical specialty of the ward.
    pub medical_field: Option<String>,
}

/// Request to edit a listing that is still `available`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShiftRequest {
    /// Listing title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Asking price in whole TL.
    pub price: i64,
    /// Shift date, `YYYY-MM-DD`.
    pub shift_date: String,
    /// Shift start time, `HH:MM:SS`.
    pub shift_time: Option<String>,
    /// Free-text duration.
    pub duration: Option<String>,
    /// Medical specialty of the ward.
    pub medical_field: Option<String>,
}

/// A shift listing as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftView {
    /// Listing ID.
    pub shift_id: i64,
    /// Listing title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Asking price in whole TL.
    pub price: i64,
    /// Shift date, `YYYY-MM-DD`.
    pub shift_date: String,
    /// How far away the shift date is, relative to the request instant
    /// ("Geçmiş", "Bugün", "Yarın", "Son N gün", "N gün kaldı").
    pub remaining: String,
    /// Shift start time, `HH:MM:SS`.
    pub shift_time: Option<String>,
    /// Free-text duration.
    pub duration: Option<String>,
    /// Medical specialty of the ward.
    pub medical_field: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Selling account ID.
    pub seller_id: i64,
    /// Buying account ID, once claimed.
    pub buyer_id: Option<i64>,
    /// Creation timestamp, RFC 3339 UTC.
    pub created_at: String,
    /// Last update timestamp, RFC 3339 UTC.
    pub updated_at: String,
}

/// Administrator request to delete a listing into the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDeleteShiftRequest {
    /// Optional reason recorded alongside the snapshot.
    pub reason: Option<String>,
}

/// A deleted-listing log entry as presented to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedShiftView {
    /// Snapshot ID in the deleted-listing log.
    pub deleted_shift_id: i64,
    /// The deleted listing's original ID.
    pub original_shift_id: i64,
    /// Listing title at deletion time.
    pub title: String,
    /// Description at deletion time.
    pub description: String,
    /// Asking price at deletion time.
    pub price: i64,
    /// Shift date, `YYYY-MM-DD`.
    pub shift_date: String,
    /// Lifecycle status at deletion time.
    pub status: String,
    /// Selling account ID.
    pub seller_id: i64,
    /// Buying account ID, if any.
    pub buyer_id: Option<i64>,
    /// The administrator who deleted the listing.
    pub deleted_by: i64,
    /// Deletion timestamp, RFC 3339 UTC.
    pub deleted_at: String,
    /// Optional deletion reason.
    pub deletion_reason: Option<String>,
    /// The listing's original creation timestamp.
    pub original_created_at: String,
}

/// Request to send a message on a shift conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Message body.
    pub content: String,
}

/// A message as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    /// Message ID.
    pub message_id: i64,
    /// The shift whose transaction this message belongs to.
    pub shift_id: i64,
    /// Sending account ID.
    pub sender_id: i64,
    /// Receiving account ID.
    pub receiver_id: i64,
    /// Message body.
    pub content: String,
    /// Send timestamp, RFC 3339 UTC.
    pub created_at: String,
    /// Read timestamp, absent while unread.
    pub read_at: Option<String>,
}

/// A full shift conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationView {
    /// The shift the conversation belongs to.
    pub shift: ShiftView,
    /// Messages in chronological order.
    pub messages: Vec<MessageView>,
    /// Whether the messaging window is still open.
    pub window_open: bool,
}

/// One row of the conversation inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// The shift the conversation belongs to.
    pub shift_id: i64,
    /// Listing title.
    pub title: String,
    /// Shift date, `YYYY-MM-DD`.
    pub shift_date: String,
    /// Lifecycle status.
    pub status: String,
    /// The other party's account ID.
    pub counterparty_id: i64,
    /// The other party's full name, when their profile still exists.
    pub counterparty_name: Option<String>,
    /// The most recent message, if any.
    pub last_message: Option<MessageView>,
    /// The caller's unread message count on this shift.
    pub unread_count: i64,
}
