// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler functions for marketplace operations.
//!
//! Handlers receive the caller's identity already resolved by the
//! session layer and the wall-clock instant from the server, run the
//! domain guards, and then let the store's conditional writes arbitrate
//! concurrent transitions. A write that affects zero rows is re-read
//! and classified into a specific error rather than reported as a
//! silent no-op.

use nobet_domain::{
    DeletedShift, DomainError, Message, Profile, Shift, ShiftStatus, authorize_cancel,
    authorize_complete, authorize_delete, authorize_edit, authorize_message, authorize_purchase,
    can_send_message, days_until, validate_listing_fields, validate_message_content,
};
use nobet_persistence::{PersistenceError, SqlitePersistence};
use nobet_roster::StudentRoster;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticationService, AuthorizationService};
use crate::clock;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    AdminDeleteShiftRequest, ConversationSummary, ConversationView, CreateShiftRequest,
    DeletedShiftView, MessageView, ProfileView, SendMessageRequest, ShiftView, SignInRequest,
    SignInResponse, SignUpRequest, SignUpResponse, UpdateProfileRequest, UpdateShiftRequest,
};

// ============================================================================
// Auth
// ============================================================================

/// Registers a new account and profile.
///
/// # Errors
///
/// Returns an error if the student number is malformed, the roster
/// rejects the applicant, the number or email is already registered, or
/// the store fails.
pub fn sign_up(
    persistence: &mut SqlitePersistence,
    roster: &StudentRoster,
    request: &SignUpRequest,
    require_verification: bool,
    now: OffsetDateTime,
) -> Result<SignUpResponse, ApiError> {
    let outcome =
        AuthenticationService::sign_up(persistence, roster, request, require_verification, now)?;
    Ok(SignUpResponse {
        account_id: outcome.account_id,
        full_name: outcome.canonical_name,
        cohort: outcome.cohort.as_str().to_string(),
        session_token: outcome.session_token,
        needs_verification: outcome.needs_verification,
    })
}

/// Signs an account in and returns a session token with its profile.
///
/// # Errors
///
/// Returns an error for bad credentials, an unverified email (when
/// `require_verified_email` is set), or a missing profile.
pub fn sign_in(
    persistence: &mut SqlitePersistence,
    request: &SignInRequest,
    require_verified_email: bool,
    now: OffsetDateTime,
) -> Result<SignInResponse, ApiError> {
    let outcome = AuthenticationService::sign_in(
        persistence,
        &request.email,
        &request.password,
        require_verified_email,
        now,
    )?;
    Ok(SignInResponse {
        session_token: outcome.session_token,
        profile: profile_view(&outcome.profile),
    })
}

/// Ends a session. Unknown tokens are ignored.
///
/// # Errors
///
/// Returns an error only if the store fails.
pub fn sign_out(persistence: &mut SqlitePersistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::sign_out(persistence, session_token)
}

// ============================================================================
// Profiles
// ============================================================================

/// Retrieves an account's profile.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the account has no profile.
pub fn get_profile(
    persistence: &mut SqlitePersistence,
    account_id: i64,
) -> Result<ProfileView, ApiError> {
    let profile = persistence
        .get_profile_by_account(account_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("profile"),
            message: format!("Account {account_id} has no profile"),
        })?;
    Ok(profile_view(&profile))
}

/// Updates a profile's mutable contact fields.
///
/// Identity fields (name, student number, cohort, role) are fixed at
/// registration and cannot be changed here.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the account has no profile.
pub fn update_profile(
    persistence: &mut SqlitePersistence,
    account_id: i64,
    request: &UpdateProfileRequest,
    now: OffsetDateTime,
) -> Result<ProfileView, ApiError> {
    let now_str = clock::format_instant(now)?;
    let rows = persistence.update_profile_contact(
        account_id,
        request.phone_number.trim(),
        request.university.trim(),
        &now_str,
    )?;
    if rows == 0 {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("profile"),
            message: format!("Account {account_id} has no profile"),
        });
    }
    get_profile(persistence, account_id)
}

// ============================================================================
// Shift listings
// ============================================================================

/// Creates a new shift listing owned by `seller_id`.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed or out-of-range fields.
pub fn create_shift(
    persistence: &mut SqlitePersistence,
    seller_id: i64,
    request: &CreateShiftRequest,
    now: OffsetDateTime,
) -> Result<ShiftView, ApiError> {
    let shift_date = clock::parse_date("shift_date", &request.shift_date)?;
    let shift_time = request
        .shift_time
        .as_deref()
        .map(|v| clock::parse_time("shift_time", v))
        .transpose()?;
    validate_listing_fields(
        &request.title,
        &request.description,
        request.price,
        shift_date,
        now.date(),
    )
    .map_err(translate_domain_error)?;

    let now_str = clock::format_instant(now)?;
    let mut shift = Shift::new(
        request.title.trim().to_string(),
        request.description.trim().to_string(),
        request.price,
        shift_date,
        shift_time,
        request.duration.clone(),
        request.medical_field.clone(),
        seller_id,
        now_str,
    );
    let shift_id = persistence.insert_shift(&shift)?;
    shift.shift_id = Some(shift_id);

    info!("Account {seller_id} listed shift {shift_id}");
    shift_view(&shift, now.date())
}

/// Retrieves a single shift listing.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the shift does not exist.
pub fn get_shift(
    persistence: &mut SqlitePersistence,
    shift_id: i64,
    now: OffsetDateTime,
) -> Result<ShiftView, ApiError> {
    let shift = load_shift(persistence, shift_id)?;
    shift_view(&shift, now.date())
}

/// Lists `available` shifts, optionally filtered by medical specialty.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_available_shifts(
    persistence: &mut SqlitePersistence,
    medical_field: Option<&str>,
    now: OffsetDateTime,
) -> Result<Vec<ShiftView>, ApiError> {
    shift_views(persistence.list_available_shifts(medical_field)?, now.date())
}

/// Lists every shift the caller has listed.
///
/// A failing store read is logged and reported as an empty history
/// rather than failing the whole view.
///
/// # Errors
///
/// Returns an error only if a stored row cannot be rendered.
pub fn list_my_shifts(
    persistence: &mut SqlitePersistence,
    seller_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<ShiftView>, ApiError> {
    match persistence.list_shifts_by_seller(seller_id) {
        Ok(shifts) => shift_views(shifts, now.date()),
        Err(err) => {
            warn!("Listings unavailable for account {seller_id}: {err}");
            Ok(Vec::new())
        }
    }
}

/// Lists every shift the caller has bought or committed to buy.
///
/// A failing store read is logged and reported as an empty history
/// rather than failing the whole view.
///
/// # Errors
///
/// Returns an error only if a stored row cannot be rendered.
pub fn list_my_purchases(
    persistence: &mut SqlitePersistence,
    buyer_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<ShiftView>, ApiError> {
    match persistence.list_shifts_by_buyer(buyer_id) {
        Ok(shifts) => shift_views(shifts, now.date()),
        Err(err) => {
            warn!("Purchase history unavailable for account {buyer_id}: {err}");
            Ok(Vec::new())
        }
    }
}

/// Lists the caller's listings that have (or had) a buyer.
///
/// A failing store read is logged and reported as an empty history
/// rather than failing the whole view.
///
/// # Errors
///
/// Returns an error only if a stored row cannot be rendered.
pub fn list_sales_history(
    persistence: &mut SqlitePersistence,
    seller_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<ShiftView>, ApiError> {
    match persistence.list_sales_history(seller_id) {
        Ok(shifts) => shift_views(shifts, now.date()),
        Err(err) => {
            warn!("Sales history unavailable for account {seller_id}: {err}");
            Ok(Vec::new())
        }
    }
}

/// Edits a listing that is still `available`.
///
/// # Errors
///
/// Returns an error if the caller is not the seller, the listing has
/// left the `available` state, or a field fails validation.
pub fn update_shift(
    persistence: &mut SqlitePersistence,
    account_id: i64,
    shift_id: i64,
    request: &UpdateShiftRequest,
    now: OffsetDateTime,
) -> Result<ShiftView, ApiError> {
    let shift = load_shift(persistence, shift_id)?;
    authorize_edit(&shift, account_id).map_err(translate_domain_error)?;

    let shift_date = clock::parse_date("shift_date", &request.shift_date)?;
    let shift_time = request
        .shift_time
        .as_deref()
        .map(|v| clock::parse_time("shift_time", v))
        .transpose()?;
    validate_listing_fields(
        &request.title,
        &request.description,
        request.price,
        shift_date,
        now.date(),
    )
    .map_err(translate_domain_error)?;

    let now_str = clock::format_instant(now)?;
    let rows = persistence.update_shift_listing(
        shift_id,
        request.title.trim(),
        request.description.trim(),
        request.price,
        shift_date,
        shift_time,
        request.duration.as_deref(),
        request.medical_field.as_deref(),
        &now_str,
    )?;
    if rows == 0 {
        // A buyer committed between the read and the write.
        let current = load_shift(persistence, shift_id)?;
        return Err(translate_domain_error(DomainError::ShiftNotEditable {
            status: current.status,
        }));
    }

    get_shift(persistence, shift_id, now)
}

/// Deletes the caller's own listing. No snapshot is kept.
///
/// # Errors
///
/// Returns an error if the caller is not the seller or the shift does
/// not exist.
pub fn delete_shift(
    persistence: &mut SqlitePersistence,
    account_id: i64,
    shift_id: i64,
) -> Result<(), ApiError> {
    let shift = load_shift(persistence, shift_id)?;
    authorize_delete(&shift, account_id).map_err(translate_domain_error)?;
    persistence.delete_shift(shift_id)?;
    info!("Account {account_id} deleted shift {shift_id}");
    Ok(())
}

// ============================================================================
// Transactions
// ============================================================================

/// Claims an `available` shift for `buyer_id`.
///
/// The store's conditional write is the arbiter under concurrency: if
/// it affects no rows, the current row is re-read to name the reason.
///
/// # Errors
///
/// Returns an error if the shift is gone, already claimed, or the
/// caller is its seller.
pub fn purchase_shift(
    persistence: &mut SqlitePersistence,
    buyer_id: i64,
    shift_id: i64,
    now: OffsetDateTime,
) -> Result<ShiftView, ApiError> {
    let shift = load_shift(persistence, shift_id)?;
    authorize_purchase(&shift, buyer_id).map_err(translate_domain_error)?;

    let now_str = clock::format_instant(now)?;
    let rows = persistence.purchase_shift(shift_id, buyer_id, &now_str)?;
    if rows == 0 {
        let current = load_shift(persistence, shift_id)?;
        let err = if current.seller_id == buyer_id {
            DomainError::OwnShiftPurchase
        } else {
            DomainError::ShiftNotAvailable {
                status: current.status,
            }
        };
        return Err(translate_domain_error(err));
    }

    info!("Account {buyer_id} claimed shift {shift_id}");
    get_shift(persistence, shift_id, now)
}

/// Marks a `pending` shift as handed over. Seller only.
///
/// # Errors
///
/// Returns an error if the caller is not the seller or the shift is
/// not `pending`.
pub fn complete_shift(
    persistence: &mut SqlitePersistence,
    account_id: i64,
    shift_id: i64,
    now: OffsetDateTime,
) -> Result<ShiftView, ApiError> {
    let shift = load_shift(persistence, shift_id)?;
    authorize_complete(&shift, account_id).map_err(translate_domain_error)?;

    let now_str = clock::format_instant(now)?;
    let rows = persistence.complete_shift(shift_id, &now_str)?;
    if rows == 0 {
        let current = load_shift(persistence, shift_id)?;
        return Err(translate_domain_error(DomainError::InvalidTransition {
            from: current.status,
            to: ShiftStatus::Completed,
        }));
    }

    info!("Shift {shift_id} completed by account {account_id}");
    get_shift(persistence, shift_id, now)
}

/// Cancels a `pending` trade. Either party may cancel; the buyer stays
/// recorded for history.
///
/// # Errors
///
/// Returns an error if the caller is not a party to the trade or the
/// shift is not `pending`.
pub fn cancel_shift(
    persistence: &mut SqlitePersistence,
    account_id: i64,
    shift_id: i64,
    now: OffsetDateTime,
) -> Result<ShiftView, ApiError> {
    let shift = load_shift(persistence, shift_id)?;
    authorize_cancel(&shift, account_id).map_err(translate_domain_error)?;

    let now_str = clock::format_instant(now)?;
    let rows = persistence.cancel_shift(shift_id, &now_str)?;
    if rows == 0 {
        let current = load_shift(persistence, shift_id)?;
        return Err(translate_domain_error(DomainError::InvalidTransition {
            from: current.status,
            to: ShiftStatus::Cancelled,
        }));
    }

    info!("Shift {shift_id} cancelled by account {account_id}");
    get_shift(persistence, shift_id, now)
}

// ============================================================================
// Administration
// ============================================================================

/// Administrator deletion: snapshots the listing into the audit log and
/// removes it atomically. Returns the snapshot ID.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the shift does
/// not exist.
pub fn admin_delete_shift(
    persistence: &mut SqlitePersistence,
    acting: &Profile,
    shift_id: i64,
    request: &AdminDeleteShiftRequest,
    now: OffsetDateTime,
) -> Result<i64, ApiError> {
    AuthorizationService::authorize_admin(acting, "admin_delete_shift")?;
    let now_str = clock::format_instant(now)?;
    let snapshot_id = persistence
        .archive_shift(
            shift_id,
            acting.account_id,
            request.reason.as_deref(),
            &now_str,
        )
        .map_err(|err| match err {
            nobet_persistence::PersistenceError::NotFound(_) => shift_not_found(shift_id),
            other => other.into(),
        })?;
    info!(
        "Admin {} archived shift {shift_id} as snapshot {snapshot_id}",
        acting.account_id
    );
    Ok(snapshot_id)
}

/// Lists the deleted-listing audit log, newest deletion first.
///
/// # Errors
///
/// Returns an error if the caller is not an admin.
pub fn list_deleted_shifts(
    persistence: &mut SqlitePersistence,
    acting: &Profile,
) -> Result<Vec<DeletedShiftView>, ApiError> {
    AuthorizationService::authorize_admin(acting, "list_deleted_shifts")?;
    persistence
        .list_deleted_shifts()?
        .iter()
        .map(deleted_shift_view)
        .collect()
}

/// Permanently erases a snapshot from the deleted-listing log.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the snapshot does
/// not exist.
pub fn purge_deleted_shift(
    persistence: &mut SqlitePersistence,
    acting: &Profile,
    deleted_shift_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_admin(acting, "purge_deleted_shift")?;
    let rows = persistence.purge_deleted_shift(deleted_shift_id)?;
    if rows == 0 {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("deleted shift"),
            message: format!("Snapshot {deleted_shift_id} not found"),
        });
    }
    info!(
        "Admin {} purged deleted-shift snapshot {deleted_shift_id}",
        acting.account_id
    );
    Ok(())
}

// ============================================================================
// Messaging
// ============================================================================

/// Sends a message to the shift's counterparty.
///
/// Messaging requires a committed counterparty and stays open through
/// midnight UTC at the start of the day after the shift date.
///
/// # Errors
///
/// Returns an error if the caller is not a party to the trade, the
/// shift has no buyer yet, the content is blank, or the window has
/// closed.
pub fn send_message(
    persistence: &mut SqlitePersistence,
    sender_id: i64,
    shift_id: i64,
    request: &SendMessageRequest,
    now: OffsetDateTime,
) -> Result<MessageView, ApiError> {
    let shift = load_shift(persistence, shift_id)?;
    authorize_message(&shift, sender_id).map_err(translate_domain_error)?;
    validate_message_content(&request.content).map_err(translate_domain_error)?;

    if !can_send_message(shift.shift_date, now).map_err(translate_domain_error)? {
        return Err(translate_domain_error(DomainError::MessageWindowClosed {
            shift_date: shift.shift_date,
        }));
    }

    let Some(receiver_id) = shift.counterparty(sender_id) else {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("message_counterparty"),
            message: String::from("There is no counterparty to message until the shift has a buyer"),
        });
    };

    let now_str = clock::format_instant(now)?;
    let mut message = Message::new(
        shift_id,
        sender_id,
        receiver_id,
        request.content.trim().to_string(),
        now_str,
    );
    let message_id = persistence.insert_message(&message)?;
    message.message_id = Some(message_id);

    debug!("Account {sender_id} messaged account {receiver_id} on shift {shift_id}");
    message_view(&message)
}

/// Retrieves a shift's conversation for one of its parties.
///
/// Opening the conversation marks the caller's unread messages as read.
/// A closed window still allows reading; only sending is blocked.
///
/// # Errors
///
/// Returns an error if the caller is not a party to the trade or the
/// shift does not exist.
pub fn get_conversation(
    persistence: &mut SqlitePersistence,
    account_id: i64,
    shift_id: i64,
    now: OffsetDateTime,
) -> Result<ConversationView, ApiError> {
    let shift = load_shift(persistence, shift_id)?;
    authorize_message(&shift, account_id).map_err(translate_domain_error)?;

    let now_str = clock::format_instant(now)?;
    persistence.mark_messages_read(shift_id, account_id, &now_str)?;

    let messages = persistence
        .messages_for_shift(shift_id)?
        .iter()
        .map(message_view)
        .collect::<Result<Vec<_>, _>>()?;
    let window_open = can_send_message(shift.shift_date, now).map_err(translate_domain_error)?;

    Ok(ConversationView {
        shift: shift_view(&shift, now.date())?,
        messages,
        window_open,
    })
}

/// Lists the caller's conversation inbox: one row per shift they are a
/// party to that has a counterparty.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_conversations(
    persistence: &mut SqlitePersistence,
    account_id: i64,
) -> Result<Vec<ConversationSummary>, ApiError> {
    let shifts = persistence.list_participant_shifts(account_id)?;
    let mut summaries = Vec::new();

    for shift in shifts {
        if shift.buyer_id.is_none() {
            continue;
        }
        let Some(counterparty_id) = shift.counterparty(account_id) else {
            continue;
        };
        let shift_id = require_id(shift.shift_id, "shift")?;

        // Secondary reads degrade per row; one bad conversation must
        // not take the whole inbox down.
        let counterparty_name = degrade(
            persistence.get_profile_by_account(counterparty_id),
            "counterparty profile",
            shift_id,
        )
        .flatten()
        .map(|p| p.full_name);
        let last_message = degrade(
            persistence.last_message_for_shift(shift_id),
            "last message",
            shift_id,
        )
        .flatten()
        .as_ref()
        .map(message_view)
        .transpose()?;
        let unread_count = degrade(
            persistence.unread_count(shift_id, account_id),
            "unread count",
            shift_id,
        )
        .unwrap_or(0);

        summaries.push(ConversationSummary {
            shift_id,
            title: shift.title.clone(),
            shift_date: clock::format_date(shift.shift_date)?,
            status: shift.status.as_str().to_string(),
            counterparty_id,
            counterparty_name,
            last_message,
            unread_count,
        });
    }

    Ok(summaries)
}

/// Counts the caller's unread messages across all conversations.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn unread_message_total(
    persistence: &mut SqlitePersistence,
    account_id: i64,
) -> Result<i64, ApiError> {
    Ok(persistence.unread_total(account_id)?)
}

// ============================================================================
// Conversions
// ============================================================================

fn load_shift(persistence: &mut SqlitePersistence, shift_id: i64) -> Result<Shift, ApiError> {
    persistence
        .get_shift(shift_id)?
        .ok_or_else(|| shift_not_found(shift_id))
}

fn shift_not_found(shift_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("shift"),
        message: format!("Shift {shift_id} not found"),
    }
}

fn require_id(id: Option<i64>, what: &str) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::Internal {
        message: format!("Stored {what} row is missing its ID"),
    })
}

/// Degrades a secondary read: the failure is logged and the value
/// dropped instead of failing the surrounding view.
pub(crate) fn degrade<T>(
    result: Result<T, PersistenceError>,
    what: &str,
    shift_id: i64,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Dropping {what} for shift {shift_id}: {err}");
            None
        }
    }
}

/// User-facing label for how far away a shift date is.
fn remaining_label(days: i64) -> String {
    match days {
        d if d < 0 => String::from("Geçmiş"),
        0 => String::from("Bugün"),
        1 => String::from("Yarın"),
        d if d <= 7 => format!("Son {d} gün"),
        d => format!("{d} gün kaldı"),
    }
}

fn profile_view(profile: &Profile) -> ProfileView {
    ProfileView {
        account_id: profile.account_id,
        full_name: profile.full_name.clone(),
        phone_number: profile.phone_number.clone(),
        student_number: profile.student_number.clone(),
        university: profile.university.clone(),
        cohort: profile.cohort.as_str().to_string(),
        role: profile.role.as_str().to_string(),
        phone_verified: profile.phone_verified,
        created_at: profile.created_at.clone(),
    }
}

fn shift_view(shift: &Shift, today: Date) -> Result<ShiftView, ApiError> {
    Ok(ShiftView {
        shift_id: require_id(shift.shift_id, "shift")?,
        title: shift.title.clone(),
        description: shift.description.clone(),
        price: shift.price,
        shift_date: clock::format_date(shift.shift_date)?,
        remaining: remaining_label(days_until(shift.shift_date, today)),
        shift_time: shift.shift_time.map(clock::format_time).transpose()?,
        duration: shift.duration.clone(),
        medical_field: shift.medical_field.clone(),
        status: shift.status.as_str().to_string(),
        seller_id: shift.seller_id,
        buyer_id: shift.buyer_id,
        created_at: shift.created_at.clone(),
        updated_at: shift.updated_at.clone(),
    })
}

fn shift_views(shifts: Vec<Shift>, today: Date) -> Result<Vec<ShiftView>, ApiError> {
    shifts.iter().map(|shift| shift_view(shift, today)).collect()
}

fn message_view(message: &Message) -> Result<MessageView, ApiError> {
    Ok(MessageView {
        message_id: require_id(message.message_id, "message")?,
        shift_id: message.shift_id,
        sender_id: message.sender_id,
        receiver_id: message.receiver_id,
        content: message.content.clone(),
        created_at: message.created_at.clone(),
        read_at: message.read_at.clone(),
    })
}

fn deleted_shift_view(entry: &DeletedShift) -> Result<DeletedShiftView, ApiError> {
    Ok(DeletedShiftView {
        deleted_shift_id: require_id(entry.deleted_shift_id, "deleted shift")?,
        original_shift_id: entry.original_shift_id,
        title: entry.title.clone(),
        description: entry.description.clone(),
        price: entry.price,
        shift_date: clock::format_date(entry.shift_date)?,
        status: entry.status.as_str().to_string(),
        seller_id: entry.seller_id,
        buyer_id: entry.buyer_id,
        deleted_by: entry.deleted_by,
        deleted_at: entry.deleted_at.clone(),
        deletion_reason: entry.deletion_reason.clone(),
        original_created_at: entry.original_created_at.clone(),
    })
}
