// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor-aware guards for the shift lifecycle state machine.
//!
//! Transitions:
//!
//! | From      | To        | Who                     |
//! |-----------|-----------|-------------------------|
//! | available | pending   | any account except the seller |
//! | pending   | completed | seller only             |
//! | pending   | cancelled | seller or buyer         |
//!
//! Edits and deletes are not transitions but are gated at the same layer:
//! edits require `available` and the seller; deletes require the seller.
//!
//! Every rejected operation yields a specific [`DomainError`], never a
//! silent no-op. The database write itself remains the arbiter of
//! concurrent transitions; these guards run before the write.

use crate::error::DomainError;
use crate::types::{Shift, ShiftStatus};

/// Checks that `buyer_id` may purchase `shift`.
///
/// # Errors
///
/// Returns [`DomainError::OwnShiftPurchase`] if the buyer is the seller,
/// or [`DomainError::ShiftNotAvailable`] if the shift is not `available`.
pub fn authorize_purchase(shift: &Shift, buyer_id: i64) -> Result<(), DomainError> {
    if shift.seller_id == buyer_id {
        return Err(DomainError::OwnShiftPurchase);
    }
    if shift.status != ShiftStatus::Available {
        return Err(DomainError::ShiftNotAvailable {
            status: shift.status,
        });
    }
    Ok(())
}

/// Checks that `account_id` may mark `shift` complete.
///
/// Completion is seller-only; buyer-triggered completion is intentionally
/// excluded.
///
/// # Errors
///
/// Returns [`DomainError::InvalidTransition`] if the shift is not
/// `pending`, or [`DomainError::NotSeller`] for non-sellers.
pub fn authorize_complete(shift: &Shift, account_id: i64) -> Result<(), DomainError> {
    if shift.status != ShiftStatus::Pending {
        return Err(DomainError::InvalidTransition {
            from: shift.status,
            to: ShiftStatus::Completed,
        });
    }
    if shift.seller_id != account_id {
        return Err(DomainError::NotSeller { action: "complete" });
    }
    Ok(())
}

/// Checks that `account_id` may cancel `shift`.
///
/// Either transaction party may cancel a pending trade.
///
/// # Errors
///
/// Returns [`DomainError::InvalidTransition`] if the shift is not
/// `pending`, or [`DomainError::NotParticipant`] for third parties.
pub fn authorize_cancel(shift: &Shift, account_id: i64) -> Result<(), DomainError> {
    if shift.status != ShiftStatus::Pending {
        return Err(DomainError::InvalidTransition {
            from: shift.status,
            to: ShiftStatus::Cancelled,
        });
    }
    if !shift.is_participant(account_id) {
        return Err(DomainError::NotParticipant);
    }
    Ok(())
}

/// Checks that `account_id` may edit `shift`'s listing fields.
///
/// # Errors
///
/// Returns [`DomainError::NotSeller`] for non-sellers, or
/// [`DomainError::ShiftNotEditable`] once a buyer has committed.
pub fn authorize_edit(shift: &Shift, account_id: i64) -> Result<(), DomainError> {
    if shift.seller_id != account_id {
        return Err(DomainError::NotSeller { action: "edit" });
    }
    if shift.status != ShiftStatus::Available {
        return Err(DomainError::ShiftNotEditable {
            status: shift.status,
        });
    }
    Ok(())
}

/// Checks that `account_id` may delete `shift`.
///
/// Sellers may delete their listing in any state.
///
/// # Errors
///
/// Returns [`DomainError::NotSeller`] for non-sellers.
pub fn authorize_delete(shift: &Shift, account_id: i64) -> Result<(), DomainError> {
    if shift.seller_id != account_id {
        return Err(DomainError::NotSeller { action: "delete" });
    }
    Ok(())
}

/// Checks that `account_id` is a party to `shift`'s transaction and may
/// therefore read or send messages for it.
///
/// # Errors
///
/// Returns [`DomainError::NotParticipant`] for third parties.
pub fn authorize_message(shift: &Shift, account_id: i64) -> Result<(), DomainError> {
    if !shift.is_participant(account_id) {
        return Err(DomainError::NotParticipant);
    }
    Ok(())
}
