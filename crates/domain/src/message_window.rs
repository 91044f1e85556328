// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Messaging window arithmetic.
//!
//! Parties may exchange messages until one calendar day after the shift
//! date. The boundary instant is midnight UTC at the start of
//! `shift_date + 1 day`, inclusive; time-of-day on the shift date itself
//! is irrelevant. Once the window closes, previously sent messages remain
//! readable but new ones are rejected before any write.

use crate::error::DomainError;
use time::{Date, Duration, OffsetDateTime};

/// Returns the last instant (UTC) at which a message may still be sent
/// for a shift on `shift_date`.
///
/// # Errors
///
/// Returns [`DomainError::DateArithmeticOverflow`] if `shift_date` is at
/// the end of the representable range.
pub fn message_window_closes_at(shift_date: Date) -> Result<OffsetDateTime, DomainError> {
    let day_after = shift_date
        .checked_add(Duration::days(1))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing message window for {shift_date}"),
        })?;
    Ok(day_after.midnight().assume_utc())
}

/// Decides whether a message may be sent for a shift on `shift_date` at
/// wall-clock instant `now`.
///
/// # Errors
///
/// Returns [`DomainError::DateArithmeticOverflow`] if the window boundary
/// cannot be computed.
pub fn can_send_message(shift_date: Date, now: OffsetDateTime) -> Result<bool, DomainError> {
    Ok(now <= message_window_closes_at(shift_date)?)
}

/// Returns the signed number of whole calendar days from `today` until
/// `shift_date`.
///
/// Negative values mean the shift date has passed; zero means today.
#[must_use]
pub fn days_until(shift_date: Date, today: Date) -> i64 {
    (shift_date - today).whole_days()
}
