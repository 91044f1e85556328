// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation for listings, registration input, and messages.
//!
//! These rules are user-correctable input checks, evaluated before any
//! store write. Uniqueness checks require context and live in the API
//! layer.

use crate::error::DomainError;
use time::Date;

/// Maximum asking price in whole TL.
pub const MAX_PRICE: i64 = 10_000;

/// Maximum listing title length in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum listing description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2_000;

/// Required student number length (digits).
pub const STUDENT_NUMBER_LEN: usize = 10;

/// Validates an asking price.
///
/// Prices are whole TL amounts between 1 and [`MAX_PRICE`] inclusive.
///
/// # Errors
///
/// Returns [`DomainError::InvalidPrice`] if the price is out of range.
pub const fn validate_price(price: i64) -> Result<(), DomainError> {
    if price >= 1 && price <= MAX_PRICE {
        Ok(())
    } else {
        Err(DomainError::InvalidPrice { price })
    }
}

/// Validates that a shift date is not in the past relative to `today`.
///
/// # Errors
///
/// Returns [`DomainError::ShiftDateInPast`] for past dates.
pub fn validate_shift_date(shift_date: Date, today: Date) -> Result<(), DomainError> {
    if shift_date < today {
        return Err(DomainError::ShiftDateInPast { shift_date });
    }
    Ok(())
}

/// Validates a listing title.
///
/// # Errors
///
/// Returns [`DomainError::InvalidTitle`] if the title is empty after
/// trimming or exceeds [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidTitle(format!(
            "Title cannot exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a listing description.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDescription`] if the description exceeds
/// [`MAX_DESCRIPTION_LEN`] characters.
pub fn validate_description(description: &str) -> Result<(), DomainError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::InvalidDescription(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a student number: exactly 10 ASCII digits.
///
/// This is the precondition the roster lookup relies on; reject before
/// consulting the roster.
///
/// # Errors
///
/// Returns [`DomainError::InvalidStudentNumber`] on any other shape.
pub fn validate_student_number(student_number: &str) -> Result<(), DomainError> {
    let trimmed = student_number.trim();
    if trimmed.len() != STUDENT_NUMBER_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidStudentNumber(format!(
            "Student number must be exactly {STUDENT_NUMBER_LEN} digits"
        )));
    }
    Ok(())
}

/// Validates message content: non-empty after trimming.
///
/// # Errors
///
/// Returns [`DomainError::EmptyMessage`] for blank content.
pub fn validate_message_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::EmptyMessage);
    }
    Ok(())
}

/// Validates the full set of listing fields for creation or edit.
///
/// # Errors
///
/// Returns the first failing field rule.
pub fn validate_listing_fields(
    title: &str,
    description: &str,
    price: i64,
    shift_date: Date,
    today: Date,
) -> Result<(), DomainError> {
    validate_title(title)?;
    validate_description(description)?;
    validate_price(price)?;
    validate_shift_date(shift_date, today)?;
    Ok(())
}
