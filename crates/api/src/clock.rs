// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp, date, and clock-time conversion helpers.
//!
//! The service layer owns the clock: every handler receives `now` as an
//! [`OffsetDateTime`] and converts it exactly once before the store is
//! touched. Instants travel as RFC 3339 UTC text, dates as
//! `YYYY-MM-DD`, and clock times as `HH:MM:SS`.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

use crate::error::ApiError;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");

/// Formats an instant as RFC 3339 UTC text.
///
/// # Errors
///
/// Returns an internal error if formatting fails.
pub(crate) fn format_instant(instant: OffsetDateTime) -> Result<String, ApiError> {
    instant.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

/// Parses a stored RFC 3339 instant.
///
/// # Errors
///
/// Returns an internal error; stored timestamps are written by this
/// layer and should never be malformed.
pub(crate) fn parse_instant(value: &str) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to parse stored timestamp '{value}': {e}"),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an internal error if formatting fails.
pub(crate) fn format_date(date: Date) -> Result<String, ApiError> {
    date.format(&DATE_FORMAT).map_err(|e| ApiError::Internal {
        message: format!("Failed to format date: {e}"),
    })
}

/// Parses a request-supplied `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] keyed by `field`.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value, &DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: format!("Expected a YYYY-MM-DD date, got '{value}': {e}"),
    })
}

/// Formats a clock time as `HH:MM:SS`.
///
/// # Errors
///
/// Returns an internal error if formatting fails.
pub(crate) fn format_time(clock_time: Time) -> Result<String, ApiError> {
    clock_time
        .format(&TIME_FORMAT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format time: {e}"),
        })
}

/// Parses a request-supplied `HH:MM:SS` clock time.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] keyed by `field`.
pub(crate) fn parse_time(field: &str, value: &str) -> Result<Time, ApiError> {
    Time::parse(value, &TIME_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: format!("Expected an HH:MM:SS time, got '{value}': {e}"),
    })
}
