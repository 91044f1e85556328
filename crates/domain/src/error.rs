// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ShiftStatus;
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Shift status string is not a recognized status.
    InvalidStatus(String),
    /// Role string is not a recognized role.
    InvalidRole(String),
    /// Cohort string is not a recognized cohort.
    InvalidCohort(String),
    /// The requested status transition is not allowed.
    InvalidTransition {
        /// Current status.
        from: ShiftStatus,
        /// Requested status.
        to: ShiftStatus,
    },
    /// The shift is not available for purchase.
    ShiftNotAvailable {
        /// The shift's current status.
        status: ShiftStatus,
    },
    /// A seller attempted to purchase their own listing.
    OwnShiftPurchase,
    /// The acting account is not the seller of the shift.
    NotSeller {
        /// The action that was attempted.
        action: &'static str,
    },
    /// The acting account is neither seller nor buyer of the shift.
    NotParticipant,
    /// The shift may not be edited in its current status.
    ShiftNotEditable {
        /// The shift's current status.
        status: ShiftStatus,
    },
    /// Price is not a positive integer within the cap.
    InvalidPrice {
        /// The rejected price.
        price: i64,
    },
    /// Shift date lies in the past.
    ShiftDateInPast {
        /// The rejected date.
        shift_date: Date,
    },
    /// Title is empty or too long.
    InvalidTitle(String),
    /// Description is too long.
    InvalidDescription(String),
    /// Student number is not exactly 10 digits.
    InvalidStudentNumber(String),
    /// Message content is empty.
    EmptyMessage,
    /// The messaging window for the shift has closed.
    MessageWindowClosed {
        /// The shift date anchoring the window.
        shift_date: Date,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse a date from its stored representation.
    DateParseError {
        /// The invalid date string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a clock time from its stored representation.
    TimeParseError {
        /// The invalid time string.
        value: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(s) => write!(f, "Invalid shift status: {s}"),
            Self::InvalidRole(s) => write!(f, "Invalid role: {s}"),
            Self::InvalidCohort(s) => write!(f, "Invalid cohort: {s}"),
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot transition shift from {from} to {to}")
            }
            Self::ShiftNotAvailable { status } => {
                write!(f, "Shift is no longer available (status: {status})")
            }
            Self::OwnShiftPurchase => {
                write!(f, "A seller cannot purchase their own listing")
            }
            Self::NotSeller { action } => {
                write!(f, "Only the seller may {action} this shift")
            }
            Self::NotParticipant => {
                write!(f, "Account is not a party to this shift's transaction")
            }
            Self::ShiftNotEditable { status } => {
                write!(f, "Shift can only be edited while available (status: {status})")
            }
            Self::InvalidPrice { price } => {
                write!(
                    f,
                    "Price must be a whole number between 1 and {} TL, got {price}",
                    crate::validation::MAX_PRICE
                )
            }
            Self::ShiftDateInPast { shift_date } => {
                write!(f, "Shift date {shift_date} is in the past")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidStudentNumber(msg) => {
                write!(f, "Invalid student number: {msg}")
            }
            Self::EmptyMessage => write!(f, "Message content cannot be empty"),
            Self::MessageWindowClosed { shift_date } => {
                write!(
                    f,
                    "Messaging closed one day after the shift date ({shift_date})"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { value, error } => {
                write!(f, "Failed to parse date '{value}': {error}")
            }
            Self::TimeParseError { value, error } => {
                write!(f, "Failed to parse time '{value}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
