// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time};

/// Represents the language cohort a student is enrolled in.
///
/// The cohort selects which roster table validated the student and which
/// language user-facing messages are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cohort {
    /// Turkish-language track.
    #[serde(rename = "tr")]
    Tr,
    /// English-language track.
    #[serde(rename = "en")]
    En,
}

impl Cohort {
    /// Converts this cohort to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }
}

impl FromStr for Cohort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tr" => Ok(Self::Tr),
            "en" => Ok(Self::En),
            _ => Err(DomainError::InvalidCohort(s.to_string())),
        }
    }
}

impl std::fmt::Display for Cohort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role assigned to a profile.
///
/// Every registered intern is a `Doctor`. `Admin` is reserved for the
/// operators who review the deleted-listing audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Regular marketplace participant.
    #[default]
    #[serde(rename = "doctor")]
    Doctor,
    /// Administrative operator.
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Admin => "admin",
        }
    }

    /// Returns whether this role carries administrative authority.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Self::Doctor),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle state of a shift listing.
///
/// `Available` is the initial state; `Completed` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShiftStatus {
    /// Listed and purchasable. Editable and deletable by the seller.
    #[default]
    #[serde(rename = "available")]
    Available,
    /// A buyer committed; the parties coordinate via messages.
    #[serde(rename = "pending")]
    Pending,
    /// The trade went through. Terminal.
    #[serde(rename = "completed")]
    Completed,
    /// The trade was called off by either party. Terminal.
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl ShiftStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `Available` → `Pending` (purchase)
    /// - `Pending` → `Completed` (seller marks complete)
    /// - `Pending` → `Cancelled` (either party cancels)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Available, Self::Pending)
                | (Self::Pending, Self::Completed | Self::Cancelled)
        )
    }

    /// Returns whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl FromStr for ShiftStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a registered intern's profile.
///
/// A profile is one-to-one with an account (the auth principal). The
/// account reference is immutable; contact fields may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the profile has not been persisted yet.
    pub profile_id: Option<i64>,
    /// The owning account (auth principal). Immutable.
    pub account_id: i64,
    /// Canonical full name, as recorded in the student roster.
    pub full_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Student number (exactly 10 digits, unique across all profiles).
    pub student_number: String,
    /// University name.
    pub university: String,
    /// Language cohort resolved at registration.
    pub cohort: Cohort,
    /// Role of this profile.
    pub role: Role,
    /// Whether the phone number has been verified out-of-band.
    pub phone_verified: bool,
    /// Creation timestamp (ISO 8601 UTC).
    pub created_at: String,
    /// Last-update timestamp (ISO 8601 UTC).
    pub updated_at: String,
}

impl Profile {
    /// Creates a new `Profile` without a persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: i64,
        full_name: String,
        phone_number: String,
        student_number: String,
        university: String,
        cohort: Cohort,
        role: Role,
        created_at: String,
    ) -> Self {
        Self {
            profile_id: None,
            account_id,
            full_name,
            phone_number,
            student_number,
            university,
            cohort,
            role,
            phone_verified: false,
            updated_at: created_at.clone(),
            created_at,
        }
    }
}

/// Represents a duty-shift listing, the unit of trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the shift has not been persisted yet.
    pub shift_id: Option<i64>,
    /// Listing title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Asking price in whole TL (positive, capped).
    pub price: i64,
    /// Calendar date of the duty shift.
    pub shift_date: Date,
    /// Optional clock time the shift starts.
    pub shift_time: Option<Time>,
    /// Duration or category tag (e.g. "16 saat").
    pub duration: Option<String>,
    /// Medical specialty tag.
    pub medical_field: Option<String>,
    /// Lifecycle status.
    pub status: ShiftStatus,
    /// Selling profile's account. Immutable.
    pub seller_id: i64,
    /// Buying profile's account. Set exactly once on purchase.
    pub buyer_id: Option<i64>,
    /// Creation timestamp (ISO 8601 UTC).
    pub created_at: String,
    /// Last-update timestamp (ISO 8601 UTC).
    pub updated_at: String,
}

impl Shift {
    /// Creates a new `Available` shift without a persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        description: String,
        price: i64,
        shift_date: Date,
        shift_time: Option<Time>,
        duration: Option<String>,
        medical_field: Option<String>,
        seller_id: i64,
        created_at: String,
    ) -> Self {
        Self {
            shift_id: None,
            title,
            description,
            price,
            shift_date,
            shift_time,
            duration,
            medical_field,
            status: ShiftStatus::Available,
            seller_id,
            buyer_id: None,
            updated_at: created_at.clone(),
            created_at,
        }
    }

    /// Returns whether the given account is a party to this shift's
    /// transaction (seller, or buyer once one exists).
    #[must_use]
    pub fn is_participant(&self, account_id: i64) -> bool {
        self.seller_id == account_id || self.buyer_id == Some(account_id)
    }

    /// Returns the counterparty of `account_id`, if there is one.
    ///
    /// For the seller this is the buyer (if set); for the buyer it is the
    /// seller. Non-participants get `None`.
    #[must_use]
    pub fn counterparty(&self, account_id: i64) -> Option<i64> {
        if self.seller_id == account_id {
            self.buyer_id
        } else if self.buyer_id == Some(account_id) {
            Some(self.seller_id)
        } else {
            None
        }
    }
}

/// Represents one message between the two parties of a shift transaction.
///
/// Messages are immutable once created, except for `read_at`, which is set
/// when the receiver views the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Canonical identifier assigned by the database.
    pub message_id: Option<i64>,
    /// The shift this message belongs to.
    pub shift_id: i64,
    /// Sending account.
    pub sender_id: i64,
    /// Receiving account.
    pub receiver_id: i64,
    /// Message text.
    pub content: String,
    /// Creation timestamp (ISO 8601 UTC).
    pub created_at: String,
    /// Read timestamp (ISO 8601 UTC); `None` until the receiver views it.
    pub read_at: Option<String>,
}

impl Message {
    /// Creates a new unread `Message` without a persisted ID.
    #[must_use]
    pub const fn new(
        shift_id: i64,
        sender_id: i64,
        receiver_id: i64,
        content: String,
        created_at: String,
    ) -> Self {
        Self {
            message_id: None,
            shift_id,
            sender_id,
            receiver_id,
            content,
            created_at,
            read_at: None,
        }
    }
}

/// Snapshot of a shift taken when an administrator soft-deletes it.
///
/// Rows in this log are permanently erasable only by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedShift {
    /// Canonical identifier assigned by the database.
    pub deleted_shift_id: Option<i64>,
    /// The shift's identifier before deletion.
    pub original_shift_id: i64,
    /// Listing title at deletion time.
    pub title: String,
    /// Description at deletion time.
    pub description: String,
    /// Price at deletion time.
    pub price: i64,
    /// Shift date at deletion time.
    pub shift_date: Date,
    /// Shift time at deletion time.
    pub shift_time: Option<Time>,
    /// Duration tag at deletion time.
    pub duration: Option<String>,
    /// Specialty tag at deletion time.
    pub medical_field: Option<String>,
    /// Status at deletion time.
    pub status: ShiftStatus,
    /// Seller account at deletion time.
    pub seller_id: i64,
    /// Buyer account at deletion time, if any.
    pub buyer_id: Option<i64>,
    /// Account that performed the deletion.
    pub deleted_by: i64,
    /// Deletion timestamp (ISO 8601 UTC).
    pub deleted_at: String,
    /// Stated reason for the deletion.
    pub deletion_reason: Option<String>,
    /// The shift's original creation timestamp.
    pub original_created_at: String,
}
