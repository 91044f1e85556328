// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the service boundary layer.

use nobet_domain::DomainError;
use nobet_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent
/// the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the account does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Registration was rejected.
    ///
    /// The message is user-facing, in the applicant's cohort language,
    /// and is the complete explanation; no further detail is disclosed.
    RegistrationRejected {
        /// The user-facing rejection message.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::RegistrationRejected { message } => {
                write!(f, "Registration rejected: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("record"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into the API error vocabulary.
///
/// Actor mismatches become authorization failures, user-correctable
/// input becomes `InvalidInput` keyed by field, state-machine rejections
/// become named rule violations, and storage-corruption findings become
/// internal errors.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message = err.to_string();
    match err {
        DomainError::InvalidTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message,
        },
        DomainError::ShiftNotAvailable { .. } => ApiError::DomainRuleViolation {
            rule: String::from("shift_available"),
            message,
        },
        DomainError::OwnShiftPurchase => ApiError::DomainRuleViolation {
            rule: String::from("no_self_purchase"),
            message,
        },
        DomainError::ShiftNotEditable { .. } => ApiError::DomainRuleViolation {
            rule: String::from("editable_listing"),
            message,
        },
        DomainError::MessageWindowClosed { .. } => ApiError::DomainRuleViolation {
            rule: String::from("message_window"),
            message,
        },
        DomainError::NotSeller { action } => ApiError::Unauthorized {
            action: String::from(action),
            required_role: String::from("seller"),
        },
        DomainError::NotParticipant => ApiError::Unauthorized {
            action: String::from("participate"),
            required_role: String::from("participant"),
        },
        DomainError::InvalidPrice { .. } => ApiError::InvalidInput {
            field: String::from("price"),
            message,
        },
        DomainError::ShiftDateInPast { .. } => ApiError::InvalidInput {
            field: String::from("shift_date"),
            message,
        },
        DomainError::InvalidTitle(_) => ApiError::InvalidInput {
            field: String::from("title"),
            message,
        },
        DomainError::InvalidDescription(_) => ApiError::InvalidInput {
            field: String::from("description"),
            message,
        },
        DomainError::InvalidStudentNumber(_) => ApiError::InvalidInput {
            field: String::from("student_number"),
            message,
        },
        DomainError::EmptyMessage => ApiError::InvalidInput {
            field: String::from("content"),
            message,
        },
        DomainError::InvalidStatus(_)
        | DomainError::InvalidRole(_)
        | DomainError::InvalidCohort(_)
        | DomainError::DateArithmeticOverflow { .. }
        | DomainError::DateParseError { .. }
        | DomainError::TimeParseError { .. } => ApiError::Internal { message },
    }
}
