// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.
//!
//! Registration is gated by the student roster: the submitted number and
//! name must match a roster entry before any row is written, and the
//! profile stores the roster's canonical name, not the submitted one.
//! Sessions are opaque bearer tokens with a fixed expiration window.

use std::time::{SystemTime, UNIX_EPOCH};

use nobet_domain::{Cohort, Profile, Role, validate_student_number};
use nobet_persistence::{PersistenceError, SqlitePersistence};
use nobet_roster::{RosterValidation, StudentRoster};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::clock;
use crate::error::{ApiError, AuthError, translate_domain_error};
use crate::request_response::SignUpRequest;

/// Rejection message for a student number that already has a profile.
const DUPLICATE_STUDENT_NUMBER_MESSAGE: &str =
    "Bu öğrenci numarası ile daha önce kayıt olunmuş. Eğer hesabınız varsa giriş yapın.";

/// Rejection message for an email that already has an account.
const DUPLICATE_EMAIL_MESSAGE: &str =
    "Bu e-posta adresi ile daha önce kayıt olunmuş. Giriş yapmayı deneyin.";

/// Sign-in failures over credentials are deliberately indistinguishable.
const INVALID_CREDENTIALS_REASON: &str = "Invalid email or password";

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    /// The new account's ID.
    pub account_id: i64,
    /// The canonical roster name recorded on the profile.
    pub canonical_name: String,
    /// The matched cohort.
    pub cohort: Cohort,
    /// Session token, absent when email verification is pending.
    pub session_token: Option<String>,
    /// Whether the account must verify its email before signing in.
    pub needs_verification: bool,
}

/// Outcome of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    /// Bearer token for subsequent requests.
    pub session_token: String,
    /// The signed-in account's profile.
    pub profile: Profile,
}

/// An authenticated account resolved from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The session row backing this authentication.
    pub session_id: i64,
    /// The authenticated account's ID.
    pub account_id: i64,
    /// The authenticated account's profile.
    pub profile: Profile,
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Session expiration duration (30 days).
    const SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Registers a new account with its profile.
    ///
    /// The student number must be well-formed and the number/name pair
    /// must match the roster; the profile records the roster's canonical
    /// name. When `require_verification` is set, no session is created
    /// and the caller must verify the account's email before signing in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] for a malformed student
    /// number, [`ApiError::RegistrationRejected`] with a user-facing
    /// message for roster and duplicate rejections, or an internal
    /// error if the store fails.
    pub fn sign_up(
        persistence: &mut SqlitePersistence,
        roster: &StudentRoster,
        request: &SignUpRequest,
        require_verification: bool,
        now: OffsetDateTime,
    ) -> Result<SignUpOutcome, ApiError> {
        validate_student_number(&request.student_number).map_err(translate_domain_error)?;
        let student_number = request.student_number.trim();

        let (canonical_name, cohort) = match roster.validate(student_number, &request.full_name) {
            RosterValidation::Valid {
                canonical_name,
                cohort,
            } => (canonical_name, cohort),
            rejected => {
                debug!("Registration rejected by roster for student number {student_number}");
                return Err(ApiError::RegistrationRejected {
                    message: String::from(
                        rejected.user_message().unwrap_or("Registration rejected"),
                    ),
                });
            }
        };

        let email = request.email.trim().to_lowercase();
        if persistence.get_account_by_email(&email)?.is_some() {
            return Err(ApiError::RegistrationRejected {
                message: String::from(DUPLICATE_EMAIL_MESSAGE),
            });
        }
        if persistence
            .get_profile_by_student_number(student_number)?
            .is_some()
        {
            return Err(ApiError::RegistrationRejected {
                message: String::from(DUPLICATE_STUDENT_NUMBER_MESSAGE),
            });
        }

        let now_str = clock::format_instant(now)?;
        let profile = Profile::new(
            0,
            canonical_name.clone(),
            request.phone_number.trim().to_string(),
            student_number.to_string(),
            request.university.trim().to_string(),
            cohort,
            Role::Doctor,
            now_str.clone(),
        );
        let account_id = Self::register_account_and_profile(
            persistence,
            &email,
            &request.password,
            profile,
            &now_str,
        )?;

        let session_token = if require_verification {
            None
        } else {
            Some(Self::start_session(persistence, account_id, now)?)
        };

        info!("Registered account {account_id} for student number {student_number} ({cohort})");
        Ok(SignUpOutcome {
            account_id,
            canonical_name,
            cohort,
            session_token: session_token.clone(),
            needs_verification: session_token.is_none(),
        })
    }

    /// Creates the account row and its profile as a unit.
    ///
    /// If the profile insert fails after the account row exists, the
    /// account is rolled back so no profile-less login is left behind.
    pub(crate) fn register_account_and_profile(
        persistence: &mut SqlitePersistence,
        email: &str,
        password: &str,
        mut profile: Profile,
        now: &str,
    ) -> Result<i64, ApiError> {
        let account_id = persistence
            .create_account(email, password, now)
            .map_err(|err| match err {
                PersistenceError::UniqueViolation(_) => ApiError::RegistrationRejected {
                    message: String::from(DUPLICATE_EMAIL_MESSAGE),
                },
                other => other.into(),
            })?;
        profile.account_id = account_id;

        if let Err(err) = persistence.insert_profile(&profile) {
            if let Err(cleanup_err) = persistence.delete_account(account_id) {
                warn!("Failed to roll back account {account_id}: {cleanup_err}");
            }
            // A UNIQUE violation here means the pre-check lost a race;
            // report it the same way as the pre-check. Anything else is
            // a store failure, not a rejection.
            return Err(match err {
                PersistenceError::UniqueViolation(_) => ApiError::RegistrationRejected {
                    message: String::from(DUPLICATE_STUDENT_NUMBER_MESSAGE),
                },
                other => other.into(),
            });
        }

        Ok(account_id)
    }

    /// Authenticates an account and creates a session.
    ///
    /// An account whose profile is missing cannot sign in; any sessions
    /// it still holds are torn down before the rejection is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthenticationFailed`] for bad credentials,
    /// an unverified email (when `require_verified_email` is set), or a
    /// missing profile.
    pub fn sign_in(
        persistence: &mut SqlitePersistence,
        email: &str,
        password: &str,
        require_verified_email: bool,
        now: OffsetDateTime,
    ) -> Result<SignInOutcome, ApiError> {
        let email = email.trim().to_lowercase();
        let Some(account) = persistence.get_account_by_email(&email)? else {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from(INVALID_CREDENTIALS_REASON),
            });
        };
        if !persistence.verify_password(password, &account.password_hash)? {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from(INVALID_CREDENTIALS_REASON),
            });
        }
        if require_verified_email && !account.email_verified {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Email address is not verified"),
            });
        }

        let Some(profile) = persistence.get_profile_by_account(account.account_id)? else {
            // An account without a profile is unusable; drop any
            // lingering sessions before rejecting.
            persistence.delete_sessions_for_account(account.account_id)?;
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Account has no profile"),
            });
        };

        let session_token = Self::start_session(persistence, account.account_id, now)?;
        info!("Account {} signed in", account.account_id);
        Ok(SignInOutcome {
            session_token,
            profile,
        })
    }

    /// Ends a session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store fails.
    pub fn sign_out(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), ApiError> {
        let removed = persistence.delete_session(session_token)?;
        debug!("Sign-out removed {removed} session(s)");
        Ok(())
    }

    /// Resolves a session token to an authenticated account.
    ///
    /// Expired sessions are deleted on sight. A live session has its
    /// activity timestamp refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthenticationFailed`] for unknown or
    /// expired tokens and for accounts whose profile is gone.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
        now: OffsetDateTime,
    ) -> Result<AuthenticatedUser, ApiError> {
        let Some(session) = persistence.get_session_by_token(session_token)? else {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            });
        };

        let expires_at = clock::parse_instant(&session.expires_at)?;
        if now > expires_at {
            persistence.delete_session(session_token)?;
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let Some(profile) = persistence.get_profile_by_account(session.account_id)? else {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Account has no profile"),
            });
        };

        let now_str = clock::format_instant(now)?;
        persistence.update_session_activity(session.session_id, &now_str)?;

        Ok(AuthenticatedUser {
            session_id: session.session_id,
            account_id: session.account_id,
            profile,
        })
    }

    /// Creates a session row and returns its token.
    fn start_session(
        persistence: &mut SqlitePersistence,
        account_id: i64,
        now: OffsetDateTime,
    ) -> Result<String, ApiError> {
        let session_token = Self::generate_session_token();
        let now_str = clock::format_instant(now)?;
        let expires_at = clock::format_instant(now + Self::SESSION_EXPIRATION)?;
        persistence.create_session(&session_token, account_id, &now_str, &expires_at)?;
        Ok(session_token)
    }

    /// Generates an unguessable session token.
    fn generate_session_token() -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        let random: u64 = rand::random();
        format!("session_{timestamp}_{random:016x}")
    }
}

/// Authorization service for role-based access control.
///
/// Ordinary marketplace actions are authorized against the shift's own
/// participants in the domain layer; this service covers the
/// administrator-only surface.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that `profile` holds the admin role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] for non-admins.
    pub fn authorize_admin(profile: &Profile, action: &str) -> Result<(), AuthError> {
        if profile.role.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("Admin"),
            })
        }
    }
}
