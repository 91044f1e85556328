// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary layer for the Nobet Market.
//!
//! This crate sits between the HTTP server and the persistence layer.
//! It owns session-based authentication, the registration gate over the
//! student roster, role checks for the administrator surface, and the
//! handler functions that run domain guards before conditional store
//! writes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod clock;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedUser, AuthenticationService, AuthorizationService, SignInOutcome, SignUpOutcome,
};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use handlers::{
    admin_delete_shift, cancel_shift, complete_shift, create_shift, delete_shift, get_conversation,
    get_profile, get_shift, list_available_shifts, list_conversations, list_deleted_shifts,
    list_my_purchases, list_my_shifts, list_sales_history, purchase_shift, purge_deleted_shift,
    send_message, sign_in, sign_out, sign_up, unread_message_total, update_profile, update_shift,
};
pub use request_response::{
    AdminDeleteShiftRequest, ConversationSummary, ConversationView, CreateShiftRequest,
    DeletedShiftView, MessageView, ProfileView, SendMessageRequest, ShiftView, SignInRequest,
    SignInResponse, SignUpRequest, SignUpResponse, UpdateProfileRequest, UpdateShiftRequest,
};
