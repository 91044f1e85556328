// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod lifecycle;
mod message_window;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use lifecycle::{
    authorize_cancel, authorize_complete, authorize_delete, authorize_edit, authorize_message,
    authorize_purchase,
};
pub use message_window::{can_send_message, days_until, message_window_closes_at};
pub use types::{Cohort, DeletedShift, Message, Profile, Role, Shift, ShiftStatus};
pub use validation::{
    MAX_DESCRIPTION_LEN, MAX_PRICE, MAX_TITLE_LEN, STUDENT_NUMBER_LEN, validate_description,
    validate_listing_fields, validate_message_content, validate_price, validate_shift_date,
    validate_student_number, validate_title,
};
