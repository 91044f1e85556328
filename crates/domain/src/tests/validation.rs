// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use crate::{
    DomainError, MAX_DESCRIPTION_LEN, MAX_PRICE, MAX_TITLE_LEN, validate_description,
    validate_listing_fields, validate_message_content, validate_price, validate_shift_date,
    validate_student_number, validate_title,
};
use time::macros::date;

#[test]
fn price_accepts_range_bounds() {
    assert!(validate_price(1).is_ok());
    assert!(validate_price(MAX_PRICE).is_ok());
}

#[test]
fn price_rejects_zero_negative_and_over_cap() {
    for price in [0, -1, MAX_PRICE + 1] {
        let err = validate_price(price).unwrap_err();
        assert_eq!(err, DomainError::InvalidPrice { price });
    }
}

#[test]
fn shift_date_today_is_allowed() {
    let today = date!(2026 - 08 - 25);
    assert!(validate_shift_date(today, today).is_ok());
    assert!(validate_shift_date(date!(2026 - 08 - 26), today).is_ok());
}

#[test]
fn shift_date_in_past_is_rejected() {
    let today = date!(2026 - 08 - 25);
    let err = validate_shift_date(date!(2026 - 08 - 24), today).unwrap_err();
    assert_eq!(
        err,
        DomainError::ShiftDateInPast {
            shift_date: date!(2026 - 08 - 24),
        }
    );
}

#[test]
fn title_must_be_non_blank_and_capped() {
    assert!(validate_title("Kardiyoloji nöbeti").is_ok());
    assert!(matches!(
        validate_title("   ").unwrap_err(),
        DomainError::InvalidTitle(_)
    ));
    let long = "a".repeat(MAX_TITLE_LEN + 1);
    assert!(matches!(
        validate_title(&long).unwrap_err(),
        DomainError::InvalidTitle(_)
    ));
}

#[test]
fn description_cap_counts_characters_not_bytes() {
    // Multi-byte Turkish characters at exactly the cap must pass.
    let at_cap = "ğ".repeat(MAX_DESCRIPTION_LEN);
    assert!(validate_description(&at_cap).is_ok());
    let over = "ğ".repeat(MAX_DESCRIPTION_LEN + 1);
    assert!(validate_description(&over).is_err());
}

#[test]
fn student_number_must_be_ten_digits() {
    assert!(validate_student_number("2021123456").is_ok());
    assert!(validate_student_number(" 2021123456 ").is_ok());
    for bad in ["123", "20211234567", "20211234ab", "", "２０２１１２３４５６"] {
        assert!(
            validate_student_number(bad).is_err(),
            "expected rejection: {bad:?}"
        );
    }
}

#[test]
fn message_content_must_be_non_blank() {
    assert!(validate_message_content("Merhaba").is_ok());
    assert_eq!(
        validate_message_content(" \t ").unwrap_err(),
        DomainError::EmptyMessage
    );
}

#[test]
fn listing_fields_checked_in_order() {
    let today = date!(2026 - 08 - 25);
    // Title failure reported before the bad price.
    let err = validate_listing_fields("", "desc", 0, date!(2026 - 09 - 01), today).unwrap_err();
    assert!(matches!(err, DomainError::InvalidTitle(_)));

    assert!(
        validate_listing_fields(
            "Pediatri nöbeti",
            "Hafta sonu",
            1_500,
            date!(2026 - 09 - 01),
            today
        )
        .is_ok()
    );
}
