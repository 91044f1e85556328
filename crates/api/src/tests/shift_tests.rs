// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Listing lifecycle tests: create, edit, delete, and the
//! purchase/complete/cancel state machine.

use time::macros::datetime;

use super::helpers::{
    TR_NAME, TR_NAME_2, TR_NAME_3, TR_NUMBER, TR_NUMBER_2, TR_NUMBER_3, later, listed_shift,
    listing_request, now, registered, roster, store,
};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::UpdateShiftRequest;

fn update_request() -> UpdateShiftRequest {
    UpdateShiftRequest {
        title: String::from("Dahiliye nöbeti"),
        description: String::from("Sabah devri"),
        price: 2000,
        shift_date: String::from("2026-05-01"),
        shift_time: None,
        duration: Some(String::from("24 saat")),
        medical_field: Some(String::from("Dahiliye")),
    }
}

#[test]
fn create_listing_round_trip() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");

    let view = handlers::create_shift(&mut store, seller, &listing_request(), now()).unwrap();
    assert_eq!(view.title, "Acil servis gece nöbeti");
    assert_eq!(view.price, 1500);
    assert_eq!(view.shift_date, "2026-04-12");
    assert_eq!(view.remaining, "42 gün kaldı");
    assert_eq!(view.shift_time.as_deref(), Some("20:00:00"));
    assert_eq!(view.status, "available");
    assert_eq!(view.seller_id, seller);
    assert_eq!(view.buyer_id, None);
    assert_eq!(view.created_at, "2026-03-01T10:00:00Z");
}

#[test]
fn create_listing_validates_fields() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");

    let mut past_date = listing_request();
    past_date.shift_date = String::from("2026-02-28");
    let err = handlers::create_shift(&mut store, seller, &past_date, now()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "shift_date"));

    let mut malformed_date = listing_request();
    malformed_date.shift_date = String::from("12-04-2026");
    let err = handlers::create_shift(&mut store, seller, &malformed_date, now()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "shift_date"));

    let mut free = listing_request();
    free.price = 0;
    let err = handlers::create_shift(&mut store, seller, &free, now()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "price"));

    let mut exorbitant = listing_request();
    exorbitant.price = 10_001;
    let err = handlers::create_shift(&mut store, seller, &exorbitant, now()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "price"));

    let mut untitled = listing_request();
    untitled.title = String::from("   ");
    let err = handlers::create_shift(&mut store, seller, &untitled, now()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "title"));
}

#[test]
fn only_the_seller_may_edit_and_only_while_available() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");
    let shift_id = listed_shift(&mut store, seller);

    let err =
        handlers::update_shift(&mut store, buyer, shift_id, &update_request(), now()).unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("edit"),
            required_role: String::from("seller"),
        }
    );

    let view =
        handlers::update_shift(&mut store, seller, shift_id, &update_request(), later()).unwrap();
    assert_eq!(view.title, "Dahiliye nöbeti");
    assert_eq!(view.price, 2000);
    assert_eq!(view.shift_date, "2026-05-01");
    assert_eq!(view.shift_time, None);

    handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();
    let err =
        handlers::update_shift(&mut store, seller, shift_id, &update_request(), later()).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { rule, .. } if rule == "editable_listing"));
}

#[test]
fn only_the_seller_may_delete() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (other, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "o@example.com");
    let shift_id = listed_shift(&mut store, seller);

    let err = handlers::delete_shift(&mut store, other, shift_id).unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("delete"),
            required_role: String::from("seller"),
        }
    );

    handlers::delete_shift(&mut store, seller, shift_id).unwrap();
    let err = handlers::get_shift(&mut store, shift_id, later()).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn purchase_claims_the_shift_once() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");
    let (rival, _) = registered(&mut store, &roster, TR_NUMBER_3, TR_NAME_3, "r@example.com");
    let shift_id = listed_shift(&mut store, seller);

    let view = handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();
    assert_eq!(view.status, "pending");
    assert_eq!(view.buyer_id, Some(buyer));

    let err = handlers::purchase_shift(&mut store, rival, shift_id, later()).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { rule, .. } if rule == "shift_available"));
}

#[test]
fn seller_cannot_buy_their_own_listing() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let shift_id = listed_shift(&mut store, seller);

    let err = handlers::purchase_shift(&mut store, seller, shift_id, later()).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { rule, .. } if rule == "no_self_purchase"));
}

#[test]
fn purchase_of_missing_shift_reports_not_found() {
    let mut store = store();
    let roster = roster();
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "b@example.com");
    let err = handlers::purchase_shift(&mut store, buyer, 404, later()).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn completion_is_seller_only_and_terminal() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");
    let shift_id = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();

    let err = handlers::complete_shift(&mut store, buyer, shift_id, later()).unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("complete"),
            required_role: String::from("seller"),
        }
    );

    let view = handlers::complete_shift(&mut store, seller, shift_id, later()).unwrap();
    assert_eq!(view.status, "completed");

    let err = handlers::complete_shift(&mut store, seller, shift_id, later()).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { rule, .. } if rule == "status_transition"));
}

#[test]
fn either_party_may_cancel_and_the_buyer_is_kept() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");
    let (outsider, _) = registered(&mut store, &roster, TR_NUMBER_3, TR_NAME_3, "o@example.com");
    let shift_id = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();

    let err = handlers::cancel_shift(&mut store, outsider, shift_id, later()).unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("participate"),
            required_role: String::from("participant"),
        }
    );

    let view = handlers::cancel_shift(&mut store, buyer, shift_id, later()).unwrap();
    assert_eq!(view.status, "cancelled");
    assert_eq!(view.buyer_id, Some(buyer));
}

#[test]
fn cancel_requires_a_pending_trade() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let shift_id = listed_shift(&mut store, seller);

    let err = handlers::cancel_shift(&mut store, seller, shift_id, later()).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { rule, .. } if rule == "status_transition"));
}

#[test]
fn marketplace_listing_excludes_claimed_shifts_and_filters_by_field() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");

    let acil = listed_shift(&mut store, seller);
    let mut dahiliye_request = listing_request();
    dahiliye_request.medical_field = Some(String::from("Dahiliye"));
    let dahiliye = handlers::create_shift(&mut store, seller, &dahiliye_request, now())
        .unwrap()
        .shift_id;
    let claimed = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, claimed, later()).unwrap();

    let all = handlers::list_available_shifts(&mut store, None, later()).unwrap();
    let ids: Vec<i64> = all.iter().map(|v| v.shift_id).collect();
    assert!(ids.contains(&acil));
    assert!(ids.contains(&dahiliye));
    assert!(!ids.contains(&claimed));

    let filtered = handlers::list_available_shifts(&mut store, Some("Dahiliye"), later()).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].shift_id, dahiliye);
}

#[test]
fn history_views_split_sales_and_purchases() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");

    let sold = listed_shift(&mut store, seller);
    let _unsold = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, sold, later()).unwrap();

    assert_eq!(
        handlers::list_my_shifts(&mut store, seller, later()).unwrap().len(),
        2
    );

    let sales = handlers::list_sales_history(&mut store, seller, later()).unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].shift_id, sold);

    let purchases = handlers::list_my_purchases(&mut store, buyer, later()).unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].shift_id, sold);
}

#[test]
fn remaining_label_tracks_the_request_clock() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    // The shared fixture lists the shift for 2026-04-12.
    let shift_id = listed_shift(&mut store, seller);

    let mut at = |now| handlers::get_shift(&mut store, shift_id, now).unwrap().remaining;
    assert_eq!(at(datetime!(2026-04-05 09:00:00 UTC)), "Son 7 gün");
    assert_eq!(at(datetime!(2026-04-11 23:00:00 UTC)), "Yarın");
    assert_eq!(at(datetime!(2026-04-12 08:00:00 UTC)), "Bugün");
    assert_eq!(at(datetime!(2026-04-14 08:00:00 UTC)), "Geçmiş");
}
