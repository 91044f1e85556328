// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Messaging tests: counterparty routing, the post-shift window, and
//! the conversation inbox.

use nobet_persistence::PersistenceError;
use time::macros::datetime;

use super::helpers::{
    TR_NAME, TR_NAME_2, TR_NAME_3, TR_NUMBER, TR_NUMBER_2, TR_NUMBER_3, later, listed_shift,
    registered, roster, store,
};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::SendMessageRequest;

fn message(content: &str) -> SendMessageRequest {
    SendMessageRequest {
        content: content.to_string(),
    }
}

#[test]
fn messaging_requires_a_committed_counterparty() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let shift_id = listed_shift(&mut store, seller);

    let err =
        handlers::send_message(&mut store, seller, shift_id, &message("Merhaba"), later())
            .unwrap_err();
    assert!(
        matches!(err, ApiError::DomainRuleViolation { rule, .. } if rule == "message_counterparty")
    );
}

#[test]
fn third_parties_may_neither_send_nor_read() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");
    let (outsider, _) = registered(&mut store, &roster, TR_NUMBER_3, TR_NAME_3, "o@example.com");
    let shift_id = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();

    let err =
        handlers::send_message(&mut store, outsider, shift_id, &message("Merhaba"), later())
            .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err = handlers::get_conversation(&mut store, outsider, shift_id, later()).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn blank_messages_are_rejected() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");
    let shift_id = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();

    let err =
        handlers::send_message(&mut store, buyer, shift_id, &message("   "), later()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "content"));
}

#[test]
fn conversation_round_trip_with_read_repair() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");
    let shift_id = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();

    let sent = handlers::send_message(
        &mut store,
        buyer,
        shift_id,
        &message("Nöbet hâlâ uygun mu?"),
        later(),
    )
    .unwrap();
    assert_eq!(sent.sender_id, buyer);
    assert_eq!(sent.receiver_id, seller);
    assert_eq!(sent.content, "Nöbet hâlâ uygun mu?");
    assert_eq!(sent.read_at, None);

    assert_eq!(handlers::unread_message_total(&mut store, seller).unwrap(), 1);

    // The seller opens the conversation; their unread message is
    // repaired to read.
    let conversation =
        handlers::get_conversation(&mut store, seller, shift_id, later()).unwrap();
    assert!(conversation.window_open);
    assert_eq!(conversation.messages.len(), 1);
    assert!(conversation.messages[0].read_at.is_some());
    assert_eq!(handlers::unread_message_total(&mut store, seller).unwrap(), 0);
}

#[test]
fn message_window_closes_after_midnight_of_the_next_day() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");
    // The shared fixture lists the shift for 2026-04-12.
    let shift_id = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();

    // Exactly midnight of the day after is still inside the window.
    let boundary = datetime!(2026-04-13 00:00:00 UTC);
    handlers::send_message(&mut store, buyer, shift_id, &message("Son dakika"), boundary).unwrap();

    let past_boundary = datetime!(2026-04-13 00:00:01 UTC);
    let err =
        handlers::send_message(&mut store, buyer, shift_id, &message("Geç kaldım"), past_boundary)
            .unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { rule, .. } if rule == "message_window"));

    // Reading stays open after the window closes.
    let conversation =
        handlers::get_conversation(&mut store, seller, shift_id, past_boundary).unwrap();
    assert!(!conversation.window_open);
    assert_eq!(conversation.messages.len(), 1);
}

#[test]
fn inbox_lists_only_shifts_with_a_counterparty() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let (buyer, _) = registered(&mut store, &roster, TR_NUMBER_2, TR_NAME_2, "b@example.com");

    let sold = listed_shift(&mut store, seller);
    let _unsold = listed_shift(&mut store, seller);
    handlers::purchase_shift(&mut store, buyer, sold, later()).unwrap();
    handlers::send_message(&mut store, buyer, sold, &message("Merhaba"), later()).unwrap();

    let inbox = handlers::list_conversations(&mut store, seller).unwrap();
    assert_eq!(inbox.len(), 1);
    let row = &inbox[0];
    assert_eq!(row.shift_id, sold);
    assert_eq!(row.counterparty_id, buyer);
    assert_eq!(row.counterparty_name.as_deref(), Some(TR_NAME_2));
    assert_eq!(row.unread_count, 1);
    assert_eq!(
        row.last_message.as_ref().map(|m| m.content.as_str()),
        Some("Merhaba")
    );

    // The buyer sees the same conversation with nothing unread.
    let inbox = handlers::list_conversations(&mut store, buyer).unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].counterparty_id, seller);
    assert_eq!(inbox[0].unread_count, 0);
}

#[test]
fn secondary_read_failures_are_dropped_not_fatal() {
    // One bad secondary read degrades its field; it must never turn
    // into an error for the surrounding view.
    assert_eq!(handlers::degrade(Ok(5), "unread count", 1), Some(5));
    assert_eq!(
        handlers::degrade::<i64>(
            Err(PersistenceError::QueryFailed(String::from("disk I/O error"))),
            "unread count",
            1,
        ),
        None
    );
}

#[test]
fn inbox_survives_a_counterparty_without_a_profile() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let shift_id = listed_shift(&mut store, seller);

    // A bare account with no profile can still hold the buyer side.
    let buyer = store
        .create_account("profilsiz@example.com", "hunter2-secret", "2026-03-01T10:00:00Z")
        .unwrap();
    handlers::purchase_shift(&mut store, buyer, shift_id, later()).unwrap();

    let inbox = handlers::list_conversations(&mut store, seller).unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].counterparty_id, buyer);
    assert_eq!(inbox[0].counterparty_name, None);
    assert_eq!(inbox[0].last_message, None);
    assert_eq!(inbox[0].unread_count, 0);
}
