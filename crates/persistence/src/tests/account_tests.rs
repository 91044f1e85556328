// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{LATER, NOW, registered_account, store};
use crate::PersistenceError;

#[test]
fn create_account_stores_hash_not_password() {
    let mut store = store();
    let account_id = store.create_account("intern@example.com", "hunter2-secret", NOW).unwrap();

    let account = store
        .get_account_by_email("intern@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(account.account_id, account_id);
    assert!(!account.email_verified);
    assert_ne!(account.password_hash, "hunter2-secret");
    assert!(store.verify_password("hunter2-secret", &account.password_hash).unwrap());
    assert!(!store.verify_password("wrong", &account.password_hash).unwrap());
}

#[test]
fn duplicate_email_is_rejected() {
    let mut store = store();
    store.create_account("intern@example.com", "pw-one-111", NOW).unwrap();
    let result = store.create_account("intern@example.com", "pw-two-222", NOW);
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn unknown_email_and_id_return_none() {
    let mut store = store();
    assert!(store.get_account_by_email("nobody@example.com").unwrap().is_none());
    assert!(store.get_account_by_id(999).unwrap().is_none());
}

#[test]
fn mark_email_verified_flips_flag() {
    let mut store = store();
    let account_id = store.create_account("intern@example.com", "hunter2-secret", NOW).unwrap();
    assert_eq!(store.mark_email_verified(account_id).unwrap(), 1);
    let account = store.get_account_by_id(account_id).unwrap().unwrap();
    assert!(account.email_verified);
}

#[test]
fn session_round_trip() {
    let mut store = store();
    let account_id = store.create_account("intern@example.com", "hunter2-secret", NOW).unwrap();

    store
        .create_session("token-abc", account_id, NOW, "2026-03-31T10:00:00Z")
        .unwrap();

    let session = store.get_session_by_token("token-abc").unwrap().unwrap();
    assert_eq!(session.account_id, account_id);
    assert_eq!(session.expires_at, "2026-03-31T10:00:00Z");
    assert_eq!(session.last_activity_at, NOW);

    store.update_session_activity(session.session_id, LATER).unwrap();
    let refreshed = store.get_session_by_token("token-abc").unwrap().unwrap();
    assert_eq!(refreshed.last_activity_at, LATER);

    assert_eq!(store.delete_session("token-abc").unwrap(), 1);
    assert!(store.get_session_by_token("token-abc").unwrap().is_none());
}

#[test]
fn delete_expired_sessions_uses_lexicographic_timestamps() {
    let mut store = store();
    let account_id = store.create_account("intern@example.com", "hunter2-secret", NOW).unwrap();

    store
        .create_session("expired", account_id, NOW, "2026-03-01T09:00:00Z")
        .unwrap();
    store
        .create_session("live", account_id, NOW, "2026-04-01T09:00:00Z")
        .unwrap();

    assert_eq!(store.delete_expired_sessions(NOW).unwrap(), 1);
    assert!(store.get_session_by_token("expired").unwrap().is_none());
    assert!(store.get_session_by_token("live").unwrap().is_some());
}

#[test]
fn deleting_account_cascades_sessions_and_profile() {
    let mut store = store();
    let account_id = registered_account(&mut store, "intern@example.com", "2021010001");
    store
        .create_session("token-abc", account_id, NOW, "2026-03-31T10:00:00Z")
        .unwrap();

    assert_eq!(store.delete_account(account_id).unwrap(), 1);
    assert!(store.get_session_by_token("token-abc").unwrap().is_none());
    assert!(store.get_profile_by_account(account_id).unwrap().is_none());
}

#[test]
fn profile_round_trip_preserves_cohort_and_role() {
    let mut store = store();
    let account_id = registered_account(&mut store, "intern@example.com", "2021010001");

    let profile = store.get_profile_by_account(account_id).unwrap().unwrap();
    assert!(profile.profile_id.is_some());
    assert_eq!(profile.student_number, "2021010001");
    assert_eq!(profile.cohort, nobet_domain::Cohort::Tr);
    assert_eq!(profile.role, nobet_domain::Role::Doctor);
    assert!(!profile.phone_verified);

    let by_number = store
        .get_profile_by_student_number("2021010001")
        .unwrap()
        .unwrap();
    assert_eq!(by_number.account_id, account_id);
}

#[test]
fn duplicate_student_number_is_rejected() {
    let mut store = store();
    registered_account(&mut store, "first@example.com", "2021010001");

    let second = store.create_account("second@example.com", "hunter2-secret", NOW).unwrap();
    let duplicate = nobet_domain::Profile::new(
        second,
        String::from("Someone Else"),
        String::from("+905551111111"),
        String::from("2021010001"),
        String::from("Ege Üniversitesi"),
        nobet_domain::Cohort::Tr,
        nobet_domain::Role::Doctor,
        NOW.to_string(),
    );
    // The duplicate surfaces as a UNIQUE violation, not a generic query
    // failure, so callers can tell it apart from an outage.
    assert!(matches!(
        store.insert_profile(&duplicate),
        Err(PersistenceError::UniqueViolation(_))
    ));
}

#[test]
fn update_profile_contact_leaves_identity_untouched() {
    let mut store = store();
    let account_id = registered_account(&mut store, "intern@example.com", "2021010001");

    assert_eq!(
        store
            .update_profile_contact(account_id, "+905559999999", "Hacettepe", LATER)
            .unwrap(),
        1
    );

    let profile = store.get_profile_by_account(account_id).unwrap().unwrap();
    assert_eq!(profile.phone_number, "+905559999999");
    assert_eq!(profile.university, "Hacettepe");
    assert_eq!(profile.updated_at, LATER);
    assert_eq!(profile.student_number, "2021010001");
    assert_eq!(profile.created_at, NOW);
}

#[test]
fn mark_phone_verified_flips_flag() {
    let mut store = store();
    let account_id = registered_account(&mut store, "intern@example.com", "2021010001");
    assert_eq!(store.mark_phone_verified(account_id, LATER).unwrap(), 1);
    let profile = store.get_profile_by_account(account_id).unwrap().unwrap();
    assert!(profile.phone_verified);
}
