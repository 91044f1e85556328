// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrator-surface authorization and audit-log tests.

use super::helpers::{
    TR_NAME, TR_NUMBER, admin, later, listed_shift, registered, roster, store,
};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::AdminDeleteShiftRequest;

fn delete_request(reason: Option<&str>) -> AdminDeleteShiftRequest {
    AdminDeleteShiftRequest {
        reason: reason.map(String::from),
    }
}

#[test]
fn doctors_are_shut_out_of_the_admin_surface() {
    let mut store = store();
    let roster = roster();
    let (doctor_id, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "d@example.com");
    let doctor = store.get_profile_by_account(doctor_id).unwrap().unwrap();
    let shift_id = listed_shift(&mut store, doctor_id);

    let err =
        handlers::admin_delete_shift(&mut store, &doctor, shift_id, &delete_request(None), later())
            .unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("admin_delete_shift"),
            required_role: String::from("Admin"),
        }
    );

    let err = handlers::list_deleted_shifts(&mut store, &doctor).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err = handlers::purge_deleted_shift(&mut store, &doctor, 1).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    // The listing is untouched.
    assert!(handlers::get_shift(&mut store, shift_id, later()).is_ok());
}

#[test]
fn admin_deletion_snapshots_into_the_audit_log() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let admin = admin(&mut store);
    let shift_id = listed_shift(&mut store, seller);

    let snapshot_id = handlers::admin_delete_shift(
        &mut store,
        &admin,
        shift_id,
        &delete_request(Some("Mükerrer ilan")),
        later(),
    )
    .unwrap();

    let err = handlers::get_shift(&mut store, shift_id, later()).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));

    let log = handlers::list_deleted_shifts(&mut store, &admin).unwrap();
    assert_eq!(log.len(), 1);
    let entry = &log[0];
    assert_eq!(entry.deleted_shift_id, snapshot_id);
    assert_eq!(entry.original_shift_id, shift_id);
    assert_eq!(entry.title, "Acil servis gece nöbeti");
    assert_eq!(entry.seller_id, seller);
    assert_eq!(entry.deleted_by, admin.account_id);
    assert_eq!(entry.deleted_at, "2026-03-01T11:00:00Z");
    assert_eq!(entry.deletion_reason.as_deref(), Some("Mükerrer ilan"));
    assert_eq!(entry.original_created_at, "2026-03-01T10:00:00Z");
}

#[test]
fn purge_erases_a_snapshot_permanently() {
    let mut store = store();
    let roster = roster();
    let (seller, _) = registered(&mut store, &roster, TR_NUMBER, TR_NAME, "s@example.com");
    let admin = admin(&mut store);
    let shift_id = listed_shift(&mut store, seller);
    let snapshot_id =
        handlers::admin_delete_shift(&mut store, &admin, shift_id, &delete_request(None), later())
            .unwrap();

    handlers::purge_deleted_shift(&mut store, &admin, snapshot_id).unwrap();
    assert!(handlers::list_deleted_shifts(&mut store, &admin).unwrap().is_empty());

    let err = handlers::purge_deleted_shift(&mut store, &admin, snapshot_id).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn admin_deletion_of_missing_shift_reports_not_found() {
    let mut store = store();
    let admin = admin(&mut store);
    let err =
        handlers::admin_delete_shift(&mut store, &admin, 404, &delete_request(None), later())
            .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}
