// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel table definitions mirroring `migrations/`.

diesel::table! {
    accounts (account_id) {
        account_id -> BigInt,
        email -> Text,
        password_hash -> Text,
        email_verified -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        account_id -> BigInt,
        created_at -> Text,
        expires_at -> Text,
        last_activity_at -> Text,
    }
}

diesel::table! {
    profiles (profile_id) {
        profile_id -> BigInt,
        account_id -> BigInt,
        full_name -> Text,
        phone_number -> Text,
        student_number -> Text,
        university -> Text,
        cohort -> Text,
        role -> Text,
        phone_verified -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    shifts (shift_id) {
        shift_id -> BigInt,
        title -> Text,
        description -> Text,
        price -> BigInt,
        shift_date -> Text,
        shift_time -> Nullable<Text>,
        duration -> Nullable<Text>,
        medical_field -> Nullable<Text>,
        status -> Text,
        seller_id -> BigInt,
        buyer_id -> Nullable<BigInt>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    deleted_shifts (deleted_shift_id) {
        deleted_shift_id -> BigInt,
        original_shift_id -> BigInt,
        title -> Text,
        description -> Text,
        price -> BigInt,
        shift_date -> Text,
        shift_time -> Nullable<Text>,
        duration -> Nullable<Text>,
        medical_field -> Nullable<Text>,
        status -> Text,
        seller_id -> BigInt,
        buyer_id -> Nullable<BigInt>,
        deleted_by -> BigInt,
        deleted_at -> Text,
        deletion_reason -> Nullable<Text>,
        original_created_at -> Text,
    }
}

diesel::table! {
    messages (message_id) {
        message_id -> BigInt,
        shift_id -> BigInt,
        sender_id -> BigInt,
        receiver_id -> BigInt,
        content -> Text,
        created_at -> Text,
        read_at -> Nullable<Text>,
    }
}

diesel::joinable!(sessions -> accounts (account_id));
diesel::joinable!(profiles -> accounts (account_id));
diesel::joinable!(messages -> shifts (shift_id));

diesel::allow_tables_to_appear_in_same_query!(
    accounts,
    sessions,
    profiles,
    shifts,
    deleted_shifts,
    messages,
);
