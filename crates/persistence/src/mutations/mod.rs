// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database mutations.
//!
//! All mutations take an explicit connection and an explicit `now`
//! timestamp so callers control the clock. Lifecycle transitions are
//! expressed as conditional `UPDATE`s; the affected-row count is the
//! arbitration result under concurrent access.

pub mod accounts;
pub mod messages;
pub mod profiles;
pub mod sessions;
pub mod shifts;
