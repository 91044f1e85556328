// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database queries.
//!
//! Queries return domain types (or `Option` thereof) and never mutate,
//! with row-to-domain conversion failing fast on corrupt data.

pub mod accounts;
pub mod messages;
pub mod profiles;
pub mod shifts;
