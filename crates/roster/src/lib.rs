// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student roster lookup and identity validation.
//!
//! Registration is restricted to interns on the faculty roster. The
//! roster consists of two student-number → canonical-name tables, one per
//! language cohort, produced offline from the registrar's spreadsheets
//! and compiled into the binary as JSON.
//!
//! ## Invariants
//!
//! - Lookup is deterministic and side-effect free.
//! - The `tr` table is consulted before the `en` table; on (unexpected)
//!   overlap the `tr` entry wins. Disjointness of the source tables is
//!   not assumed.
//! - Name comparison is exact after trimming and uppercasing; no fuzzy
//!   matching, no whitespace collapsing.
//! - The canonical name is returned with its original casing.
//!
//! Callers must validate the student-number format (exactly 10 digits,
//! `nobet_domain::validate_student_number`) before consulting the roster.

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

use nobet_domain::Cohort;
use std::collections::HashMap;


/// Embedded roster table for the Turkish cohort.
const TR_STUDENTS_JSON: &str = include_str!("../data/tr_students.json");

/// Embedded roster table for the English cohort.
const EN_STUDENTS_JSON: &str = include_str!("../data/en_students.json");

/// Errors that can occur while loading a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A roster table failed to parse.
    ParseError {
        /// The cohort whose table failed.
        cohort: Cohort,
        /// The parse error message.
        error: String,
    },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseError { cohort, error } => {
                write!(f, "Failed to parse {cohort} roster table: {error}")
            }
        }
    }
}

impl std::error::Error for RosterError {}

/// Outcome of validating a submitted student number and name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterValidation {
    /// The pair matches a roster entry.
    Valid {
        /// The canonical full name, with the roster's original casing.
        canonical_name: String,
        /// The cohort whose table matched.
        cohort: Cohort,
    },
    /// The number is on the roster but the submitted name differs.
    NameMismatch {
        /// The cohort whose table holds the number.
        cohort: Cohort,
    },
    /// The number is on neither table.
    NotFound,
}

impl RosterValidation {
    /// Returns whether this outcome permits registration.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// User-facing message for rejection outcomes, in the cohort's
    /// language. Valid outcomes have no message.
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid { .. } => None,
            Self::NameMismatch { cohort: Cohort::Tr } => Some(
                "Öğrenci numarası doğru ancak isim uyuşmuyor. İsminizi büyük harflerle yazdığınızdan emin olun.",
            ),
            Self::NameMismatch { cohort: Cohort::En } => Some(
                "Student number is correct but name doesn't match. Please write your name in capital letters.",
            ),
            Self::NotFound => {
                Some("Bu öğrenci numarası sistemde bulunamadı. Lütfen numaranızı kontrol edin.")
            }
        }
    }
}

/// Per-cohort roster entry counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterCounts {
    /// Entries in the Turkish table.
    pub turkish: usize,
    /// Entries in the English table.
    pub english: usize,
    /// Total entries across both tables.
    pub total: usize,
}

/// The student roster: two disjoint-by-convention lookup tables.
#[derive(Debug, Clone)]
pub struct StudentRoster {
    tr: HashMap<String, String>,
    en: HashMap<String, String>,
}

impl StudentRoster {
    /// Loads the roster tables compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::ParseError`] if an embedded table is
    /// malformed.
    pub fn embedded() -> Result<Self, RosterError> {
        let tr: HashMap<String, String> =
            serde_json::from_str(TR_STUDENTS_JSON).map_err(|e| RosterError::ParseError {
                cohort: Cohort::Tr,
                error: e.to_string(),
            })?;
        let en: HashMap<String, String> =
            serde_json::from_str(EN_STUDENTS_JSON).map_err(|e| RosterError::ParseError {
                cohort: Cohort::En,
                error: e.to_string(),
            })?;
        Ok(Self { tr, en })
    }

    /// Builds a roster from explicit tables. Used by tests and tooling.
    #[must_use]
    pub const fn from_tables(tr: HashMap<String, String>, en: HashMap<String, String>) -> Self {
        Self { tr, en }
    }

    /// Validates a submitted student number and full name pair.
    ///
    /// Both inputs are trimmed; names are compared uppercased. The `tr`
    /// table is checked first.
    #[must_use]
    pub fn validate(&self, student_number: &str, full_name: &str) -> RosterValidation {
        let number = student_number.trim();
        let submitted = full_name.trim().to_uppercase();

        for (table, cohort) in [(&self.tr, Cohort::Tr), (&self.en, Cohort::En)] {
            if let Some(canonical) = table.get(number) {
                return if canonical.to_uppercase() == submitted {
                    RosterValidation::Valid {
                        canonical_name: canonical.clone(),
                        cohort,
                    }
                } else {
                    RosterValidation::NameMismatch { cohort }
                };
            }
        }

        RosterValidation::NotFound
    }

    /// Reports per-cohort entry counts.
    #[must_use]
    pub fn counts(&self) -> RosterCounts {
        RosterCounts {
            turkish: self.tr.len(),
            english: self.en.len(),
            total: self.tr.len() + self.en.len(),
        }
    }
}
