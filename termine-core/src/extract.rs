//! Appointment extraction from prescription text.
//!
//! Appointment lines look like `Di27.01.202616:40KG ZNS (Katja)` when the
//! PDF text layer glues everything together, or `Do 08.01.2026 14:30 O60 (Thomas)`
//! when it keeps the spacing. The scanner accepts both:
//!
//! ```text
//! <2 letters> ws* <DD.MM.YYYY> ws* <HH:MM> <treatment code> ( <therapist> )
//! ```
//!
//! The weekday token is not checked against the date. The treatment code is
//! everything between the time and the opening parenthesis.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};

use crate::appointment::Appointment;

const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

static APPOINTMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<weekday>[A-Za-z]{2})\s*(?P<date>[0-9]{2}\.[0-9]{2}\.[0-9]{4})\s*(?P<time>[0-9]{2}:[0-9]{2})(?P<kind>[^(]+)\((?P<name>[^)]+)\)",
    )
    .expect("valid appointment regex")
});

/// Result of a single pattern hit in the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Matched(Appointment),
    /// The text had the right shape but the date does not exist (e.g. `31.02.2026`).
    InvalidDate {
        raw: String,
        error: chrono::ParseError,
    },
}

/// Scan `text` for appointment-shaped substrings, left to right, without overlap.
pub fn scan(text: &str) -> impl Iterator<Item = ScanOutcome> + '_ {
    APPOINTMENT_PATTERN.captures_iter(text).map(to_outcome)
}

/// Extract all valid appointments from `text` in order of occurrence.
///
/// Never fails. Text without appointments yields an empty vector, and hits
/// with an impossible date are skipped with a warning.
pub fn extract(text: &str) -> Vec<Appointment> {
    scan(text)
        .filter_map(|outcome| match outcome {
            ScanOutcome::Matched(appointment) => Some(appointment),
            ScanOutcome::InvalidDate { raw, error } => {
                tracing::warn!(%raw, %error, "skipping appointment with invalid date");
                None
            }
        })
        .collect()
}

fn to_outcome(caps: Captures<'_>) -> ScanOutcome {
    let datetime = format!("{} {}", &caps["date"], &caps["time"]);

    match NaiveDateTime::parse_from_str(&datetime, DATETIME_FORMAT) {
        Ok(date) => ScanOutcome::Matched(Appointment {
            date,
            therapy_kind: caps["kind"].trim().to_string(),
            therapist_name: caps["name"].trim().to_string(),
        }),
        Err(error) => ScanOutcome::InvalidDate {
            raw: caps[0].to_string(),
            error,
        },
    }
}
