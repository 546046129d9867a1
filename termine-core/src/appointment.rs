//! The appointment record recovered from prescription text.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One therapy appointment: when, what kind of treatment, and with whom.
///
/// `date` carries no time zone. It is the practice's local wall-clock time
/// exactly as printed on the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Appointment {
    pub date: NaiveDateTime,
    pub therapy_kind: String,
    pub therapist_name: String,
}

impl Appointment {
    pub fn new(
        date: NaiveDateTime,
        therapy_kind: impl Into<String>,
        therapist_name: impl Into<String>,
    ) -> Self {
        Appointment {
            date,
            therapy_kind: therapy_kind.into(),
            therapist_name: therapist_name.into(),
        }
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            self.date.format("%Y-%m-%d %H:%M"),
            self.therapy_kind,
            self.therapist_name
        )
    }
}
