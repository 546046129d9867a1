//! Calendar event built from an appointment.
//!
//! This is the single event shape shared by the `.ics` writer and the
//! remote calendar upload, so both always agree on title, time and location.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::appointment::Appointment;
use crate::config::Config;
use crate::error::{TermineError, TermineResult};

const UID_DOMAIN: &str = "rezept-termine";

/// Appointments taken from a prescription are always booked, so this is the
/// only status we ever write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Confirmed,
}

impl EventStatus {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "CONFIRMED",
        }
    }

    pub fn as_google_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "confirmed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// Unique within one generated document
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    /// Local wall-clock start in `tz`
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub tz: Tz,
    pub status: EventStatus,
}

impl CalendarEvent {
    /// Build the event for `appointment`. `sequence` is the appointment's
    /// position in its document and keeps UIDs apart when two appointments
    /// share a start time.
    pub fn from_appointment(
        appointment: &Appointment,
        config: &Config,
        sequence: usize,
    ) -> TermineResult<Self> {
        let start = appointment.date;

        Ok(CalendarEvent {
            uid: format!(
                "{}-{}@{}",
                start.format("%Y%m%dT%H%M%S"),
                sequence,
                UID_DOMAIN
            ),
            summary: config.display_name(&appointment.therapy_kind).to_string(),
            description: appointment.therapist_name.clone(),
            location: config.location(),
            start,
            end: start + config.duration(),
            tz: config.tz()?,
            status: EventStatus::Confirmed,
        })
    }

    /// Build events for all appointments of one document, numbered in order.
    pub fn from_appointments(
        appointments: &[Appointment],
        config: &Config,
    ) -> TermineResult<Vec<Self>> {
        appointments
            .iter()
            .enumerate()
            .map(|(i, appointment)| Self::from_appointment(appointment, config, i))
            .collect()
    }

    pub fn start_utc(&self) -> TermineResult<DateTime<Utc>> {
        to_utc(self.start, self.tz)
    }

    pub fn end_utc(&self) -> TermineResult<DateTime<Utc>> {
        to_utc(self.end, self.tz)
    }
}

/// Resolve a local wall-clock time in `tz` to an instant.
///
/// Times that occur twice (DST fall-back) resolve to the earlier instant;
/// times skipped by a DST jump are an error.
pub fn to_utc(local: NaiveDateTime, tz: Tz) -> TermineResult<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TermineError::NonexistentLocalTime {
            datetime: local,
            tz: tz.name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_from_appointment_maps_fields() {
        let config = Config::default();
        let appointment = Appointment::new(local(2026, 1, 27, 16, 40), "KG ZNS", "Katja");

        let event = CalendarEvent::from_appointment(&appointment, &config, 3).unwrap();

        assert_eq!(event.uid, "20260127T164000-3@rezept-termine");
        assert_eq!(event.summary, "Krankengymnastik");
        assert_eq!(event.description, "Katja");
        assert_eq!(
            event.location,
            "Therapiezentrum am Stadtpark\nStadtpark 1\n12345 Musterstadt"
        );
        assert_eq!(event.start, local(2026, 1, 27, 16, 40));
        assert_eq!(event.end, local(2026, 1, 27, 17, 10));
        assert_eq!(event.tz, chrono_tz::Europe::Berlin);
        assert_eq!(event.status, EventStatus::Confirmed);
    }

    #[test]
    fn test_unmapped_code_is_used_as_title() {
        let config = Config::default();
        let appointment = Appointment::new(local(2026, 1, 27, 16, 40), "Massage", "Anna");

        let event = CalendarEvent::from_appointment(&appointment, &config, 0).unwrap();

        assert_eq!(event.summary, "Massage");
    }

    #[test]
    fn test_end_follows_configured_duration() {
        let config = Config {
            appointment_duration_minutes: 50,
            ..Config::default()
        };
        let appointment = Appointment::new(local(2026, 1, 27, 23, 40), "MT", "Mike");

        let event = CalendarEvent::from_appointment(&appointment, &config, 0).unwrap();

        assert_eq!(event.end, local(2026, 1, 28, 0, 30));
    }

    #[test]
    fn test_same_start_gets_distinct_uids() {
        let config = Config::default();
        let a = Appointment::new(local(2026, 1, 27, 16, 40), "KG ZNS", "Katja");
        let events = CalendarEvent::from_appointments(&[a.clone(), a], &config).unwrap();

        assert_eq!(events.len(), 2);
        assert_ne!(events[0].uid, events[1].uid);
    }

    #[test]
    fn test_from_appointment_is_deterministic() {
        let config = Config::default();
        let appointment = Appointment::new(local(2026, 3, 3, 9, 0), "O60", "Thomas");

        let first = CalendarEvent::from_appointment(&appointment, &config, 1).unwrap();
        let second = CalendarEvent::from_appointment(&appointment, &config, 1).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_to_utc_winter_and_summer() {
        let berlin = chrono_tz::Europe::Berlin;

        let winter = to_utc(local(2026, 1, 27, 16, 40), berlin).unwrap();
        assert_eq!(winter.naive_utc(), local(2026, 1, 27, 15, 40));

        let summer = to_utc(local(2026, 7, 7, 16, 40), berlin).unwrap();
        assert_eq!(summer.naive_utc(), local(2026, 7, 7, 14, 40));
    }

    #[test]
    fn test_to_utc_rejects_skipped_time() {
        // 2026-03-29 02:30 does not exist in Berlin (clocks jump 02:00 -> 03:00)
        let result = to_utc(local(2026, 3, 29, 2, 30), chrono_tz::Europe::Berlin);
        assert!(matches!(
            result,
            Err(TermineError::NonexistentLocalTime { .. })
        ));
    }
}
