//! ICS file generation.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};

use crate::event::CalendarEvent;

const PRODID: &str = "-//rezept-termine//Therapietermine//DE";

/// Generate a calendar document with one VEVENT per event.
///
/// `dtstamp` is written as every event's DTSTAMP; it is the only value in
/// the output that is not derived from `events`.
pub fn generate_ics(name: &str, events: &[CalendarEvent], dtstamp: DateTime<Utc>) -> String {
    let mut cal = Calendar::new();
    cal.name(name);

    let dtstamp = dtstamp.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.summary(&event.summary);
        ics_event.description(&event.description);
        ics_event.location(&event.location);

        add_zoned_datetime(&mut ics_event, "DTSTART", event.start, event.tz);
        add_zoned_datetime(&mut ics_event, "DTEND", event.end, event.tz);

        ics_event.add_property("STATUS", event.status.as_ics_str());

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

/// Clean up ICS output from the icalendar crate
/// - Replace the crate's PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a local datetime qualified with a TZID parameter.
///
/// No VTIMEZONE is emitted; calendar clients resolve IANA names like
/// `Europe/Berlin` themselves.
fn add_zoned_datetime(ics_event: &mut icalendar::Event, name: &str, local: NaiveDateTime, tz: Tz) {
    let mut prop = Property::new(name, local.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", tz.name());
    ics_event.append_property(prop);
}
