//! Uploading appointment events to a Google calendar.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use google_calendar::Client;
use google_calendar::types::{EventDateTime, OrderBy, SendUpdates};
use termine_core::CalendarEvent;
use termine_core::dedup::{EventKey, plan_upload};

/// Counts reported after one document's upload
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    pub uploaded: usize,
    pub skipped: usize,
}

pub struct GoogleCalendar {
    client: Client,
    calendar_id: String,
}

impl GoogleCalendar {
    pub fn new(client: Client, calendar_id: impl Into<String>) -> Self {
        GoogleCalendar {
            client,
            calendar_id: calendar_id.into(),
        }
    }

    /// Keys of all events starting at or after `since`
    pub async fn existing_keys(&self, since: DateTime<Utc>) -> Result<HashSet<EventKey>> {
        let time_min = since.to_rfc3339();

        let response = self
            .client
            .events()
            .list_all(
                &self.calendar_id,
                "",                 // i_cal_uid
                0,                  // max_attendees
                OrderBy::StartTime, // order_by
                &[],                // private_extended_property
                "",                 // q (search query)
                &[],                // shared_extended_property
                false,              // show_deleted
                false,              // show_hidden_invitations
                true,               // single_events: expand recurring events into instances
                "",                 // time_max
                &time_min,          // time_min
                "",                 // time_zone
                "",                 // updated_min
            )
            .await
            .with_context(|| format!("Failed to list events in calendar '{}'", self.calendar_id))?;

        Ok(response.body.iter().filter_map(remote_key).collect())
    }

    pub async fn insert(&self, event: &CalendarEvent) -> Result<()> {
        let google_event = to_google_event(event)?;

        self.client
            .events()
            .insert(
                &self.calendar_id,
                0,                 // conference_data_version
                0,                 // max_attendees
                false,             // send_notifications (deprecated)
                SendUpdates::None, // send_updates
                false,             // supports_attachments
                &google_event,
            )
            .await
            .with_context(|| format!("Failed to create event: {}", event.summary))?;

        Ok(())
    }

    /// Create every event not already present in the calendar.
    ///
    /// Stops at the first failure. Events created before it stay in place.
    pub async fn upload(&self, events: &[CalendarEvent]) -> Result<UploadStats> {
        let existing = self.existing_keys(Utc::now()).await?;
        tracing::debug!(existing = existing.len(), "fetched upcoming remote events");

        let plan = plan_upload(events, &existing)?;

        let mut stats = UploadStats {
            uploaded: 0,
            skipped: plan.skipped.len(),
        };

        for event in plan.to_create {
            self.insert(event).await?;
            tracing::debug!(uid = %event.uid, "created remote event");
            stats.uploaded += 1;
        }

        Ok(stats)
    }
}

/// Dedup key of an event already in the calendar. All-day events and
/// events without a title can never match an appointment.
fn remote_key(event: &google_calendar::types::Event) -> Option<EventKey> {
    if event.summary.is_empty() {
        return None;
    }

    let start = event.start.as_ref()?.date_time?;

    Some(EventKey::new(event.summary.clone(), start))
}

/// Convert an appointment event to a Google Calendar API Event
fn to_google_event(event: &CalendarEvent) -> Result<google_calendar::types::Event> {
    let time_zone = event.tz.name().to_string();

    let start = EventDateTime {
        date: None,
        date_time: Some(event.start_utc()?),
        time_zone: time_zone.clone(),
    };

    let end = EventDateTime {
        date: None,
        date_time: Some(event.end_utc()?),
        time_zone,
    };

    Ok(google_calendar::types::Event {
        summary: event.summary.clone(),
        description: event.description.clone(),
        location: event.location.clone(),
        start: Some(start),
        end: Some(end),
        status: event.status.as_google_str().to_string(),
        // Leave read-only fields at defaults
        ..Default::default()
    })
}
