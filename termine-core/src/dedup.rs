//! Duplicate detection against events already in a remote calendar.
//!
//! Two events are the same appointment when they share title and start
//! instant. The description (therapist) is not part of the key.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::TermineResult;
use crate::event::CalendarEvent;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub summary: String,
    pub start: DateTime<Utc>,
}

impl EventKey {
    pub fn new(summary: impl Into<String>, start: DateTime<Utc>) -> Self {
        EventKey {
            summary: summary.into(),
            start,
        }
    }

    pub fn for_event(event: &CalendarEvent) -> TermineResult<Self> {
        Ok(EventKey::new(event.summary.clone(), event.start_utc()?))
    }
}

/// Which events to create remotely and which are already there.
#[derive(Debug, Default)]
pub struct UploadPlan<'a> {
    pub to_create: Vec<&'a CalendarEvent>,
    pub skipped: Vec<&'a CalendarEvent>,
}

/// Split `events` into new and duplicate ones, keeping their order.
///
/// Only `existing` decides what is a duplicate. Two events of the same
/// document sharing a slot are both created, matching the `.ics` file.
pub fn plan_upload<'a>(
    events: &'a [CalendarEvent],
    existing: &HashSet<EventKey>,
) -> TermineResult<UploadPlan<'a>> {
    let mut plan = UploadPlan::default();

    for event in events {
        if !existing.contains(&EventKey::for_event(event)?) {
            plan.to_create.push(event);
        } else {
            plan.skipped.push(event);
        }
    }

    Ok(plan)
}
