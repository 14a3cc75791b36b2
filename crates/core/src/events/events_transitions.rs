use std::collections::BTreeSet;

use chrono::Utc;
use log::debug;

use super::events_model::{DateRange, Event, EventUpdate, NewEvent};
use crate::roster::{Guest, GuestPreferences};
use crate::users::User;
use crate::utils::id_utils::generate_id;
use crate::utils::text_utils::{non_blank, optional_non_blank};
use crate::voting::{Votes, VotingLocked};

/// Builds a fresh event owned by `organizer`, who also gets a linked guest
/// record. Returns `None` when the title is blank. Ranges missing a bound are
/// dropped.
pub fn create_event(organizer: &User, input: NewEvent) -> Option<Event> {
    let title = non_blank(&input.title)?;
    let date_ranges = input
        .date_ranges
        .iter()
        .filter_map(|range| match (range.start, range.end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        })
        .collect();
    let organizer_guest = Guest {
        id: generate_id("guest"),
        name: organizer.name.clone(),
        email: Some(organizer.email.clone()).filter(|e| !e.is_empty()),
        is_organizer: true,
        is_group_admin: false,
        group_id: None,
        user_id: Some(organizer.id.clone()),
        preferences: GuestPreferences::default(),
    };
    let event = Event {
        id: generate_id("event"),
        title,
        description: optional_non_blank(input.description.as_deref()),
        organizer_id: organizer.id.clone(),
        created_at: Utc::now(),
        date_ranges,
        guests: vec![organizer_guest],
        groups: Vec::new(),
        proposed_days: Vec::new(),
        locations: Vec::new(),
        accommodations: Vec::new(),
        activities: Vec::new(),
        votes: Votes::default(),
        voting_locked: VotingLocked::default(),
        agreed_days: BTreeSet::new(),
        agreed_locations: BTreeSet::new(),
        agreed_accommodations: BTreeSet::new(),
        general_notes: None,
    };
    debug!("Created event {} for organizer {}", event.id, organizer.id);
    Some(event)
}

/// Whole-field patch of the event details. A blank title is ignored; blank
/// description or notes clear the field.
pub fn update_event(event: &Event, update: EventUpdate) -> Event {
    let mut next = event.clone();
    if let Some(title) = update.title.as_deref().and_then(non_blank) {
        next.title = title;
    }
    if let Some(description) = update.description {
        next.description = non_blank(&description);
    }
    if let Some(date_ranges) = update.date_ranges {
        next.date_ranges = date_ranges;
    }
    if let Some(notes) = update.general_notes {
        next.general_notes = non_blank(&notes);
    }
    if let Some(voting_locked) = update.voting_locked {
        next.voting_locked = voting_locked;
    }
    next
}

/// Events the user organizes or takes part in through a linked guest record.
pub fn events_for_user<'a>(events: &'a [Event], user: &User) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| {
            e.organizer_id == user.id
                || e.guests
                    .iter()
                    .any(|g| g.user_id.as_deref() == Some(user.id.as_str()))
        })
        .collect()
}
