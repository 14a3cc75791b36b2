use chrono::NaiveDate;
use log::debug;

use super::proposals_model::{Location, LocationUpdate, NewLocation, ProposedDay};
use crate::agreement::{forget_agreed, AgreedCategory};
use crate::events::Event;
use crate::utils::id_utils::generate_id;
use crate::utils::text_utils::{non_blank, optional_non_blank};
use crate::voting::{strip_item_votes, VoteCategory};

/// Proposes `date`. A date that is already proposed is left alone.
pub fn add_proposed_day(event: &Event, date: NaiveDate) -> Event {
    if event.proposed_days.iter().any(|day| day.date == date) {
        debug!("{} already proposed for event {}", date, event.id);
        return event.clone();
    }
    let mut next = event.clone();
    next.proposed_days.push(ProposedDay {
        id: generate_id("day"),
        date,
    });
    next.proposed_days.sort_by_key(|day| day.date);
    next
}

/// Withdraws a proposed day together with its votes and agreed mark.
pub fn remove_proposed_day(event: &Event, day_id: &str) -> Event {
    if !event.proposed_days.iter().any(|day| day.id == day_id) {
        return event.clone();
    }
    let mut next = event.clone();
    next.proposed_days.retain(|day| day.id != day_id);
    strip_item_votes(&mut next.votes, VoteCategory::Days, day_id);
    forget_agreed(&mut next, AgreedCategory::Days, day_id);
    next
}

pub fn add_location(event: &Event, input: NewLocation) -> Event {
    let Some(name) = non_blank(&input.name) else {
        return event.clone();
    };
    let mut next = event.clone();
    next.locations.push(Location {
        id: generate_id("location"),
        name,
        address: optional_non_blank(input.address.as_deref()),
    });
    next
}

pub fn update_location(event: &Event, location_id: &str, update: LocationUpdate) -> Event {
    let mut next = event.clone();
    let Some(location) = next.locations.iter_mut().find(|l| l.id == location_id) else {
        return event.clone();
    };
    if let Some(name) = update.name.as_deref().and_then(non_blank) {
        location.name = name;
    }
    if let Some(address) = update.address {
        location.address = non_blank(&address);
    }
    next
}

pub fn remove_location(event: &Event, location_id: &str) -> Event {
    if !event.locations.iter().any(|l| l.id == location_id) {
        return event.clone();
    }
    let mut next = event.clone();
    next.locations.retain(|l| l.id != location_id);
    strip_item_votes(&mut next.votes, VoteCategory::Locations, location_id);
    forget_agreed(&mut next, AgreedCategory::Locations, location_id);
    next
}
