use std::collections::BTreeSet;

use log::debug;

use super::agreement_model::AgreedCategory;
use crate::events::Event;
use crate::lodging::Accommodation;
use crate::proposals::{Location, ProposedDay};

pub fn agreed_items(event: &Event, category: AgreedCategory) -> &BTreeSet<String> {
    match category {
        AgreedCategory::Days => &event.agreed_days,
        AgreedCategory::Locations => &event.agreed_locations,
        AgreedCategory::Accommodations => &event.agreed_accommodations,
    }
}

fn agreed_items_mut(event: &mut Event, category: AgreedCategory) -> &mut BTreeSet<String> {
    match category {
        AgreedCategory::Days => &mut event.agreed_days,
        AgreedCategory::Locations => &mut event.agreed_locations,
        AgreedCategory::Accommodations => &mut event.agreed_accommodations,
    }
}

pub fn is_agreed(event: &Event, category: AgreedCategory, item_id: &str) -> bool {
    agreed_items(event, category).contains(item_id)
}

/// Flips membership of `item_id` in the agreed set. Vote tallies are not consulted.
pub fn toggle_agreed(event: &Event, category: AgreedCategory, item_id: &str) -> Event {
    if item_id.is_empty() {
        return event.clone();
    }
    let mut next = event.clone();
    let items = agreed_items_mut(&mut next, category);
    if items.remove(item_id) {
        debug!("{:?} item {} no longer agreed", category, item_id);
    } else {
        items.insert(item_id.to_string());
        debug!("{:?} item {} agreed", category, item_id);
    }
    next
}

pub(crate) fn forget_agreed(event: &mut Event, category: AgreedCategory, item_id: &str) {
    agreed_items_mut(event, category).remove(item_id);
}

/// Agreed days in calendar order.
pub fn agreed_days(event: &Event) -> Vec<&ProposedDay> {
    let mut days: Vec<&ProposedDay> = event
        .proposed_days
        .iter()
        .filter(|day| is_agreed(event, AgreedCategory::Days, &day.id))
        .collect();
    days.sort_by_key(|day| day.date);
    days
}

pub fn agreed_locations(event: &Event) -> Vec<&Location> {
    event
        .locations
        .iter()
        .filter(|loc| is_agreed(event, AgreedCategory::Locations, &loc.id))
        .collect()
}

pub fn agreed_accommodations(event: &Event) -> Vec<&Accommodation> {
    event
        .accommodations
        .iter()
        .filter(|acc| is_agreed(event, AgreedCategory::Accommodations, &acc.id))
        .collect()
}
