//! Pure transitions over the vote ledger.
//!
//! Permission and lock checks happen in `EventService`; these functions merge
//! whatever they are given.

use log::debug;

use super::voting_model::{VoteCategory, VoteTally, VoteValue, Votes};
use crate::events::Event;

/// Records `value` for (`category`, `voter_guest_id`, `item_id`), overwriting any
/// previous vote for the same triple and leaving every other entry untouched.
pub fn cast_vote(
    event: &Event,
    category: VoteCategory,
    voter_guest_id: &str,
    item_id: &str,
    value: VoteValue,
) -> Event {
    if voter_guest_id.is_empty() || item_id.is_empty() {
        return event.clone();
    }
    debug!(
        "Vote {} on {}/{} by guest {}",
        value.as_str(),
        category,
        item_id,
        voter_guest_id
    );
    let mut next = event.clone();
    next.votes.set(category, voter_guest_id, item_id, value);
    next
}

pub fn get_vote(
    event: &Event,
    category: VoteCategory,
    guest_id: &str,
    item_id: &str,
) -> Option<VoteValue> {
    event.votes.get(category, guest_id, item_id)
}

/// Counts every guest's vote for `item_id`.
pub fn tally(event: &Event, category: VoteCategory, item_id: &str) -> VoteTally {
    let mut counts = VoteTally::default();
    let Some(guests) = event.votes.category(category) else {
        return counts;
    };
    for vote in guests.values().filter_map(|items| items.get(item_id)) {
        match vote {
            VoteValue::Available => counts.available += 1,
            VoteValue::Maybe => counts.maybe += 1,
            VoteValue::NotAvailable => counts.not_available += 1,
        }
    }
    counts
}

/// Strips `item_id` from every guest's votes in `category`.
pub fn remove_votes_for_item(event: &Event, category: VoteCategory, item_id: &str) -> Event {
    let mut next = event.clone();
    strip_item_votes(&mut next.votes, category, item_id);
    next
}

/// Drops everything `guest_id` voted, across all categories.
pub fn remove_votes_for_guest(event: &Event, guest_id: &str) -> Event {
    let mut next = event.clone();
    strip_guest_votes(&mut next.votes, guest_id);
    next
}

pub fn toggle_voting_lock(event: &Event, category: VoteCategory) -> Event {
    let mut next = event.clone();
    let flag = next.voting_locked.flag_mut(category);
    *flag = !*flag;
    debug!("Voting for {} locked: {}", category, *flag);
    next
}

pub(crate) fn strip_item_votes(votes: &mut Votes, category: VoteCategory, item_id: &str) {
    if let Some(guests) = votes.category_mut(category) {
        for items in guests.values_mut() {
            items.remove(item_id);
        }
    }
}

pub(crate) fn strip_guest_votes(votes: &mut Votes, guest_id: &str) {
    for (_, guests) in votes.categories_mut() {
        guests.remove(guest_id);
    }
}
