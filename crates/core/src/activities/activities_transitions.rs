use std::collections::HashSet;

use log::debug;

use super::activities_model::{Activity, ActivityUpdate, NewActivity};
use crate::events::Event;
use crate::utils::id_utils::generate_id;
use crate::utils::text_utils::{non_blank, optional_non_blank};
use crate::voting::{strip_item_votes, VoteCategory};

pub fn add_activity(event: &Event, input: NewActivity) -> Event {
    let Some(name) = non_blank(&input.name) else {
        return event.clone();
    };
    let mut next = event.clone();
    next.activities.push(Activity {
        id: generate_id("activity"),
        name,
        description: optional_non_blank(input.description.as_deref()),
        date: input.date.trim().to_string(),
        time: input.time.trim().to_string(),
        assigned_guest_ids: Vec::new(),
    });
    next
}

pub fn update_activity(event: &Event, activity_id: &str, update: ActivityUpdate) -> Event {
    let mut next = event.clone();
    let Some(activity) = next.activity_mut(activity_id) else {
        return event.clone();
    };
    if let Some(name) = update.name.as_deref().and_then(non_blank) {
        activity.name = name;
    }
    if let Some(description) = update.description {
        activity.description = non_blank(&description);
    }
    if let Some(date) = update.date {
        activity.date = date.trim().to_string();
    }
    if let Some(time) = update.time {
        activity.time = time.trim().to_string();
    }
    next
}

pub fn remove_activity(event: &Event, activity_id: &str) -> Event {
    if event.activity(activity_id).is_none() {
        return event.clone();
    }
    let mut next = event.clone();
    next.activities.retain(|a| a.id != activity_id);
    strip_item_votes(&mut next.votes, VoteCategory::Activities, activity_id);
    next
}

/// Replaces the whole assignee list. Duplicates are collapsed, first one wins.
/// Scope filtering is the caller's job.
pub fn set_activity_assignees(event: &Event, activity_id: &str, guest_ids: &[String]) -> Event {
    let mut next = event.clone();
    let Some(activity) = next.activity_mut(activity_id) else {
        return event.clone();
    };
    let mut seen = HashSet::new();
    activity.assigned_guest_ids = guest_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();
    debug!(
        "Activity {} now has {} assignee(s)",
        activity_id,
        activity.assigned_guest_ids.len()
    );
    next
}

/// Computes the list to save when a caller who may only manage `scope` picks
/// `selected`. Current assignees outside the scope are kept; selections
/// outside the scope are ignored.
pub fn merge_scoped_assignees(
    current: &[String],
    scope: &[String],
    selected: &[String],
) -> Vec<String> {
    let in_scope = |id: &String| scope.contains(id);
    let mut merged: Vec<String> = current.iter().filter(|id| !in_scope(id)).cloned().collect();
    for id in selected.iter().filter(|id| in_scope(id)) {
        if !merged.contains(id) {
            merged.push(id.clone());
        }
    }
    merged
}

/// Removes `guest_id` from every activity in place. Used by the guest-removal cascade.
pub(crate) fn drop_assignee(event: &mut Event, guest_id: &str) {
    for activity in event.activities.iter_mut() {
        activity.assigned_guest_ids.retain(|id| id != guest_id);
    }
}
