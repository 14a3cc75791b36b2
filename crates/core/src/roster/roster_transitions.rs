//! Pure roster transitions. Each returns the next event value; invalid input
//! (blank names, unknown ids, disallowed flag changes) returns an unchanged copy.

use log::debug;

use super::roster_model::{Group, Guest, GuestPreferences};
use crate::activities::drop_assignee;
use crate::events::Event;
use crate::lodging::clear_guest_beds;
use crate::users::User;
use crate::utils::id_utils::generate_id;
use crate::utils::text_utils::{non_blank, optional_non_blank};
use crate::voting::strip_guest_votes;

/// Adds a guest with empty preferences. When `email` exactly matches a
/// registered user's email the guest is linked to that account.
pub fn add_guest(event: &Event, users: &[User], name: &str, email: Option<&str>) -> Event {
    let Some(name) = non_blank(name) else {
        return event.clone();
    };
    let email = optional_non_blank(email);
    let user_id = email
        .as_deref()
        .and_then(|address| users.iter().find(|u| u.email == address))
        .map(|u| u.id.clone());

    let mut next = event.clone();
    next.guests.push(Guest {
        id: generate_id("guest"),
        name,
        email,
        is_organizer: false,
        is_group_admin: false,
        group_id: None,
        user_id,
        preferences: GuestPreferences::default(),
    });
    next
}

/// Removes a guest together with everything pointing at it: group admin
/// linkage, votes, bed occupancy and activity assignments.
pub fn remove_guest(event: &Event, guest_id: &str) -> Event {
    if event.guest(guest_id).is_none() {
        return event.clone();
    }
    let mut next = event.clone();
    next.guests.retain(|g| g.id != guest_id);
    for group in next.groups.iter_mut() {
        if group.admin_id.as_deref() == Some(guest_id) {
            group.admin_id = None;
        }
    }
    strip_guest_votes(&mut next.votes, guest_id);
    clear_guest_beds(&mut next, guest_id);
    drop_assignee(&mut next, guest_id);
    debug!("Removed guest {} from event {}", guest_id, event.id);
    next
}

pub fn rename_guest(event: &Event, guest_id: &str, new_name: &str) -> Event {
    let Some(name) = non_blank(new_name) else {
        return event.clone();
    };
    let mut next = event.clone();
    match next.guest_mut(guest_id) {
        Some(guest) => guest.name = name,
        None => return event.clone(),
    }
    next
}

pub fn toggle_organizer_flag(event: &Event, guest_id: &str) -> Event {
    let mut next = event.clone();
    match next.guest_mut(guest_id) {
        Some(guest) => guest.is_organizer = !guest.is_organizer,
        None => return event.clone(),
    }
    next
}

/// Flips the group admin flag.
///
/// Setting it requires a group and a linked account; the guest becomes its
/// group's `adminId` and any previous admin of that group is demoted.
/// Clearing it always succeeds and releases the group's `adminId`.
pub fn toggle_group_admin_flag(event: &Event, guest_id: &str) -> Event {
    let Some(guest) = event.guest(guest_id) else {
        return event.clone();
    };
    let group_exists = guest
        .group_id
        .as_deref()
        .is_some_and(|id| event.group(id).is_some());
    if !guest.is_group_admin && !(guest.can_be_group_admin() && group_exists) {
        debug!(
            "Guest {} needs a group and a linked account to become group admin",
            guest_id
        );
        return event.clone();
    }

    let becomes_admin = !guest.is_group_admin;
    let group_id = guest.group_id.clone();
    let mut next = event.clone();
    if let Some(guest) = next.guest_mut(guest_id) {
        guest.is_group_admin = becomes_admin;
    }

    let Some(group_id) = group_id else {
        return next;
    };
    let mut demoted = None;
    if let Some(group) = next.group_mut(&group_id) {
        if becomes_admin {
            demoted = group
                .admin_id
                .replace(guest_id.to_string())
                .filter(|previous| previous != guest_id);
        } else if group.admin_id.as_deref() == Some(guest_id) {
            group.admin_id = None;
        }
    }
    if let Some(previous) = demoted.and_then(|id| next.guest_mut(&id)) {
        previous.is_group_admin = false;
    }
    next
}

/// Moves a guest into `group_id`, or out of every group when `None`.
///
/// The old group loses its `adminId` if it pointed at the guest. Leaving all
/// groups drops the admin flag. An admin moving into a group that has no
/// admin yet becomes that group's admin; otherwise the flag is dropped.
pub fn assign_guest_to_group(event: &Event, guest_id: &str, group_id: Option<&str>) -> Event {
    let Some(guest) = event.guest(guest_id) else {
        return event.clone();
    };
    if let Some(target) = group_id {
        if event.group(target).is_none() {
            return event.clone();
        }
    }
    if guest.group_id.as_deref() == group_id {
        return event.clone();
    }

    let was_admin = guest.is_group_admin;
    let linked = guest.user_id.is_some();
    let old_group = guest.group_id.clone();
    let mut next = event.clone();

    if let Some(old) = old_group.as_deref().and_then(|id| next.group_mut(id)) {
        if old.admin_id.as_deref() == Some(guest_id) {
            old.admin_id = None;
        }
    }

    let keeps_admin = match group_id {
        Some(target) if was_admin && linked => match next.group_mut(target) {
            Some(group) if group.admin_id.is_none() => {
                group.admin_id = Some(guest_id.to_string());
                true
            }
            _ => false,
        },
        _ => false,
    };

    if let Some(guest) = next.guest_mut(guest_id) {
        guest.group_id = group_id.map(str::to_string);
        guest.is_group_admin = keeps_admin;
    }
    next
}

pub fn update_guest_preferences(
    event: &Event,
    guest_id: &str,
    preferences: GuestPreferences,
) -> Event {
    let mut next = event.clone();
    match next.guest_mut(guest_id) {
        Some(guest) => guest.preferences = preferences,
        None => return event.clone(),
    }
    next
}

pub fn create_group(event: &Event, name: &str) -> Event {
    let Some(name) = non_blank(name) else {
        return event.clone();
    };
    let mut next = event.clone();
    next.groups.push(Group {
        id: generate_id("group"),
        name,
        admin_id: None,
    });
    next
}

pub fn rename_group(event: &Event, group_id: &str, new_name: &str) -> Event {
    let Some(name) = non_blank(new_name) else {
        return event.clone();
    };
    let mut next = event.clone();
    match next.group_mut(group_id) {
        Some(group) => group.name = name,
        None => return event.clone(),
    }
    next
}

/// Deletes a group. Its members become ungrouped and lose the admin flag.
pub fn remove_group(event: &Event, group_id: &str) -> Event {
    if event.group(group_id).is_none() {
        return event.clone();
    }
    let mut next = event.clone();
    next.groups.retain(|g| g.id != group_id);
    for guest in next
        .guests
        .iter_mut()
        .filter(|g| g.group_id.as_deref() == Some(group_id))
    {
        guest.group_id = None;
        guest.is_group_admin = false;
    }
    next
}

/// Links every unlinked guest whose email equals `user.email` to that account.
pub fn link_guests_to_user(event: &Event, user: &User) -> Event {
    let mut next = event.clone();
    for guest in next.guests.iter_mut() {
        if guest.user_id.is_none() && guest.email.as_deref() == Some(user.email.as_str()) {
            guest.user_id = Some(user.id.clone());
        }
    }
    next
}
