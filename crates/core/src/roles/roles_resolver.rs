//! Pure functions of (user, event). Nothing here is cached; callers recompute
//! after every change to the event or the session.

use super::roles_model::UserRole;
use crate::events::Event;
use crate::roster::{Group, Guest};
use crate::users::User;

/// The guest record linked to `user_id`, if the user takes part in the event.
pub fn linked_guest<'a>(user_id: &str, event: &'a Event) -> Option<&'a Guest> {
    event
        .guests
        .iter()
        .find(|g| g.user_id.as_deref() == Some(user_id))
}

pub fn resolve_role(user: &User, event: &Event) -> UserRole {
    if user.id == event.organizer_id {
        return UserRole::Organizer;
    }
    match linked_guest(&user.id, event) {
        Some(guest) if guest.is_group_admin => UserRole::GroupAdmin,
        _ => UserRole::Guest,
    }
}

/// The guest identities `user` may vote and act as.
///
/// The organizer may act as every guest; a group admin as every member of
/// their group; anyone else only as their own linked record.
pub fn voters_for<'a>(user: &User, role: UserRole, event: &'a Event) -> Vec<&'a Guest> {
    let own = linked_guest(&user.id, event);
    match role {
        UserRole::Organizer => event.guests.iter().collect(),
        UserRole::GroupAdmin => match own.and_then(|g| g.group_id.as_deref()) {
            Some(group_id) => event
                .guests
                .iter()
                .filter(|g| g.group_id.as_deref() == Some(group_id))
                .collect(),
            None => own.into_iter().collect(),
        },
        UserRole::Guest => own.into_iter().collect(),
    }
}

pub fn can_act_as(user: &User, role: UserRole, event: &Event, guest_id: &str) -> bool {
    voters_for(user, role, event)
        .iter()
        .any(|g| g.id == guest_id)
}

/// The group whose `adminId` points at the user's linked guest.
pub fn administered_group<'a>(user: &User, event: &'a Event) -> Option<&'a Group> {
    let own = linked_guest(&user.id, event)?;
    if !own.is_group_admin {
        return None;
    }
    event
        .groups
        .iter()
        .find(|g| g.admin_id.as_deref() == Some(own.id.as_str()))
}

/// Organizers edit anyone, guests themselves, group admins the members of the
/// group they administer.
pub fn can_edit_preferences(user: &User, role: UserRole, event: &Event, guest_id: &str) -> bool {
    match role {
        UserRole::Organizer => true,
        UserRole::Guest => linked_guest(&user.id, event).is_some_and(|g| g.id == guest_id),
        UserRole::GroupAdmin => {
            let Some(group) = administered_group(user, event) else {
                return false;
            };
            event
                .guest(guest_id)
                .is_some_and(|g| g.group_id.as_deref() == Some(group.id.as_str()))
        }
    }
}

/// Who a voting screen acts as by default: the caller's own record when
/// permitted, otherwise the first permitted voter.
pub fn default_voter<'a>(user: &User, role: UserRole, event: &'a Event) -> Option<&'a Guest> {
    let voters = voters_for(user, role, event);
    if let Some(own) = linked_guest(&user.id, event) {
        if voters.iter().any(|g| g.id == own.id) {
            return Some(own);
        }
    }
    voters.into_iter().next()
}
