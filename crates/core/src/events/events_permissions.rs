//! Who may run which command.
//!
//! | command                   | organizer | group admin               | guest          |
//! |---------------------------|-----------|---------------------------|----------------|
//! | cast vote                 | any guest | own group, unlocked only  | self, unlocked |
//! | update guest preferences  | any guest | administered group        | self           |
//! | set activity assignees    | any guest | own group (merged)        | self (merged)  |
//! | everything else           | yes       | no                        | no             |

use log::warn;

use super::events_commands::EventCommand;
use super::events_model::Event;
use crate::activities::merge_scoped_assignees;
use crate::errors::{Error, Result};
use crate::roles::{can_act_as, can_edit_preferences, resolve_role, voters_for, UserRole};
use crate::users::User;

fn deny(user: &User, event: &Event, command: &EventCommand, reason: &str) -> Error {
    warn!(
        "Denied {} on event {} for user {}: {}",
        command.name(),
        event.id,
        user.id,
        reason
    );
    Error::PermissionDenied(reason.to_string())
}

/// Checks `command` against the caller's role in `event` and returns that role.
pub fn authorize(user: &User, event: &Event, command: &EventCommand) -> Result<UserRole> {
    let role = resolve_role(user, event);
    if role.is_organizer() {
        return Ok(role);
    }
    match command {
        EventCommand::CastVote {
            category,
            voter_guest_id,
            ..
        } => {
            if event.voting_locked.is_locked(*category) {
                return Err(deny(user, event, command, "voting is locked for this category"));
            }
            if !can_act_as(user, role, event, voter_guest_id) {
                return Err(deny(user, event, command, "cannot vote for this guest"));
            }
            Ok(role)
        }
        EventCommand::UpdateGuestPreferences { guest_id, .. } => {
            if can_edit_preferences(user, role, event, guest_id) {
                Ok(role)
            } else {
                Err(deny(user, event, command, "cannot edit this guest's preferences"))
            }
        }
        EventCommand::SetActivityAssignees { .. } => {
            if voters_for(user, role, event).is_empty() {
                Err(deny(user, event, command, "no guests to assign"))
            } else {
                Ok(role)
            }
        }
        _ => Err(deny(user, event, command, "only the organizer may do this")),
    }
}

/// Narrows an authorized command to what the caller may actually touch.
///
/// Only activity assignment needs it: a non-organizer's selection is merged
/// so assignees outside their scope survive.
pub fn scope_command(
    user: &User,
    role: UserRole,
    event: &Event,
    command: EventCommand,
) -> EventCommand {
    match command {
        EventCommand::SetActivityAssignees {
            activity_id,
            guest_ids,
        } if !role.is_organizer() => {
            let scope: Vec<String> = voters_for(user, role, event)
                .into_iter()
                .map(|g| g.id.clone())
                .collect();
            let current = event
                .activity(&activity_id)
                .map(|a| a.assigned_guest_ids.as_slice())
                .unwrap_or_default();
            EventCommand::SetActivityAssignees {
                guest_ids: merge_scoped_assignees(current, &scope, &guest_ids),
                activity_id,
            }
        }
        other => other,
    }
}
