//! Every mutation of an event as a value, so permission checks and
//! persistence wrap all transitions the same way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::events_model::{Event, EventUpdate};
use super::events_transitions::update_event;
use crate::activities::{
    add_activity, remove_activity, set_activity_assignees, update_activity, ActivityUpdate,
    NewActivity,
};
use crate::agreement::{toggle_agreed, AgreedCategory};
use crate::lodging::{
    add_accommodation, add_bed, add_room, assign_guest_to_bed, remove_accommodation, remove_bed,
    remove_room, unassign_guest, update_accommodation, update_bed, update_room,
    AccommodationUpdate, BedAssignmentOutcome, BedLocator, BedUpdate, NewAccommodation, NewBed,
    NewRoom, RoomUpdate,
};
use crate::proposals::{
    add_location, add_proposed_day, remove_location, remove_proposed_day, update_location,
    LocationUpdate, NewLocation,
};
use crate::roster::{
    add_guest, assign_guest_to_group, create_group, remove_group, remove_guest, rename_group,
    rename_guest, toggle_group_admin_flag, toggle_organizer_flag, update_guest_preferences,
    GuestPreferences,
};
use crate::users::User;
use crate::voting::{cast_vote, toggle_voting_lock, VoteCategory, VoteValue};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventCommand {
    UpdateDetails(EventUpdate),

    CastVote {
        category: VoteCategory,
        voter_guest_id: String,
        item_id: String,
        value: VoteValue,
    },
    ToggleVotingLock {
        category: VoteCategory,
    },
    ToggleAgreed {
        category: AgreedCategory,
        item_id: String,
    },

    AddGuest {
        name: String,
        email: Option<String>,
    },
    RemoveGuest {
        guest_id: String,
    },
    RenameGuest {
        guest_id: String,
        name: String,
    },
    ToggleOrganizerFlag {
        guest_id: String,
    },
    ToggleGroupAdminFlag {
        guest_id: String,
    },
    AssignGuestToGroup {
        guest_id: String,
        group_id: Option<String>,
    },
    UpdateGuestPreferences {
        guest_id: String,
        preferences: GuestPreferences,
    },
    CreateGroup {
        name: String,
    },
    RenameGroup {
        group_id: String,
        name: String,
    },
    RemoveGroup {
        group_id: String,
    },

    AddProposedDay {
        date: NaiveDate,
    },
    RemoveProposedDay {
        day_id: String,
    },
    AddLocation(NewLocation),
    UpdateLocation {
        location_id: String,
        update: LocationUpdate,
    },
    RemoveLocation {
        location_id: String,
    },

    AddAccommodation(NewAccommodation),
    UpdateAccommodation {
        accommodation_id: String,
        update: AccommodationUpdate,
    },
    RemoveAccommodation {
        accommodation_id: String,
    },
    AddRoom {
        accommodation_id: String,
        room: NewRoom,
    },
    UpdateRoom {
        accommodation_id: String,
        room_id: String,
        update: RoomUpdate,
    },
    RemoveRoom {
        accommodation_id: String,
        room_id: String,
    },
    AddBed {
        accommodation_id: String,
        room_id: String,
        bed: NewBed,
    },
    UpdateBed {
        target: BedLocator,
        update: BedUpdate,
    },
    RemoveBed {
        target: BedLocator,
    },
    AssignGuestToBed {
        guest_id: String,
        target: BedLocator,
    },
    UnassignGuest {
        guest_id: String,
    },

    AddActivity(NewActivity),
    UpdateActivity {
        activity_id: String,
        update: ActivityUpdate,
    },
    RemoveActivity {
        activity_id: String,
    },
    SetActivityAssignees {
        activity_id: String,
        guest_ids: Vec<String>,
    },
}

/// The next event value, plus the bed outcome when the command was a bed assignment.
#[derive(Debug, Clone)]
pub struct AppliedCommand {
    pub event: Event,
    pub bed_outcome: Option<BedAssignmentOutcome>,
}

impl From<Event> for AppliedCommand {
    fn from(event: Event) -> Self {
        Self {
            event,
            bed_outcome: None,
        }
    }
}

impl EventCommand {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            EventCommand::UpdateDetails(_) => "update_details",
            EventCommand::CastVote { .. } => "cast_vote",
            EventCommand::ToggleVotingLock { .. } => "toggle_voting_lock",
            EventCommand::ToggleAgreed { .. } => "toggle_agreed",
            EventCommand::AddGuest { .. } => "add_guest",
            EventCommand::RemoveGuest { .. } => "remove_guest",
            EventCommand::RenameGuest { .. } => "rename_guest",
            EventCommand::ToggleOrganizerFlag { .. } => "toggle_organizer_flag",
            EventCommand::ToggleGroupAdminFlag { .. } => "toggle_group_admin_flag",
            EventCommand::AssignGuestToGroup { .. } => "assign_guest_to_group",
            EventCommand::UpdateGuestPreferences { .. } => "update_guest_preferences",
            EventCommand::CreateGroup { .. } => "create_group",
            EventCommand::RenameGroup { .. } => "rename_group",
            EventCommand::RemoveGroup { .. } => "remove_group",
            EventCommand::AddProposedDay { .. } => "add_proposed_day",
            EventCommand::RemoveProposedDay { .. } => "remove_proposed_day",
            EventCommand::AddLocation(_) => "add_location",
            EventCommand::UpdateLocation { .. } => "update_location",
            EventCommand::RemoveLocation { .. } => "remove_location",
            EventCommand::AddAccommodation(_) => "add_accommodation",
            EventCommand::UpdateAccommodation { .. } => "update_accommodation",
            EventCommand::RemoveAccommodation { .. } => "remove_accommodation",
            EventCommand::AddRoom { .. } => "add_room",
            EventCommand::UpdateRoom { .. } => "update_room",
            EventCommand::RemoveRoom { .. } => "remove_room",
            EventCommand::AddBed { .. } => "add_bed",
            EventCommand::UpdateBed { .. } => "update_bed",
            EventCommand::RemoveBed { .. } => "remove_bed",
            EventCommand::AssignGuestToBed { .. } => "assign_guest_to_bed",
            EventCommand::UnassignGuest { .. } => "unassign_guest",
            EventCommand::AddActivity(_) => "add_activity",
            EventCommand::UpdateActivity { .. } => "update_activity",
            EventCommand::RemoveActivity { .. } => "remove_activity",
            EventCommand::SetActivityAssignees { .. } => "set_activity_assignees",
        }
    }

    /// Runs the matching pure transition. `users` is only consulted when
    /// adding a guest, to link it by email.
    pub fn apply(self, event: &Event, users: &[User]) -> AppliedCommand {
        match self {
            EventCommand::UpdateDetails(update) => update_event(event, update).into(),
            EventCommand::CastVote {
                category,
                voter_guest_id,
                item_id,
                value,
            } => cast_vote(event, category, &voter_guest_id, &item_id, value).into(),
            EventCommand::ToggleVotingLock { category } => {
                toggle_voting_lock(event, category).into()
            }
            EventCommand::ToggleAgreed { category, item_id } => {
                toggle_agreed(event, category, &item_id).into()
            }
            EventCommand::AddGuest { name, email } => {
                add_guest(event, users, &name, email.as_deref()).into()
            }
            EventCommand::RemoveGuest { guest_id } => remove_guest(event, &guest_id).into(),
            EventCommand::RenameGuest { guest_id, name } => {
                rename_guest(event, &guest_id, &name).into()
            }
            EventCommand::ToggleOrganizerFlag { guest_id } => {
                toggle_organizer_flag(event, &guest_id).into()
            }
            EventCommand::ToggleGroupAdminFlag { guest_id } => {
                toggle_group_admin_flag(event, &guest_id).into()
            }
            EventCommand::AssignGuestToGroup { guest_id, group_id } => {
                assign_guest_to_group(event, &guest_id, group_id.as_deref()).into()
            }
            EventCommand::UpdateGuestPreferences {
                guest_id,
                preferences,
            } => update_guest_preferences(event, &guest_id, preferences).into(),
            EventCommand::CreateGroup { name } => create_group(event, &name).into(),
            EventCommand::RenameGroup { group_id, name } => {
                rename_group(event, &group_id, &name).into()
            }
            EventCommand::RemoveGroup { group_id } => remove_group(event, &group_id).into(),
            EventCommand::AddProposedDay { date } => add_proposed_day(event, date).into(),
            EventCommand::RemoveProposedDay { day_id } => {
                remove_proposed_day(event, &day_id).into()
            }
            EventCommand::AddLocation(input) => add_location(event, input).into(),
            EventCommand::UpdateLocation {
                location_id,
                update,
            } => update_location(event, &location_id, update).into(),
            EventCommand::RemoveLocation { location_id } => {
                remove_location(event, &location_id).into()
            }
            EventCommand::AddAccommodation(input) => add_accommodation(event, input).into(),
            EventCommand::UpdateAccommodation {
                accommodation_id,
                update,
            } => update_accommodation(event, &accommodation_id, update).into(),
            EventCommand::RemoveAccommodation { accommodation_id } => {
                remove_accommodation(event, &accommodation_id).into()
            }
            EventCommand::AddRoom {
                accommodation_id,
                room,
            } => add_room(event, &accommodation_id, room).into(),
            EventCommand::UpdateRoom {
                accommodation_id,
                room_id,
                update,
            } => update_room(event, &accommodation_id, &room_id, update).into(),
            EventCommand::RemoveRoom {
                accommodation_id,
                room_id,
            } => remove_room(event, &accommodation_id, &room_id).into(),
            EventCommand::AddBed {
                accommodation_id,
                room_id,
                bed,
            } => add_bed(event, &accommodation_id, &room_id, bed).into(),
            EventCommand::UpdateBed { target, update } => update_bed(event, &target, update).into(),
            EventCommand::RemoveBed { target } => remove_bed(event, &target).into(),
            EventCommand::AssignGuestToBed { guest_id, target } => {
                let assignment = assign_guest_to_bed(event, &guest_id, &target);
                AppliedCommand {
                    event: assignment.event,
                    bed_outcome: Some(assignment.outcome),
                }
            }
            EventCommand::UnassignGuest { guest_id } => unassign_guest(event, &guest_id).into(),
            EventCommand::AddActivity(input) => add_activity(event, input).into(),
            EventCommand::UpdateActivity {
                activity_id,
                update,
            } => update_activity(event, &activity_id, update).into(),
            EventCommand::RemoveActivity { activity_id } => {
                remove_activity(event, &activity_id).into()
            }
            EventCommand::SetActivityAssignees {
                activity_id,
                guest_ids,
            } => set_activity_assignees(event, &activity_id, &guest_ids).into(),
        }
    }
}
