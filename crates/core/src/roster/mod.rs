//! Roster manager - guests, groups, role flags and group-admin linkage.

mod roster_model;
mod roster_transitions;


pub use roster_model::{Group, Guest, GuestPreferences};
pub use roster_transitions::{
    add_guest, assign_guest_to_group, create_group, link_guests_to_user, remove_group,
    remove_guest, rename_group, rename_guest, toggle_group_admin_flag, toggle_organizer_flag,
    update_guest_preferences,
};
