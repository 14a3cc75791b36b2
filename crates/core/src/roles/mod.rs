//! Identity and role resolver.

mod roles_model;
mod roles_resolver;


pub use roles_model::UserRole;
pub use roles_resolver::{
    administered_group, can_act_as, can_edit_preferences, default_voter, linked_guest,
    resolve_role, voters_for,
};
