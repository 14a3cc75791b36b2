//! Proposed days and candidate locations.

mod proposals_model;
mod proposals_transitions;


pub use proposals_model::{Location, LocationUpdate, NewLocation, ProposedDay};
pub use proposals_transitions::{
    add_location, add_proposed_day, remove_location, remove_proposed_day, update_location,
};
