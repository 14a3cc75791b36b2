//! Accommodations, rooms and beds, and the bed assignment engine.

mod lodging_model;
mod lodging_transitions;

#[cfg(test)]
mod lodging_tests;

pub use lodging_model::{
    Accommodation, AccommodationUpdate, Bed, BedAssignment, BedAssignmentOutcome, BedLocator,
    BedType, BedUpdate, NewAccommodation, NewBed, NewRoom, PreferenceStatus, Room, RoomType,
    RoomUpdate,
};
pub use lodging_transitions::{
    add_accommodation, add_bed, add_room, assign_guest_to_bed, bed_of_guest, find_bed,
    preference_status, remove_accommodation, remove_bed, remove_room, unassign_guest,
    unassigned_guests, update_accommodation, update_bed, update_room,
};

pub(crate) use lodging_transitions::clear_guest_beds;
