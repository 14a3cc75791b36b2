//! Bed assignment engine and accommodation editing.

use log::{debug, warn};

use super::lodging_model::{
    Accommodation, AccommodationUpdate, Bed, BedAssignment, BedAssignmentOutcome, BedLocator,
    BedType, BedUpdate, NewAccommodation, NewBed, NewRoom, PreferenceStatus, Room, RoomUpdate,
};
use crate::agreement::{forget_agreed, AgreedCategory};
use crate::events::Event;
use crate::roster::Guest;
use crate::utils::id_utils::generate_id;
use crate::utils::text_utils::{non_blank, optional_non_blank};
use crate::voting::strip_item_votes;

fn beds_mut(event: &mut Event) -> impl Iterator<Item = &mut Bed> {
    event
        .accommodations
        .iter_mut()
        .flat_map(|a| a.rooms.iter_mut())
        .flat_map(|r| r.beds.iter_mut())
}

fn beds(event: &Event) -> impl Iterator<Item = &Bed> {
    event
        .accommodations
        .iter()
        .flat_map(|a| a.rooms.iter())
        .flat_map(|r| r.beds.iter())
}

fn room_mut<'a>(
    event: &'a mut Event,
    accommodation_id: &str,
    room_id: &str,
) -> Option<&'a mut Room> {
    event
        .accommodation_mut(accommodation_id)?
        .rooms
        .iter_mut()
        .find(|r| r.id == room_id)
}

fn bed_mut<'a>(event: &'a mut Event, target: &BedLocator) -> Option<&'a mut Bed> {
    room_mut(event, &target.accommodation_id, &target.room_id)?
        .beds
        .iter_mut()
        .find(|b| b.id == target.bed_id)
}

/// Looks up a bed by its full path.
pub fn find_bed<'a>(event: &'a Event, target: &BedLocator) -> Option<&'a Bed> {
    event
        .accommodation(&target.accommodation_id)?
        .rooms
        .iter()
        .find(|r| r.id == target.room_id)?
        .beds
        .iter()
        .find(|b| b.id == target.bed_id)
}

/// Path of the bed currently holding `guest_id`, if any.
pub fn bed_of_guest(event: &Event, guest_id: &str) -> Option<BedLocator> {
    event.accommodations.iter().find_map(|a| {
        a.rooms.iter().find_map(|r| {
            r.beds
                .iter()
                .find(|b| b.is_occupied_by(guest_id))
                .map(|b| BedLocator::new(&a.id, &r.id, &b.id))
        })
    })
}

/// Removes `guest_id` from every bed in place. Used by the guest-removal cascade.
pub(crate) fn clear_guest_beds(event: &mut Event, guest_id: &str) {
    for bed in beds_mut(event) {
        bed.assigned_guest_ids.retain(|id| id != guest_id);
    }
}

/// Puts a guest into the target bed.
///
/// The guest is first removed from every bed in the event, so a guest never
/// occupies two beds. That happens even when the target bed does not exist.
/// If the target bed is already full the guest ends up unassigned and the
/// outcome is [`BedAssignmentOutcome::CapacityExceeded`].
pub fn assign_guest_to_bed(event: &Event, guest_id: &str, target: &BedLocator) -> BedAssignment {
    if event.guest(guest_id).is_none() {
        return BedAssignment {
            event: event.clone(),
            outcome: BedAssignmentOutcome::GuestNotFound,
        };
    }

    let mut next = event.clone();
    clear_guest_beds(&mut next, guest_id);

    let mut outcome = BedAssignmentOutcome::BedNotFound;
    if let Some(bed) = bed_mut(&mut next, target) {
        outcome = BedAssignmentOutcome::CapacityExceeded;
        if bed.has_room() {
            bed.assigned_guest_ids.push(guest_id.to_string());
            outcome = BedAssignmentOutcome::Assigned;
        } else {
            warn!(
                "Bed {} ({}) is full, guest {} left unassigned",
                bed.id, bed.bed_type, guest_id
            );
        }
    }
    debug!("Bed assignment for guest {}: {:?}", guest_id, outcome);
    BedAssignment {
        event: next,
        outcome,
    }
}

pub fn unassign_guest(event: &Event, guest_id: &str) -> Event {
    let mut next = event.clone();
    clear_guest_beds(&mut next, guest_id);
    next
}

/// Guests not present in any bed.
pub fn unassigned_guests(event: &Event) -> Vec<&Guest> {
    event
        .guests
        .iter()
        .filter(|g| !beds(event).any(|b| b.is_occupied_by(&g.id)))
        .collect()
}

/// Compares a guest's recorded bed preference with `bed_type`. Informational only.
pub fn preference_status(guest: &Guest, bed_type: BedType) -> PreferenceStatus {
    match guest.preferences.bed_type {
        Some(preferred) if preferred == bed_type => PreferenceStatus::Fulfilled,
        Some(_) => PreferenceStatus::Unfulfilled,
        None => PreferenceStatus::Unknown,
    }
}

pub fn add_accommodation(event: &Event, input: NewAccommodation) -> Event {
    let Some(name) = non_blank(&input.name) else {
        return event.clone();
    };
    let mut next = event.clone();
    next.accommodations.push(Accommodation {
        id: generate_id("accommodation"),
        name,
        description: optional_non_blank(input.description.as_deref()),
        rooms: Vec::new(),
        children_beds_available: input.children_beds_available,
        allows_animals: input.allows_animals,
        food_services: input.food_services,
        dietary_options: input.dietary_options,
        general_notes: input.general_notes,
    });
    next
}

/// Patches an accommodation. A blank name is ignored; a blank description clears it.
pub fn update_accommodation(
    event: &Event,
    accommodation_id: &str,
    update: AccommodationUpdate,
) -> Event {
    let mut next = event.clone();
    let Some(accommodation) = next.accommodation_mut(accommodation_id) else {
        return event.clone();
    };
    if let Some(name) = update.name.as_deref().and_then(non_blank) {
        accommodation.name = name;
    }
    if let Some(description) = update.description {
        accommodation.description = non_blank(&description);
    }
    if let Some(flag) = update.children_beds_available {
        accommodation.children_beds_available = flag;
    }
    if let Some(flag) = update.allows_animals {
        accommodation.allows_animals = flag;
    }
    if let Some(services) = update.food_services {
        accommodation.food_services = services;
    }
    if let Some(options) = update.dietary_options {
        accommodation.dietary_options = options;
    }
    if let Some(notes) = update.general_notes {
        accommodation.general_notes = notes;
    }
    next
}

/// Deletes an accommodation with its rooms and beds, its votes and its agreed mark.
pub fn remove_accommodation(event: &Event, accommodation_id: &str) -> Event {
    if event.accommodation(accommodation_id).is_none() {
        return event.clone();
    }
    let mut next = event.clone();
    next.accommodations.retain(|a| a.id != accommodation_id);
    strip_item_votes(
        &mut next.votes,
        AgreedCategory::Accommodations.vote_category(),
        accommodation_id,
    );
    forget_agreed(&mut next, AgreedCategory::Accommodations, accommodation_id);
    next
}

pub fn add_room(event: &Event, accommodation_id: &str, input: NewRoom) -> Event {
    let mut next = event.clone();
    let Some(accommodation) = next.accommodation_mut(accommodation_id) else {
        return event.clone();
    };
    accommodation.rooms.push(Room {
        id: generate_id("room"),
        name: optional_non_blank(input.name.as_deref()),
        room_type: input.room_type,
        beds: Vec::new(),
        notes: optional_non_blank(input.notes.as_deref()),
    });
    next
}

pub fn update_room(
    event: &Event,
    accommodation_id: &str,
    room_id: &str,
    update: RoomUpdate,
) -> Event {
    let mut next = event.clone();
    let Some(room) = room_mut(&mut next, accommodation_id, room_id) else {
        return event.clone();
    };
    if let Some(name) = update.name {
        room.name = non_blank(&name);
    }
    if let Some(room_type) = update.room_type {
        room.room_type = room_type;
    }
    if let Some(notes) = update.notes {
        room.notes = non_blank(&notes);
    }
    next
}

/// Deletes a room. Its occupants simply become unassigned.
pub fn remove_room(event: &Event, accommodation_id: &str, room_id: &str) -> Event {
    let mut next = event.clone();
    let Some(accommodation) = next.accommodation_mut(accommodation_id) else {
        return event.clone();
    };
    let before = accommodation.rooms.len();
    accommodation.rooms.retain(|r| r.id != room_id);
    if accommodation.rooms.len() == before {
        return event.clone();
    }
    next
}

pub fn add_bed(event: &Event, accommodation_id: &str, room_id: &str, input: NewBed) -> Event {
    let mut next = event.clone();
    let Some(room) = room_mut(&mut next, accommodation_id, room_id) else {
        return event.clone();
    };
    room.beds.push(Bed {
        id: generate_id("bed"),
        bed_type: input.bed_type,
        notes: optional_non_blank(input.notes.as_deref()),
        assigned_guest_ids: Vec::new(),
    });
    next
}

/// Patches a bed. Changing the type to a smaller capacity keeps the earliest
/// occupants and unassigns the rest.
pub fn update_bed(event: &Event, target: &BedLocator, update: BedUpdate) -> Event {
    let mut next = event.clone();
    let Some(bed) = bed_mut(&mut next, target) else {
        return event.clone();
    };
    if let Some(bed_type) = update.bed_type {
        bed.bed_type = bed_type;
        let capacity = bed.capacity();
        if bed.assigned_guest_ids.len() > capacity {
            warn!(
                "Bed {} shrunk to {}, unassigning {} guest(s)",
                bed.id,
                bed_type,
                bed.assigned_guest_ids.len() - capacity
            );
            bed.assigned_guest_ids.truncate(capacity);
        }
    }
    if let Some(notes) = update.notes {
        bed.notes = non_blank(&notes);
    }
    next
}

pub fn remove_bed(event: &Event, target: &BedLocator) -> Event {
    let mut next = event.clone();
    let Some(room) = room_mut(&mut next, &target.accommodation_id, &target.room_id) else {
        return event.clone();
    };
    let before = room.beds.len();
    room.beds.retain(|b| b.id != target.bed_id);
    if room.beds.len() == before {
        return event.clone();
    }
    next
}
