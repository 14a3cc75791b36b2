//! Property-based integration tests for the planner transitions.
//!
//! Random sequences of edits are applied to a small event and the structural
//! invariants are checked after every step.

use std::collections::HashSet;

use chrono::NaiveDate;
use event_planner_core::agreement::{is_agreed, toggle_agreed, AgreedCategory};
use event_planner_core::events::{create_event, Event, NewEvent};
use event_planner_core::lodging::{
    add_accommodation, add_bed, add_room, assign_guest_to_bed, unassign_guest, update_bed,
    BedLocator, BedType, BedUpdate, NewAccommodation, NewBed, NewRoom, RoomType,
};
use event_planner_core::proposals::{add_proposed_day, remove_proposed_day};
use event_planner_core::roster::{
    add_guest, assign_guest_to_group, create_group, remove_group, remove_guest,
    toggle_group_admin_flag,
};
use event_planner_core::store::migrate_event;
use event_planner_core::users::User;
use event_planner_core::voting::{cast_vote, VoteCategory, VoteValue};
use proptest::prelude::*;
use proptest::sample::select;

// =============================================================================
// Fixtures
// =============================================================================

fn planner_users() -> Vec<User> {
    ["Ann", "Ben", "Cat"]
        .iter()
        .enumerate()
        .map(|(i, name)| User {
            id: format!("user-{}", i + 1),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "password".to_string(),
        })
        .collect()
}

/// An event organized by Ann with five guests (Ann, Ben and Cat linked), two
/// groups, three proposed days and one room holding `bed_types`.
fn base_event(bed_types: &[BedType]) -> Event {
    let users = planner_users();
    let mut event = create_event(
        &users[0],
        NewEvent {
            title: "Trip".to_string(),
            ..NewEvent::default()
        },
    )
    .expect("title is not blank");

    for (name, email) in [
        ("Ben", Some("ben@example.com")),
        ("Cat", Some("cat@example.com")),
        ("Dan", None),
        ("Eve", Some("eve@example.com")),
    ] {
        event = add_guest(&event, &users, name, email);
    }
    event = create_group(&event, "North");
    event = create_group(&event, "South");
    for day in 1..=3 {
        event = add_proposed_day(&event, NaiveDate::from_ymd_opt(2025, 7, day).unwrap());
    }

    event = add_accommodation(
        &event,
        NewAccommodation {
            name: "Hut".to_string(),
            ..NewAccommodation::default()
        },
    );
    let accommodation_id = event.accommodations[0].id.clone();
    event = add_room(
        &event,
        &accommodation_id,
        NewRoom {
            name: None,
            room_type: RoomType::Family,
            notes: None,
        },
    );
    let room_id = event.accommodations[0].rooms[0].id.clone();
    for bed_type in bed_types {
        event = add_bed(
            &event,
            &accommodation_id,
            &room_id,
            NewBed {
                bed_type: *bed_type,
                notes: None,
            },
        );
    }
    event
}

fn bed_locators(event: &Event) -> Vec<BedLocator> {
    let mut locators = Vec::new();
    for accommodation in &event.accommodations {
        for room in &accommodation.rooms {
            for bed in &room.beds {
                locators.push(BedLocator::new(&accommodation.id, &room.id, &bed.id));
            }
        }
    }
    locators
}

fn pick(ids: &[String], index: usize) -> Option<&str> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].as_str())
    }
}

// =============================================================================
// Generators
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    AssignBed(usize, usize),
    Unassign(usize),
    ResizeBed(usize, BedType),
    RemoveGuest(usize),
    AssignGroup(usize, Option<usize>),
    ToggleAdmin(usize),
    RemoveGroup(usize),
    Vote(usize, usize, VoteValue),
    RemoveDay(usize),
    ToggleAgreedDay(usize),
}

fn arb_bed_type() -> impl Strategy<Value = BedType> {
    select(BedType::ALL.to_vec())
}

fn arb_vote_value() -> impl Strategy<Value = VoteValue> {
    select(vec![VoteValue::Available, VoteValue::Maybe, VoteValue::NotAvailable])
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..8usize, 0..4usize).prop_map(|(g, b)| Op::AssignBed(g, b)),
        1 => (0..8usize).prop_map(Op::Unassign),
        1 => (0..4usize, arb_bed_type()).prop_map(|(b, t)| Op::ResizeBed(b, t)),
        1 => (0..8usize).prop_map(Op::RemoveGuest),
        2 => (0..8usize, proptest::option::of(0..3usize))
            .prop_map(|(g, grp)| Op::AssignGroup(g, grp)),
        2 => (0..8usize).prop_map(Op::ToggleAdmin),
        1 => (0..3usize).prop_map(Op::RemoveGroup),
        3 => (0..8usize, 0..4usize, arb_vote_value()).prop_map(|(g, d, v)| Op::Vote(g, d, v)),
        1 => (0..4usize).prop_map(Op::RemoveDay),
        1 => (0..4usize).prop_map(Op::ToggleAgreedDay),
    ]
}

fn apply(event: &Event, op: &Op) -> Event {
    let guests: Vec<String> = event.guests.iter().map(|g| g.id.clone()).collect();
    let groups: Vec<String> = event.groups.iter().map(|g| g.id.clone()).collect();
    let days: Vec<String> = event.proposed_days.iter().map(|d| d.id.clone()).collect();
    let beds = bed_locators(event);
    let bed = |index: usize| (!beds.is_empty()).then(|| beds[index % beds.len()].clone());

    match op {
        Op::AssignBed(g, b) => match (pick(&guests, *g), bed(*b)) {
            (Some(guest_id), Some(target)) => assign_guest_to_bed(event, guest_id, &target).event,
            _ => event.clone(),
        },
        Op::Unassign(g) => match pick(&guests, *g) {
            Some(guest_id) => unassign_guest(event, guest_id),
            None => event.clone(),
        },
        Op::ResizeBed(b, bed_type) => match bed(*b) {
            Some(target) => update_bed(
                event,
                &target,
                BedUpdate {
                    bed_type: Some(*bed_type),
                    notes: None,
                },
            ),
            None => event.clone(),
        },
        Op::RemoveGuest(g) => match pick(&guests, *g) {
            Some(guest_id) => remove_guest(event, guest_id),
            None => event.clone(),
        },
        Op::AssignGroup(g, group) => match pick(&guests, *g) {
            Some(guest_id) => {
                let group_id = group.and_then(|i| pick(&groups, i));
                assign_guest_to_group(event, guest_id, group_id)
            }
            None => event.clone(),
        },
        Op::ToggleAdmin(g) => match pick(&guests, *g) {
            Some(guest_id) => toggle_group_admin_flag(event, guest_id),
            None => event.clone(),
        },
        Op::RemoveGroup(i) => match pick(&groups, *i) {
            Some(group_id) => remove_group(event, group_id),
            None => event.clone(),
        },
        Op::Vote(g, d, value) => match (pick(&guests, *g), pick(&days, *d)) {
            (Some(guest_id), Some(day_id)) => {
                cast_vote(event, VoteCategory::Days, guest_id, day_id, *value)
            }
            _ => event.clone(),
        },
        Op::RemoveDay(d) => match pick(&days, *d) {
            Some(day_id) => remove_proposed_day(event, day_id),
            None => event.clone(),
        },
        Op::ToggleAgreedDay(d) => match pick(&days, *d) {
            Some(day_id) => toggle_agreed(event, AgreedCategory::Days, day_id),
            None => event.clone(),
        },
    }
}

// =============================================================================
// Invariants
// =============================================================================

fn check_invariants(event: &Event) -> Result<(), TestCaseError> {
    let guest_ids: HashSet<&str> = event.guests.iter().map(|g| g.id.as_str()).collect();
    let day_ids: HashSet<&str> = event.proposed_days.iter().map(|d| d.id.as_str()).collect();

    let mut placed = HashSet::new();
    for bed in event
        .accommodations
        .iter()
        .flat_map(|a| a.rooms.iter())
        .flat_map(|r| r.beds.iter())
    {
        prop_assert!(
            bed.assigned_guest_ids.len() <= bed.capacity(),
            "bed {} over capacity",
            bed.id
        );
        for id in &bed.assigned_guest_ids {
            prop_assert!(guest_ids.contains(id.as_str()), "unknown occupant {}", id);
            prop_assert!(placed.insert(id.clone()), "guest {} in two beds", id);
        }
    }

    for group in &event.groups {
        if let Some(admin_id) = &group.admin_id {
            let admin = event.guests.iter().find(|g| &g.id == admin_id);
            prop_assert!(admin.is_some_and(|g| g.is_group_admin
                && g.group_id.as_deref() == Some(group.id.as_str())));
        }
    }
    for guest in event.guests.iter().filter(|g| g.is_group_admin) {
        prop_assert!(guest.user_id.is_some(), "unlinked admin {}", guest.id);
        let group_id = guest.group_id.as_deref();
        prop_assert!(group_id.is_some(), "ungrouped admin {}", guest.id);
        let group = event.groups.iter().find(|g| Some(g.id.as_str()) == group_id);
        prop_assert!(group.is_some_and(|g| g.admin_id.as_deref() == Some(guest.id.as_str())));
    }

    let votes = serde_json::to_value(&event.votes).unwrap();
    if let Some(voters) = votes.get("days").and_then(|v| v.as_object()) {
        for (voter, items) in voters {
            let items = items.as_object().unwrap();
            prop_assert!(
                items.is_empty() || guest_ids.contains(voter.as_str()),
                "votes left for removed guest {}",
                voter
            );
            for day_id in items.keys() {
                prop_assert!(
                    day_ids.contains(day_id.as_str()),
                    "votes left for removed day {}",
                    day_id
                );
            }
        }
    }
    for day_id in &event.agreed_days {
        prop_assert!(day_ids.contains(day_id.as_str()), "agreed mark on removed day {}", day_id);
    }
    Ok(())
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Bed occupancy, admin linkage and the removal cascades hold after any
    /// sequence of edits.
    #[test]
    fn prop_invariants_hold_after_any_sequence(
        bed_types in proptest::collection::vec(arb_bed_type(), 1..4),
        ops in proptest::collection::vec(arb_op(), 0..40)
    ) {
        let mut event = base_event(&bed_types);
        check_invariants(&event)?;
        for op in &ops {
            event = apply(&event, op);
            check_invariants(&event)?;
        }
    }

    /// Toggling the same agreed mark twice restores the original state.
    #[test]
    fn prop_toggle_agreed_is_an_involution(
        day in 0..3usize,
        ops in proptest::collection::vec(arb_op(), 0..20)
    ) {
        let event = ops.iter().fold(base_event(&[BedType::Double]), |e, op| apply(&e, op));
        let days: Vec<String> = event.proposed_days.iter().map(|d| d.id.clone()).collect();
        if let Some(day_id) = pick(&days, day) {
            let once = toggle_agreed(&event, AgreedCategory::Days, day_id);
            prop_assert_ne!(
                is_agreed(&once, AgreedCategory::Days, day_id),
                is_agreed(&event, AgreedCategory::Days, day_id)
            );
            let twice = toggle_agreed(&once, AgreedCategory::Days, day_id);
            prop_assert_eq!(twice, event);
        }
    }

    /// A state produced by the transitions loads back unchanged.
    #[test]
    fn prop_loader_round_trips_consistent_state(
        bed_types in proptest::collection::vec(arb_bed_type(), 1..4),
        ops in proptest::collection::vec(arb_op(), 0..30)
    ) {
        let event = ops.iter().fold(base_event(&bed_types), |e, op| apply(&e, op));
        let raw = serde_json::to_value(&event).unwrap();
        let loaded = migrate_event(&raw, &planner_users()).unwrap();
        prop_assert_eq!(loaded, event);
    }
}
