#[cfg(test)]
mod tests {
    use crate::agreement::{is_agreed, toggle_agreed, AgreedCategory};
    use crate::events::Event;
    use crate::lodging::*;
    use crate::roster::GuestPreferences;
    use crate::test_fixtures::{double_bed, queen_bed, sample_event, single_bed};
    use crate::voting::{cast_vote, get_vote, VoteCategory, VoteValue};

    fn occupants(event: &Event, target: &BedLocator) -> Vec<String> {
        find_bed(event, target).unwrap().assigned_guest_ids.clone()
    }

    fn assign(event: &Event, guest_id: &str, target: &BedLocator) -> Event {
        let assignment = assign_guest_to_bed(event, guest_id, target);
        assert_eq!(assignment.outcome, BedAssignmentOutcome::Assigned);
        assignment.event
    }

    #[test]
    fn test_double_bed_takes_two_then_overflows() {
        let event = sample_event();
        let event = assign(&event, "guest-bob", &double_bed());
        let event = assign(&event, "guest-carol", &double_bed());
        assert_eq!(occupants(&event, &double_bed()), vec!["guest-bob", "guest-carol"]);

        let third = assign_guest_to_bed(&event, "guest-dave", &double_bed());
        assert_eq!(third.outcome, BedAssignmentOutcome::CapacityExceeded);
        assert_eq!(
            occupants(&third.event, &double_bed()),
            vec!["guest-bob", "guest-carol"]
        );
        assert_eq!(bed_of_guest(&third.event, "guest-dave"), None);
    }

    #[test]
    fn test_reassignment_moves_guest() {
        let event = sample_event();
        let event = assign(&event, "guest-bob", &double_bed());
        let event = assign(&event, "guest-bob", &queen_bed());
        assert!(occupants(&event, &double_bed()).is_empty());
        assert_eq!(occupants(&event, &queen_bed()), vec!["guest-bob"]);
        assert_eq!(bed_of_guest(&event, "guest-bob"), Some(queen_bed()));
    }

    #[test]
    fn test_overflow_still_clears_previous_bed() {
        let event = sample_event();
        let event = assign(&event, "guest-carol", &single_bed());
        let event = assign(&event, "guest-bob", &queen_bed());

        let overflow = assign_guest_to_bed(&event, "guest-bob", &single_bed());
        assert_eq!(overflow.outcome, BedAssignmentOutcome::CapacityExceeded);
        assert!(occupants(&overflow.event, &queen_bed()).is_empty());
        assert_eq!(bed_of_guest(&overflow.event, "guest-bob"), None);
    }

    #[test]
    fn test_reassigning_to_same_full_bed_keeps_place() {
        let event = sample_event();
        let event = assign(&event, "guest-bob", &single_bed());
        // bob is cleared first, which frees the only place again
        let again = assign_guest_to_bed(&event, "guest-bob", &single_bed());
        assert_eq!(again.outcome, BedAssignmentOutcome::Assigned);
        assert_eq!(occupants(&again.event, &single_bed()), vec!["guest-bob"]);
    }

    #[test]
    fn test_unknown_guest_changes_nothing() {
        let event = assign(&sample_event(), "guest-bob", &double_bed());

        let missing_guest = assign_guest_to_bed(&event, "guest-nobody", &queen_bed());
        assert_eq!(missing_guest.outcome, BedAssignmentOutcome::GuestNotFound);
        assert_eq!(missing_guest.event, event);
    }

    #[test]
    fn test_unknown_bed_still_clears_previous_bed() {
        let event = assign(&sample_event(), "guest-bob", &double_bed());

        let missing_bed = BedLocator::new("acc-1", "room-1", "bed-nope");
        let result = assign_guest_to_bed(&event, "guest-bob", &missing_bed);
        assert_eq!(result.outcome, BedAssignmentOutcome::BedNotFound);
        assert_eq!(bed_of_guest(&result.event, "guest-bob"), None);
        assert!(occupants(&result.event, &double_bed()).is_empty());
        // only the occupancy changed
        assert_eq!(result.event, unassign_guest(&event, "guest-bob"));

        // bed id exists, but under another room
        let wrong_room = BedLocator::new("acc-1", "room-2", "bed-double");
        let result = assign_guest_to_bed(&event, "guest-bob", &wrong_room);
        assert_eq!(result.outcome, BedAssignmentOutcome::BedNotFound);
        assert_eq!(bed_of_guest(&result.event, "guest-bob"), None);
    }

    #[test]
    fn test_unassign_and_unassigned_guests() {
        let event = sample_event();
        assert_eq!(unassigned_guests(&event).len(), event.guests.len());

        let event = assign(&event, "guest-bob", &double_bed());
        let ids: Vec<&str> = unassigned_guests(&event).into_iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["guest-alice", "guest-carol", "guest-dave", "guest-erin"]);

        let next = unassign_guest(&event, "guest-bob");
        assert!(occupants(&next, &double_bed()).is_empty());
        assert_eq!(unassigned_guests(&next).len(), next.guests.len());
    }

    #[test]
    fn test_empty_bed_serializes_without_occupants() {
        let event = sample_event();
        let json = serde_json::to_value(find_bed(&event, &double_bed()).unwrap()).unwrap();
        assert_eq!(json["type"], "double");
        assert!(json.get("assignedGuestIds").is_none());

        let event = assign(&event, "guest-bob", &double_bed());
        let json = serde_json::to_value(find_bed(&event, &double_bed()).unwrap()).unwrap();
        assert_eq!(json["assignedGuestIds"], serde_json::json!(["guest-bob"]));
    }

    #[test]
    fn test_bed_capacity_by_type() {
        assert_eq!(BedType::Double.capacity(), 2);
        for bed_type in BedType::ALL.into_iter().filter(|t| *t != BedType::Double) {
            assert_eq!(bed_type.capacity(), 1, "{}", bed_type);
        }
        assert_eq!("bunk".parse::<BedType>(), Ok(BedType::Bunk));
        assert!("futon".parse::<BedType>().is_err());
        assert_eq!("suite".parse::<RoomType>(), Ok(RoomType::Suite));
    }

    #[test]
    fn test_preference_status() {
        let mut guest = sample_event().guest("guest-erin").unwrap().clone();
        assert_eq!(preference_status(&guest, BedType::Queen), PreferenceStatus::Unknown);

        guest.preferences = GuestPreferences {
            bed_type: Some(BedType::Queen),
            ..GuestPreferences::default()
        };
        assert_eq!(preference_status(&guest, BedType::Queen), PreferenceStatus::Fulfilled);
        assert_eq!(preference_status(&guest, BedType::Sofa), PreferenceStatus::Unfulfilled);
    }

    #[test]
    fn test_shrinking_bed_keeps_earliest_occupants() {
        let event = sample_event();
        let event = assign(&event, "guest-bob", &double_bed());
        let event = assign(&event, "guest-carol", &double_bed());

        let next = update_bed(
            &event,
            &double_bed(),
            BedUpdate {
                bed_type: Some(BedType::King),
                notes: Some("by the window".to_string()),
            },
        );
        let bed = find_bed(&next, &double_bed()).unwrap();
        assert_eq!(bed.bed_type, BedType::King);
        assert_eq!(bed.assigned_guest_ids, vec!["guest-bob"]);
        assert_eq!(bed.notes.as_deref(), Some("by the window"));
        assert_eq!(bed_of_guest(&next, "guest-carol"), None);
    }

    #[test]
    fn test_remove_accommodation_cascades() {
        let event = sample_event();
        let event = cast_vote(
            &event,
            VoteCategory::Accommodations,
            "guest-bob",
            "acc-1",
            VoteValue::Available,
        );
        let event = toggle_agreed(&event, AgreedCategory::Accommodations, "acc-1");
        let event = assign(&event, "guest-bob", &double_bed());

        let next = remove_accommodation(&event, "acc-1");
        assert!(next.accommodations.is_empty());
        assert_eq!(get_vote(&next, VoteCategory::Accommodations, "guest-bob", "acc-1"), None);
        assert!(!is_agreed(&next, AgreedCategory::Accommodations, "acc-1"));
        assert_eq!(bed_of_guest(&next, "guest-bob"), None);
        assert_eq!(remove_accommodation(&next, "acc-1"), next);
    }

    #[test]
    fn test_accommodation_editing() {
        let event = sample_event();
        assert_eq!(add_accommodation(&event, NewAccommodation::default()), event);

        let next = add_accommodation(
            &event,
            NewAccommodation {
                name: " Cabin ".to_string(),
                description: Some("  ".to_string()),
                allows_animals: true,
                ..NewAccommodation::default()
            },
        );
        let cabin = next.accommodations.last().unwrap().clone();
        assert_eq!(cabin.name, "Cabin");
        assert_eq!(cabin.description, None);
        assert!(cabin.allows_animals);
        assert!(cabin.rooms.is_empty());

        let next = update_accommodation(
            &next,
            &cabin.id,
            AccommodationUpdate {
                name: Some(" ".to_string()),
                description: Some("Near the lake".to_string()),
                ..AccommodationUpdate::default()
            },
        );
        let cabin = next.accommodation(&cabin.id).unwrap();
        assert_eq!(cabin.name, "Cabin");
        assert_eq!(cabin.description.as_deref(), Some("Near the lake"));
    }

    #[test]
    fn test_room_and_bed_editing() {
        let event = sample_event();
        let next = add_room(
            &event,
            "acc-1",
            NewRoom {
                name: Some("Attic".to_string()),
                room_type: RoomType::Family,
                notes: None,
            },
        );
        let room = next.accommodation("acc-1").unwrap().rooms.last().unwrap().clone();
        assert_eq!(room.room_type, RoomType::Family);

        let next = add_bed(
            &next,
            "acc-1",
            &room.id,
            NewBed {
                bed_type: BedType::Bunk,
                notes: None,
            },
        );
        let bunk = next.accommodation("acc-1").unwrap().rooms.last().unwrap().beds[0].clone();
        let bunk_path = BedLocator::new("acc-1", &room.id, &bunk.id);
        let next = assign(&next, "guest-erin", &bunk_path);

        let next = update_room(
            &next,
            "acc-1",
            &room.id,
            RoomUpdate {
                room_type: Some(RoomType::Suite),
                ..RoomUpdate::default()
            },
        );
        assert_eq!(
            next.accommodation("acc-1").unwrap().rooms.last().unwrap().room_type,
            RoomType::Suite
        );

        let without_room = remove_room(&next, "acc-1", &room.id);
        assert_eq!(bed_of_guest(&without_room, "guest-erin"), None);
        assert_eq!(remove_room(&without_room, "acc-1", &room.id), without_room);

        let without_bed = remove_bed(&next, &bunk_path);
        assert!(find_bed(&without_bed, &bunk_path).is_none());
        assert_eq!(
            add_bed(&event, "acc-x", "room-1", NewBed { bed_type: BedType::Sofa, notes: None }),
            event,
        );
    }
}
