//! Shared sample data for unit tests.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::activities::Activity;
use crate::constants::{EVENTS_KEY, USERS_KEY};
use crate::events::Event;
use crate::lodging::{Accommodation, Bed, BedLocator, BedType, Room, RoomType};
use crate::proposals::{Location, ProposedDay};
use crate::roster::{Group, Guest, GuestPreferences};
use crate::errors::{DatabaseError, Result};
use crate::store::{InMemoryKeyValueStore, KeyValueStoreTrait, PlannerStore};
use crate::users::User;
use crate::voting::{Votes, VotingLocked};

pub fn user(id: &str, name: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password: "password".to_string(),
    }
}

/// alice organizes, bob administers group-a, carol is a plain member.
pub fn users() -> Vec<User> {
    vec![
        user("user-alice", "Alice", "alice@example.com"),
        user("user-bob", "Bob", "bob@example.com"),
        user("user-carol", "Carol", "carol@example.com"),
        user("user-zoe", "Zoe", "zoe@example.com"),
    ]
}

pub fn guest(id: &str, name: &str) -> Guest {
    Guest {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        is_organizer: false,
        is_group_admin: false,
        group_id: None,
        user_id: None,
        preferences: GuestPreferences::default(),
    }
}

fn linked(id: &str, name: &str, user_id: &str, group_id: Option<&str>) -> Guest {
    Guest {
        email: Some(format!("{}@example.com", name.to_lowercase())),
        user_id: Some(user_id.to_string()),
        group_id: group_id.map(str::to_string),
        ..guest(id, name)
    }
}

pub fn bed(id: &str, bed_type: BedType) -> Bed {
    Bed {
        id: id.to_string(),
        bed_type,
        notes: None,
        assigned_guest_ids: Vec::new(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn double_bed() -> BedLocator {
    BedLocator::new("acc-1", "room-1", "bed-double")
}

pub fn single_bed() -> BedLocator {
    BedLocator::new("acc-1", "room-1", "bed-single")
}

pub fn queen_bed() -> BedLocator {
    BedLocator::new("acc-1", "room-2", "bed-queen")
}

/// Guests:
/// - guest-alice: organizer, linked, ungrouped
/// - guest-bob: linked, group-a admin
/// - guest-carol: linked, group-a member
/// - guest-dave: unlinked, group-b member
/// - guest-erin: unlinked, ungrouped
pub fn sample_event() -> Event {
    let mut alice = linked("guest-alice", "Alice", "user-alice", None);
    alice.is_organizer = true;
    let mut bob = linked("guest-bob", "Bob", "user-bob", Some("group-a"));
    bob.is_group_admin = true;
    let carol = linked("guest-carol", "Carol", "user-carol", Some("group-a"));
    let dave = Guest {
        group_id: Some("group-b".to_string()),
        ..guest("guest-dave", "Dave")
    };
    let erin = guest("guest-erin", "Erin");

    Event {
        id: "event-1".to_string(),
        title: "Lake Weekend".to_string(),
        description: None,
        organizer_id: "user-alice".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap(),
        date_ranges: Vec::new(),
        guests: vec![alice, bob, carol, dave, erin],
        groups: vec![
            Group {
                id: "group-a".to_string(),
                name: "Marketing".to_string(),
                admin_id: Some("guest-bob".to_string()),
            },
            Group {
                id: "group-b".to_string(),
                name: "Engineering".to_string(),
                admin_id: None,
            },
        ],
        proposed_days: vec![
            ProposedDay {
                id: "day-1".to_string(),
                date: date(2025, 7, 14),
            },
            ProposedDay {
                id: "day-2".to_string(),
                date: date(2025, 7, 15),
            },
        ],
        locations: vec![Location {
            id: "loc-1".to_string(),
            name: "Mountain Lodge".to_string(),
            address: None,
        }],
        accommodations: vec![Accommodation {
            id: "acc-1".to_string(),
            name: "Grand Hotel".to_string(),
            description: None,
            rooms: vec![
                Room {
                    id: "room-1".to_string(),
                    name: Some("Deluxe".to_string()),
                    room_type: RoomType::Double,
                    beds: vec![
                        bed("bed-double", BedType::Double),
                        bed("bed-single", BedType::Single),
                    ],
                    notes: None,
                },
                Room {
                    id: "room-2".to_string(),
                    name: None,
                    room_type: RoomType::Single,
                    beds: vec![bed("bed-queen", BedType::Queen)],
                    notes: None,
                },
            ],
            children_beds_available: false,
            allows_animals: false,
            food_services: Vec::new(),
            dietary_options: Vec::new(),
            general_notes: String::new(),
        }],
        activities: vec![Activity {
            id: "act-1".to_string(),
            name: "Hiking".to_string(),
            description: None,
            date: "2025-07-15".to_string(),
            time: "09:00".to_string(),
            assigned_guest_ids: Vec::new(),
        }],
        votes: Votes::default(),
        voting_locked: VotingLocked::default(),
        agreed_days: BTreeSet::new(),
        agreed_locations: BTreeSet::new(),
        agreed_accommodations: BTreeSet::new(),
        general_notes: None,
    }
}

/// An in-memory repository holding [`users`] and [`sample_event`], and a store opened on it.
pub async fn seeded_store() -> (Arc<PlannerStore>, Arc<InMemoryKeyValueStore>) {
    let repository = Arc::new(InMemoryKeyValueStore::with_items(seeded_items()));
    let store = PlannerStore::open(repository.clone(), false).await.unwrap();
    (Arc::new(store), repository)
}

fn seeded_items() -> [(&'static str, String); 2] {
    [
        (USERS_KEY, serde_json::to_string(&users()).unwrap()),
        (EVENTS_KEY, serde_json::to_string(&vec![sample_event()]).unwrap()),
    ]
}

/// Wraps the in-memory store. Writes fail while `failing` is set, and any
/// write touching `failing_key` fails.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryKeyValueStore,
    pub failing: AtomicBool,
    pub failing_key: Mutex<Option<&'static str>>,
}

impl FlakyStore {
    /// Holds [`users`] and [`sample_event`], like [`seeded_store`].
    pub fn seeded() -> Self {
        Self {
            inner: InMemoryKeyValueStore::with_items(seeded_items()),
            ..Self::default()
        }
    }

    pub fn fail_on_key(&self, key: &'static str) {
        *self.failing_key.lock().unwrap() = Some(key);
    }

    fn check(&self, key: &str) -> Result<()> {
        let key_fails = *self.failing_key.lock().unwrap() == Some(key);
        if key_fails || self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryFailed(format!("disk full writing {}", key)).into());
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStoreTrait for FlakyStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check(key)?;
        self.inner.set_item(key, value).await
    }

    async fn set_items(&self, items: &[(&str, &str)]) -> Result<()> {
        for (key, _) in items {
            self.check(key)?;
        }
        self.inner.set_items(items).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.check(key)?;
        self.inner.remove_item(key).await
    }
}
