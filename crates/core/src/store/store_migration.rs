//! Loader that turns whatever shape was persisted into the current data model.
//!
//! The store is unversioned, so every load goes through here. Repairs are
//! logged at warn; nothing in here fails an entire load because of one bad
//! record.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate};
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::errors::{Result, ValidationError};
use crate::events::Event;
use crate::lodging::{BedType, RoomType};
use crate::users::User;
use crate::voting::{VoteCategory, VoteValue};

/// Reads the persisted users array. Records without an id, or repeating an
/// id already seen, are dropped.
pub fn migrate_users(raw: &Value) -> Result<Vec<User>> {
    let Some(items) = raw.as_array() else {
        return Err(ValidationError::MalformedData("users blob is not an array".to_string()).into());
    };
    let mut seen = HashSet::new();
    let mut users = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<User>(strip_nulls(item.clone())) {
            Ok(user) if !user.id.is_empty() && seen.insert(user.id.clone()) => users.push(user),
            Ok(user) => warn!("Skipping user record with empty or duplicate id '{}'", user.id),
            Err(e) => warn!("Skipping unreadable user record: {}", e),
        }
    }
    Ok(users)
}

/// Reads the persisted events array. Events that cannot be read even after
/// normalization are skipped.
pub fn migrate_events(raw: &Value, users: &[User]) -> Result<Vec<Event>> {
    let Some(items) = raw.as_array() else {
        return Err(
            ValidationError::MalformedData("events blob is not an array".to_string()).into(),
        );
    };
    let mut events = Vec::with_capacity(items.len());
    for item in items {
        match migrate_event(item, users) {
            Ok(event) => events.push(event),
            Err(e) => warn!("Skipping unreadable event record: {}", e),
        }
    }
    Ok(events)
}

/// Normalizes one persisted event.
pub fn migrate_event(raw: &Value, users: &[User]) -> Result<Event> {
    let mut value = strip_nulls(raw.clone());
    let Some(object) = value.as_object_mut() else {
        return Err(ValidationError::MalformedData("event is not an object".to_string()).into());
    };

    let legacy_beds = normalize_guests(object);
    normalize_accommodations(object);
    normalize_dates(object);
    normalize_votes(object);

    let mut event: Event = serde_json::from_value(value)?;
    relink_guests(&mut event, users);
    rekey_user_votes(&mut event);
    repair_bed_occupancy(&mut event);
    apply_legacy_bed_assignments(&mut event, legacy_beds);
    repair_group_admins(&mut event);
    debug!("Loaded event {} ({} guests)", event.id, event.guests.len());
    Ok(event)
}

/// Removes every `null` object member recursively, so absent and null both
/// fall back to field defaults.
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

fn array_mut<'a>(object: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Vec<Value>> {
    if object.get(key).is_some_and(|v| !v.is_array()) {
        warn!("Dropping non-array '{}'", key);
        object.remove(key);
    }
    object.get_mut(key).and_then(Value::as_array_mut)
}

/// Drops legacy per-guest room/bed fields, returning (guest id, bed id) pairs
/// for the bed ones, and blanks out preference types nobody knows any more.
fn normalize_guests(object: &mut Map<String, Value>) -> Vec<(String, String)> {
    let mut legacy = Vec::new();
    let Some(guests) = array_mut(object, "guests") else {
        return legacy;
    };
    for guest in guests.iter_mut().filter_map(Value::as_object_mut) {
        guest.remove("assignedRoomId");
        let bed_id = guest.remove("assignedBedId");
        if let (Some(Value::String(guest_id)), Some(Value::String(bed_id))) =
            (guest.get("id"), bed_id)
        {
            if !bed_id.is_empty() {
                legacy.push((guest_id.clone(), bed_id));
            }
        }

        if guest.get("preferences").is_some_and(|p| !p.is_object()) {
            guest.remove("preferences");
        }
        if let Some(preferences) = guest.get_mut("preferences").and_then(Value::as_object_mut) {
            blank_unknown(preferences, "roomType", |s| s.parse::<RoomType>().is_ok());
            blank_unknown(preferences, "bedType", |s| s.parse::<BedType>().is_ok());
        }
    }
    legacy
}

fn blank_unknown(object: &mut Map<String, Value>, key: &str, known: impl Fn(&str) -> bool) {
    let Some(current) = object.get(key) else {
        return;
    };
    let keep = current.as_str().is_some_and(|s| s.is_empty() || known(s));
    if !keep {
        warn!("Clearing unknown {} {}", key, current);
        object.insert(key.to_string(), Value::String(String::new()));
    }
}

fn other_unless_known(object: &mut Map<String, Value>, key: &str, known: impl Fn(&str) -> bool) {
    let keep = object
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| known(s));
    if !keep {
        object.insert(key.to_string(), Value::String("other".to_string()));
    }
}

/// Room and bed types fall back to "other"; the legacy single
/// `assignedGuestId` on a bed becomes `assignedGuestIds`.
fn normalize_accommodations(object: &mut Map<String, Value>) {
    let Some(accommodations) = array_mut(object, "accommodations") else {
        return;
    };
    for accommodation in accommodations.iter_mut().filter_map(Value::as_object_mut) {
        let Some(rooms) = array_mut(accommodation, "rooms") else {
            continue;
        };
        for room in rooms.iter_mut().filter_map(Value::as_object_mut) {
            other_unless_known(room, "type", |s| s.parse::<RoomType>().is_ok());
            let Some(beds) = array_mut(room, "beds") else {
                continue;
            };
            for bed in beds.iter_mut().filter_map(Value::as_object_mut) {
                other_unless_known(bed, "type", |s| s.parse::<BedType>().is_ok());
                let legacy = bed.remove("assignedGuestId");
                let mut occupants: Vec<Value> = match bed.remove("assignedGuestIds") {
                    Some(Value::Array(ids)) => ids.into_iter().filter(Value::is_string).collect(),
                    _ => Vec::new(),
                };
                if let Some(id) = legacy.filter(|v| v.as_str().is_some_and(|s| !s.is_empty())) {
                    if !occupants.contains(&id) {
                        occupants.push(id);
                    }
                }
                if !occupants.is_empty() {
                    bed.insert("assignedGuestIds".to_string(), Value::Array(occupants));
                }
            }
        }
    }
}

/// Accepts plain dates and full timestamps; anything else is dropped.
fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

fn normalize_dates(object: &mut Map<String, Value>) {
    if let Some(days) = array_mut(object, "proposedDays") {
        days.retain_mut(|day| {
            let Some(day) = day.as_object_mut() else {
                return false;
            };
            match day.get("date").and_then(parse_date) {
                Some(date) => {
                    day.insert("date".to_string(), Value::String(date.to_string()));
                    true
                }
                None => {
                    warn!("Dropping proposed day with unreadable date: {:?}", day.get("date"));
                    false
                }
            }
        });
    }
    if let Some(ranges) = array_mut(object, "dateRanges") {
        ranges.retain_mut(|range| {
            let Some(range) = range.as_object_mut() else {
                return false;
            };
            let start = range.get("start").and_then(parse_date);
            let end = range.get("end").and_then(parse_date);
            match (start, end) {
                (Some(start), Some(end)) => {
                    range.insert("start".to_string(), Value::String(start.to_string()));
                    range.insert("end".to_string(), Value::String(end.to_string()));
                    true
                }
                _ => {
                    warn!("Dropping date range with unreadable bounds");
                    false
                }
            }
        });
    }
}

/// Keeps only known categories and valid vote values.
fn normalize_votes(object: &mut Map<String, Value>) {
    let Some(votes) = object.remove("votes") else {
        return;
    };
    let Value::Object(categories) = votes else {
        warn!("Dropping non-object votes");
        return;
    };
    let mut cleaned = Map::new();
    for (category, voters) in categories {
        if VoteCategory::parse(&category).is_none() {
            warn!("Dropping votes in unknown category '{}'", category);
            continue;
        }
        let Value::Object(voters) = voters else {
            continue;
        };
        let mut kept_voters = Map::new();
        for (voter, items) in voters {
            let Value::Object(items) = items else {
                continue;
            };
            let kept_items: Map<String, Value> = items
                .into_iter()
                .filter(|(_, v)| serde_json::from_value::<VoteValue>(v.clone()).is_ok())
                .collect();
            kept_voters.insert(voter, Value::Object(kept_items));
        }
        cleaned.insert(category, Value::Object(kept_voters));
    }
    object.insert("votes".to_string(), Value::Object(cleaned));
}

/// A guest whose email belongs to a registered user is linked to that user.
fn relink_guests(event: &mut Event, users: &[User]) {
    for guest in event.guests.iter_mut() {
        let Some(email) = guest.email.as_deref() else {
            continue;
        };
        if let Some(user) = users.iter().find(|u| u.email == email) {
            guest.user_id = Some(user.id.clone());
        }
    }
}

/// Older data keyed votes by user id. Those move to the user's guest record;
/// votes the guest cast directly win over moved ones.
fn rekey_user_votes(event: &mut Event) {
    let guest_ids: HashSet<&str> = event.guests.iter().map(|g| g.id.as_str()).collect();
    let by_user: HashMap<&str, &str> = event
        .guests
        .iter()
        .filter_map(|g| g.user_id.as_deref().map(|u| (u, g.id.as_str())))
        .collect();
    let mut moves: Vec<(String, String)> = Vec::new();
    for (_, voters) in event.votes.categories_mut() {
        for voter in voters.keys() {
            if guest_ids.contains(voter.as_str()) {
                continue;
            }
            if let Some(guest_id) = by_user.get(voter.as_str()) {
                moves.push((voter.clone(), (*guest_id).to_string()));
            }
        }
    }
    if moves.is_empty() {
        return;
    }
    let moves: HashMap<String, String> = moves.into_iter().collect();
    for (category, voters) in event.votes.categories_mut() {
        for (user_id, guest_id) in &moves {
            let Some(items) = voters.remove(user_id) else {
                continue;
            };
            debug!("Re-keying {} votes of user {} to guest {}", category, user_id, guest_id);
            let target = voters.entry(guest_id.clone()).or_default();
            for (item, value) in items {
                target.entry(item).or_insert(value);
            }
        }
    }
}

/// Each guest keeps only the first bed it appears in; beds over capacity keep
/// their earliest occupants.
fn repair_bed_occupancy(event: &mut Event) {
    let mut placed: HashSet<String> = HashSet::new();
    for accommodation in event.accommodations.iter_mut() {
        for room in accommodation.rooms.iter_mut() {
            for bed in room.beds.iter_mut() {
                let before = bed.assigned_guest_ids.len();
                bed.assigned_guest_ids.retain(|id| placed.insert(id.clone()));
                let capacity = bed.capacity();
                if bed.assigned_guest_ids.len() > capacity {
                    for dropped in bed.assigned_guest_ids.drain(capacity..) {
                        placed.remove(&dropped);
                    }
                }
                if bed.assigned_guest_ids.len() != before {
                    warn!(
                        "Repaired occupancy of bed {} ({} -> {})",
                        bed.id,
                        before,
                        bed.assigned_guest_ids.len()
                    );
                }
            }
        }
    }
}

/// Places guests that only carried a legacy `assignedBedId`, if they are in
/// no bed yet and the bed still has room.
fn apply_legacy_bed_assignments(event: &mut Event, assignments: Vec<(String, String)>) {
    for (guest_id, bed_id) in assignments {
        if event.guest(&guest_id).is_none() {
            continue;
        }
        let beds = || {
            event
                .accommodations
                .iter()
                .flat_map(|a| a.rooms.iter())
                .flat_map(|r| r.beds.iter())
        };
        if beds().any(|b| b.is_occupied_by(&guest_id)) {
            continue;
        }
        let bed = event
            .accommodations
            .iter_mut()
            .flat_map(|a| a.rooms.iter_mut())
            .flat_map(|r| r.beds.iter_mut())
            .find(|b| b.id == bed_id);
        match bed {
            Some(bed) if bed.has_room() => {
                debug!("Placing guest {} into bed {} from legacy data", guest_id, bed_id);
                bed.assigned_guest_ids.push(guest_id);
            }
            Some(_) => warn!("Legacy bed {} is full, guest {} left unassigned", bed_id, guest_id),
            None => warn!("Legacy bed {} for guest {} no longer exists", bed_id, guest_id),
        }
    }
}

/// Re-establishes admin linkage: admins must be grouped and linked, a group
/// has at most one admin, and `adminId` always names a member flagged admin.
fn repair_group_admins(event: &mut Event) {
    let group_ids: HashSet<String> = event.groups.iter().map(|g| g.id.clone()).collect();
    for guest in event.guests.iter_mut().filter(|g| g.is_group_admin) {
        let grouped = guest
            .group_id
            .as_ref()
            .is_some_and(|id| group_ids.contains(id));
        if !grouped || guest.user_id.is_none() {
            warn!("Guest {} cannot be a group admin, clearing flag", guest.id);
            guest.is_group_admin = false;
        }
    }

    let Event { groups, guests, .. } = event;
    for group in groups.iter_mut() {
        let is_member_admin = |guest_id: &str| {
            guests.iter().any(|g| {
                g.id == guest_id
                    && g.is_group_admin
                    && g.group_id.as_deref() == Some(group.id.as_str())
            })
        };
        if let Some(admin_id) = group.admin_id.clone() {
            if !is_member_admin(&admin_id) {
                warn!("Group {} adminId {} is stale, clearing", group.id, admin_id);
                group.admin_id = None;
            }
        }
        if group.admin_id.is_none() {
            group.admin_id = guests
                .iter()
                .find(|g| g.is_group_admin && g.group_id.as_deref() == Some(group.id.as_str()))
                .map(|g| g.id.clone());
        }
        for guest in guests.iter_mut().filter(|g| {
            g.is_group_admin
                && g.group_id.as_deref() == Some(group.id.as_str())
                && group.admin_id.as_deref() != Some(g.id.as_str())
        }) {
            warn!("Group {} already has an admin, demoting guest {}", group.id, guest.id);
            guest.is_group_admin = false;
        }
    }
}
