//! Accommodation, room and bed models plus bed-assignment result types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DOUBLE_BED_CAPACITY, SINGLE_BED_CAPACITY};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedType {
    Single,
    Double,
    Queen,
    King,
    Bunk,
    Sofa,
    Other,
}

impl BedType {
    pub const ALL: [BedType; 7] = [
        BedType::Single,
        BedType::Double,
        BedType::Queen,
        BedType::King,
        BedType::Bunk,
        BedType::Sofa,
        BedType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BedType::Single => "single",
            BedType::Double => "double",
            BedType::Queen => "queen",
            BedType::King => "king",
            BedType::Bunk => "bunk",
            BedType::Sofa => "sofa",
            BedType::Other => "other",
        }
    }

    /// Only double beds take two guests; every other type takes one.
    pub fn capacity(&self) -> usize {
        match self {
            BedType::Double => DOUBLE_BED_CAPACITY,
            _ => SINGLE_BED_CAPACITY,
        }
    }
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BedType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown bed type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Family,
    Other,
}

impl RoomType {
    pub const ALL: [RoomType; 5] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::Suite,
        RoomType::Family,
        RoomType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Suite => "suite",
            RoomType::Family => "family",
            RoomType::Other => "other",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown room type '{}'", s))
    }
}

/// A bed inside a room.
///
/// An empty occupant list is omitted when serialized, so a vacant bed has no
/// `assignedGuestIds` field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: String,
    #[serde(rename = "type")]
    pub bed_type: BedType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_guest_ids: Vec<String>,
}

impl Bed {
    pub fn capacity(&self) -> usize {
        self.bed_type.capacity()
    }

    pub fn has_room(&self) -> bool {
        self.assigned_guest_ids.len() < self.capacity()
    }

    pub fn is_occupied_by(&self, guest_id: &str) -> bool {
        self.assigned_guest_ids.iter().any(|id| id == guest_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default)]
    pub beds: Vec<Bed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub children_beds_available: bool,
    #[serde(default)]
    pub allows_animals: bool,
    #[serde(default)]
    pub food_services: Vec<String>,
    #[serde(default)]
    pub dietary_options: Vec<String>,
    #[serde(default)]
    pub general_notes: String,
}

/// Input model for a new accommodation. Rooms are added afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccommodation {
    pub name: String,
    pub description: Option<String>,
    pub children_beds_available: bool,
    pub allows_animals: bool,
    pub food_services: Vec<String>,
    pub dietary_options: Vec<String>,
    pub general_notes: String,
}

/// Patch for an accommodation; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub children_beds_available: Option<bool>,
    pub allows_animals: Option<bool>,
    pub food_services: Option<Vec<String>>,
    pub dietary_options: Option<Vec<String>>,
    pub general_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub name: Option<String>,
    pub room_type: RoomType,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub room_type: Option<RoomType>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBed {
    pub bed_type: BedType,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedUpdate {
    pub bed_type: Option<BedType>,
    pub notes: Option<String>,
}

/// Addresses one bed by its full ownership path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedLocator {
    pub accommodation_id: String,
    pub room_id: String,
    pub bed_id: String,
}

impl BedLocator {
    pub fn new(
        accommodation_id: impl Into<String>,
        room_id: impl Into<String>,
        bed_id: impl Into<String>,
    ) -> Self {
        Self {
            accommodation_id: accommodation_id.into(),
            room_id: room_id.into(),
            bed_id: bed_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BedAssignmentOutcome {
    /// The guest now occupies the target bed and no other.
    Assigned,
    /// The target bed was full. The guest was still removed from their previous bed.
    CapacityExceeded,
    /// No bed at the given path. The guest was still removed from their previous bed.
    BedNotFound,
    /// No guest with the given id; nothing changed.
    GuestNotFound,
}

/// Result of `assign_guest_to_bed`: the next event value and what happened.
#[derive(Debug, Clone)]
pub struct BedAssignment {
    pub event: Event,
    pub outcome: BedAssignmentOutcome,
}

/// How well a bed matches a guest's recorded bed preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferenceStatus {
    Fulfilled,
    Unfulfilled,
    Unknown,
}
