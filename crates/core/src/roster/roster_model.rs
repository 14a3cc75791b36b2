//! Guest and group domain models.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};

use crate::lodging::{BedType, RoomType};

/// What a guest asked for. Purely informational; nothing here blocks an assignment.
///
/// Unset room and bed types are stored as empty strings.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPreferences {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub room_type: Option<RoomType>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub bed_type: Option<BedType>,
    #[serde(default)]
    pub children_beds: u32,
    #[serde(default)]
    pub animals: String,
    #[serde(default)]
    pub food_preferences: Vec<String>,
    #[serde(default)]
    pub general_notes: String,
}

/// A participant of one event.
///
/// `user_id` links the record to an account that can log in and vote. A guest
/// may only be a group admin while it has both a group and a linked account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_organizer: bool,
    #[serde(default)]
    pub is_group_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub preferences: GuestPreferences,
}

impl Guest {
    /// Whether the admin flag could be set on this guest right now.
    pub fn can_be_group_admin(&self) -> bool {
        self.group_id.is_some() && self.user_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
}
