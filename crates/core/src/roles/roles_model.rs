use std::fmt;

use serde::{Deserialize, Serialize};

/// What a user may do inside one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Organizer,
    #[serde(rename = "Group Admin")]
    GroupAdmin,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Organizer => "Organizer",
            UserRole::GroupAdmin => "Group Admin",
            UserRole::Guest => "Guest",
        }
    }

    pub fn is_organizer(&self) -> bool {
        matches!(self, UserRole::Organizer)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
