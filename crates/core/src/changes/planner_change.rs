//! Change types emitted after a successful write.

use serde::{Deserialize, Serialize};

use crate::lodging::BedLocator;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannerChange {
    /// A new event was created.
    EventCreated { event_id: String },

    /// An event was saved with a new value.
    EventUpdated { event_id: String },

    /// An event and everything it owned was deleted.
    EventDeleted { event_id: String },

    /// A bed assignment was dropped because the bed was full.
    /// The guest is left without a bed.
    BedCapacityExceeded {
        event_id: String,
        guest_id: String,
        bed: BedLocator,
    },

    /// The session identity changed (login, logout, switch, registration).
    SessionChanged { user_id: Option<String> },

    /// A new account was registered.
    UserRegistered { user_id: String },
}

impl PlannerChange {
    pub fn event_created(event_id: impl Into<String>) -> Self {
        Self::EventCreated {
            event_id: event_id.into(),
        }
    }

    pub fn event_updated(event_id: impl Into<String>) -> Self {
        Self::EventUpdated {
            event_id: event_id.into(),
        }
    }

    pub fn event_deleted(event_id: impl Into<String>) -> Self {
        Self::EventDeleted {
            event_id: event_id.into(),
        }
    }

    pub fn bed_capacity_exceeded(
        event_id: impl Into<String>,
        guest_id: impl Into<String>,
        bed: BedLocator,
    ) -> Self {
        Self::BedCapacityExceeded {
            event_id: event_id.into(),
            guest_id: guest_id.into(),
            bed,
        }
    }

    pub fn session_changed(user_id: Option<String>) -> Self {
        Self::SessionChanged { user_id }
    }

    pub fn user_registered(user_id: impl Into<String>) -> Self {
        Self::UserRegistered {
            user_id: user_id.into(),
        }
    }

    /// The event this change concerns, if any.
    pub fn event_id(&self) -> Option<&str> {
        match self {
            Self::EventCreated { event_id }
            | Self::EventUpdated { event_id }
            | Self::EventDeleted { event_id }
            | Self::BedCapacityExceeded { event_id, .. } => Some(event_id),
            Self::SessionChanged { .. } | Self::UserRegistered { .. } => None,
        }
    }
}
