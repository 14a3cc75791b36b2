//! Event aggregate and its input models.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::activities::Activity;
use crate::lodging::Accommodation;
use crate::proposals::{Location, ProposedDay};
use crate::roster::{Group, Guest};
use crate::voting::{Votes, VotingLocked};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Root aggregate. Owns every child collection; cross references between
/// children (bed occupants, group admins, votes) are plain ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub organizer_id: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub date_ranges: Vec<DateRange>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub proposed_days: Vec<ProposedDay>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub accommodations: Vec<Accommodation>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub votes: Votes,
    #[serde(default)]
    pub voting_locked: VotingLocked,
    #[serde(default)]
    pub agreed_days: BTreeSet<String>,
    #[serde(default)]
    pub agreed_locations: BTreeSet<String>,
    #[serde(default)]
    pub agreed_accommodations: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_notes: Option<String>,
}

impl Event {
    pub fn guest(&self, guest_id: &str) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == guest_id)
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn activity(&self, activity_id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == activity_id)
    }

    pub fn accommodation(&self, accommodation_id: &str) -> Option<&Accommodation> {
        self.accommodations.iter().find(|a| a.id == accommodation_id)
    }

    pub(crate) fn guest_mut(&mut self, guest_id: &str) -> Option<&mut Guest> {
        self.guests.iter_mut().find(|g| g.id == guest_id)
    }

    pub(crate) fn group_mut(&mut self, group_id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == group_id)
    }

    pub(crate) fn activity_mut(&mut self, activity_id: &str) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|a| a.id == activity_id)
    }

    pub(crate) fn accommodation_mut(
        &mut self,
        accommodation_id: &str,
    ) -> Option<&mut Accommodation> {
        self.accommodations
            .iter_mut()
            .find(|a| a.id == accommodation_id)
    }
}

/// Input model for creating an event. Ranges with a missing bound are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub date_ranges: Vec<NewDateRange>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Whole-field patch for event details; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_ranges: Option<Vec<DateRange>>,
    pub general_notes: Option<String>,
    pub voting_locked: Option<VotingLocked>,
}
