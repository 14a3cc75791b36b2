//! Voting domain models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The things guests vote on. Each category has its own ledger and lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteCategory {
    Days,
    Locations,
    Accommodations,
    Activities,
}

impl VoteCategory {
    pub const ALL: [VoteCategory; 4] = [
        VoteCategory::Days,
        VoteCategory::Locations,
        VoteCategory::Accommodations,
        VoteCategory::Activities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteCategory::Days => "days",
            VoteCategory::Locations => "locations",
            VoteCategory::Accommodations => "accommodations",
            VoteCategory::Activities => "activities",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for VoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single availability answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoteValue {
    Available,
    Maybe,
    NotAvailable,
}

impl VoteValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::Available => "available",
            VoteValue::Maybe => "maybe",
            VoteValue::NotAvailable => "not-available",
        }
    }
}

/// item id -> vote
pub type GuestVotes = BTreeMap<String, VoteValue>;

/// guest id -> that guest's votes
pub type CategoryVotes = BTreeMap<String, GuestVotes>;

/// The full ledger: category -> guest id -> item id -> vote.
///
/// A missing entry at any level means "no vote cast".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Votes(BTreeMap<VoteCategory, CategoryVotes>);

impl Votes {
    pub fn category(&self, category: VoteCategory) -> Option<&CategoryVotes> {
        self.0.get(&category)
    }

    pub fn get(&self, category: VoteCategory, guest_id: &str, item_id: &str) -> Option<VoteValue> {
        self.0
            .get(&category)
            .and_then(|guests| guests.get(guest_id))
            .and_then(|items| items.get(item_id))
            .copied()
    }

    pub(crate) fn set(
        &mut self,
        category: VoteCategory,
        guest_id: &str,
        item_id: &str,
        value: VoteValue,
    ) {
        self.0
            .entry(category)
            .or_default()
            .entry(guest_id.to_string())
            .or_default()
            .insert(item_id.to_string(), value);
    }

    pub(crate) fn categories_mut(
        &mut self,
    ) -> impl Iterator<Item = (&VoteCategory, &mut CategoryVotes)> {
        self.0.iter_mut()
    }

    pub(crate) fn category_mut(&mut self, category: VoteCategory) -> Option<&mut CategoryVotes> {
        self.0.get_mut(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|guests| guests.values().all(|items| items.is_empty()))
    }
}

/// Per-category lock. While a category is locked only the organizer may vote in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VotingLocked {
    pub days: bool,
    pub locations: bool,
    pub accommodations: bool,
    pub activities: bool,
}

impl VotingLocked {
    pub fn is_locked(&self, category: VoteCategory) -> bool {
        match category {
            VoteCategory::Days => self.days,
            VoteCategory::Locations => self.locations,
            VoteCategory::Accommodations => self.accommodations,
            VoteCategory::Activities => self.activities,
        }
    }

    pub(crate) fn flag_mut(&mut self, category: VoteCategory) -> &mut bool {
        match category {
            VoteCategory::Days => &mut self.days,
            VoteCategory::Locations => &mut self.locations,
            VoteCategory::Accommodations => &mut self.accommodations,
            VoteCategory::Activities => &mut self.activities,
        }
    }
}

/// Vote counts for one item. Guests who did not vote are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub available: usize,
    pub maybe: usize,
    pub not_available: usize,
}

impl VoteTally {
    pub fn total(&self) -> usize {
        self.available + self.maybe + self.not_available
    }
}
