use serde::{Deserialize, Serialize};

use crate::voting::VoteCategory;

/// Categories that carry an agreed set. Activities are assigned, not agreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreedCategory {
    Days,
    Locations,
    Accommodations,
}

impl AgreedCategory {
    pub fn vote_category(&self) -> VoteCategory {
        match self {
            AgreedCategory::Days => VoteCategory::Days,
            AgreedCategory::Locations => VoteCategory::Locations,
            AgreedCategory::Accommodations => VoteCategory::Accommodations,
        }
    }
}

impl TryFrom<VoteCategory> for AgreedCategory {
    type Error = VoteCategory;

    fn try_from(category: VoteCategory) -> Result<Self, Self::Error> {
        match category {
            VoteCategory::Days => Ok(AgreedCategory::Days),
            VoteCategory::Locations => Ok(AgreedCategory::Locations),
            VoteCategory::Accommodations => Ok(AgreedCategory::Accommodations),
            VoteCategory::Activities => Err(category),
        }
    }
}
