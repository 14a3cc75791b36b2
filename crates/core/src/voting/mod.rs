//! Voting ledger - per-category, per-guest, per-item availability votes.

mod voting_model;
mod voting_transitions;


pub use voting_model::{
    CategoryVotes, GuestVotes, VoteCategory, VoteTally, VoteValue, Votes, VotingLocked,
};
pub use voting_transitions::{
    cast_vote, get_vote, remove_votes_for_guest, remove_votes_for_item, tally, toggle_voting_lock,
};

pub(crate) use voting_transitions::{strip_guest_votes, strip_item_votes};
