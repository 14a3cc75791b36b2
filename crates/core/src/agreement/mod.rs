//! Agreement tracker - items the organizer has finalized, independent of votes.

mod agreement_model;
mod agreement_transitions;


pub use agreement_model::AgreedCategory;
pub use agreement_transitions::{
    agreed_accommodations, agreed_days, agreed_items, agreed_locations, is_agreed, toggle_agreed,
};

pub(crate) use agreement_transitions::forget_agreed;
