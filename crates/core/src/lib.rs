//! Event Planner Core - Domain entities, state transitions, services and traits.
//!
//! This crate contains the planning logic: guests and groups, availability
//! voting, agreed items, bed and activity assignment, and the role rules that
//! decide who may do what. It is database-agnostic; the persistence boundary
//! is [`store::KeyValueStoreTrait`], implemented by the `storage-sqlite` crate.
//!
//! Transition functions are pure: they take an [`events::Event`] and return
//! the next value, leaving the input untouched. Invalid input is a no-op.

pub mod activities;
pub mod agreement;
pub mod changes;
pub mod constants;
pub mod errors;
pub mod events;
pub mod lodging;
pub mod proposals;
pub mod roles;
pub mod roster;
pub mod store;
pub mod users;
pub mod utils;
pub mod voting;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export the aggregate and the services
pub use events::{Event, EventCommand, EventService, EventServiceTrait};
pub use store::{KeyValueStoreTrait, PlannerStore};
pub use users::{User, UserService, UserServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
