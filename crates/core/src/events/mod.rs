//! Events module - the event aggregate, its commands and the permission-checked service.

mod events_commands;
mod events_model;
mod events_permissions;
mod events_service;
mod events_traits;
mod events_transitions;


pub use events_commands::{AppliedCommand, EventCommand};
pub use events_model::{DateRange, Event, EventUpdate, NewDateRange, NewEvent};
pub use events_permissions::{authorize, scope_command};
pub use events_service::EventService;
pub use events_traits::EventServiceTrait;
pub use events_transitions::{create_event, events_for_user, update_event};
