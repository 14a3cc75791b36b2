//! Persistence boundary, the explicit store object and the legacy loader.

mod store_memory;
mod store_migration;
mod store_model;
mod store_service;
mod store_traits;


pub use store_memory::InMemoryKeyValueStore;
pub use store_migration::{migrate_event, migrate_events, migrate_users};
pub use store_model::AppState;
pub use store_service::{demo_state, PlannerStore};
pub use store_traits::KeyValueStoreTrait;
