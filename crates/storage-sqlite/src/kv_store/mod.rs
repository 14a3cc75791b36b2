//! SQLite storage for the planner's key-value blobs.

mod model;
mod repository;

pub use model::KeyValueDB;
pub use repository::KeyValueRepository;

// Re-export trait from core for convenience
pub use event_planner_core::store::KeyValueStoreTrait;
