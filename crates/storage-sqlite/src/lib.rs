//! SQLite storage for the event planner.
//!
//! The planner persists three string blobs (users, events, session user) through
//! [`event_planner_core::store::KeyValueStoreTrait`]. This crate implements that
//! trait on a single `kv_store` table using Diesel with SQLite, and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - A single writer task that serializes every write
//! - Environment-driven configuration
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain, PlannerStore)
//!                  │
//!                  ▼
//!     storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod config;
pub mod db;
pub mod errors;
pub mod kv_store;
pub mod schema;

use std::sync::Arc;

use log::info;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

pub use config::StorageConfig;
pub use kv_store::{KeyValueDB, KeyValueRepository};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from event-planner-core for convenience
pub use event_planner_core::errors::{DatabaseError, Error, Result};

use event_planner_core::PlannerStore;

/// Opens (creating and migrating if needed) the database named by `config` and
/// loads a [`PlannerStore`] from it.
///
/// Must be called from within a Tokio runtime: the writer task is spawned here.
pub async fn open_planner_store(config: &StorageConfig) -> Result<PlannerStore> {
    let db_path = init(&config.db_path)?;
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());
    let repository = Arc::new(KeyValueRepository::new(Arc::clone(&pool), writer));
    info!("Opening planner store at {}", db_path);
    PlannerStore::open(repository, config.seed_demo).await
}
