use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};
use serde_json::Value;
use tokio::sync::Mutex;

use super::store_migration::{migrate_events, migrate_users};
use super::store_model::AppState;
use super::store_traits::KeyValueStoreTrait;
use crate::constants::{CURRENT_USER_KEY, EVENTS_KEY, USERS_KEY};
use crate::errors::{Error, Result};
use crate::events::Event;
use crate::users::User;

const DEMO_DATA: &str = include_str!("demo_data.json");

/// Demo users and events, normalized through the loader.
pub fn demo_state() -> Result<AppState> {
    let raw: Value = serde_json::from_str(DEMO_DATA)?;
    let users = migrate_users(&raw["users"])?;
    let events = migrate_events(&raw["events"], &users)?;
    Ok(AppState {
        users,
        events,
        current_user_id: None,
    })
}

/// In-memory planner state backed by a key-value store.
///
/// Reads are served from memory. Every change serializes the affected blob,
/// writes it to the repository, and only then replaces the in-memory copy, so
/// a failed write leaves both sides as they were. Changes are serialized by
/// `write_lock`; the last writer wins.
pub struct PlannerStore {
    repository: Arc<dyn KeyValueStoreTrait>,
    state: RwLock<AppState>,
    write_lock: Mutex<()>,
}

impl PlannerStore {
    /// Loads users, events and the session from `repository`.
    ///
    /// With `seed_demo`, a missing users or events blob is filled from the
    /// demo data and written back once. Stored events are normalized by the
    /// loader before anything else sees them.
    pub async fn open(repository: Arc<dyn KeyValueStoreTrait>, seed_demo: bool) -> Result<Self> {
        let stored_users = repository.get_item(USERS_KEY)?;
        let stored_events = repository.get_item(EVENTS_KEY)?;
        let stored_session = repository.get_item(CURRENT_USER_KEY)?;

        let demo = if seed_demo && (stored_users.is_none() || stored_events.is_none()) {
            Some(demo_state()?)
        } else {
            None
        };

        let users = match (stored_users, &demo) {
            (Some(json), _) => migrate_users(&serde_json::from_str::<Value>(&json)?)?,
            (None, Some(demo)) => {
                info!("Seeding {} demo users", demo.users.len());
                repository
                    .set_item(USERS_KEY, &serde_json::to_string(&demo.users)?)
                    .await?;
                demo.users.clone()
            }
            (None, None) => Vec::new(),
        };

        let events = match (stored_events, demo) {
            (Some(json), _) => migrate_events(&serde_json::from_str::<Value>(&json)?, &users)?,
            (None, Some(demo)) => {
                info!("Seeding {} demo events", demo.events.len());
                repository
                    .set_item(EVENTS_KEY, &serde_json::to_string(&demo.events)?)
                    .await?;
                demo.events
            }
            (None, None) => Vec::new(),
        };

        let current_user_id = stored_session.filter(|id| {
            let known = users.iter().any(|u| &u.id == id);
            if !known {
                warn!("Stored session user {} no longer exists", id);
            }
            known
        });

        debug!(
            "Planner store opened: {} users, {} events",
            users.len(),
            events.len()
        );
        Ok(Self {
            repository,
            state: RwLock::new(AppState {
                users,
                events,
                current_user_id,
            }),
            write_lock: Mutex::new(()),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, AppState>> {
        self.state
            .read()
            .map_err(|_| Error::Unexpected("planner state lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, AppState>> {
        self.state
            .write()
            .map_err(|_| Error::Unexpected("planner state lock poisoned".to_string()))
    }

    /// A copy of the whole state.
    pub fn snapshot(&self) -> Result<AppState> {
        Ok(self.read()?.clone())
    }

    pub fn users(&self) -> Result<Vec<User>> {
        Ok(self.read()?.users.clone())
    }

    pub fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.read()?.find_user(user_id).cloned())
    }

    pub fn events(&self) -> Result<Vec<Event>> {
        Ok(self.read()?.events.clone())
    }

    pub fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.read()?.find_event(event_id).cloned())
    }

    pub fn current_user_id(&self) -> Result<Option<String>> {
        Ok(self.read()?.current_user_id.clone())
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        Ok(self.read()?.current_user().cloned())
    }

    /// Applies `change` to a copy of the events and persists the result.
    /// If `change` fails, or leaves the events as they were, nothing is written.
    pub async fn modify_events<F, T>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Event>) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let before = self.events()?;
        let mut events = before.clone();
        let output = change(&mut events)?;
        if events == before {
            return Ok(output);
        }
        let json = serde_json::to_string(&events)?;
        self.repository.set_item(EVENTS_KEY, &json).await?;
        self.write()?.events = events;
        Ok(output)
    }

    /// Same as [`modify_events`](Self::modify_events) for the whole state.
    ///
    /// Users, events and a set session user go to the repository in one
    /// batch, so a failed write leaves nothing half-saved. A session cleared
    /// by `change` is removed after the batch.
    pub async fn modify_state<F, T>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut AppState) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut state = self.snapshot()?;
        let had_session = state.current_user_id.is_some();
        let output = change(&mut state)?;
        self.write_state(&state, had_session).await?;
        *self.write()? = state;
        Ok(output)
    }

    async fn write_state(&self, state: &AppState, had_session: bool) -> Result<()> {
        let users_json = serde_json::to_string(&state.users)?;
        let events_json = serde_json::to_string(&state.events)?;
        let mut items = vec![
            (USERS_KEY, users_json.as_str()),
            (EVENTS_KEY, events_json.as_str()),
        ];
        if let Some(id) = state.current_user_id.as_deref() {
            items.push((CURRENT_USER_KEY, id));
        }
        self.repository.set_items(&items).await?;
        if had_session && state.current_user_id.is_none() {
            self.repository.remove_item(CURRENT_USER_KEY).await?;
        }
        Ok(())
    }

    /// Stores an event, replacing the one with the same id or appending it.
    pub async fn put_event(&self, event: Event) -> Result<()> {
        self.modify_events(move |events| {
            match events.iter_mut().find(|e| e.id == event.id) {
                Some(existing) => *existing = event,
                None => events.push(event),
            }
            Ok(())
        })
        .await
    }

    /// Deletes an event. Returns whether it existed.
    pub async fn remove_event(&self, event_id: &str) -> Result<bool> {
        self.modify_events(|events| {
            let before = events.len();
            events.retain(|e| e.id != event_id);
            Ok(events.len() != before)
        })
        .await
    }

    /// Records the session user, or clears it with `None`.
    pub async fn set_current_user(&self, user_id: Option<&str>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        match user_id {
            Some(id) => self.repository.set_item(CURRENT_USER_KEY, id).await?,
            None => self.repository.remove_item(CURRENT_USER_KEY).await?,
        }
        self.write()?.current_user_id = user_id.map(str::to_string);
        Ok(())
    }

    /// Writes the whole state, replacing everything stored.
    pub async fn save(&self, state: AppState) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_state(&state, true).await?;
        *self.write()? = state;
        Ok(())
    }
}
