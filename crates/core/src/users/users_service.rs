use log::{debug, info, warn};
use std::sync::Arc;

use super::users_model::{NewUser, User};
use super::users_traits::UserServiceTrait;
use crate::changes::{ChangeSink, PlannerChange};
use crate::errors::{Error, Result, ValidationError};
use crate::roster::link_guests_to_user;
use crate::store::PlannerStore;
use crate::utils::id_utils::generate_id;

/// Service for accounts and the session identity
pub struct UserService {
    store: Arc<PlannerStore>,
    change_sink: Arc<dyn ChangeSink>,
}

impl UserService {
    pub fn new(store: Arc<PlannerStore>, change_sink: Arc<dyn ChangeSink>) -> Self {
        Self { store, change_sink }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    fn list_users(&self) -> Result<Vec<User>> {
        self.store.users()
    }

    fn current_user(&self) -> Result<Option<User>> {
        self.store.current_user()
    }

    /// Creates an account, makes it the session user and links every guest
    /// record across all events that carries the same email. All of it is
    /// persisted in one write.
    async fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let user = User {
            id: generate_id("user"),
            name: new_user.name.trim().to_string(),
            email: new_user.email.trim().to_string(),
            password: new_user.password,
        };

        let registered = user.clone();
        let linked_events = self
            .store
            .modify_state(move |state| {
                if state.users.iter().any(|u| u.email == registered.email) {
                    return Err(ValidationError::InvalidInput(format!(
                        "An account for {} already exists",
                        registered.email
                    ))
                    .into());
                }
                state.users.push(registered.clone());
                state.current_user_id = Some(registered.id.clone());
                let mut linked = Vec::new();
                for event in state.events.iter_mut() {
                    let next = link_guests_to_user(event, &registered);
                    if next != *event {
                        linked.push(next.id.clone());
                        *event = next;
                    }
                }
                Ok(linked)
            })
            .await?;

        info!(
            "Registered user {} ({} event(s) linked)",
            user.id,
            linked_events.len()
        );

        let mut changes = vec![
            PlannerChange::user_registered(&user.id),
            PlannerChange::session_changed(Some(user.id.clone())),
        ];
        changes.extend(linked_events.into_iter().map(PlannerChange::event_updated));
        self.change_sink.emit_batch(changes);
        Ok(user)
    }

    /// Plaintext comparison; accounts are a demo identity picker, not security.
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .store
            .users()?
            .into_iter()
            .find(|u| u.email == email.trim() && u.password == password);
        let Some(user) = user else {
            warn!("Failed login attempt for {}", email);
            return Err(Error::Authentication("Invalid email or password".to_string()));
        };
        self.store.set_current_user(Some(&user.id)).await?;
        debug!("User {} logged in", user.id);
        self.change_sink
            .emit(PlannerChange::session_changed(Some(user.id.clone())));
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        self.store.set_current_user(None).await?;
        self.change_sink.emit(PlannerChange::session_changed(None));
        Ok(())
    }

    async fn switch_user(&self, user_id: &str) -> Result<User> {
        let user = self
            .store
            .find_user(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))?;
        self.store.set_current_user(Some(&user.id)).await?;
        debug!("Switched session to user {}", user.id);
        self.change_sink
            .emit(PlannerChange::session_changed(Some(user.id.clone())));
        Ok(user)
    }
}
