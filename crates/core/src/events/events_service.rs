use log::{debug, info, warn};
use std::sync::Arc;

use super::events_commands::{AppliedCommand, EventCommand};
use super::events_model::{Event, NewEvent};
use super::events_permissions::{authorize, scope_command};
use super::events_traits::EventServiceTrait;
use super::events_transitions::{create_event, events_for_user};
use crate::changes::{ChangeSink, PlannerChange};
use crate::errors::{Error, Result, ValidationError};
use crate::lodging::{BedAssignment, BedAssignmentOutcome, BedLocator};
use crate::roles::{default_voter, resolve_role, voters_for, UserRole};
use crate::roster::Guest;
use crate::store::PlannerStore;
use crate::users::User;

/// Service for reading and changing events on behalf of a user
pub struct EventService {
    store: Arc<PlannerStore>,
    change_sink: Arc<dyn ChangeSink>,
}

impl EventService {
    pub fn new(store: Arc<PlannerStore>, change_sink: Arc<dyn ChangeSink>) -> Self {
        Self { store, change_sink }
    }

    fn require_user(&self, user_id: &str) -> Result<User> {
        self.store
            .find_user(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))
    }

    fn event_and_user(&self, user_id: &str, event_id: &str) -> Result<(Event, User)> {
        let user = self.require_user(user_id)?;
        Ok((self.get_event(event_id)?, user))
    }

    async fn run(
        &self,
        actor_id: &str,
        event_id: &str,
        command: EventCommand,
    ) -> Result<AppliedCommand> {
        let actor = self.require_user(actor_id)?;
        let users = self.store.users()?;
        let name = command.name();
        let bed_target = match &command {
            EventCommand::AssignGuestToBed { guest_id, target } => {
                Some((guest_id.clone(), target.clone()))
            }
            _ => None,
        };

        let (applied, changed) = self
            .store
            .modify_events(|events| {
                let event = events
                    .iter_mut()
                    .find(|e| e.id == event_id)
                    .ok_or_else(|| event_not_found(event_id))?;
                let role = authorize(&actor, event, &command)?;
                let command = scope_command(&actor, role, event, command);
                let applied = command.apply(event, &users);
                let changed = applied.event != *event;
                if changed {
                    *event = applied.event.clone();
                }
                Ok((applied, changed))
            })
            .await?;

        let mut changes = Vec::new();
        if changed {
            debug!("Applied {} to event {} as {}", name, event_id, actor_id);
            changes.push(PlannerChange::event_updated(event_id));
        } else {
            debug!("{} left event {} unchanged", name, event_id);
        }
        if let (Some(BedAssignmentOutcome::CapacityExceeded), Some((guest_id, bed))) =
            (applied.bed_outcome, bed_target)
        {
            changes.push(PlannerChange::bed_capacity_exceeded(event_id, guest_id, bed));
        }
        self.change_sink.emit_batch(changes);
        Ok(applied)
    }
}

fn event_not_found(event_id: &str) -> Error {
    Error::NotFound(format!("Event {}", event_id))
}

#[async_trait::async_trait]
impl EventServiceTrait for EventService {
    fn get_event(&self, event_id: &str) -> Result<Event> {
        self.store
            .find_event(event_id)?
            .ok_or_else(|| event_not_found(event_id))
    }

    fn get_events_for_user(&self, user_id: &str) -> Result<Vec<Event>> {
        let user = self.require_user(user_id)?;
        let events = self.store.events()?;
        Ok(events_for_user(&events, &user).into_iter().cloned().collect())
    }

    fn get_user_role(&self, user_id: &str, event_id: &str) -> Result<UserRole> {
        let (event, user) = self.event_and_user(user_id, event_id)?;
        Ok(resolve_role(&user, &event))
    }

    fn get_voters(&self, user_id: &str, event_id: &str) -> Result<Vec<Guest>> {
        let (event, user) = self.event_and_user(user_id, event_id)?;
        let role = resolve_role(&user, &event);
        Ok(voters_for(&user, role, &event).into_iter().cloned().collect())
    }

    fn get_default_voter(&self, user_id: &str, event_id: &str) -> Result<Option<Guest>> {
        let (event, user) = self.event_and_user(user_id, event_id)?;
        let role = resolve_role(&user, &event);
        Ok(default_voter(&user, role, &event).cloned())
    }

    /// Creates an event organized by `organizer_id`.
    async fn create_event(&self, organizer_id: &str, new_event: NewEvent) -> Result<Event> {
        let organizer = self.require_user(organizer_id)?;
        let event = create_event(&organizer, new_event)
            .ok_or_else(|| ValidationError::MissingField("title".to_string()))?;
        self.store.put_event(event.clone()).await?;
        info!("Event {} created by {}", event.id, organizer.id);
        self.change_sink.emit(PlannerChange::event_created(&event.id));
        Ok(event)
    }

    /// Deletes an event. Only its organizer may do this.
    async fn delete_event(&self, actor_id: &str, event_id: &str) -> Result<()> {
        let (event, actor) = self.event_and_user(actor_id, event_id)?;
        if !resolve_role(&actor, &event).is_organizer() {
            warn!("Denied delete of event {} for user {}", event_id, actor_id);
            return Err(Error::PermissionDenied(
                "only the organizer may delete an event".to_string(),
            ));
        }
        if !self.store.remove_event(event_id).await? {
            return Err(event_not_found(event_id));
        }
        info!("Event {} deleted by {}", event_id, actor_id);
        self.change_sink.emit(PlannerChange::event_deleted(event_id));
        Ok(())
    }

    /// Authorizes and applies `command` to the stored event, then persists it.
    /// A denied command leaves the store untouched.
    async fn execute(
        &self,
        actor_id: &str,
        event_id: &str,
        command: EventCommand,
    ) -> Result<Event> {
        Ok(self.run(actor_id, event_id, command).await?.event)
    }

    /// Bed assignment with its outcome. Overflow is not an error: the guest
    /// simply ends up without a bed.
    async fn assign_guest_to_bed(
        &self,
        actor_id: &str,
        event_id: &str,
        guest_id: &str,
        target: BedLocator,
    ) -> Result<BedAssignment> {
        let command = EventCommand::AssignGuestToBed {
            guest_id: guest_id.to_string(),
            target,
        };
        let applied = self.run(actor_id, event_id, command).await?;
        Ok(BedAssignment {
            event: applied.event,
            outcome: applied
                .bed_outcome
                .unwrap_or(BedAssignmentOutcome::BedNotFound),
        })
    }
}
