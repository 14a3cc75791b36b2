use async_trait::async_trait;

use super::events_commands::EventCommand;
use super::events_model::{Event, NewEvent};
use crate::errors::Result;
use crate::lodging::{BedAssignment, BedLocator};
use crate::roles::UserRole;
use crate::roster::Guest;

/// Permission-checked access to events.
///
/// Every mutation names the acting user; the service resolves their role,
/// authorizes, applies the pure transition and persists the result.
#[async_trait]
pub trait EventServiceTrait: Send + Sync {
    fn get_event(&self, event_id: &str) -> Result<Event>;
    fn get_events_for_user(&self, user_id: &str) -> Result<Vec<Event>>;
    fn get_user_role(&self, user_id: &str, event_id: &str) -> Result<UserRole>;
    /// Guests the user may vote and act as in the event.
    fn get_voters(&self, user_id: &str, event_id: &str) -> Result<Vec<Guest>>;
    /// Guest a voting screen should preselect for the user.
    fn get_default_voter(&self, user_id: &str, event_id: &str) -> Result<Option<Guest>>;

    async fn create_event(&self, organizer_id: &str, new_event: NewEvent) -> Result<Event>;
    async fn delete_event(&self, actor_id: &str, event_id: &str) -> Result<()>;
    async fn execute(&self, actor_id: &str, event_id: &str, command: EventCommand) -> Result<Event>;
    async fn assign_guest_to_bed(
        &self,
        actor_id: &str,
        event_id: &str,
        guest_id: &str,
        target: BedLocator,
    ) -> Result<BedAssignment>;
}
