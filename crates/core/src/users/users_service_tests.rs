#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::changes::{PlannerChange, RecordingChangeSink};
    use crate::constants::{CURRENT_USER_KEY, EVENTS_KEY, USERS_KEY};
    use crate::errors::{Error, ValidationError};
    use crate::events::{EventCommand, EventService, EventServiceTrait};
    use crate::store::{InMemoryKeyValueStore, KeyValueStoreTrait, PlannerStore};
    use crate::test_fixtures::{seeded_store, FlakyStore};
    use crate::users::{NewUser, User, UserService, UserServiceTrait};

    type Setup = (UserService, Arc<PlannerStore>, Arc<InMemoryKeyValueStore>, RecordingChangeSink);

    async fn setup() -> Setup {
        let (store, repository) = seeded_store().await;
        let sink = RecordingChangeSink::new();
        let service = UserService::new(store.clone(), Arc::new(sink.clone()));
        (service, store, repository, sink)
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_sets_session() {
        let (service, store, repository, sink) = setup().await;
        let user = service.login(" carol@example.com ", "password").await.unwrap();
        assert_eq!(user.id, "user-carol");
        assert_eq!(store.current_user_id().unwrap().as_deref(), Some("user-carol"));
        assert_eq!(
            repository.get_item(CURRENT_USER_KEY).unwrap().as_deref(),
            Some("user-carol")
        );
        assert_eq!(
            sink.changes(),
            vec![PlannerChange::session_changed(Some("user-carol".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (service, store, _, sink) = setup().await;
        let result = service.login("carol@example.com", "wrong").await;
        assert!(matches!(result, Err(Error::Authentication(_))));
        let result = service.login("nobody@example.com", "password").await;
        assert!(matches!(result, Err(Error::Authentication(_))));
        assert_eq!(store.current_user_id().unwrap(), None);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_stored_session() {
        let (service, _, repository, _) = setup().await;
        service.login("bob@example.com", "password").await.unwrap();
        service.logout().await.unwrap();
        assert!(service.current_user().unwrap().is_none());
        assert_eq!(repository.get_item(CURRENT_USER_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_switch_user() {
        let (service, _, _, _) = setup().await;
        let user = service.switch_user("user-bob").await.unwrap();
        assert_eq!(service.current_user().unwrap(), Some(user));

        let unknown = service.switch_user("user-404").await;
        assert!(matches!(unknown, Err(Error::NotFound(_))));
        assert_eq!(service.current_user().unwrap().map(|u| u.id).as_deref(), Some("user-bob"));
    }

    #[tokio::test]
    async fn test_register_links_existing_guests() {
        let (service, store, repository, sink) = setup().await;
        let events = EventService::new(store.clone(), Arc::new(sink.clone()));
        events
            .execute(
                "user-alice",
                "event-1",
                EventCommand::AddGuest {
                    name: "Frank".to_string(),
                    email: Some("frank@example.com".to_string()),
                },
            )
            .await
            .unwrap();
        sink.clear();

        let frank = service
            .register(new_user(" Frank ", "frank@example.com"))
            .await
            .unwrap();
        assert!(frank.id.starts_with("user-"));
        assert_eq!(frank.name, "Frank");
        assert_eq!(store.current_user_id().unwrap(), Some(frank.id.clone()));

        let event = events.get_event("event-1").unwrap();
        let guest = event.guests.iter().find(|g| g.name == "Frank").unwrap();
        assert_eq!(guest.user_id.as_ref(), Some(&frank.id));
        assert_eq!(events.get_events_for_user(&frank.id).unwrap().len(), 1);

        let stored: Vec<User> =
            serde_json::from_str(&repository.get_item(USERS_KEY).unwrap().unwrap()).unwrap();
        assert!(stored.contains(&frank));

        assert_eq!(
            sink.changes(),
            vec![
                PlannerChange::user_registered(&frank.id),
                PlannerChange::session_changed(Some(frank.id.clone())),
                PlannerChange::event_updated("event-1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_saves_nothing_when_a_write_fails() {
        let repository = Arc::new(FlakyStore::seeded());
        let store = Arc::new(PlannerStore::open(repository.clone(), false).await.unwrap());
        let sink = RecordingChangeSink::new();
        let service = UserService::new(store.clone(), Arc::new(sink.clone()));

        repository.fail_on_key(EVENTS_KEY);
        let result = service.register(new_user("Frank", "frank@example.com")).await;
        assert!(matches!(result, Err(Error::Database(_))));
        assert!(sink.is_empty());
        assert_eq!(store.current_user_id().unwrap(), None);

        let stored: Vec<User> =
            serde_json::from_str(&repository.get_item(USERS_KEY).unwrap().unwrap()).unwrap();
        assert!(stored.iter().all(|u| u.email != "frank@example.com"));

        // Once writes work again the same email can register.
        *repository.failing_key.lock().unwrap() = None;
        let frank = service
            .register(new_user("Frank", "frank@example.com"))
            .await
            .unwrap();
        assert_eq!(store.current_user_id().unwrap(), Some(frank.id));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let (service, store, _, _) = setup().await;
        let before = store.users().unwrap();
        let result = service.register(new_user("Alice Two", "alice@example.com")).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
        assert_eq!(store.users().unwrap(), before);
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let (service, _, _, _) = setup().await;
        let result = service.register(new_user("  ", "x@example.com")).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
    }
}
