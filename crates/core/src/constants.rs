/// Key holding the JSON array of registered users.
pub const USERS_KEY: &str = "event-planner-users";

/// Key holding the JSON array of events.
pub const EVENTS_KEY: &str = "event-planner-events";

/// Key holding the id of the logged-in user.
pub const CURRENT_USER_KEY: &str = "event-planner-current-user";

/// Occupants allowed on a double bed.
pub const DOUBLE_BED_CAPACITY: usize = 2;

/// Occupants allowed on any other bed type.
pub const SINGLE_BED_CAPACITY: usize = 1;
