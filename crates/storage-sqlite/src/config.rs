/// Where the planner keeps its data and whether an empty store gets demo data.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub db_path: String,
    pub seed_demo: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "./db/event-planner.db".to_string(),
            seed_demo: true,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let db_path = std::env::var("PLANNER_DB_PATH").unwrap_or(defaults.db_path);
        let seed_demo = std::env::var("PLANNER_SEED_DEMO")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.seed_demo);
        Self { db_path, seed_demo }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
