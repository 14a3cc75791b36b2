use uuid::Uuid;

/// Generates a collection-unique id such as `guest-5f0c...`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}
