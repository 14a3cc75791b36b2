use async_trait::async_trait;

use crate::errors::Result;

/// The persistence boundary: a string key-value store holding whole JSON blobs.
///
/// Reads are synchronous; writes go through the implementation's writer and are
/// awaited.
#[async_trait]
pub trait KeyValueStoreTrait: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Inserts or replaces the value under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Inserts or replaces several values at once. Either every pair is
    /// written or none is.
    async fn set_items(&self, items: &[(&str, &str)]) -> Result<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;
}
