use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::KeyValueDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::kv_store;
use event_planner_core::errors::Result;
use event_planner_core::store::KeyValueStoreTrait;

pub struct KeyValueRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl KeyValueRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        KeyValueRepository { pool, writer }
    }

    /// Every stored key, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let keys = kv_store::table
            .select(kv_store::key)
            .order(kv_store::key.asc())
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStoreTrait for KeyValueRepository {
    fn get_item(&self, item_key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let stored = kv_store::table
            .find(item_key)
            .select(kv_store::value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(stored)
    }

    async fn set_item(&self, item_key: &str, item_value: &str) -> Result<()> {
        let row = KeyValueDB::new(item_key, item_value);
        debug!("Writing {} ({} bytes)", row.key, row.value.len());
        self.writer
            .exec(move |conn| {
                diesel::replace_into(kv_store::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    /// One writer job, so the whole batch shares a single transaction.
    async fn set_items(&self, items: &[(&str, &str)]) -> Result<()> {
        let rows: Vec<KeyValueDB> = items
            .iter()
            .map(|(item_key, item_value)| KeyValueDB::new(item_key, item_value))
            .collect();
        debug!("Writing {} keys in one batch", rows.len());
        self.writer
            .exec(move |conn| {
                for row in &rows {
                    diesel::replace_into(kv_store::table)
                        .values(row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }

    async fn remove_item(&self, item_key: &str) -> Result<()> {
        let item_key = item_key.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(kv_store::table.find(item_key))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
