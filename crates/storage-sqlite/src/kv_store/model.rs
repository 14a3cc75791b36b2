//! Database model for stored blobs.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of `kv_store`: a key and its JSON (or plain string) value.
#[derive(Queryable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::kv_store)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct KeyValueDB {
    pub key: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}

impl KeyValueDB {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
