//! Record storage module.
//!
//! This module owns the record model and the list of submitted records:
//! - `Record` and `FieldValue`: one scouting entry and its values
//! - `RecordList`: the ordered, newest-first list and its mutations
//! - `RecordStore`: loading and persisting the list through a `Storage`
//!
//! Storage problems are never fatal. They are logged and the in-memory list
//! stays authoritative for the session.

mod error;
mod list;
mod record;
mod storage;

pub use error::StoreError;
pub use list::{RecordList, SubmitOutcome};
pub use record::{FieldValue, Record};
pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::schema::FieldSchema;
use log::*;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Storage key holding the whole record list.
///
pub const FORMS_STORAGE_KEY: &str = "submitted_forms";

/// Synchronizes the record list with durable storage.
///
pub struct RecordStore<S: Storage> {
    storage: S,
    key: String,
    schema: Arc<FieldSchema>,
}

impl<S: Storage> RecordStore<S> {
    /// Return a store reading and writing the default key.
    ///
    pub fn new(storage: S, schema: Arc<FieldSchema>) -> Self {
        RecordStore {
            storage,
            key: FORMS_STORAGE_KEY.to_string(),
            schema,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the record list. Absent data gives an empty list; unreadable or
    /// malformed data is logged and also gives an empty list.
    ///
    pub async fn load(&self) -> RecordList {
        match self.try_load().await {
            Ok(list) => list,
            Err(e) => {
                error!("Failed to load forms from storage: {}", e);
                RecordList::new()
            }
        }
    }

    /// Load the record list, surfacing storage and decode errors. Records are
    /// brought in line with the current schema.
    ///
    pub async fn try_load(&self) -> Result<RecordList, StoreError> {
        let raw = match self.storage.get(&self.key).await? {
            Some(raw) => raw,
            None => {
                info!("No saved forms found, starting with an empty list.");
                return Ok(RecordList::new());
            }
        };
        let entries: Vec<Value> = serde_json::from_str(&raw).map_err(StoreError::Decode)?;
        let total = entries.len();
        let records: Vec<Record> = entries
            .into_iter()
            .filter_map(record_from_json)
            .map(|record| self.schema.conform(record))
            .collect();
        if records.len() < total {
            warn!("Skipped {} stored forms that were not objects.", total - records.len());
        }
        info!("Loaded {} saved forms.", records.len());
        Ok(RecordList::from_records(records))
    }

    /// Write the whole list. Failures are logged and otherwise ignored; the
    /// caller's list is left as it is.
    ///
    pub async fn persist(&self, list: &RecordList) {
        if let Err(e) = self.try_persist(list).await {
            error!("Failed to save forms to storage: {}", e);
        }
    }

    /// Write the whole list, surfacing errors.
    ///
    pub async fn try_persist(&self, list: &RecordList) -> Result<(), StoreError> {
        let raw = serde_json::to_string(list.records()).map_err(StoreError::Encode)?;
        self.storage.set(&self.key, &raw).await?;
        debug!("Saved {} forms.", list.len());
        Ok(())
    }
}

/// Build a record from one stored entry. Numbers become text; nulls and
/// nested values are dropped so the schema fills in defaults.
///
fn record_from_json(entry: Value) -> Option<Record> {
    let object = match entry {
        Value::Object(object) => object,
        other => {
            warn!("Ignoring stored form that is not an object: {}", other);
            return None;
        }
    };
    let mut id = None;
    let mut values = BTreeMap::new();
    for (key, value) in object {
        if key == "id" {
            id = match value {
                Value::String(text) => Some(text),
                Value::Number(number) => Some(number.to_string()),
                other => {
                    warn!("Ignoring stored form id {}", other);
                    None
                }
            };
            continue;
        }
        match value {
            Value::Bool(flag) => {
                values.insert(key, FieldValue::Flag(flag));
            }
            Value::String(text) => {
                values.insert(key, FieldValue::Text(text));
            }
            Value::Number(number) => {
                values.insert(key, FieldValue::Text(number.to_string()));
            }
            other => warn!("Dropping stored value {} of field '{}'", other, key),
        }
    }
    Some(Record::from_parts(id, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDefinition;
    use fake::{Fake, Faker};

    fn schema() -> Arc<FieldSchema> {
        Arc::new(
            FieldSchema::new(vec![
                FieldDefinition::text("teamNumber", "Team Number:", "Team Information"),
                FieldDefinition::boolean(
                    "autoCanScoreAlgae",
                    "Can Score Algae in Auto:",
                    "Team Information",
                ),
            ])
            .unwrap(),
        )
    }

    fn filled_list(schema: &FieldSchema, count: usize) -> RecordList {
        let mut list = RecordList::new();
        for _ in 0..count {
            let mut record = schema.default_record();
            record.set("teamNumber", FieldValue::Text(Faker.fake::<String>()));
            record.set("autoCanScoreAlgae", FieldValue::Flag(Faker.fake::<bool>()));
            list.submit(record);
        }
        list
    }

    #[tokio::test]
    async fn load_missing_key_is_empty() {
        let store = RecordStore::new(MemoryStorage::new(), schema());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_corrupt_data_is_empty() {
        let storage = MemoryStorage::new().with_entry(FORMS_STORAGE_KEY, "{not json");
        let store = RecordStore::new(storage, schema());
        assert!(matches!(store.try_load().await, Err(StoreError::Decode(_))));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let schema = schema();
        let store = RecordStore::new(MemoryStorage::new(), schema.clone());
        for count in [0, 1, 7] {
            let list = filled_list(&schema, count);
            store.persist(&list).await;
            assert_eq!(store.load().await, list);
        }
    }

    #[tokio::test]
    async fn persisted_layout_is_a_json_array() {
        let schema = schema();
        let store = RecordStore::new(MemoryStorage::new(), schema.clone());
        let list = filled_list(&schema, 2);
        store.persist(&list).await;

        let raw = store.storage().raw(FORMS_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["id"], list.get(0).unwrap().id().unwrap());
    }

    #[tokio::test]
    async fn failed_persist_is_absorbed() {
        let schema = schema();
        let store = RecordStore::new(MemoryStorage::read_only(), schema.clone());
        let list = filled_list(&schema, 3);
        assert!(store.try_persist(&list).await.is_err());
        store.persist(&list).await;
        assert_eq!(list.len(), 3);
    }

    #[tokio::test]
    async fn load_conforms_records_to_schema() {
        let storage = MemoryStorage::new().with_entry(
            FORMS_STORAGE_KEY,
            r#"[{"id":"1","teamNumber":"254","retiredField":true}]"#,
        );
        let store = RecordStore::new(storage, schema());
        let list = store.load().await;
        let record = list.find("1").unwrap();
        assert_eq!(record.text("teamNumber"), Some("254"));
        assert_eq!(record.get("autoCanScoreAlgae"), Some(&FieldValue::Flag(false)));
        assert!(record.get("retiredField").is_none());
    }

    #[tokio::test]
    async fn load_keeps_records_with_numeric_values() {
        let storage = MemoryStorage::new().with_entry(
            FORMS_STORAGE_KEY,
            r#"[{"id":"1","teamNumber":"254"},{"id":"2","teamNumber":118}]"#,
        );
        let store = RecordStore::new(storage, schema());
        let list = store.try_load().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.find("1").unwrap().text("teamNumber"), Some("254"));
        assert_eq!(list.find("2").unwrap().text("teamNumber"), Some("118"));
    }

    #[tokio::test]
    async fn load_resets_null_values_and_skips_non_objects() {
        let storage = MemoryStorage::new().with_entry(
            FORMS_STORAGE_KEY,
            r#"[{"id":3,"teamNumber":null,"autoCanScoreAlgae":true},"stray",7]"#,
        );
        let store = RecordStore::new(storage, schema());
        let list = store.load().await;
        assert_eq!(list.len(), 1);
        let record = list.find("3").unwrap();
        assert_eq!(record.text("teamNumber"), Some(""));
        assert_eq!(record.get("autoCanScoreAlgae"), Some(&FieldValue::Flag(true)));
    }

    #[tokio::test]
    async fn load_then_persist_keeps_every_record() {
        let storage = MemoryStorage::new().with_entry(
            FORMS_STORAGE_KEY,
            r#"[{"id":"1","teamNumber":"254"},{"id":"2","teamNumber":118}]"#,
        );
        let store = RecordStore::new(storage, schema());
        let list = store.load().await;
        store.persist(&list).await;
        assert_eq!(store.load().await.len(), 2);
    }
}
