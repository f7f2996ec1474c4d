use crate::state::State;
use crate::store::{RecordList, RecordStore, Storage};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different storage event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    /// Read the saved list and hand it to the state.
    Load,
    /// Write a snapshot of the list.
    Persist { records: RecordList },
}

/// Specify struct for managing state with storage events.
///
pub struct Handler<'a, S: Storage> {
    state: &'a Arc<Mutex<State>>,
    store: &'a RecordStore<S>,
}

impl<'a, S: Storage> Handler<'a, S> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, store: &'a RecordStore<S>) -> Self {
        Handler { state, store }
    }

    /// Handle storage events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Load => {
                debug!("Processing storage event 'Load'...");
                self.load().await
            }
            Event::Persist { records } => {
                debug!("Processing storage event 'Persist' ({} forms)...", records.len());
                self.persist(records).await
            }
        }
    }

    /// Update state with the saved record list.
    ///
    async fn load(&mut self) -> Result<()> {
        info!("Loading saved forms...");
        let records = self.store.load().await;
        let mut state = self.state.lock().await;
        state.set_records_loaded(records);
        Ok(())
    }

    /// Write the list. Failures are logged by the store and the state keeps
    /// its copy.
    ///
    async fn persist(&mut self, records: RecordList) -> Result<()> {
        self.store.persist(&records).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSchema;
    use crate::state::View;
    use crate::store::{MemoryStorage, FORMS_STORAGE_KEY};

    fn schema() -> Arc<FieldSchema> {
        Arc::new(FieldSchema::season_2025().unwrap())
    }

    #[tokio::test]
    async fn load_hands_records_to_state() {
        let raw = r#"[{"id":"1718000000000","teamNumber":"254"}]"#;
        let store = RecordStore::new(
            MemoryStorage::new().with_entry(FORMS_STORAGE_KEY, raw),
            schema(),
        );
        let state = Arc::new(Mutex::new(State::detached(schema())));
        let mut handler = Handler::new(&state, &store);
        handler.handle(Event::Load).await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.current_view(), View::Form);
        assert_eq!(state.records().len(), 1);
        assert_eq!(
            state.records().find("1718000000000").and_then(|r| r.text("teamNumber")),
            Some("254")
        );
    }

    #[tokio::test]
    async fn load_of_corrupt_data_still_leaves_loading() {
        let store = RecordStore::new(
            MemoryStorage::new().with_entry(FORMS_STORAGE_KEY, "not json"),
            schema(),
        );
        let state = Arc::new(Mutex::new(State::detached(schema())));
        Handler::new(&state, &store).handle(Event::Load).await.unwrap();

        let state = state.lock().await;
        assert!(!state.is_loading());
        assert!(state.records().is_empty());
    }

    #[tokio::test]
    async fn persist_writes_snapshot() {
        let schema = schema();
        let store = RecordStore::new(MemoryStorage::new(), schema.clone());
        let state = Arc::new(Mutex::new(State::detached(schema.clone())));
        let mut records = RecordList::new();
        records.submit(schema.default_record());

        Handler::new(&state, &store)
            .handle(Event::Persist {
                records: records.clone(),
            })
            .await
            .unwrap();
        assert_eq!(store.load().await, records);
    }

    #[tokio::test]
    async fn failed_persist_is_not_an_error() {
        let schema = schema();
        let store = RecordStore::new(MemoryStorage::read_only(), schema.clone());
        let state = Arc::new(Mutex::new(State::detached(schema)));
        let result = Handler::new(&state, &store)
            .handle(Event::Persist {
                records: RecordList::new(),
            })
            .await;
        assert!(result.is_ok());
    }
}
