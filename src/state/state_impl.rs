use crate::app::StorageEventSender;
use crate::config::ViewHotkeys;
use crate::events::storage::Event as StorageEvent;
use crate::export::{self, QrImage};
use crate::logger::LogBuffer;
use crate::schema::FieldSchema;
use crate::store::{FieldValue, Record, RecordList, SubmitOutcome};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::widgets::ListState;
use std::sync::Arc;

use super::navigation::{SessionMode, View};
use super::session::FormSession;
use super::StateError;

/// QR code shown over the list for one record.
///
#[derive(Clone, Debug)]
pub struct QrPopup {
    pub record_id: String,
    pub title: String,
    pub payload: String,
    pub image: QrImage,
}

/// Houses data representative of application state.
///
pub struct State {
    storage_sender: Option<StorageEventSender>,
    schema: Arc<FieldSchema>,
    records: RecordList,
    session: FormSession,
    view: View,
    records_list_state: ListState,
    qr_popup: Option<QrPopup>,
    log_panel_open: bool,
    log_buffer: LogBuffer,
    spinner_index: usize,
    status_message: Option<String>,
    theme: Theme,
    hotkeys: ViewHotkeys,
}

impl State {
    pub fn new(
        storage_sender: StorageEventSender,
        schema: Arc<FieldSchema>,
        theme: Theme,
        hotkeys: ViewHotkeys,
        log_buffer: LogBuffer,
    ) -> Self {
        State {
            storage_sender: Some(storage_sender),
            theme,
            hotkeys,
            log_buffer,
            ..State::detached(schema)
        }
    }

    /// State with no storage worker attached. Nothing it does is persisted.
    ///
    pub fn detached(schema: Arc<FieldSchema>) -> Self {
        State {
            storage_sender: None,
            session: FormSession::new(schema.clone()),
            schema,
            records: RecordList::new(),
            view: View::Loading,
            records_list_state: ListState::default(),
            qr_popup: None,
            log_panel_open: false,
            log_buffer: LogBuffer::new(),
            spinner_index: 0,
            status_message: None,
            theme: Theme::default(),
            hotkeys: ViewHotkeys::default(),
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_hotkeys(&self) -> &ViewHotkeys {
        &self.hotkeys
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> View {
        self.view
    }

    pub fn is_loading(&self) -> bool {
        self.view == View::Loading
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Install the loaded records and leave the loading view for the form.
    ///
    pub fn set_records_loaded(&mut self, records: RecordList) -> &mut Self {
        info!("Ready with {} saved forms.", records.len());
        self.records = records;
        self.sync_selection(Some(0));
        if self.view == View::Loading {
            self.view = View::Form;
        }
        self
    }

    pub fn records(&self) -> &RecordList {
        &self.records
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// Submit the form to the record list, persist, and show the list with
    /// a fresh form prepared.
    ///
    pub fn submit_form(&mut self) -> &mut Self {
        let payload = self.session.submit_payload();
        let outcome = self.records.submit(payload);
        match &outcome {
            SubmitOutcome::Inserted { id } => {
                self.set_status(format!("Saved form {}", id));
                self.sync_selection(Some(0));
            }
            SubmitOutcome::Replaced { index } => {
                self.set_status("Updated form");
                self.sync_selection(Some(*index));
            }
            SubmitOutcome::Unmatched { id } => {
                self.set_status(format!("Form {} no longer exists", id));
            }
        }
        if outcome.changed_list() {
            self.persist();
        }
        self.session = FormSession::new(self.schema.clone());
        self.view = View::List;
        self
    }

    /// Open a blank form.
    ///
    pub fn go_to_form(&mut self) -> &mut Self {
        self.session = FormSession::new(self.schema.clone());
        self.qr_popup = None;
        self.view = View::Form;
        self
    }

    /// Show the list. The form session is left as it is.
    ///
    pub fn go_to_list(&mut self) -> &mut Self {
        self.view = View::List;
        self
    }

    /// Leave a form editing a saved record without saving. Does nothing for
    /// a new form.
    ///
    pub fn cancel_edit(&mut self) -> &mut Self {
        if self.session.mode() == SessionMode::Editing {
            self.session.delete_cancelled();
            self.go_to_list();
        }
        self
    }

    /// Open the record with the given id for editing.
    ///
    pub fn edit_record(&mut self, id: &str) -> Result<(), StateError> {
        let record = self
            .records
            .find(id)
            .cloned()
            .ok_or_else(|| StateError::RecordNotFound { id: id.to_string() })?;
        self.session = FormSession::editing(self.schema.clone(), record);
        self.qr_popup = None;
        self.view = View::Form;
        Ok(())
    }

    /// Open the selected record for editing.
    ///
    pub fn edit_selected_record(&mut self) -> &mut Self {
        if let Some(id) = self.selected_record().and_then(Record::id).map(str::to_string) {
            if let Err(e) = self.edit_record(&id) {
                debug!("Skipping edit: {}", e);
            }
        }
        self
    }

    /// Remove the record with the given id, persist, and show the list with
    /// a fresh form prepared. An unknown id changes nothing but the view.
    ///
    pub fn delete_record(&mut self, id: &str) -> &mut Self {
        if self.records.delete(id) {
            self.set_status("Deleted form");
            self.persist();
        } else {
            debug!("Record {} not found, nothing deleted", id);
        }
        let selected = self.records_list_state.selected();
        self.sync_selection(selected);
        self.session = FormSession::new(self.schema.clone());
        self.view = View::List;
        self
    }

    /// Ask for confirmation before deleting the record in the form.
    ///
    pub fn confirm_delete(&mut self) -> &mut Self {
        if let Err(e) = self.session.confirm_delete() {
            debug!("Delete not available: {}", e);
        }
        self
    }

    /// Delete the record awaiting confirmation.
    ///
    pub fn delete_confirmed(&mut self) -> &mut Self {
        if let Some(id) = self.session.delete_confirmed() {
            self.delete_record(&id);
        }
        self
    }

    pub fn delete_cancelled(&mut self) -> &mut Self {
        self.session.delete_cancelled();
        self
    }

    /// Check if there's a pending delete confirmation.
    ///
    pub fn has_delete_confirmation(&self) -> bool {
        self.session.is_delete_pending()
    }

    pub fn form_next_field(&mut self) -> &mut Self {
        self.session.next_field();
        self
    }

    pub fn form_previous_field(&mut self) -> &mut Self {
        self.session.previous_field();
        self
    }

    /// Flip a focused boolean field, or move past a focused text field.
    ///
    pub fn form_activate_field(&mut self) -> &mut Self {
        if !self.session.toggle() {
            self.session.next_field();
        }
        self
    }

    /// Type into the focused field. Space flips a focused boolean field.
    ///
    pub fn form_input_char(&mut self, c: char) -> &mut Self {
        if !self.session.input_char(c) && c == ' ' {
            self.session.toggle();
        }
        self
    }

    pub fn form_backspace(&mut self) -> &mut Self {
        self.session.backspace();
        self
    }

    /// Set one field of the form directly.
    ///
    pub fn form_set_value(&mut self, field_id: &str, value: FieldValue) -> Result<(), StateError> {
        self.session.set_value(field_id, value)
    }

    /// Returns the list selection state for rendering.
    ///
    pub fn get_records_list_state(&mut self) -> &mut ListState {
        &mut self.records_list_state
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records_list_state
            .selected()
            .and_then(|index| self.records.get(index))
    }

    /// Activate the next record.
    ///
    pub fn next_record(&mut self) -> &mut Self {
        if self.records.is_empty() {
            self.records_list_state.select(None);
            return self;
        }
        let next = match self.records_list_state.selected() {
            Some(i) if i + 1 < self.records.len() => i + 1,
            _ => 0,
        };
        self.records_list_state.select(Some(next));
        self
    }

    /// Activate the previous record.
    ///
    pub fn previous_record(&mut self) -> &mut Self {
        if self.records.is_empty() {
            self.records_list_state.select(None);
            return self;
        }
        let previous = match self.records_list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.records.len() - 1,
        };
        self.records_list_state.select(Some(previous));
        self
    }

    /// Keep the selection inside the list, preferring the given index.
    ///
    fn sync_selection(&mut self, preferred: Option<usize>) {
        if self.records.is_empty() {
            self.records_list_state.select(None);
        } else {
            let index = preferred.unwrap_or(0).min(self.records.len() - 1);
            self.records_list_state.select(Some(index));
        }
    }

    /// Encode the selected record and show its QR code. Encoding failures are
    /// logged and no popup opens.
    ///
    pub fn show_qr_for_selected(&mut self) -> &mut Self {
        let record = match self.selected_record() {
            Some(record) => record.clone(),
            None => return self,
        };
        match export::export_record(&record) {
            Ok((payload, image)) => {
                let title = format!("QR Code for Team: {}", self.schema.summary_title(&record));
                self.qr_popup = Some(QrPopup {
                    record_id: record.id().unwrap_or_default().to_string(),
                    title,
                    payload,
                    image,
                });
            }
            Err(e) => {
                error!("Error converting form data to QR code: {}", e);
                self.set_status("Could not build QR code");
            }
        }
        self
    }

    pub fn qr_popup(&self) -> Option<&QrPopup> {
        self.qr_popup.as_ref()
    }

    pub fn hide_qr(&mut self) -> &mut Self {
        self.qr_popup = None;
        self
    }

    /// Copy the JSON payload of the open QR code to the clipboard.
    ///
    pub fn copy_qr_payload(&mut self) -> &mut Self {
        let payload = match &self.qr_popup {
            Some(popup) => popup.payload.clone(),
            None => return self,
        };
        match export::copy_to_clipboard(&payload) {
            Ok(()) => {
                info!("Copied {} byte payload to clipboard.", payload.len());
                self.set_status("Copied form data to clipboard");
            }
            Err(e) => {
                error!("Failed to copy to clipboard: {}", e);
                self.set_status("Clipboard unavailable");
            }
        }
        self
    }

    pub fn toggle_log_panel(&mut self) -> &mut Self {
        self.log_panel_open = !self.log_panel_open;
        self
    }

    pub fn is_log_panel_open(&self) -> bool {
        self.log_panel_open
    }

    pub fn log_entries(&self) -> Vec<String> {
        self.log_buffer.entries()
    }

    /// Stop sending storage events. Later changes stay in memory only.
    ///
    pub fn disconnect_storage(&mut self) -> &mut Self {
        self.storage_sender = None;
        self
    }

    /// Hand the current list to the storage worker.
    ///
    fn persist(&self) {
        self.dispatch(StorageEvent::Persist {
            records: self.records.clone(),
        });
    }

    /// Send a storage event to the worker thread.
    ///
    pub fn dispatch(&self, event: StorageEvent) {
        if let Some(storage_sender) = &self.storage_sender {
            if let Err(err) = storage_sender.send(event) {
                error!("Received error from storage dispatch: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDefinition;
    use std::collections::BTreeMap;
    use std::sync::mpsc::{self, Receiver};

    fn schema() -> Arc<FieldSchema> {
        Arc::new(
            FieldSchema::new(vec![
                FieldDefinition::text("teamNumber", "Team Number:", "Team Information").numeric(),
                FieldDefinition::boolean(
                    "autoCanScoreAlgae",
                    "Can Score Algae in Auto:",
                    "Team Information",
                ),
            ])
            .unwrap()
            .with_summary("teamNumber", "teamNumber")
            .unwrap(),
        )
    }

    fn team(id: &str, number: &str) -> Record {
        let mut values = BTreeMap::new();
        values.insert("teamNumber".to_string(), FieldValue::Text(number.to_string()));
        values.insert("autoCanScoreAlgae".to_string(), FieldValue::Flag(false));
        Record::from_parts(Some(id.to_string()), values)
    }

    fn connected(records: Vec<Record>) -> (State, Receiver<StorageEvent>) {
        let (tx, rx) = mpsc::channel();
        let mut state = State::new(
            tx,
            schema(),
            Theme::default(),
            ViewHotkeys::default(),
            LogBuffer::new(),
        );
        state.set_records_loaded(RecordList::from_records(records));
        (state, rx)
    }

    fn persisted(rx: &Receiver<StorageEvent>) -> Vec<RecordList> {
        rx.try_iter()
            .filter_map(|event| match event {
                StorageEvent::Persist { records } => Some(records),
                StorageEvent::Load => None,
            })
            .collect()
    }

    #[test]
    fn starts_loading_then_opens_form() {
        let mut state = State::detached(schema());
        assert!(state.is_loading());
        assert_eq!(state.session().mode(), SessionMode::New);
        state.set_records_loaded(RecordList::new());
        assert_eq!(state.current_view(), View::Form);
        assert!(state.selected_record().is_none());
    }

    #[test]
    fn submit_new_form_persists_and_shows_list() {
        let (mut state, rx) = connected(vec![]);
        state.form_input_char('2').form_input_char('5').form_input_char('4');
        state.form_next_field().form_activate_field();
        state.submit_form();

        assert_eq!(state.current_view(), View::List);
        assert_eq!(state.records().len(), 1);
        let saved = state.records().get(0).unwrap();
        assert!(saved.id().is_some());
        assert_eq!(saved.text("teamNumber"), Some("254"));
        assert_eq!(saved.get("autoCanScoreAlgae"), Some(&FieldValue::Flag(true)));
        assert_eq!(state.session().record(), &schema().default_record());
        assert_eq!(state.selected_record(), Some(saved));

        let writes = persisted(&rx);
        assert_eq!(writes.len(), 1);
        assert_eq!(&writes[0], state.records());
    }

    #[test]
    fn edit_then_submit_replaces_in_place() {
        let (mut state, rx) = connected(vec![team("1", "254"), team("2", "118")]);
        state.edit_record("2").unwrap();
        assert_eq!(state.current_view(), View::Form);
        assert_eq!(state.session().title(), "Editing Form for Team: 118");

        state
            .form_set_value("teamNumber", FieldValue::Text("1678".into()))
            .unwrap();
        state.submit_form();

        assert_eq!(state.records().len(), 2);
        assert_eq!(state.records().get(1).unwrap().text("teamNumber"), Some("1678"));
        assert_eq!(state.records().get(0), Some(&team("1", "254")));
        assert_eq!(persisted(&rx).len(), 1);
    }

    #[test]
    fn edit_unknown_record_is_a_no_op() {
        let (mut state, _rx) = connected(vec![team("1", "254")]);
        state.go_to_list();
        assert!(matches!(
            state.edit_record("99"),
            Err(StateError::RecordNotFound { .. })
        ));
        assert_eq!(state.current_view(), View::List);
        assert_eq!(state.session().mode(), SessionMode::New);
    }

    #[test]
    fn delete_flow_requires_confirmation() {
        let (mut state, rx) = connected(vec![team("1", "254"), team("2", "118")]);
        state.edit_record("1").unwrap();
        state.confirm_delete();
        assert!(state.has_delete_confirmation());
        assert_eq!(state.records().len(), 2);

        state.delete_cancelled();
        assert!(!state.has_delete_confirmation());
        assert_eq!(state.current_view(), View::Form);
        assert!(persisted(&rx).is_empty());

        state.confirm_delete().delete_confirmed();
        assert_eq!(state.current_view(), View::List);
        assert_eq!(state.records().records(), &[team("2", "118")]);
        assert_eq!(state.session().mode(), SessionMode::New);
        assert_eq!(persisted(&rx).len(), 1);
    }

    #[test]
    fn delete_confirmation_on_new_form_does_nothing() {
        let (mut state, rx) = connected(vec![team("1", "254")]);
        state.go_to_form().confirm_delete();
        assert!(!state.has_delete_confirmation());
        state.delete_confirmed();
        assert_eq!(state.current_view(), View::Form);
        assert_eq!(state.records().len(), 1);
        assert!(persisted(&rx).is_empty());
    }

    #[test]
    fn delete_unknown_id_does_not_persist() {
        let (mut state, rx) = connected(vec![team("1", "254")]);
        state.delete_record("99");
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.current_view(), View::List);
        assert!(persisted(&rx).is_empty());
    }

    #[test]
    fn cancel_edit_only_leaves_editing_forms() {
        let (mut state, _rx) = connected(vec![team("1", "254")]);
        state.cancel_edit();
        assert_eq!(state.current_view(), View::Form);

        state.edit_record("1").unwrap();
        state.cancel_edit();
        assert_eq!(state.current_view(), View::List);
        assert_eq!(state.records().get(0), Some(&team("1", "254")));
    }

    #[test]
    fn go_to_list_keeps_session() {
        let (mut state, _rx) = connected(vec![]);
        state.form_input_char('9');
        state.go_to_list();
        assert_eq!(state.session().record().text("teamNumber"), Some("9"));
        state.go_to_form();
        assert_eq!(state.session().record().text("teamNumber"), Some(""));
    }

    #[test]
    fn record_selection_wraps() {
        let (mut state, _rx) = connected(vec![team("1", "254"), team("2", "118"), team("3", "971")]);
        assert_eq!(state.selected_record().and_then(Record::id), Some("1"));
        state.previous_record();
        assert_eq!(state.selected_record().and_then(Record::id), Some("3"));
        state.next_record();
        assert_eq!(state.selected_record().and_then(Record::id), Some("1"));
        state.next_record().edit_selected_record();
        assert_eq!(state.session().record().id(), Some("2"));
    }

    #[test]
    fn qr_popup_holds_encoded_record() {
        let (mut state, _rx) = connected(vec![team("1", "254")]);
        state.go_to_list().show_qr_for_selected();
        let popup = state.qr_popup().unwrap();
        assert_eq!(popup.record_id, "1");
        assert_eq!(popup.title, "QR Code for Team: 254");
        let decoded: Record = serde_json::from_str(&popup.payload).unwrap();
        assert_eq!(decoded, team("1", "254"));
        state.hide_qr();
        assert!(state.qr_popup().is_none());
    }

    #[test]
    fn qr_on_empty_list_does_nothing() {
        let (mut state, _rx) = connected(vec![]);
        state.go_to_list().show_qr_for_selected();
        assert!(state.qr_popup().is_none());
    }

    #[test]
    fn advance_spinner_wraps() {
        let mut state = State::detached(schema());
        for _ in 0..SPINNER_FRAME_COUNT {
            state.advance_spinner_index();
        }
        assert_eq!(state.get_spinner_index(), 0);
    }

    #[test]
    fn toggle_log_panel() {
        let mut state = State::detached(schema());
        assert!(!state.is_log_panel_open());
        state.toggle_log_panel();
        assert!(state.is_log_panel_open());
    }
}
