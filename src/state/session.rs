//! Form editing session.
//!
//! A session holds the record being filled in, which field has the cursor
//! and whether a delete is awaiting confirmation. Whether the form is
//! creating or editing is read off the record id, never stored separately.

use super::{SessionMode, StateError};
use crate::schema::{FieldDefinition, FieldKind, FieldSchema};
use crate::store::{FieldValue, Record};
use log::*;
use std::sync::Arc;

/// A field paired with its current value, ready to render.
///
#[derive(Debug, PartialEq)]
pub struct FieldEntry<'a> {
    pub definition: &'a FieldDefinition,
    pub value: &'a FieldValue,
    pub focused: bool,
}

/// A section title with its fields in display order.
///
#[derive(Debug, PartialEq)]
pub struct SectionEntry<'a> {
    pub title: &'a str,
    pub fields: Vec<FieldEntry<'a>>,
}

#[derive(Clone, Debug)]
pub struct FormSession {
    schema: Arc<FieldSchema>,
    record: Record,
    order: Vec<usize>,
    focused: usize,
    delete_pending: bool,
}

impl FormSession {
    /// Start a blank form.
    ///
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        let record = schema.default_record();
        FormSession::with_record(schema, record)
    }

    /// Start editing an existing record. Values the schema does not know
    /// about are dropped and missing ones take their default.
    ///
    pub fn editing(schema: Arc<FieldSchema>, record: Record) -> Self {
        let record = schema.conform(record);
        FormSession::with_record(schema, record)
    }

    fn with_record(schema: Arc<FieldSchema>, record: Record) -> Self {
        let order = schema.display_order();
        FormSession {
            schema,
            record,
            order,
            focused: 0,
            delete_pending: false,
        }
    }

    pub fn mode(&self) -> SessionMode {
        if self.record.is_persisted() {
            SessionMode::Editing
        } else {
            SessionMode::New
        }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.record.get(field_id)
    }

    /// Heading shown above the form.
    ///
    pub fn title(&self) -> String {
        match self.mode() {
            SessionMode::New => "New Form Entry".to_string(),
            SessionMode::Editing => {
                format!(
                    "Editing Form for Team: {}",
                    self.schema.summary_title(&self.record)
                )
            }
        }
    }

    /// Label of the submit action.
    ///
    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            SessionMode::New => "Submit",
            SessionMode::Editing => "Update",
        }
    }

    /// Replace the value of one field. Unknown ids and values of the wrong
    /// kind are rejected and leave the record untouched.
    ///
    pub fn set_value(&mut self, field_id: &str, value: FieldValue) -> Result<(), StateError> {
        self.schema.check_value(field_id, &value)?;
        self.record.set(field_id, value);
        Ok(())
    }

    /// Returns the field holding the cursor.
    ///
    pub fn focused_field(&self) -> Option<&FieldDefinition> {
        self.order
            .get(self.focused)
            .and_then(|position| self.schema.all_fields().get(*position))
    }

    /// Move the cursor to the given field.
    ///
    pub fn focus(&mut self, field_id: &str) -> Result<(), StateError> {
        let position = self
            .schema
            .position(field_id)
            .ok_or_else(|| crate::schema::SchemaError::UnknownField {
                id: field_id.to_string(),
            })?;
        if let Some(index) = self.order.iter().position(|p| *p == position) {
            self.focused = index;
        }
        Ok(())
    }

    /// Move the cursor to the next field, wrapping to the first.
    ///
    pub fn next_field(&mut self) -> &mut Self {
        if !self.order.is_empty() {
            self.focused = (self.focused + 1) % self.order.len();
        }
        self
    }

    /// Move the cursor to the previous field, wrapping to the last.
    ///
    pub fn previous_field(&mut self) -> &mut Self {
        if !self.order.is_empty() {
            self.focused = if self.focused == 0 {
                self.order.len() - 1
            } else {
                self.focused - 1
            };
        }
        self
    }

    /// Type a character into the focused text field. Returns whether the
    /// character was taken; numeric fields only take digits.
    ///
    pub fn input_char(&mut self, c: char) -> bool {
        let (id, keyboard) = match self.focused_field() {
            Some(FieldDefinition {
                id,
                kind: FieldKind::Text { keyboard, .. },
                ..
            }) => (id.clone(), *keyboard),
            _ => return false,
        };
        if !keyboard.accepts(c) {
            debug!("Ignoring '{}' typed into {}", c, id);
            return false;
        }
        match self.record.value_mut(&id) {
            Some(FieldValue::Text(text)) => {
                text.push(c);
                true
            }
            _ => false,
        }
    }

    /// Remove the last character of the focused text field.
    ///
    pub fn backspace(&mut self) -> &mut Self {
        if let Some(id) = self.focused_field().map(|field| field.id.clone()) {
            if let Some(FieldValue::Text(text)) = self.record.value_mut(&id) {
                text.pop();
            }
        }
        self
    }

    /// Flip the focused boolean field. Returns whether a field was flipped.
    ///
    pub fn toggle(&mut self) -> bool {
        let id = match self.focused_field() {
            Some(field) if field.kind == FieldKind::Boolean => field.id.clone(),
            _ => return false,
        };
        match self.record.value_mut(&id) {
            Some(FieldValue::Flag(flag)) => {
                *flag = !*flag;
                true
            }
            _ => false,
        }
    }

    /// Record to hand to the store on submit. Carries the id when editing.
    ///
    pub fn submit_payload(&self) -> Record {
        self.record.clone()
    }

    /// Ask for confirmation before deleting. Only a saved record can be
    /// deleted; the record itself is not touched.
    ///
    pub fn confirm_delete(&mut self) -> Result<(), StateError> {
        if self.mode() != SessionMode::Editing {
            return Err(StateError::NotEditing);
        }
        self.delete_pending = true;
        Ok(())
    }

    pub fn is_delete_pending(&self) -> bool {
        self.delete_pending
    }

    /// Leave the confirmation and return the id to delete. Yields nothing
    /// unless a confirmation was pending for a saved record.
    ///
    pub fn delete_confirmed(&mut self) -> Option<String> {
        if !self.delete_pending {
            return None;
        }
        self.delete_pending = false;
        self.record.id().map(str::to_string)
    }

    /// Leave the confirmation without deleting anything.
    ///
    pub fn delete_cancelled(&mut self) -> &mut Self {
        self.delete_pending = false;
        self
    }

    /// Fields grouped by section, each with its current value.
    ///
    pub fn sections(&self) -> Vec<SectionEntry<'_>> {
        let focused_id = self.focused_field().map(|field| field.id.as_str());
        self.schema
            .grouped_by_section()
            .into_iter()
            .map(|group| SectionEntry {
                title: group.title,
                fields: group
                    .fields
                    .into_iter()
                    .filter_map(|definition| {
                        self.record.get(&definition.id).map(|value| FieldEntry {
                            definition,
                            value,
                            focused: Some(definition.id.as_str()) == focused_id,
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}
