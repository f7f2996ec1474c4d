use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value held by a single field of a record.
///
/// Serialized untagged so stored records read as plain JSON objects, e.g.
/// `{"teamNumber": "254", "autoCanScoreAlgae": true}`.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }

    /// Human readable form used in lists and summaries.
    ///
    pub fn display(&self) -> String {
        match self {
            FieldValue::Flag(true) => "Yes".to_string(),
            FieldValue::Flag(false) => "No".to_string(),
            FieldValue::Text(text) if text.is_empty() => "None entered".to_string(),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

/// One completed scouting entry.
///
/// Values are keyed by schema field id. The record id is assigned on first
/// submission; a record without one has never been saved.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(flatten)]
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Assemble a record from an optional id and its values. No schema check
    /// happens here; use `FieldSchema::validate` or `FieldSchema::conform`.
    ///
    pub fn from_parts(id: Option<String>, values: BTreeMap<String, FieldValue>) -> Self {
        Record { id, values }
    }

    pub fn into_parts(self) -> (Option<String>, BTreeMap<String, FieldValue>) {
        (self.id, self.values)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// Returns the text of a text field, or None for missing or boolean
    /// fields.
    ///
    pub fn text(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).and_then(FieldValue::as_text)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub(crate) fn set(&mut self, field_id: &str, value: FieldValue) {
        if let Some(slot) = self.values.get_mut(field_id) {
            *slot = value;
        }
    }

    pub(crate) fn value_mut(&mut self, field_id: &str) -> Option<&mut FieldValue> {
        self.values.get_mut(field_id)
    }
}
