//! Field schema module.
//!
//! The schema is the ordered, immutable list of every field a scout can fill
//! in. It decides the default value of each field, how fields are grouped
//! into sections for display, and which ids a record may carry.

mod error;
mod season_2025;

pub use error::SchemaError;

use crate::store::{FieldValue, Record};
use log::*;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Key under which a record's own id is stored; no field may use it.
///
pub const RECORD_ID_KEY: &str = "id";

/// Presentation hint for text entry.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardHint {
    Default,
    Numeric,
}

impl KeyboardHint {
    /// Returns whether the character can be typed into a field with this hint.
    ///
    pub fn accepts(&self, c: char) -> bool {
        match self {
            KeyboardHint::Default => !c.is_control(),
            KeyboardHint::Numeric => c.is_ascii_digit(),
        }
    }
}

/// Kind of a field, carrying the hints that only make sense for that kind.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text {
        placeholder: Option<String>,
        keyboard: KeyboardHint,
    },
    Boolean,
}

impl FieldKind {
    /// Returns the value a fresh record holds for this kind.
    ///
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Text { .. } => FieldValue::Text(String::new()),
            FieldKind::Boolean => FieldValue::Flag(false),
        }
    }

    /// Returns whether the value has the shape this kind expects.
    ///
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Text { .. }, FieldValue::Text(_)) | (FieldKind::Boolean, FieldValue::Flag(_))
        )
    }

    /// Returns a short name used in messages.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// Defines a single collectible field.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub section: String,
}

impl FieldDefinition {
    /// Return a text field definition.
    ///
    pub fn text(id: &str, label: &str, section: &str) -> Self {
        FieldDefinition {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text {
                placeholder: None,
                keyboard: KeyboardHint::Default,
            },
            section: section.to_string(),
        }
    }

    /// Return a boolean field definition.
    ///
    pub fn boolean(id: &str, label: &str, section: &str) -> Self {
        FieldDefinition {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Boolean,
            section: section.to_string(),
        }
    }

    /// Set the placeholder of a text field. Ignored for boolean fields.
    ///
    pub fn placeholder(mut self, text: &str) -> Self {
        if let FieldKind::Text { placeholder, .. } = &mut self.kind {
            *placeholder = Some(text.to_string());
        }
        self
    }

    /// Restrict a text field to digits. Ignored for boolean fields.
    ///
    pub fn numeric(mut self) -> Self {
        if let FieldKind::Text { keyboard, .. } = &mut self.kind {
            *keyboard = KeyboardHint::Numeric;
        }
        self
    }

    /// Label without the trailing colon used in form layouts.
    ///
    pub fn short_label(&self) -> &str {
        self.label.trim_end().trim_end_matches(':')
    }
}

/// A section title with the fields rendered under it.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionGroup<'a> {
    pub title: &'a str,
    pub fields: Vec<&'a FieldDefinition>,
}

/// Field ids shown when a record is summarized in a list.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SummaryFields {
    pub title: Option<String>,
    pub detail: Option<String>,
}

fn summary_text<'a>(record: &'a Record, field_id: Option<&str>) -> &'a str {
    field_id
        .and_then(|id| record.text(id))
        .filter(|text| !text.is_empty())
        .unwrap_or("N/A")
}

/// Ordered, immutable list of field definitions.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    fields: Vec<FieldDefinition>,
    index: HashMap<String, usize>,
    summary: SummaryFields,
}

impl FieldSchema {
    /// Build a schema from definitions in display order, rejecting duplicate
    /// ids.
    ///
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if field.id == RECORD_ID_KEY {
                return Err(SchemaError::ReservedId {
                    id: field.id.clone(),
                });
            }
            if index.insert(field.id.clone(), position).is_some() {
                return Err(SchemaError::DuplicateField {
                    id: field.id.clone(),
                });
            }
        }
        Ok(FieldSchema {
            fields,
            index,
            summary: SummaryFields::default(),
        })
    }

    /// Attach the fields used to summarize records in lists.
    ///
    pub fn with_summary(mut self, title: &str, detail: &str) -> Result<Self, SchemaError> {
        for id in [title, detail] {
            if !self.index.contains_key(id) {
                return Err(SchemaError::UnknownSummaryField { id: id.to_string() });
            }
        }
        self.summary = SummaryFields {
            title: Some(title.to_string()),
            detail: Some(detail.to_string()),
        };
        Ok(self)
    }

    /// Return the built-in 2025 season scouting schema.
    ///
    pub fn season_2025() -> Result<Self, SchemaError> {
        season_2025::schema()
    }

    /// Returns every field in schema order.
    ///
    pub fn all_fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the definition for the given id.
    ///
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.index.get(id).map(|position| &self.fields[*position])
    }

    /// Returns the position of the given id in schema order.
    ///
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn summary(&self) -> &SummaryFields {
        &self.summary
    }

    /// Value of the record's title field, or `N/A` when it is blank.
    ///
    pub fn summary_title<'a>(&self, record: &'a Record) -> &'a str {
        summary_text(record, self.summary.title.as_deref())
    }

    /// Label and value of the record's detail field, e.g.
    /// `("Teleop Points", "12")`. None when the schema names no detail field.
    ///
    pub fn summary_detail<'a>(&'a self, record: &'a Record) -> Option<(&'a str, &'a str)> {
        let id = self.summary.detail.as_deref()?;
        let field = self.field(id)?;
        Some((field.short_label(), summary_text(record, Some(id))))
    }

    /// Build a record with every field set to its kind's default.
    ///
    pub fn default_record(&self) -> Record {
        let values: BTreeMap<String, FieldValue> = self
            .fields
            .iter()
            .map(|field| (field.id.clone(), field.kind.default_value()))
            .collect();
        Record::from_parts(None, values)
    }

    /// Group fields by section. A section sits where its first field sits in
    /// schema order and its fields keep their relative order.
    ///
    pub fn grouped_by_section(&self) -> Vec<SectionGroup<'_>> {
        let mut groups: Vec<SectionGroup<'_>> = vec![];
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for field in &self.fields {
            match positions.get(field.section.as_str()) {
                Some(position) => groups[*position].fields.push(field),
                None => {
                    positions.insert(field.section.as_str(), groups.len());
                    groups.push(SectionGroup {
                        title: field.section.as_str(),
                        fields: vec![field],
                    });
                }
            }
        }
        groups
    }

    /// Returns schema positions in the order fields are displayed.
    ///
    pub fn display_order(&self) -> Vec<usize> {
        self.grouped_by_section()
            .iter()
            .flat_map(|group| group.fields.iter())
            .filter_map(|field| self.position(&field.id))
            .collect()
    }

    /// Check that a record only carries known ids with values of the right
    /// kind and that no schema field is missing.
    ///
    pub fn validate(&self, record: &Record) -> Result<(), SchemaError> {
        for (id, value) in record.values() {
            self.check_value(id, value)?;
        }
        if let Some(missing) = self.fields.iter().find(|f| record.get(&f.id).is_none()) {
            return Err(SchemaError::MissingField {
                id: missing.id.clone(),
            });
        }
        Ok(())
    }

    /// Check a single value against the field it is assigned to.
    ///
    pub fn check_value(&self, id: &str, value: &FieldValue) -> Result<(), SchemaError> {
        let field = self
            .field(id)
            .ok_or_else(|| SchemaError::UnknownField { id: id.to_string() })?;
        if field.kind.accepts(value) {
            Ok(())
        } else {
            Err(SchemaError::KindMismatch {
                id: id.to_string(),
                expected: field.kind.name(),
            })
        }
    }

    /// Bring a record in line with the schema: unknown ids are dropped,
    /// values of the wrong kind and missing fields take their default.
    ///
    pub fn conform(&self, record: Record) -> Record {
        let (id, mut values) = record.into_parts();
        let known: HashSet<&str> = self.fields.iter().map(|f| f.id.as_str()).collect();
        values.retain(|key, _| {
            let keep = known.contains(key.as_str());
            if !keep {
                warn!("Dropping unknown field '{}' from record {:?}", key, id);
            }
            keep
        });
        for field in &self.fields {
            match values.get(&field.id) {
                Some(value) if field.kind.accepts(value) => {}
                Some(_) => {
                    warn!(
                        "Resetting field '{}' of record {:?}: expected a {} value",
                        field.id,
                        id,
                        field.kind.name()
                    );
                    values.insert(field.id.clone(), field.kind.default_value());
                }
                None => {
                    values.insert(field.id.clone(), field.kind.default_value());
                }
            }
        }
        Record::from_parts(id, values)
    }
}
