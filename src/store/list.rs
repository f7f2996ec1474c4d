use super::Record;
use log::*;

/// Result of submitting a record to the list.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was given this id and placed first.
    Inserted { id: String },
    /// The record with a matching id was replaced at this position.
    Replaced { index: usize },
    /// The record carried an id that no entry has; nothing changed.
    Unmatched { id: String },
}

impl SubmitOutcome {
    pub fn changed_list(&self) -> bool {
        !matches!(self, SubmitOutcome::Unmatched { .. })
    }
}

/// Ordered list of submitted records, newest first.
///
#[derive(Clone, Debug, Default)]
pub struct RecordList {
    records: Vec<Record>,
    last_issued: i64,
}

impl PartialEq for RecordList {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl RecordList {
    pub fn new() -> Self {
        RecordList::default()
    }

    /// Wrap records that already exist, keeping their order. New ids will be
    /// greater than any numeric id already present.
    ///
    pub fn from_records(records: Vec<Record>) -> Self {
        let last_issued = records
            .iter()
            .filter_map(|record| record.id().and_then(|id| id.parse::<i64>().ok()))
            .max()
            .unwrap_or(0);
        RecordList {
            records,
            last_issued,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == Some(id))
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == Some(id))
    }

    /// Insert a new record or replace an existing one.
    ///
    /// Records without an id get a fresh one and go to the front. Records with
    /// an id replace the entry holding that id in place; if no entry holds it
    /// the list is left untouched.
    ///
    pub fn submit(&mut self, mut record: Record) -> SubmitOutcome {
        match record.id().map(str::to_string) {
            Some(id) => match self.position(&id) {
                Some(index) => {
                    debug!("Replacing record {} at position {}", id, index);
                    self.records[index] = record;
                    SubmitOutcome::Replaced { index }
                }
                None => {
                    warn!("Dropping update for record {} which is no longer in the list", id);
                    SubmitOutcome::Unmatched { id }
                }
            },
            None => {
                let id = self.next_id();
                debug!("Inserting new record {}", id);
                record.set_id(id.clone());
                self.records.insert(0, record);
                SubmitOutcome::Inserted { id }
            }
        }
    }

    /// Remove the record with the given id. Returns whether anything was
    /// removed.
    ///
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != Some(id));
        let removed = self.records.len() != before;
        if !removed {
            debug!("No record {} to delete", id);
        }
        removed
    }

    /// Millisecond timestamp, bumped past the last issued value so two
    /// submissions in the same millisecond still get distinct ids.
    ///
    /// If the last issued id cannot be bumped, the clock is used instead,
    /// skipping any id already taken.
    ///
    fn next_id(&mut self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let mut id = match self.last_issued.checked_add(1) {
            Some(next) => now.max(next),
            None => {
                warn!("Stored form ids are exhausted, falling back to the clock.");
                now
            }
        };
        while self.find(&id.to_string()).is_some() {
            id += 1;
        }
        self.last_issued = id;
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDefinition, FieldSchema};
    use crate::store::FieldValue;
    use fake::{Fake, Faker};
    use std::collections::BTreeMap;

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldDefinition::text("teamNumber", "Team Number:", "Team Information"),
            FieldDefinition::boolean(
                "autoCanScoreAlgae",
                "Can Score Algae in Auto:",
                "Team Information",
            ),
        ])
        .unwrap()
    }

    fn team(id: &str, number: &str) -> Record {
        let mut values = BTreeMap::new();
        values.insert("teamNumber".to_string(), FieldValue::Text(number.to_string()));
        Record::from_parts(Some(id.to_string()), values)
    }

    fn random_record(schema: &FieldSchema) -> Record {
        let mut record = schema.default_record();
        record.set("teamNumber", FieldValue::Text(Faker.fake::<String>()));
        record.set("autoCanScoreAlgae", FieldValue::Flag(Faker.fake::<bool>()));
        record
    }

    #[test]
    fn submit_new_record_into_empty_list() {
        let schema = schema();
        let mut record = schema.default_record();
        assert_eq!(record.get("teamNumber"), Some(&FieldValue::Text(String::new())));
        assert_eq!(record.get("autoCanScoreAlgae"), Some(&FieldValue::Flag(false)));

        record.set("teamNumber", FieldValue::Text("254".into()));
        record.set("autoCanScoreAlgae", FieldValue::Flag(true));

        let mut list = RecordList::new();
        let outcome = list.submit(record.clone());

        assert_eq!(list.len(), 1);
        let stored = list.get(0).unwrap();
        let id = stored.id().unwrap();
        assert!(!id.is_empty());
        assert_eq!(outcome, SubmitOutcome::Inserted { id: id.to_string() });
        assert_eq!(stored.values(), record.values());
    }

    #[test]
    fn submit_assigns_identity_and_prepends() {
        let schema = schema();
        let mut list = RecordList::new();
        for _ in 0..5 {
            let record = random_record(&schema);
            list.submit(record.clone());
            let first = list.get(0).unwrap();
            assert!(first.id().is_some());
            assert_eq!(first.values(), record.values());
        }
        let mut ids: Vec<&str> = list.iter().filter_map(Record::id).collect();
        assert_eq!(ids.len(), 5);
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn ids_increase_even_within_one_millisecond() {
        let schema = schema();
        let mut list = RecordList::new();
        for _ in 0..50 {
            list.submit(schema.default_record());
        }
        let ids: Vec<i64> = list
            .iter()
            .map(|r| r.id().unwrap().parse::<i64>().unwrap())
            .collect();
        for pair in ids.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn from_records_issues_ids_past_existing_ones() {
        let far_future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        let mut list = RecordList::from_records(vec![team(&far_future.to_string(), "254")]);
        let outcome = list.submit(schema().default_record());
        assert_eq!(
            outcome,
            SubmitOutcome::Inserted {
                id: (far_future + 1).to_string()
            }
        );
    }

    #[test]
    fn submit_after_largest_possible_id_does_not_overflow() {
        let schema = schema();
        let mut list = RecordList::from_records(vec![team(&i64::MAX.to_string(), "254")]);
        let outcome = list.submit(schema.default_record());
        let id = match outcome {
            SubmitOutcome::Inserted { id } => id,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_ne!(id, i64::MAX.to_string());
        assert_eq!(list.len(), 2);

        list.submit(schema.default_record());
        assert_eq!(list.len(), 3);
        let mut ids: Vec<_> = list.iter().filter_map(Record::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn submit_replaces_in_place() {
        let mut list =
            RecordList::from_records(vec![team("1", "254"), team("2", "118"), team("3", "971")]);
        let edited = team("2", "1678");
        let outcome = list.submit(edited.clone());

        assert_eq!(outcome, SubmitOutcome::Replaced { index: 1 });
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Some(&team("1", "254")));
        assert_eq!(list.get(1), Some(&edited));
        assert_eq!(list.get(2), Some(&team("3", "971")));
    }

    #[test]
    fn submit_with_unmatched_id_leaves_list_unchanged() {
        let mut list = RecordList::from_records(vec![team("1", "254")]);
        let before = list.clone();
        let outcome = list.submit(team("99", "118"));
        assert_eq!(outcome, SubmitOutcome::Unmatched { id: "99".into() });
        assert!(!outcome.changed_list());
        assert_eq!(list, before);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut list = RecordList::from_records(vec![team("1", "254"), team("2", "118")]);
        assert!(list.delete("1"));
        assert_eq!(list.records(), &[team("2", "118")]);
        let once = list.clone();
        assert!(!list.delete("1"));
        assert_eq!(list, once);
    }

    #[test]
    fn find_and_position() {
        let list = RecordList::from_records(vec![team("1", "254"), team("2", "118")]);
        assert_eq!(list.position("2"), Some(1));
        assert_eq!(list.find("1").and_then(|r| r.text("teamNumber")), Some("254"));
        assert!(list.find("3").is_none());
    }
}
