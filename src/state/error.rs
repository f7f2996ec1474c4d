//! State management-specific error types.

use crate::schema::SchemaError;

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A field update did not fit the schema
    #[error("Invalid field update: {0}")]
    InvalidValue(#[from] SchemaError),

    /// No record holds the given id
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    /// The action only applies to a saved record being edited
    #[error("Form is not editing a saved record")]
    NotEditing,
}
