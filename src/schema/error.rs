//! Schema-specific error types.

/// Errors that can occur while building a schema or checking a record
/// against it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two field definitions share the same id
    #[error("Duplicate field id in schema: {id}")]
    DuplicateField { id: String },

    /// A field uses the key reserved for record ids
    #[error("Field id '{id}' is reserved for record ids")]
    ReservedId { id: String },

    /// A field id was used that the schema does not define
    #[error("Unknown field: {id}")]
    UnknownField { id: String },

    /// A record lacks a field the schema defines
    #[error("Missing field: {id}")]
    MissingField { id: String },

    /// A value does not match the kind declared for its field
    #[error("Field '{id}' expects a {expected} value")]
    KindMismatch { id: String, expected: &'static str },

    /// A summary field references an id outside the schema
    #[error("Summary field '{id}' is not part of the schema")]
    UnknownSummaryField { id: String },
}
