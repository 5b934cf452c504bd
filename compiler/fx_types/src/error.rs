//! Errors raised while building structural types.

/// Failure of a structural type operation.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TypeError {
    /// A field with this name already exists in the aggregate.
    #[error("field `{0}` already exists")]
    DuplicateField(String),
    /// No field with this name exists in the aggregate.
    #[error("field `{0}` does not exist")]
    FieldNotFound(String),
    /// Field operations require a record or table.
    #[error("type `{0}` is not a record or table")]
    NotAggregate(String),
}
