use crate::relation::{RelationKey, RelationState};
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Relation not found: {0}")]
    RelationNotFound(RelationKey),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Transition from {from} to {to} is not allowed")]
    InvalidTransition {
        from: RelationState,
        to: RelationState,
    },

    /// The source relation was removed but the target could not be created.
    /// The relation is now absent from both states.
    #[error("Transition incomplete: {key} was removed but could not be recreated as {to}: {reason}")]
    TransitionIncomplete {
        key: RelationKey,
        to: RelationState,
        reason: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
