//! Drag-and-drop transitions between relation states.
//!
//! Rules, in order:
//! 1. same state: nothing happens;
//! 2. anything into `ongoing`: rejected, ongoing is a historical record;
//! 3. `ongoing` into `potential`/`selected`: duplicated, the ongoing record stays;
//! 4. between `potential` and `selected`: moved, exactly one record remains.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::relation::{NewRelation, Relation, RelationKey, RelationState};
use crate::relation_store::RelationStore;
use crate::types::DbId;

/// What a transition will do, decided from the two states alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPlan {
    NoOp,
    Duplicate { to: RelationState },
    Move { to: RelationState },
}

/// A relation dropped from one state onto another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransitionRequest {
    pub teacher_id: DbId,
    pub promo_module_id: DbId,
    pub from: RelationState,
    pub to: RelationState,
}

impl TransitionRequest {
    pub fn source_key(&self) -> RelationKey {
        RelationKey::new(self.teacher_id, self.promo_module_id, self.from)
    }
}

/// Result of an applied transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "relation", rename_all = "snake_case")]
pub enum TransitionOutcome {
    Unchanged,
    Duplicated(Relation),
    Moved(Relation),
}

/// Decide what dropping a relation from `from` onto `to` does.
pub fn plan_transition(
    from: RelationState,
    to: RelationState,
) -> Result<TransitionPlan, CoreError> {
    use RelationState::{Ongoing, Potential, Selected};

    match (from, to) {
        (Ongoing, Ongoing) | (Potential, Potential) | (Selected, Selected) => {
            Ok(TransitionPlan::NoOp)
        }
        (Potential | Selected, Ongoing) => Err(CoreError::InvalidTransition { from, to }),
        (Ongoing, Potential | Selected) => Ok(TransitionPlan::Duplicate { to }),
        (Potential, Selected) | (Selected, Potential) => Ok(TransitionPlan::Move { to }),
    }
}

/// Apply a transition against `store`.
///
/// The source relation must exist, except for a no-op which touches nothing.
/// A duplicate or move onto an occupied target is a [`CoreError::Conflict`].
pub async fn apply_transition<S>(
    store: &S,
    request: &TransitionRequest,
) -> Result<TransitionOutcome, CoreError>
where
    S: RelationStore + ?Sized,
{
    let key = request.source_key();

    match plan_transition(request.from, request.to)? {
        TransitionPlan::NoOp => Ok(TransitionOutcome::Unchanged),
        TransitionPlan::Duplicate { to } => {
            let source = store
                .find(&key)
                .await?
                .ok_or(CoreError::RelationNotFound(key))?;
            let created = store.create(&NewRelation::copy_of(&source, to)).await?;
            tracing::debug!(
                teacher_id = request.teacher_id,
                promo_module_id = request.promo_module_id,
                to = %to,
                "Relation duplicated"
            );
            Ok(TransitionOutcome::Duplicated(created))
        }
        TransitionPlan::Move { to } => {
            let moved = store.move_relation(&key, to).await?;
            tracing::debug!(
                teacher_id = request.teacher_id,
                promo_module_id = request.promo_module_id,
                from = %request.from,
                to = %to,
                "Relation moved"
            );
            Ok(TransitionOutcome::Moved(moved))
        }
    }
}
