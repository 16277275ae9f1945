//! Row mapping for the `teacher_relations` table.

use sqlx::FromRow;
use yboard_core::error::CoreError;
use yboard_core::relation::{InterviewDetails, Relation, RelationKind, RelationState};
use yboard_core::types::{DbId, Timestamp};

/// Raw row from `teacher_relations`.
///
/// Converted into [`Relation`] with [`TryFrom`], which rejects interview data
/// on a state that cannot carry it.
#[derive(Debug, Clone, FromRow)]
pub struct RelationRow {
    pub teacher_id: DbId,
    pub promo_module_id: DbId,
    #[sqlx(try_from = "String")]
    pub state: RelationState,
    pub workload: i32,
    pub rate: Option<f64>,
    pub interview_date: Option<Timestamp>,
    pub interview_comments: Option<String>,
    pub decision: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<RelationRow> for Relation {
    type Error = CoreError;

    fn try_from(row: RelationRow) -> Result<Self, Self::Error> {
        let interview = InterviewDetails {
            interview_date: row.interview_date,
            interview_comments: row.interview_comments,
            decision: row.decision,
        };
        Ok(Relation {
            teacher_id: row.teacher_id,
            promo_module_id: row.promo_module_id,
            workload: row.workload,
            rate: row.rate,
            kind: RelationKind::from_parts(row.state, interview)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn row(state: RelationState, decision: Option<bool>) -> RelationRow {
        RelationRow {
            teacher_id: 1,
            promo_module_id: 2,
            state,
            workload: 10,
            rate: Some(30.0),
            interview_date: None,
            interview_comments: None,
            decision,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn potential_row_keeps_interview() {
        let relation = Relation::try_from(row(RelationState::Potential, Some(true))).unwrap();
        assert_eq!(relation.interview().unwrap().decision, Some(true));
        assert_eq!(relation.workload, 10);
    }

    #[test]
    fn selected_row_with_interview_is_rejected() {
        assert_matches!(
            Relation::try_from(row(RelationState::Selected, Some(true))),
            Err(CoreError::Validation(_))
        );
    }
}
