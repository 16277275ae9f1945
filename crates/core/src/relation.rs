//! Teacher ↔ promo-module relations and their three lifecycle states.
//!
//! A relation is keyed by `(teacher_id, promo_module_id, state)`. The same
//! teacher may hold one relation per state on the same promo module; the
//! records are independent. Only the potential state carries interview data,
//! which is encoded in [`RelationKind`] so that a `match` over the kind is
//! checked for exhaustiveness by the compiler.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rate::resolve_rate;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Lifecycle bucket of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationState {
    /// Prior-year snapshot. Informational only.
    Ongoing,
    /// Candidate under consideration.
    Potential,
    /// Confirmed assignment. The only state counted towards coverage.
    Selected,
}

impl RelationState {
    pub const ALL: [RelationState; 3] = [Self::Ongoing, Self::Potential, Self::Selected];

    /// Name used in URLs and in the `teacher_relations.state` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Potential => "potential",
            Self::Selected => "selected",
        }
    }
}

impl fmt::Display for RelationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(Self::Ongoing),
            "potential" => Ok(Self::Potential),
            "selected" => Ok(Self::Selected),
            other => Err(CoreError::Validation(format!(
                "Unknown relation state '{other}'. Must be one of: ongoing, potential, selected"
            ))),
        }
    }
}

impl TryFrom<String> for RelationState {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Composite key of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationKey {
    pub teacher_id: DbId,
    pub promo_module_id: DbId,
    pub state: RelationState,
}

impl RelationKey {
    pub fn new(teacher_id: DbId, promo_module_id: DbId, state: RelationState) -> Self {
        Self {
            teacher_id,
            promo_module_id,
            state,
        }
    }

    /// Same teacher and promo module, other state.
    pub fn with_state(self, state: RelationState) -> Self {
        Self { state, ..self }
    }
}

impl fmt::Display for RelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} relation of teacher {} on promo module {}",
            self.state, self.teacher_id, self.promo_module_id
        )
    }
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Interview metadata carried by potential relations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewDetails {
    pub interview_date: Option<Timestamp>,
    pub interview_comments: Option<String>,
    /// `None` until a decision has been taken.
    pub decision: Option<bool>,
}

impl InterviewDetails {
    pub fn is_empty(&self) -> bool {
        self.interview_date.is_none() && self.interview_comments.is_none() && self.decision.is_none()
    }

    /// Overwrite the fields that are set in `patch`.
    fn merge(&mut self, patch: &InterviewDetails) {
        if let Some(date) = patch.interview_date {
            self.interview_date = Some(date);
        }
        if let Some(comments) = &patch.interview_comments {
            self.interview_comments = Some(comments.clone());
        }
        if let Some(decision) = patch.decision {
            self.decision = Some(decision);
        }
    }
}

/// State of a relation together with its state-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RelationKind {
    Ongoing,
    Potential(InterviewDetails),
    Selected,
}

impl RelationKind {
    /// Fresh kind for `state`, without any interview data.
    pub fn empty(state: RelationState) -> Self {
        match state {
            RelationState::Ongoing => Self::Ongoing,
            RelationState::Potential => Self::Potential(InterviewDetails::default()),
            RelationState::Selected => Self::Selected,
        }
    }

    /// Build a kind from a state and optional interview fields.
    ///
    /// Interview fields are only accepted for the potential state.
    pub fn from_parts(state: RelationState, interview: InterviewDetails) -> Result<Self, CoreError> {
        match state {
            RelationState::Potential => Ok(Self::Potential(interview)),
            RelationState::Ongoing | RelationState::Selected => {
                reject_interview_fields(state, &interview)?;
                Ok(Self::empty(state))
            }
        }
    }

    pub fn state(&self) -> RelationState {
        match self {
            Self::Ongoing => RelationState::Ongoing,
            Self::Potential(_) => RelationState::Potential,
            Self::Selected => RelationState::Selected,
        }
    }
}

fn reject_interview_fields(
    state: RelationState,
    interview: &InterviewDetails,
) -> Result<(), CoreError> {
    if interview.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Interview fields are only allowed on potential relations, not {state}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Relation
// ---------------------------------------------------------------------------

/// A teacher's relation to one promo module in one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub teacher_id: DbId,
    pub promo_module_id: DbId,
    /// Hours covered by this teacher. Always positive.
    pub workload: i32,
    /// Relation-specific hourly rate, overriding the teacher's default.
    pub rate: Option<f64>,
    #[serde(flatten)]
    pub kind: RelationKind,
}

impl Relation {
    pub fn state(&self) -> RelationState {
        self.kind.state()
    }

    pub fn key(&self) -> RelationKey {
        RelationKey::new(self.teacher_id, self.promo_module_id, self.state())
    }

    pub fn interview(&self) -> Option<&InterviewDetails> {
        match &self.kind {
            RelationKind::Potential(details) => Some(details),
            RelationKind::Ongoing | RelationKind::Selected => None,
        }
    }

    /// Hourly rate after applying the teacher's default.
    pub fn effective_rate(&self, teacher_rate: Option<f64>) -> f64 {
        resolve_rate(self.rate, teacher_rate)
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: &RelationPatch) -> Result<(), CoreError> {
        patch.validate()?;
        let state = self.state();
        match &mut self.kind {
            RelationKind::Potential(details) => details.merge(&patch.interview),
            RelationKind::Ongoing | RelationKind::Selected => {
                reject_interview_fields(state, &patch.interview)?;
            }
        }
        if let Some(workload) = patch.workload {
            self.workload = workload;
        }
        if let Some(rate) = patch.rate {
            self.rate = Some(rate);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input for creating a relation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRelation {
    pub teacher_id: DbId,
    pub promo_module_id: DbId,
    pub workload: i32,
    pub rate: Option<f64>,
    pub kind: RelationKind,
}

impl NewRelation {
    /// Copy of `source` placed in `state`.
    ///
    /// Workload and rate travel with the copy; interview data never does.
    pub fn copy_of(source: &Relation, state: RelationState) -> Self {
        Self {
            teacher_id: source.teacher_id,
            promo_module_id: source.promo_module_id,
            workload: source.workload,
            rate: source.rate,
            kind: RelationKind::empty(state),
        }
    }

    pub fn key(&self) -> RelationKey {
        RelationKey::new(self.teacher_id, self.promo_module_id, self.kind.state())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_workload(self.workload)?;
        if let Some(rate) = self.rate {
            validate_rate(rate)?;
        }
        Ok(())
    }

    pub fn into_relation(self) -> Relation {
        Relation {
            teacher_id: self.teacher_id,
            promo_module_id: self.promo_module_id,
            workload: self.workload,
            rate: self.rate,
            kind: self.kind,
        }
    }
}

/// Partial update of a relation. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RelationPatch {
    pub workload: Option<i32>,
    pub rate: Option<f64>,
    #[serde(flatten)]
    pub interview: InterviewDetails,
}

impl RelationPatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(workload) = self.workload {
            validate_workload(workload)?;
        }
        if let Some(rate) = self.rate {
            validate_rate(rate)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A relation's workload must be a positive number of hours.
pub fn validate_workload(workload: i32) -> Result<(), CoreError> {
    if workload <= 0 {
        return Err(CoreError::Validation(format!(
            "workload must be a positive integer, got {workload}"
        )));
    }
    Ok(())
}

/// Hourly rates must be finite and non-negative.
pub fn validate_rate(rate: f64) -> Result<(), CoreError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(CoreError::Validation(format!(
            "rate must be a non-negative number, got {rate}"
        )));
    }
    Ok(())
}
