//! Workload and cost aggregation for promo modules.
//!
//! Coverage only counts `selected` relations. Ongoing relations are a
//! prior-year snapshot and potential ones are unconfirmed candidates; both
//! are totalled for display but never contribute to coverage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rate::resolve_rate;
use crate::relation::{Relation, RelationKind};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status thresholds
// ---------------------------------------------------------------------------

/// Coverage (percent) at or above which a module is partially allocated.
pub const PARTIAL_COVERAGE_PCT: f64 = 50.0;
/// Coverage (percent) at or above which a module is adequately allocated.
pub const ADEQUATE_COVERAGE_PCT: f64 = 80.0;
/// Coverage (percent) above which a module is over-allocated.
pub const FULL_COVERAGE_PCT: f64 = 100.0;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One teacher's share of a module, with what is needed to price it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub teacher_id: DbId,
    pub workload: i32,
    /// Relation-specific rate override.
    pub rate: Option<f64>,
    /// Teacher's default rate.
    pub teacher_rate: Option<f64>,
}

impl Assignment {
    pub fn effective_rate(&self) -> f64 {
        resolve_rate(self.rate, self.teacher_rate)
    }

    pub fn cost(&self) -> f64 {
        f64::from(self.workload) * self.effective_rate()
    }
}

/// A promo module's base workload and its relations, split by state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleAllocation {
    /// Total hours the module requires in this promo.
    pub base_workload: i32,
    #[serde(default)]
    pub ongoing: Vec<Assignment>,
    #[serde(default)]
    pub potential: Vec<Assignment>,
    #[serde(default)]
    pub selected: Vec<Assignment>,
}

impl ModuleAllocation {
    /// Split a flat relation list into the three buckets.
    ///
    /// `teacher_rates` maps teacher ids to their default rate; teachers
    /// missing from the map are priced from the relation override alone.
    pub fn from_relations<'a>(
        base_workload: i32,
        relations: impl IntoIterator<Item = &'a Relation>,
        teacher_rates: &HashMap<DbId, Option<f64>>,
    ) -> Self {
        let mut allocation = Self {
            base_workload,
            ..Self::default()
        };
        for relation in relations {
            let assignment = Assignment {
                teacher_id: relation.teacher_id,
                workload: relation.workload,
                rate: relation.rate,
                teacher_rate: teacher_rates.get(&relation.teacher_id).copied().flatten(),
            };
            match relation.kind {
                RelationKind::Ongoing => allocation.ongoing.push(assignment),
                RelationKind::Potential(_) => allocation.potential.push(assignment),
                RelationKind::Selected => allocation.selected.push(assignment),
            }
        }
        allocation
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Allocation status derived from coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    UnderAllocated,
    PartiallyAllocated,
    AdequatelyAllocated,
    OverAllocated,
}

impl AllocationStatus {
    pub fn from_coverage(coverage: f64) -> Self {
        if coverage > FULL_COVERAGE_PCT {
            Self::OverAllocated
        } else if coverage >= ADEQUATE_COVERAGE_PCT {
            Self::AdequatelyAllocated
        } else if coverage >= PARTIAL_COVERAGE_PCT {
            Self::PartiallyAllocated
        } else {
            Self::UnderAllocated
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::UnderAllocated => "under-allocated",
            Self::PartiallyAllocated => "partially allocated",
            Self::AdequatelyAllocated => "adequately allocated",
            Self::OverAllocated => "over-allocated",
        }
    }
}

/// Aggregated figures for one promo module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadStats {
    pub base_workload: i32,
    pub ongoing_total: i64,
    pub potential_total: i64,
    pub selected_total: i64,
    /// Hours counted towards coverage (selected only).
    pub total_assigned: i64,
    /// Percentage of the base workload covered, two decimals.
    pub coverage: f64,
    pub remaining: i64,
    pub ongoing_cost: f64,
    pub potential_cost: f64,
    pub selected_cost: f64,
    pub average_selected_rate: f64,
    pub status: AllocationStatus,
}

/// Totals over several modules (a promo, or the whole board).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub module_count: usize,
    pub base_workload: i64,
    pub total_assigned: i64,
    pub selected_cost: f64,
    pub coverage: f64,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute workload, coverage and cost figures for a module.
pub fn compute_stats(allocation: &ModuleAllocation) -> WorkloadStats {
    let ongoing_total = total_hours(&allocation.ongoing);
    let potential_total = total_hours(&allocation.potential);
    let selected_total = total_hours(&allocation.selected);

    let total_assigned = selected_total;
    let base = i64::from(allocation.base_workload);
    let coverage = coverage_pct(total_assigned, base);
    let remaining = (base - total_assigned).max(0);

    let selected_cost = total_cost(&allocation.selected);
    let average_selected_rate = if selected_total > 0 {
        round2(selected_cost / selected_total as f64)
    } else {
        0.0
    };

    WorkloadStats {
        base_workload: allocation.base_workload,
        ongoing_total,
        potential_total,
        selected_total,
        total_assigned,
        coverage,
        remaining,
        ongoing_cost: round2(total_cost(&allocation.ongoing)),
        potential_cost: round2(total_cost(&allocation.potential)),
        selected_cost: round2(selected_cost),
        average_selected_rate,
        status: AllocationStatus::from_coverage(coverage),
    }
}

/// Sum a set of module stats into one summary.
pub fn summarize<'a>(stats: impl IntoIterator<Item = &'a WorkloadStats>) -> AllocationSummary {
    let mut summary = AllocationSummary::default();
    let mut cost = 0.0;
    for s in stats {
        summary.module_count += 1;
        summary.base_workload += i64::from(s.base_workload);
        summary.total_assigned += s.total_assigned;
        cost += s.selected_cost;
    }
    summary.selected_cost = round2(cost);
    summary.coverage = coverage_pct(summary.total_assigned, summary.base_workload);
    summary
}

fn total_hours(assignments: &[Assignment]) -> i64 {
    assignments.iter().map(|a| i64::from(a.workload)).sum()
}

fn total_cost(assignments: &[Assignment]) -> f64 {
    assignments.iter().map(Assignment::cost).sum()
}

fn coverage_pct(assigned: i64, base: i64) -> f64 {
    if base > 0 {
        round2(assigned as f64 / base as f64 * 100.0)
    } else {
        0.0
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
