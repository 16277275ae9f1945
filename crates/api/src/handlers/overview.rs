//! Dashboard overview: every promo module with its workload statistics,
//! grouped into promo sections and filtered by the user's promo selection.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use yboard_core::grouping::{group_by_promo, PromoGrouped};
use yboard_core::promo::PromoLevel;
use yboard_core::relation::{Relation, RelationState};
use yboard_core::selection::load_selection;
use yboard_core::types::DbId;
use yboard_core::workload::{
    compute_stats, summarize, AllocationSummary, ModuleAllocation, WorkloadStats,
};
use yboard_db::models::promo_module::PromoModuleDetail;
use yboard_db::repositories::{PromoModuleRepo, PromoRepo, TeacherRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /overview`.
#[derive(Debug, Default, Deserialize)]
pub struct OverviewParams {
    /// Ignore the saved selection and show every promo.
    #[serde(default)]
    pub all: bool,
}

/// One promo module row of the overview.
#[derive(Debug, Serialize)]
pub struct OverviewModule {
    #[serde(flatten)]
    pub promo_module: PromoModuleDetail,
    pub stats: WorkloadStats,
}

impl PromoGrouped for OverviewModule {
    fn promo_level(&self) -> PromoLevel {
        self.promo_module.level
    }

    fn promo_specialty(&self) -> &str {
        &self.promo_module.specialty
    }
}

/// A promo section: its modules and their combined totals.
#[derive(Debug, Serialize)]
pub struct PromoSection {
    pub promo: String,
    pub summary: AllocationSummary,
    pub modules: Vec<OverviewModule>,
}

#[derive(Debug, Serialize)]
pub struct Overview {
    /// Promo keys shown, in display order.
    pub shown_promos: Vec<String>,
    pub sections: Vec<PromoSection>,
    /// Totals across every shown section.
    pub summary: AllocationSummary,
}

/// GET /api/v1/overview
pub async fn get_overview(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> AppResult<Json<DataResponse<Overview>>> {
    let known: Vec<String> = PromoRepo::list(&state.pool)
        .await?
        .iter()
        .map(|p| p.key())
        .collect();
    let selection = load_selection(state.preferences.as_ref(), user.user_id, &known).await?;

    let rows = PromoModuleRepo::list_detailed(&state.pool).await?;
    let teacher_rates = TeacherRepo::default_rates(&state.pool).await?;

    let mut by_module: HashMap<DbId, Vec<Relation>> = HashMap::new();
    for relation_state in RelationState::ALL {
        for relation in state.relations.list_by_state(relation_state).await? {
            by_module
                .entry(relation.promo_module_id)
                .or_default()
                .push(relation);
        }
    }

    let modules = rows
        .into_iter()
        .filter(|row| params.all || selection.contains(&row.promo_key()))
        .map(|row| {
            let relations = by_module.get(&row.id).map(Vec::as_slice).unwrap_or_default();
            let allocation =
                ModuleAllocation::from_relations(row.workload, relations, &teacher_rates);
            OverviewModule {
                stats: compute_stats(&allocation),
                promo_module: row,
            }
        });

    let sections: Vec<PromoSection> = group_by_promo(modules)
        .into_iter()
        .map(|(promo, modules)| PromoSection {
            summary: summarize(modules.iter().map(|m| &m.stats)),
            promo,
            modules,
        })
        .collect();

    let summary = summarize(
        sections
            .iter()
            .flat_map(|section| section.modules.iter().map(|m| &m.stats)),
    );

    Ok(Json(DataResponse {
        data: Overview {
            shown_promos: sections.iter().map(|s| s.promo.clone()).collect(),
            sections,
            summary,
        },
    }))
}
