//! Handlers for the user's persisted promo selection
//! (`/user/promo-selection`).

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use yboard_core::selection::{load_selection, save_selection, PromoSelection};
use yboard_db::repositories::PromoRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /user/promo-selection`.
#[derive(Debug, Deserialize)]
pub struct UpdatePromoSelection {
    pub selected_promos: PromoSelection,
}

/// GET /api/v1/user/promo-selection
///
/// Without a saved selection every promo is selected. Keys of promos that
/// no longer exist are dropped.
pub async fn get_selection(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PromoSelection>>> {
    let known: Vec<String> = PromoRepo::list(&state.pool)
        .await?
        .iter()
        .map(|p| p.key())
        .collect();
    let mut selection = load_selection(state.preferences.as_ref(), user.user_id, &known).await?;
    selection.retain_known(known.iter().map(String::as_str));
    Ok(Json(DataResponse { data: selection }))
}

/// PUT /api/v1/user/promo-selection
///
/// Replaces the saved selection. Duplicate keys collapse.
pub async fn update_selection(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdatePromoSelection>,
) -> AppResult<Json<DataResponse<PromoSelection>>> {
    save_selection(state.preferences.as_ref(), user.user_id, &input.selected_promos).await?;
    tracing::info!(
        user_id = user.user_id,
        count = input.selected_promos.len(),
        "Promo selection saved"
    );
    Ok(Json(DataResponse {
        data: input.selected_promos,
    }))
}
