use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{PricingFactors, TieredQuoteOption};
use crate::engine::calculate_tiered_options;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiersRequest {
    pub factors: PricingFactors,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TiersResponse {
    pub options: Vec<TieredQuoteOption>,
}

pub async fn post_tiers(
    State(state): State<AppState>,
    Json(request): Json<TiersRequest>,
) -> Result<Json<TiersResponse>, AppError> {
    let options = calculate_tiered_options(&request.factors, &state.packages, &state.book)?;
    Ok(Json(TiersResponse { options }))
}
