//! Special offer API endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::{json_body, success, ApiResponse, ApiResult};
use crate::models::{SpecialOffer, UpdateOfferRequest};
use crate::query::validate_offer;
use crate::AppState;

/// GET /api/special-offer - Read the banner text.
pub async fn get_special_offer(State(state): State<AppState>) -> ApiResult<SpecialOffer> {
    success(state.offers.get().await)
}

/// PUT /api/special-offer - Replace the banner text (admin).
pub async fn update_special_offer(
    State(state): State<AppState>,
    payload: Result<Json<UpdateOfferRequest>, JsonRejection>,
) -> ApiResult<SpecialOffer> {
    let request = json_body(&state, payload)?;
    let text = validate_offer(request.offer.as_deref()).map_err(|e| state.api_error(e))?;

    let offer = state.offers.replace(text).await;
    tracing::info!("Special offer updated");

    Ok(ApiResponse::new(offer).with_message("Special offer updated"))
}
