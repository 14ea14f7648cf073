//! Axum route handler for the Checkout API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// POST /checkout
///
/// Body `{"priceId": "..."}`. Returns `{"url": "..."}` pointing at the hosted checkout page.
/// An unreadable body is reported like any other checkout failure.
pub async fn handle_checkout(
    State(state): State<AppState>,
    request: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let Json(request) =
        request.map_err(|e| AppError::Checkout(format!("invalid checkout body: {e}")))?;

    let url = state
        .checkout
        .create_session(request.price_id.as_deref())
        .await?;

    Ok(Json(CheckoutResponse { url }))
}
