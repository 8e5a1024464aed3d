//! Routes for the ticket-purchase core: buying, confirmations, history,
//! and the one-shot rating.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use boxoffice_ticketing::application::command_handlers::{
    PurchaseConfirmation, handle_place_purchase, handle_rate_purchase,
};
use boxoffice_ticketing::application::query_handlers::{
    PurchaseView, get_confirmation, list_purchases,
};
use boxoffice_ticketing::domain::commands::{PlacePurchase, RatePurchase};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::identity::BuyerIdentity;
use crate::state::AppState;

/// Request body for buying tickets.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    /// The event to purchase against.
    pub event_id: Uuid,
    /// Number of tickets requested.
    pub quantity: i32,
}

/// Request body for rating a purchase.
#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    /// The 1–5 rating.
    pub rating: i16,
}

/// POST /api/v1/purchases
async fn create_purchase(
    State(state): State<AppState>,
    BuyerIdentity(buyer): BuyerIdentity,
    Json(request): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseConfirmation>), ApiError> {
    let command = PlacePurchase {
        correlation_id: Uuid::new_v4(),
        event_id: request.event_id,
        quantity: request.quantity,
        buyer,
    };
    let confirmation =
        handle_place_purchase(&command, state.clock.as_ref(), state.repository.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// GET /api/v1/purchases — the caller's purchase history, newest first.
async fn get_purchases(
    State(state): State<AppState>,
    BuyerIdentity(buyer): BuyerIdentity,
) -> Result<Json<Vec<PurchaseView>>, ApiError> {
    let views = list_purchases(&buyer.buyer_id, state.repository.as_ref()).await?;
    Ok(Json(views))
}

/// GET /api/v1/purchases/{purchase_id} — owner-scoped confirmation.
async fn get_purchase(
    State(state): State<AppState>,
    BuyerIdentity(buyer): BuyerIdentity,
    Path(purchase_id): Path<Uuid>,
) -> Result<Json<PurchaseView>, ApiError> {
    let view = get_confirmation(purchase_id, &buyer.buyer_id, state.repository.as_ref()).await?;
    Ok(Json(view))
}

/// POST /api/v1/purchases/{purchase_id}/rating
async fn rate_purchase(
    State(state): State<AppState>,
    BuyerIdentity(buyer): BuyerIdentity,
    Path(purchase_id): Path<Uuid>,
    Json(request): Json<RatingRequest>,
) -> Result<StatusCode, ApiError> {
    let command = RatePurchase {
        correlation_id: Uuid::new_v4(),
        purchase_id,
        buyer_id: buyer.buyer_id,
        rating: request.rating,
    };
    handle_rate_purchase(&command, state.repository.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for purchase endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_purchases).post(create_purchase))
        .route("/{purchase_id}", get(get_purchase))
        .route("/{purchase_id}/rating", post(rate_purchase))
}
