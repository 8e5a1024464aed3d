//! Routes for creating and browsing ticketed events.
//!
//! Event administration beyond this (editing, deletion, organizer roles) is
//! a collaborator concern; the purchase core only needs events to exist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use boxoffice_ticketing::application::command_handlers::handle_create_event;
use boxoffice_ticketing::application::query_handlers::{
    EventView, get_event_by_id, list_events,
};
use boxoffice_ticketing::domain::commands::CreateEvent;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an event.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    /// Event title.
    pub title: String,
    /// Ticket price as a decimal string.
    pub price: Decimal,
    /// Initial ticket inventory.
    pub available_tickets: i32,
    /// Optional category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional organizer identity.
    #[serde(default)]
    pub organizer_id: Option<String>,
}

/// POST /api/v1/events
async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventView>), ApiError> {
    let command = CreateEvent {
        correlation_id: Uuid::new_v4(),
        title: request.title,
        price: request.price,
        available_tickets: request.available_tickets,
        category: request.category,
        organizer_id: request.organizer_id,
    };
    let event =
        handle_create_event(&command, state.clock.as_ref(), state.repository.as_ref()).await?;
    let view = EventView {
        event_id: event.event_id,
        title: event.title,
        price: event.price,
        available_tickets: event.available_tickets,
        category: event.category,
        organizer_id: event.organizer_id,
        created_at: event.created_at,
    };
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/events
async fn get_events(State(state): State<AppState>) -> Result<Json<Vec<EventView>>, ApiError> {
    let views = list_events(state.repository.as_ref()).await?;
    Ok(Json(views))
}

/// GET /api/v1/events/{event_id}
async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventView>, ApiError> {
    let view = get_event_by_id(event_id, state.repository.as_ref()).await?;
    Ok(Json(view))
}

/// Returns the router for event endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_events).post(create_event))
        .route("/{event_id}", get(get_event))
}
