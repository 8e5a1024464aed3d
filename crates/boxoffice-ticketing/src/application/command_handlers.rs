//! Command handlers for the Ticketing context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: resolve the event, validate, and apply the
//! purchase through the repository's serialized commit step.

use boxoffice_core::clock::Clock;
use boxoffice_core::command::Command;
use boxoffice_core::error::DomainError;
use boxoffice_core::repository::{EventRecord, PurchaseRecord, TicketRepository};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::commands::{CreateEvent, PlacePurchase, RatePurchase};
use crate::domain::validator;

/// Upper bound on version-guarded commit attempts per purchase.
///
/// Every retry re-resolves the event and re-runs validation, so a lost race
/// surfaces as a fresh rejection against current inventory. A conflict is
/// only returned to the caller once this bound is exhausted.
pub const MAX_COMMIT_ATTEMPTS: u32 = 5;

/// Confirmation returned for a successfully recorded purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseConfirmation {
    /// The new purchase's identifier.
    pub purchase_id: Uuid,
    /// The event purchased against.
    pub event_id: Uuid,
    /// Number of tickets bought.
    pub quantity: i32,
    /// Total price, frozen at purchase time.
    pub total: Decimal,
    /// When the purchase was recorded.
    pub purchased_at: DateTime<Utc>,
}

/// Handles the `CreateEvent` command: validates the fields and inserts the
/// new event with an empty purchase history.
///
/// # Errors
///
/// Returns `DomainError::Validation` for bad fields, or a repository error.
pub async fn handle_create_event(
    command: &CreateEvent,
    clock: &dyn Clock,
    repo: &dyn TicketRepository,
) -> Result<EventRecord, DomainError> {
    validator::validate_new_event(&command.title, command.price, command.available_tickets)?;

    let event = EventRecord {
        event_id: Uuid::new_v4(),
        title: command.title.clone(),
        price: command.price,
        available_tickets: command.available_tickets,
        version: 0,
        category: command.category.clone(),
        organizer_id: command.organizer_id.clone(),
        created_at: clock.now(),
    };

    repo.insert_event(&event).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        event_id = %event.event_id,
        available_tickets = event.available_tickets,
        "event created"
    );

    Ok(event)
}

/// Handles the `PlacePurchase` command: resolves the event, validates the
/// requested quantity, computes the total from the freshly resolved price,
/// and commits the decrement and the purchase row as one atomic unit.
///
/// The commit is guarded by the event's version token. On a conflict the
/// event is re-resolved and re-validated, so concurrent purchases racing on
/// limited inventory are rejected with the up-to-date reason instead of
/// driving the ledger negative.
///
/// # Errors
///
/// Returns the validator's rejection (`EventNotFound`, `SoldOut`,
/// `InsufficientTickets`, `InvalidQuantity`), `ConcurrencyConflict` if
/// [`MAX_COMMIT_ATTEMPTS`] commits all lost their race, or
/// `Infrastructure` on persistence failure.
pub async fn handle_place_purchase(
    command: &PlacePurchase,
    clock: &dyn Clock,
    repo: &dyn TicketRepository,
) -> Result<PurchaseConfirmation, DomainError> {
    let mut attempts = 0;
    loop {
        attempts += 1;

        let Some(event) = repo.get_event(command.event_id).await? else {
            return Err(DomainError::EventNotFound(command.event_id));
        };
        validator::validate_purchase(&event, command.quantity)?;

        // Price and total come from the same snapshot whose version guards
        // the commit, so a purchase's total always matches the price it was
        // accepted under.
        let total = event.price * Decimal::from(command.quantity);
        let purchase = PurchaseRecord {
            purchase_id: Uuid::new_v4(),
            event_id: event.event_id,
            quantity: command.quantity,
            total,
            buyer_id: command.buyer.buyer_id.clone(),
            customer_name: command.buyer.name.clone(),
            email: command.buyer.email.clone(),
            purchased_at: clock.now(),
            rating: None,
        };
        let new_available = event.available_tickets - command.quantity;

        match repo
            .commit_purchase(event.event_id, new_available, event.version, &purchase)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    command_type = command.command_type(),
                    correlation_id = %command.correlation_id(),
                    buyer_id = %command.buyer.buyer_id,
                    event_id = %event.event_id,
                    quantity = command.quantity,
                    total = %total,
                    "purchase recorded"
                );
                return Ok(PurchaseConfirmation {
                    purchase_id: purchase.purchase_id,
                    event_id: event.event_id,
                    quantity: command.quantity,
                    total,
                    purchased_at: purchase.purchased_at,
                });
            }
            Err(DomainError::ConcurrencyConflict { .. }) if attempts < MAX_COMMIT_ATTEMPTS => {
                tracing::debug!(
                    event_id = %command.event_id,
                    attempt = attempts,
                    "inventory moved during commit, revalidating"
                );
            }
            Err(err) => return Err(err),
        }
    }
}

/// Handles the `RatePurchase` command: sets the optional rating, owner-only
/// and at most once.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an out-of-range rating,
/// `DomainError::PurchaseNotFound` if the purchase does not exist or belongs
/// to another buyer, and `DomainError::AlreadyRated` on a repeat attempt.
pub async fn handle_rate_purchase(
    command: &RatePurchase,
    repo: &dyn TicketRepository,
) -> Result<(), DomainError> {
    validator::validate_rating(command.rating)?;

    repo.set_rating(command.purchase_id, &command.buyer_id, command.rating)
        .await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        purchase_id = %command.purchase_id,
        rating = command.rating,
        "purchase rated"
    );

    Ok(())
}
