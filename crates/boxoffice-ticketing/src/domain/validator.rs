//! Pure purchase validation against an event snapshot.
//!
//! Validation has no side effects. The snapshot it sees may be stale; the
//! recorder re-runs the same checks inside its serialized commit step, so a
//! purchase that passed against stale inventory is rejected at commit time
//! rather than silently clamped.

use boxoffice_core::error::DomainError;
use boxoffice_core::repository::EventRecord;
use rust_decimal::Decimal;

/// Smallest purchasable quantity.
pub const MIN_QUANTITY: i32 = 1;

/// Largest purchasable quantity per purchase.
pub const MAX_QUANTITY: i32 = 1000;

/// Longest permitted event title.
pub const MAX_TITLE_LEN: usize = 100;

/// Lowest permitted purchase rating.
pub const MIN_RATING: i16 = 1;

/// Highest permitted purchase rating.
pub const MAX_RATING: i16 = 5;

/// Validates a requested quantity against an event snapshot.
///
/// Rules are evaluated in order, first match wins:
/// 1. no tickets left — sold out;
/// 2. fewer tickets left than requested;
/// 3. quantity outside `[MIN_QUANTITY, MAX_QUANTITY]`.
///
/// (Event existence is checked by the caller when resolving the snapshot.)
///
/// # Errors
///
/// Returns the matching rejection: `DomainError::SoldOut`,
/// `DomainError::InsufficientTickets`, or `DomainError::InvalidQuantity`.
pub fn validate_purchase(event: &EventRecord, quantity: i32) -> Result<(), DomainError> {
    if event.available_tickets <= 0 {
        return Err(DomainError::SoldOut {
            event_id: event.event_id,
        });
    }
    if quantity > event.available_tickets {
        return Err(DomainError::InsufficientTickets {
            event_id: event.event_id,
            available: event.available_tickets,
        });
    }
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        return Err(DomainError::InvalidQuantity {
            quantity,
            min: MIN_QUANTITY,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validates the fields of a new event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the title is empty or longer than
/// [`MAX_TITLE_LEN`] characters, the price is negative, or the initial
/// inventory is negative.
pub fn validate_new_event(
    title: &str,
    price: Decimal,
    available_tickets: i32,
) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation(
            "event title must not be empty".to_owned(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "event title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if price < Decimal::ZERO {
        return Err(DomainError::Validation(
            "ticket price must not be negative".to_owned(),
        ));
    }
    if available_tickets < 0 {
        return Err(DomainError::Validation(
            "available tickets must not be negative".to_owned(),
        ));
    }
    Ok(())
}

/// Validates a purchase rating.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the rating falls outside
/// `[MIN_RATING, MAX_RATING]`.
pub fn validate_rating(rating: i16) -> Result<(), DomainError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}
