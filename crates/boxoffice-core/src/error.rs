//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// The first four variants are user-correctable purchase rejections; their
/// `Display` output is the reason string surfaced verbatim to the caller.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The referenced event does not exist.
    #[error("invalid event: {0}")]
    EventNotFound(Uuid),

    /// The event has no tickets left.
    #[error("event {event_id} is sold out")]
    SoldOut {
        /// The event with exhausted inventory.
        event_id: Uuid,
    },

    /// Fewer tickets remain than were requested.
    #[error("only {available} ticket(s) left for event {event_id}")]
    InsufficientTickets {
        /// The event being purchased against.
        event_id: Uuid,
        /// Tickets remaining at validation time.
        available: i32,
    },

    /// The requested quantity falls outside the permitted range.
    #[error("quantity must be between {min} and {max}, got {quantity}")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i32,
        /// Lower bound, inclusive.
        min: i32,
        /// Upper bound, inclusive.
        max: i32,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced purchase does not exist, or is not visible to the
    /// caller.
    #[error("purchase not found: {0}")]
    PurchaseNotFound(Uuid),

    /// The purchase has already been rated.
    #[error("purchase {0} has already been rated")]
    AlreadyRated(Uuid),

    /// Optimistic concurrency conflict on an event's inventory.
    #[error("concurrency conflict on event {event_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The event that had the conflict.
        event_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
