//! Commands for the Ticketing context.

use boxoffice_core::command::Command;
use boxoffice_core::repository::Buyer;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Command to create a new ticketed event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Event title.
    pub title: String,
    /// Ticket price.
    pub price: Decimal,
    /// Initial ticket inventory.
    pub available_tickets: i32,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional organizer identity.
    pub organizer_id: Option<String>,
}

impl Command for CreateEvent {
    fn command_type(&self) -> &'static str {
        "ticketing.create_event"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to purchase tickets for an event.
#[derive(Debug, Clone)]
pub struct PlacePurchase {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The event to purchase against.
    pub event_id: Uuid,
    /// Number of tickets requested.
    pub quantity: i32,
    /// The already-resolved buyer identity.
    pub buyer: Buyer,
}

impl Command for PlacePurchase {
    fn command_type(&self) -> &'static str {
        "ticketing.place_purchase"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to rate a past purchase.
#[derive(Debug, Clone)]
pub struct RatePurchase {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The purchase being rated.
    pub purchase_id: Uuid,
    /// The identity of the rating buyer; must own the purchase.
    pub buyer_id: String,
    /// The 1–5 rating.
    pub rating: i16,
}

impl Command for RatePurchase {
    fn command_type(&self) -> &'static str {
        "ticketing.rate_purchase"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
