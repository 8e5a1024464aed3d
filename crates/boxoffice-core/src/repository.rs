//! Ticket repository abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a ticketed event.
///
/// `available_tickets` is the inventory ledger: it is never negative and is
/// only ever decremented through [`TicketRepository::commit_purchase`].
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Event title, non-empty, at most 100 characters.
    pub title: String,
    /// Ticket price, non-negative.
    pub price: Decimal,
    /// Tickets remaining, never negative.
    pub available_tickets: i32,
    /// Optimistic concurrency token, incremented on every committed purchase.
    pub version: i64,
    /// Optional category label, informational only.
    pub category: Option<String>,
    /// Optional organizer identity, informational only.
    pub organizer_id: Option<String>,
    /// Timestamp of event creation.
    pub created_at: DateTime<Utc>,
}

/// Stored representation of a purchase — an append-only fact.
///
/// Every field except `rating` is immutable after creation; `rating` may be
/// set at most once, by the owning buyer.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    /// Unique purchase identifier.
    pub purchase_id: Uuid,
    /// The event this purchase was made against.
    pub event_id: Uuid,
    /// Number of tickets bought, in `[1, 1000]`.
    pub quantity: i32,
    /// Total price, frozen at purchase time.
    pub total: Decimal,
    /// The buyer's resolved identity.
    pub buyer_id: String,
    /// The buyer's display name.
    pub customer_name: String,
    /// The buyer's contact email.
    pub email: String,
    /// Timestamp of the purchase, immutable.
    pub purchased_at: DateTime<Utc>,
    /// Optional 1–5 rating, settable exactly once after creation.
    pub rating: Option<i16>,
}

/// An already-authenticated buyer identity, resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buyer {
    /// Opaque identity of the buyer.
    pub buyer_id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Repository trait for events and their purchases.
///
/// The event update and purchase insert inside [`commit_purchase`] are one
/// atomic unit: either both writes are visible, or neither.
///
/// [`commit_purchase`]: TicketRepository::commit_purchase
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a newly created event.
    async fn insert_event(&self, event: &EventRecord) -> Result<(), DomainError>;

    /// Look up an event by id.
    async fn get_event(&self, event_id: Uuid) -> Result<Option<EventRecord>, DomainError>;

    /// List all events, ordered by title.
    async fn list_events(&self) -> Result<Vec<EventRecord>, DomainError>;

    /// Atomically apply an accepted purchase: set the event's ledger to
    /// `new_available`, bump its version, and insert the purchase row —
    /// all in one transaction, guarded by `expected_version`.
    ///
    /// Returns `DomainError::ConcurrencyConflict` if the event's version no
    /// longer matches `expected_version`, and `DomainError::EventNotFound`
    /// if the event row has disappeared.
    async fn commit_purchase(
        &self,
        event_id: Uuid,
        new_available: i32,
        expected_version: i64,
        purchase: &PurchaseRecord,
    ) -> Result<(), DomainError>;

    /// Look up a purchase by id.
    async fn get_purchase(&self, purchase_id: Uuid)
    -> Result<Option<PurchaseRecord>, DomainError>;

    /// List a buyer's purchases, newest first.
    async fn list_purchases_for_buyer(
        &self,
        buyer_id: &str,
    ) -> Result<Vec<PurchaseRecord>, DomainError>;

    /// Set a purchase's rating, only if the purchase belongs to `buyer_id`
    /// and has not been rated before.
    ///
    /// Returns `DomainError::AlreadyRated` on a second attempt and
    /// `DomainError::PurchaseNotFound` if the purchase does not exist or is
    /// owned by another buyer.
    async fn set_rating(
        &self,
        purchase_id: Uuid,
        buyer_id: &str,
        rating: i16,
    ) -> Result<(), DomainError>;
}
