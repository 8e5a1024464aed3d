//! Query handlers for the Ticketing context.
//!
//! Read-only lookups returning serializable view DTOs. Purchase lookups are
//! scoped to the owning buyer: a purchase owned by someone else is reported
//! exactly like a missing one.

use boxoffice_core::error::DomainError;
use boxoffice_core::repository::{PurchaseRecord, TicketRepository};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Read-only view of an event.
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    /// The event identifier.
    pub event_id: Uuid,
    /// Event title.
    pub title: String,
    /// Ticket price.
    pub price: Decimal,
    /// Tickets remaining.
    pub available_tickets: i32,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional organizer identity.
    pub organizer_id: Option<String>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
}

/// Read-only view of a purchase and its event.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseView {
    /// The purchase identifier.
    pub purchase_id: Uuid,
    /// The event purchased against.
    pub event_id: Uuid,
    /// Title of that event, if it still exists.
    pub event_title: Option<String>,
    /// Number of tickets bought.
    pub quantity: i32,
    /// Total price, frozen at purchase time.
    pub total: Decimal,
    /// When the purchase was recorded.
    pub purchased_at: DateTime<Utc>,
    /// The buyer's 1–5 rating, if set.
    pub rating: Option<i16>,
}

/// Retrieves an event by id.
///
/// # Errors
///
/// Returns `DomainError::EventNotFound` if no such event exists.
pub async fn get_event_by_id(
    event_id: Uuid,
    repo: &dyn TicketRepository,
) -> Result<EventView, DomainError> {
    let Some(event) = repo.get_event(event_id).await? else {
        return Err(DomainError::EventNotFound(event_id));
    };
    Ok(event_view(&event))
}

/// Lists all events, ordered by title.
///
/// # Errors
///
/// Returns a repository error if the listing fails.
pub async fn list_events(repo: &dyn TicketRepository) -> Result<Vec<EventView>, DomainError> {
    let events = repo.list_events().await?;
    Ok(events.iter().map(event_view).collect())
}

/// Retrieves the confirmation for a purchase, scoped to the owning buyer.
///
/// Repeated calls for the same confirmed purchase return an identical view.
///
/// # Errors
///
/// Returns `DomainError::PurchaseNotFound` if the purchase does not exist
/// or belongs to another buyer.
pub async fn get_confirmation(
    purchase_id: Uuid,
    buyer_id: &str,
    repo: &dyn TicketRepository,
) -> Result<PurchaseView, DomainError> {
    let Some(purchase) = repo.get_purchase(purchase_id).await? else {
        return Err(DomainError::PurchaseNotFound(purchase_id));
    };
    if purchase.buyer_id != buyer_id {
        return Err(DomainError::PurchaseNotFound(purchase_id));
    }
    purchase_view(&purchase, repo).await
}

/// Lists a buyer's purchase history, newest first.
///
/// # Errors
///
/// Returns a repository error if the listing fails.
pub async fn list_purchases(
    buyer_id: &str,
    repo: &dyn TicketRepository,
) -> Result<Vec<PurchaseView>, DomainError> {
    let purchases = repo.list_purchases_for_buyer(buyer_id).await?;
    let mut views = Vec::with_capacity(purchases.len());
    for purchase in &purchases {
        views.push(purchase_view(purchase, repo).await?);
    }
    Ok(views)
}

fn event_view(event: &boxoffice_core::repository::EventRecord) -> EventView {
    EventView {
        event_id: event.event_id,
        title: event.title.clone(),
        price: event.price,
        available_tickets: event.available_tickets,
        category: event.category.clone(),
        organizer_id: event.organizer_id.clone(),
        created_at: event.created_at,
    }
}

async fn purchase_view(
    purchase: &PurchaseRecord,
    repo: &dyn TicketRepository,
) -> Result<PurchaseView, DomainError> {
    let event_title = repo
        .get_event(purchase.event_id)
        .await?
        .map(|event| event.title);
    Ok(PurchaseView {
        purchase_id: purchase.purchase_id,
        event_id: purchase.event_id,
        event_title,
        quantity: purchase.quantity,
        total: purchase.total,
        purchased_at: purchase.purchased_at,
        rating: purchase.rating,
    })
}

#[cfg(test)]
mod tests {
    use boxoffice_core::error::DomainError;
    use boxoffice_core::repository::{EventRecord, PurchaseRecord, TicketRepository};
    use boxoffice_test_support::InMemoryTicketRepository;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::{get_confirmation, get_event_by_id, list_events, list_purchases};

    fn seeded_event(title: &str) -> EventRecord {
        EventRecord {
            event_id: Uuid::new_v4(),
            title: title.to_owned(),
            price: Decimal::new(2500, 2),
            available_tickets: 10,
            version: 0,
            category: None,
            organizer_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn seeded_purchase(event_id: Uuid, buyer_id: &str, minute: u32) -> PurchaseRecord {
        PurchaseRecord {
            purchase_id: Uuid::new_v4(),
            event_id,
            quantity: 2,
            total: Decimal::new(5000, 2),
            buyer_id: buyer_id.to_owned(),
            customer_name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            purchased_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, minute, 0).unwrap(),
            rating: None,
        }
    }

    async fn seed(
        repo: &InMemoryTicketRepository,
        event: &EventRecord,
        purchase: &PurchaseRecord,
    ) {
        repo.insert_event(event).await.unwrap();
        repo.commit_purchase(
            event.event_id,
            event.available_tickets - purchase.quantity,
            event.version,
            purchase,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_get_event_by_id_returns_view() {
        // Arrange
        let event = seeded_event("Rust Conf");
        let repo = InMemoryTicketRepository::with_events(vec![event.clone()]);

        // Act
        let view = get_event_by_id(event.event_id, &repo).await.unwrap();

        // Assert
        assert_eq!(view.event_id, event.event_id);
        assert_eq!(view.title, "Rust Conf");
        assert_eq!(view.available_tickets, 10);
    }

    #[tokio::test]
    async fn test_get_event_by_id_returns_not_found_for_unknown_id() {
        // Arrange
        let repo = InMemoryTicketRepository::new();
        let missing_id = Uuid::new_v4();

        // Act
        let result = get_event_by_id(missing_id, &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::EventNotFound(id) => assert_eq!(id, missing_id),
            other => panic!("expected EventNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_events_orders_by_title() {
        // Arrange
        let repo = InMemoryTicketRepository::with_events(vec![
            seeded_event("Zig Meetup"),
            seeded_event("Ada Workshop"),
            seeded_event("Rust Conf"),
        ]);

        // Act
        let views = list_events(&repo).await.unwrap();

        // Assert
        let titles: Vec<&str> = views.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Ada Workshop", "Rust Conf", "Zig Meetup"]);
    }

    #[tokio::test]
    async fn test_get_confirmation_returns_owned_purchase_with_event_title() {
        // Arrange
        let event = seeded_event("Rust Conf");
        let purchase = seeded_purchase(event.event_id, "buyer-1", 0);
        let repo = InMemoryTicketRepository::new();
        seed(&repo, &event, &purchase).await;

        // Act
        let view = get_confirmation(purchase.purchase_id, "buyer-1", &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(view.purchase_id, purchase.purchase_id);
        assert_eq!(view.event_title.as_deref(), Some("Rust Conf"));
        assert_eq!(view.total, Decimal::new(5000, 2));

        // Idempotence: a second lookup returns the identical record.
        let again = get_confirmation(purchase.purchase_id, "buyer-1", &repo)
            .await
            .unwrap();
        assert_eq!(again.purchase_id, view.purchase_id);
        assert_eq!(again.total, view.total);
        assert_eq!(again.purchased_at, view.purchased_at);
    }

    #[tokio::test]
    async fn test_get_confirmation_hides_foreign_purchase() {
        // Arrange
        let event = seeded_event("Rust Conf");
        let purchase = seeded_purchase(event.event_id, "buyer-1", 0);
        let repo = InMemoryTicketRepository::new();
        seed(&repo, &event, &purchase).await;

        // Act — another buyer asks for the same purchase id.
        let result = get_confirmation(purchase.purchase_id, "buyer-2", &repo).await;

        // Assert — indistinguishable from a missing purchase.
        match result.unwrap_err() {
            DomainError::PurchaseNotFound(id) => assert_eq!(id, purchase.purchase_id),
            other => panic!("expected PurchaseNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_purchases_returns_own_history_newest_first() {
        // Arrange — two purchases for buyer-1, one for buyer-2.
        let event = seeded_event("Rust Conf");
        let older = seeded_purchase(event.event_id, "buyer-1", 0);
        let newer = seeded_purchase(event.event_id, "buyer-1", 30);
        let foreign = seeded_purchase(event.event_id, "buyer-2", 15);
        let repo = InMemoryTicketRepository::with_events(vec![event.clone()]);
        for (version, new_available, purchase) in [(0, 8, &older), (1, 6, &newer), (2, 4, &foreign)]
        {
            repo.commit_purchase(event.event_id, new_available, version, purchase)
                .await
                .unwrap();
        }

        // Act
        let views = list_purchases("buyer-1", &repo).await.unwrap();

        // Assert
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].purchase_id, newer.purchase_id);
        assert_eq!(views[1].purchase_id, older.purchase_id);
    }
}
