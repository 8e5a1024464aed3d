//! Test repositories — `TicketRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use boxoffice_core::error::DomainError;
use boxoffice_core::repository::{EventRecord, PurchaseRecord, TicketRepository};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    events: HashMap<Uuid, EventRecord>,
    purchases: Vec<PurchaseRecord>,
}

/// A fully functional in-memory `TicketRepository`.
///
/// All state lives behind one mutex, so the version check, ledger update,
/// and purchase insert inside `commit_purchase` are serialized exactly like
/// the transactional Postgres implementation. This makes it suitable for
/// concurrency tests, not just stubbing.
///
/// # Panics
///
/// All methods panic if the internal mutex is poisoned.
#[derive(Debug, Default)]
pub struct InMemoryTicketRepository {
    state: Mutex<State>,
}

impl InMemoryTicketRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with the given events.
    #[must_use]
    pub fn with_events(events: Vec<EventRecord>) -> Self {
        let repo = Self::new();
        {
            let mut state = repo.state.lock().unwrap();
            for event in events {
                state.events.insert(event.event_id, event);
            }
        }
        repo
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn insert_event(&self, event: &EventRecord) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state.events.insert(event.event_id, event.clone());
        Ok(())
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<EventRecord>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.events.get(&event_id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<EventRecord>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut events: Vec<EventRecord> = state.events.values().cloned().collect();
        events.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(events)
    }

    async fn commit_purchase(
        &self,
        event_id: Uuid,
        new_available: i32,
        expected_version: i64,
        purchase: &PurchaseRecord,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let Some(event) = state.events.get_mut(&event_id) else {
            return Err(DomainError::EventNotFound(event_id));
        };
        if event.version != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                event_id,
                expected: expected_version,
                actual: event.version,
            });
        }
        if new_available < 0 {
            // Mirrors the CHECK constraint on the events table.
            return Err(DomainError::Infrastructure(format!(
                "available_tickets would go negative for event {event_id}"
            )));
        }
        event.available_tickets = new_available;
        event.version += 1;
        state.purchases.push(purchase.clone());
        Ok(())
    }

    async fn get_purchase(
        &self,
        purchase_id: Uuid,
    ) -> Result<Option<PurchaseRecord>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .purchases
            .iter()
            .find(|p| p.purchase_id == purchase_id)
            .cloned())
    }

    async fn list_purchases_for_buyer(
        &self,
        buyer_id: &str,
    ) -> Result<Vec<PurchaseRecord>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut purchases: Vec<PurchaseRecord> = state
            .purchases
            .iter()
            .filter(|p| p.buyer_id == buyer_id)
            .cloned()
            .collect();
        purchases.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));
        Ok(purchases)
    }

    async fn set_rating(
        &self,
        purchase_id: Uuid,
        buyer_id: &str,
        rating: i16,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let Some(purchase) = state
            .purchases
            .iter_mut()
            .find(|p| p.purchase_id == purchase_id && p.buyer_id == buyer_id)
        else {
            return Err(DomainError::PurchaseNotFound(purchase_id));
        };
        if purchase.rating.is_some() {
            return Err(DomainError::AlreadyRated(purchase_id));
        }
        purchase.rating = Some(rating);
        Ok(())
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingTicketRepository;

impl FailingTicketRepository {
    fn failure() -> DomainError {
        DomainError::Infrastructure("connection refused".into())
    }
}

#[async_trait]
impl TicketRepository for FailingTicketRepository {
    async fn insert_event(&self, _event: &EventRecord) -> Result<(), DomainError> {
        Err(Self::failure())
    }

    async fn get_event(&self, _event_id: Uuid) -> Result<Option<EventRecord>, DomainError> {
        Err(Self::failure())
    }

    async fn list_events(&self) -> Result<Vec<EventRecord>, DomainError> {
        Err(Self::failure())
    }

    async fn commit_purchase(
        &self,
        _event_id: Uuid,
        _new_available: i32,
        _expected_version: i64,
        _purchase: &PurchaseRecord,
    ) -> Result<(), DomainError> {
        Err(Self::failure())
    }

    async fn get_purchase(
        &self,
        _purchase_id: Uuid,
    ) -> Result<Option<PurchaseRecord>, DomainError> {
        Err(Self::failure())
    }

    async fn list_purchases_for_buyer(
        &self,
        _buyer_id: &str,
    ) -> Result<Vec<PurchaseRecord>, DomainError> {
        Err(Self::failure())
    }

    async fn set_rating(
        &self,
        _purchase_id: Uuid,
        _buyer_id: &str,
        _rating: i16,
    ) -> Result<(), DomainError> {
        Err(Self::failure())
    }
}
