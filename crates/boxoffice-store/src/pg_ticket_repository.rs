//! `PostgreSQL` implementation of the `TicketRepository` trait.
//!
//! The purchase apply step runs in one transaction: a version-guarded
//! `UPDATE` on the event row followed by the purchase `INSERT`. A stale
//! version rolls everything back, so a lost race leaves no partial state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use boxoffice_core::error::DomainError;
use boxoffice_core::repository::{EventRecord, PurchaseRecord, TicketRepository};

/// Column list for `events` queries.
const EVENT_COLUMNS: &str =
    "event_id, title, price, available_tickets, version, category, organizer_id, created_at";

/// Column list for `purchases` queries.
const PURCHASE_COLUMNS: &str =
    "purchase_id, event_id, quantity, total, buyer_id, customer_name, email, purchased_at, rating";

/// PostgreSQL-backed ticket repository.
#[derive(Debug, Clone)]
pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    /// Creates a new `PgTicketRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    event_id: Uuid,
    title: String,
    price: Decimal,
    available_tickets: i32,
    version: i64,
    category: Option<String>,
    organizer_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<EventRow> for EventRecord {
    fn from(row: EventRow) -> Self {
        Self {
            event_id: row.event_id,
            title: row.title,
            price: row.price,
            available_tickets: row.available_tickets,
            version: row.version,
            category: row.category,
            organizer_id: row.organizer_id,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    purchase_id: Uuid,
    event_id: Uuid,
    quantity: i32,
    total: Decimal,
    buyer_id: String,
    customer_name: String,
    email: String,
    purchased_at: DateTime<Utc>,
    rating: Option<i16>,
}

impl From<PurchaseRow> for PurchaseRecord {
    fn from(row: PurchaseRow) -> Self {
        Self {
            purchase_id: row.purchase_id,
            event_id: row.event_id,
            quantity: row.quantity,
            total: row.total,
            buyer_id: row.buyer_id,
            customer_name: row.customer_name,
            email: row.email,
            purchased_at: row.purchased_at,
            rating: row.rating,
        }
    }
}

fn infra(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn insert_event(&self, event: &EventRecord) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO events \
             (event_id, title, price, available_tickets, version, category, organizer_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(event.event_id)
        .bind(&event.title)
        .bind(event.price)
        .bind(event.available_tickets)
        .bind(event.version)
        .bind(event.category.as_deref())
        .bind(event.organizer_id.as_deref())
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<EventRecord>, DomainError> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1");
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        Ok(row.map(EventRecord::from))
    }

    async fn list_events(&self) -> Result<Vec<EventRecord>, DomainError> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY title");
        let rows = sqlx::query_as::<_, EventRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        Ok(rows.into_iter().map(EventRecord::from).collect())
    }

    async fn commit_purchase(
        &self,
        event_id: Uuid,
        new_available: i32,
        expected_version: i64,
        purchase: &PurchaseRecord,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infra)?;

        let updated = sqlx::query(
            "UPDATE events \
             SET available_tickets = $2, version = version + 1 \
             WHERE event_id = $1 AND version = $3",
        )
        .bind(event_id)
        .bind(new_available)
        .bind(expected_version)
        .execute(&mut *tx)
        .await
        .map_err(infra)?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls it back; nothing was written.
            let actual: Option<i64> =
                sqlx::query_scalar("SELECT version FROM events WHERE event_id = $1")
                    .bind(event_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(infra)?;
            return match actual {
                Some(actual) => Err(DomainError::ConcurrencyConflict {
                    event_id,
                    expected: expected_version,
                    actual,
                }),
                None => Err(DomainError::EventNotFound(event_id)),
            };
        }

        sqlx::query(
            "INSERT INTO purchases \
             (purchase_id, event_id, quantity, total, buyer_id, customer_name, email, purchased_at, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(purchase.purchase_id)
        .bind(purchase.event_id)
        .bind(purchase.quantity)
        .bind(purchase.total)
        .bind(&purchase.buyer_id)
        .bind(&purchase.customer_name)
        .bind(&purchase.email)
        .bind(purchase.purchased_at)
        .bind(purchase.rating)
        .execute(&mut *tx)
        .await
        .map_err(infra)?;

        tx.commit().await.map_err(infra)?;

        tracing::debug!(
            event_id = %event_id,
            purchase_id = %purchase.purchase_id,
            new_available,
            "purchase committed"
        );
        Ok(())
    }

    async fn get_purchase(
        &self,
        purchase_id: Uuid,
    ) -> Result<Option<PurchaseRecord>, DomainError> {
        let query = format!("SELECT {PURCHASE_COLUMNS} FROM purchases WHERE purchase_id = $1");
        let row = sqlx::query_as::<_, PurchaseRow>(&query)
            .bind(purchase_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        Ok(row.map(PurchaseRecord::from))
    }

    async fn list_purchases_for_buyer(
        &self,
        buyer_id: &str,
    ) -> Result<Vec<PurchaseRecord>, DomainError> {
        let query = format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases \
             WHERE buyer_id = $1 ORDER BY purchased_at DESC"
        );
        let rows = sqlx::query_as::<_, PurchaseRow>(&query)
            .bind(buyer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        Ok(rows.into_iter().map(PurchaseRecord::from).collect())
    }

    async fn set_rating(
        &self,
        purchase_id: Uuid,
        buyer_id: &str,
        rating: i16,
    ) -> Result<(), DomainError> {
        let updated = sqlx::query(
            "UPDATE purchases SET rating = $3 \
             WHERE purchase_id = $1 AND buyer_id = $2 AND rating IS NULL",
        )
        .bind(purchase_id)
        .bind(buyer_id)
        .bind(rating)
        .execute(&self.pool)
        .await
        .map_err(infra)?;

        if updated.rows_affected() == 0 {
            let owned: Option<i32> = sqlx::query_scalar(
                "SELECT 1 FROM purchases WHERE purchase_id = $1 AND buyer_id = $2",
            )
            .bind(purchase_id)
            .bind(buyer_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
            return match owned {
                Some(_) => Err(DomainError::AlreadyRated(purchase_id)),
                None => Err(DomainError::PurchaseNotFound(purchase_id)),
            };
        }
        Ok(())
    }
}
