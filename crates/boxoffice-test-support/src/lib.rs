//! Shared test mocks and utilities for the Boxoffice ticketing service.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{FailingTicketRepository, InMemoryTicketRepository};
