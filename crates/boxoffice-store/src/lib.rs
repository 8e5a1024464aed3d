//! PostgreSQL implementation of the `TicketRepository` trait.

pub mod pg_ticket_repository;

pub use pg_ticket_repository::PgTicketRepository;
