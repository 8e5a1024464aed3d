//! Boxoffice — Ticketing bounded context.
//!
//! Responsible for the ticket-purchase core: the inventory ledger invariant
//! (`available_tickets` never goes negative), purchase validation, the
//! atomic purchase recorder, and the owner-scoped confirmation queries.

pub mod application;
pub mod domain;
