//! Boxoffice HTTP API — router, state, and error mapping.

pub mod error;
pub mod identity;
pub mod routes;
pub mod state;
