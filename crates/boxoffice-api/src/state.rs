//! Shared application state.

use std::sync::Arc;

use boxoffice_core::clock::Clock;
use boxoffice_core::repository::TicketRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The ticket repository backing all reads and writes.
    pub repository: Arc<dyn TicketRepository>,
    /// Clock used to stamp purchases.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(repository: Arc<dyn TicketRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}
