//! Stale-response guard for pages that reload on navigation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one load started by a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out tickets; only the newest one is current.
///
/// Stores apply responses in the order they resolve. A page that starts a
/// load per route change takes a ticket before each load and drops results
/// whose ticket is no longer current.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
