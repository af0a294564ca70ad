//! # Change Feed
//!
//! Payload-free change notifications for UI refresh.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Engine operation (book, checkout, open_session...)                     │
//! │       │                                                                 │
//! │       │ publish(Change::Appointments)                                   │
//! │       ▼                                                                 │
//! │  tokio::sync::broadcast ──► every subscribed view                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Subscriber re-reads the data it cares about. Events carry no          │
//! │  payload: the database is the source of truth, the feed only says     │
//! │  "something in this area changed".                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::broadcast;
use tracing::debug;

/// Which area of the system changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Bookings, reschedules, cancellations, checkouts.
    Appointments,
    /// Session open/close, ledger entries.
    CashDrawer,
    /// Settlements, payouts, bonuses.
    Commissions,
}

/// Broadcast feed of change notifications.
///
/// Cloning shares the underlying channel. Slow subscribers may observe
/// `Lagged`; since events are payload-free, a lagged subscriber just
/// refreshes once and continues.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<Change>,
}

impl ChangeFeed {
    /// Creates a feed with a small buffer; events are coalescable so a
    /// deep backlog has no value.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        ChangeFeed { tx }
    }

    /// Subscribes to future changes.
    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.tx.subscribe()
    }

    /// Publishes a change. Having no subscribers is not an error.
    pub fn publish(&self, change: Change) {
        debug!(?change, "Publishing change");
        let _ = self.tx.send(change);
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
