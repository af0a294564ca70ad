//! # navalha-engine: Orchestration Layer for Navalha
//!
//! Coordinates pure calculations from navalha-core with navalha-db writes.
//! Every operation the desktop app invokes lives here: booking, checkout,
//! cash drawer sessions, commission payouts, availability grids.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Navalha Layers                                   │
//! │                                                                         │
//! │  UI / API surface                                                       │
//! │       │ calls                                                           │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  navalha-engine (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   Engine ─── booking.rs      book / reschedule / cancel        │   │
//! │  │          ├── checkout.rs     settle / quick sale / reopen      │   │
//! │  │          ├── cash.rs         open / close / manual entries     │   │
//! │  │          ├── commission.rs   payouts / bonuses / reports       │   │
//! │  │          ├── availability.rs day grids / public slots          │   │
//! │  │          └── notify.rs       broadcast change feed             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │ math                              │ reads/writes               │
//! │       ▼                                   ▼                            │
//! │  navalha-core (pure)                 navalha-db (SQLite)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Clock Discipline
//! Core functions never read the clock. The engine reads `Utc::now()` at
//! its edges and passes explicit instants down, so every calculation stays
//! reproducible in tests.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod booking;
pub mod cash;
pub mod checkout;
pub mod commission;
pub mod error;
pub mod notify;

#[cfg(test)]
pub(crate) mod testutil;

// =============================================================================
// Re-exports
// =============================================================================

pub use availability::{DayGrid, ProfessionalColumn};
pub use booking::BookingRequest;
pub use cash::SessionCloseReport;
pub use checkout::{QuickSaleRequest, TenderInput};
pub use commission::{PayoutReceipt, PeriodReport};
pub use error::{EngineError, EngineResult};
pub use notify::{Change, ChangeFeed};

use navalha_db::{Database, DbConfig, DbResult};

// =============================================================================
// Engine
// =============================================================================

/// The operation facade over one tenant's data.
///
/// Cheap to clone; clones share the pool and the change feed.
#[derive(Debug, Clone)]
pub struct Engine {
    db: Database,
    tenant_id: String,
    changes: ChangeFeed,
}

impl Engine {
    /// Opens (or creates) the database at the configured path and binds
    /// the engine to the default single-shop tenant.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let db = Database::new(config).await?;
        Ok(Engine {
            db,
            tenant_id: navalha_core::DEFAULT_TENANT_ID.to_string(),
            changes: ChangeFeed::new(),
        })
    }

    /// Binds an engine to an explicit tenant over an existing database.
    pub fn with_tenant(db: Database, tenant_id: impl Into<String>) -> Self {
        Engine {
            db,
            tenant_id: tenant_id.into(),
            changes: ChangeFeed::new(),
        }
    }

    /// The tenant this engine operates on.
    pub fn tenant(&self) -> &str {
        &self.tenant_id
    }

    /// Direct repository access, for reads the operations don't wrap.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// The change feed operations publish to.
    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }
}
