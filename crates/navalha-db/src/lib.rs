//! # navalha-db: Database Layer for Navalha
//!
//! This crate provides database access for the Navalha scheduling and
//! settlement engine. It uses SQLite for local storage with sqlx for
//! async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Navalha Data Flow                                │
//! │                                                                         │
//! │  Engine Operation (checkout, book, open_session)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    navalha-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │(appointment..)│    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ Appointments  │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ CashSessions  │    │ ...          │  │   │
//! │  │   │ Management    │    │ Commissions   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (navalha.db, WAL mode)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use navalha_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/navalha.db");
//! let db = Database::new(config).await?;
//!
//! let today = db.appointments().list_for_day(tenant_id, date).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::appointment::AppointmentRepository;
pub use repository::cash_session::CashSessionRepository;
pub use repository::catalog::CatalogRepository;
pub use repository::client::ClientRepository;
pub use repository::commission::CommissionRepository;
pub use repository::goal::GoalRepository;
pub use repository::ledger::LedgerRepository;
pub use repository::payment_method::PaymentMethodRepository;
pub use repository::professional::ProfessionalRepository;
pub use repository::schedule::OperatingHoursRepository;
