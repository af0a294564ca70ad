//! # navalha-core: Pure Business Logic for Navalha
//!
//! This crate is the **heart** of Navalha, a scheduling and settlement
//! engine for salons and barbershops. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Navalha Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Caller (UI / API surface)                     │   │
//! │  │    Agenda ──► Comanda ──► Checkout ──► Cash Drawer ──► Reports │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              navalha-engine (Orchestration Layer)               │   │
//! │  │    book, reschedule, checkout, open/close session, payouts     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ navalha-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌────────┐ ┌──────────┐ ┌────────────┐ ┌────────┐ │   │
//! │  │  │ slots  │ │conflict│ │settlement│ │ cash/report│ │ money  │ │   │
//! │  │  │  grid  │ │overlap │ │ tenders  │ │ summaries  │ │ cents  │ │   │
//! │  │  └────────┘ └────────┘ └──────────┘ └────────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK READS • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   navalha-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Appointment, Professional, CashSession, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`slots`] - Slot grid generation from operating hours
//! - [`conflict`] - Interval overlap and professional eligibility
//! - [`settlement`] - Comanda totals, tenders, commission snapshots
//! - [`cash`] - Cash session summaries and close reconciliation
//! - [`reports`] - Revenue, profit, ticket and goal-progress figures
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **No Clock Reads**: "now" and "today" are always explicit parameters
//! 4. **Integer Money**: All monetary values are in centavos (i64), never floats
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use navalha_core::money::{Money, Rate};
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(5000); // R$ 50,00
//!
//! // A 40% commission, half-up rounding
//! let rate = Rate::from_percentage(40.0);
//! assert_eq!(price.apply_rate(rate).cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cash;
pub mod conflict;
pub mod error;
pub mod money;
pub mod reports;
pub mod settlement;
pub mod slots;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use navalha_core::Money` instead of
// `use navalha_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tenant ID for v0.1 (single-tenant runtime with multi-tenant schema)
///
/// ## Why a constant?
/// v0.1 runs one shop, but every table carries tenant_id so a hosted
/// multi-tenant deployment needs schema changes nowhere. This constant is
/// used throughout the codebase until dynamic tenant resolution lands.
pub const DEFAULT_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Maximum items allowed on a single comanda
///
/// ## Business Reason
/// Prevents runaway tabs and keeps settlement reviews readable. Can be
/// made configurable per-tenant in future versions.
pub const MAX_COMANDA_ITEMS: usize = 100;

/// Maximum appointment duration in minutes (12 hours)
///
/// ## Business Reason
/// Catches fat-fingered durations (e.g. 300 instead of 30) before they
/// swallow an entire agenda day.
pub const MAX_DURATION_MINUTES: i64 = 720;
