//! # Repository Module
//!
//! Database repository implementations for Navalha.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Engine Operation                                                      │
//! │       │                                                                 │
//! │       │  db.appointments().list_for_day(tenant, date)                   │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  AppointmentRepository                                                 │
//! │  ├── list_for_day(&self, tenant, date)                                 │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, appointment)                                        │
//! │  └── reschedule(&self, id, starts_at, duration)                        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Status guards live next to the statements that need them            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`appointment::AppointmentRepository`] - Appointments and comanda items
//! - [`professional::ProfessionalRepository`] - Professional roster
//! - [`client::ClientRepository`] - Clients and lifetime aggregates
//! - [`catalog::CatalogRepository`] - Services and products
//! - [`cash_session::CashSessionRepository`] - Cash drawer sessions
//! - [`ledger::LedgerRepository`] - Cash register movements
//! - [`payment_method::PaymentMethodRepository`] - Configured tenders
//! - [`commission::CommissionRepository`] - Frozen commission records
//! - [`goal::GoalRepository`] - Monthly targets
//! - [`schedule::OperatingHoursRepository`] - Shop opening windows

pub mod appointment;
pub mod cash_session;
pub mod catalog;
pub mod client;
pub mod commission;
pub mod goal;
pub mod ledger;
pub mod payment_method;
pub mod professional;
pub mod schedule;
