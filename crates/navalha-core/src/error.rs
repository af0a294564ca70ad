//! # Error Types
//!
//! Domain-specific error types for navalha-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  navalha-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  navalha-db errors (separate crate)                                    │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  navalha-engine errors                                                 │
//! │  └── EngineError      - What callers of the engine see                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → Caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (IDs, amounts, remaining balance)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent blocking conditions the operator must resolve; nothing
/// here is retried automatically.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The candidate interval overlaps an existing appointment.
    ///
    /// ## When This Occurs
    /// - Booking into a slot another appointment already covers
    /// - Rescheduling onto a busy interval
    #[error("Professional {professional_id} already has an appointment overlapping {starts_at}")]
    SlotConflict {
        professional_id: String,
        starts_at: String,
    },

    /// The appointment status forbids the requested transition.
    ///
    /// ## When This Occurs
    /// - Rescheduling a completed or blocked appointment
    /// - Checking out an appointment twice
    /// - Canceling a completed appointment (only reopen may touch it)
    #[error("Appointment {appointment_id} is {current_status}, cannot perform operation")]
    InvalidAppointmentStatus {
        appointment_id: String,
        current_status: String,
    },

    /// Tendered amounts do not cover the comanda total.
    ///
    /// ## User Workflow
    /// ```text
    /// Comanda total: R$ 30,00
    /// Tenders:       cash R$ 20,00
    ///      │
    ///      ▼
    /// InsufficientPayment { remaining: R$ 10,00 }
    ///      │
    ///      ▼
    /// Operator adds another tender and retries
    /// ```
    #[error("Insufficient payment: {remaining} still due on a {total} comanda")]
    InsufficientPayment { total: Money, remaining: Money },

    /// Money-moving operation attempted while no cash session is open.
    ///
    /// Discount pseudo-tenders are exempt; everything else is blocked until
    /// the drawer is opened.
    #[error("No cash session is open")]
    CashSessionClosed,

    /// A second cash session cannot be opened for the tenant.
    #[error("A cash session is already open")]
    CashSessionAlreadyOpen,

    /// Settlement produced no line items to bill.
    #[error("Comanda has no items")]
    EmptyComanda,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. They are
/// reported before any write is attempted, never partially applied.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed UUID, bad phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPayment {
            total: Money::from_cents(3000),
            remaining: Money::from_cents(1000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: R$ 10,00 still due on a R$ 30,00 comanda"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "reason".to_string(),
        };
        assert_eq!(err.to_string(), "reason is required");

        let err = ValidationError::MustBePositive {
            field: "duration".to_string(),
        };
        assert_eq!(err.to_string(), "duration must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
