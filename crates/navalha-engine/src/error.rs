//! # Engine Error Types
//!
//! What callers of the engine see. Business rule violations arrive as
//! `CoreError`, storage failures as `DbError`; both keep their messages.

use thiserror::Error;

use navalha_core::{CoreError, ValidationError};
use navalha_db::DbError;

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Input validation failed before any write was attempted.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A business rule blocked the operation (conflict, insufficient
    /// payment, closed drawer...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage operation failed.
    #[error(transparent)]
    Storage(#[from] DbError),
}

impl EngineError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use navalha_core::Money;

    #[test]
    fn test_core_error_message_passthrough() {
        let err: EngineError = CoreError::InsufficientPayment {
            total: Money::from_cents(3000),
            remaining: Money::from_cents(1000),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Insufficient payment: R$ 10,00 still due on a R$ 30,00 comanda"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = EngineError::not_found("Appointment", "a1");
        assert_eq!(err.to_string(), "Appointment not found: a1");
    }
}
