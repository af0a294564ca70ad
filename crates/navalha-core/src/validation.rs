//! # Validation Module
//!
//! Input validation for booking and checkout flows.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (UI / API surface)                                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine operations (Rust)                                     │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_COMANDA_ITEMS, MAX_DURATION_MINUTES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person's display name (client or professional).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be between 2 and 120 characters
pub fn validate_person_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() < 2 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        });
    }

    if name.chars().count() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must contain at least 8 digits
/// - Formatting characters (`+`, `-`, spaces, parentheses) are ignored
///
/// ## Example
/// ```rust
/// use navalha_core::validation::validate_phone;
///
/// assert!(validate_phone("+55 (11) 98765-4321").is_ok());
/// assert!(validate_phone("123").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();

    if digits == 0 {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if digits < 8 {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: 8,
        });
    }

    Ok(())
}

/// Validates a time-off reason.
///
/// Blocked intervals always carry a reason so the agenda shows why the
/// professional is unavailable.
pub fn validate_block_reason(reason: &str) -> ValidationResult<()> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "reason".to_string(),
        });
    }

    if reason.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "reason".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a free-text observation attached to an appointment.
///
/// ## Rules
/// - Can be empty
/// - Maximum 500 characters
///
/// ## Returns
/// The trimmed observation.
pub fn validate_observation(text: &str) -> ValidationResult<String> {
    let text = text.trim();

    if text.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "observation".to_string(),
            max: 500,
        });
    }

    Ok(text.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an appointment duration in minutes.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_DURATION_MINUTES (12 hours)
pub fn validate_duration_minutes(minutes: i64) -> ValidationResult<()> {
    if minutes <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "duration".to_string(),
        });
    }

    if minutes > MAX_DURATION_MINUTES {
        return Err(ValidationError::OutOfRange {
            field: "duration".to_string(),
            min: 1,
            max: MAX_DURATION_MINUTES,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (courtesy services)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tender or ledger amount in cents.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a commission or fee rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_rate_bps(bps: i64) -> ValidationResult<()> {
    if !(0..=10000).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates comanda size (number of items on an appointment's tab).
pub fn validate_comanda_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_COMANDA_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "comanda items".to_string(),
            min: 0,
            max: MAX_COMANDA_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use navalha_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
