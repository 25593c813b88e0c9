//! # Validation Module
//!
//! Field rules for the order payload built at checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Checkout form (UI)                                           │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: OrderDraft::from_cart (Rust)                                 │
//! │  └── THIS MODULE: same limits the backend enforces                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend API                                                  │
//! │  └── Rejects anything that slipped through with a 422                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths are counted in characters, not bytes.
//!
//! ## Usage
//! ```rust
//! use peercafe_core::validation::{validate_length, validate_quantity};
//!
//! assert!(validate_length("city", "San Francisco", 1, 100).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Limits
// =============================================================================

pub const MAX_ITEM_NAME_LEN: usize = 100;
pub const MAX_SPECIAL_INSTRUCTIONS_LEN: usize = 500;
pub const MAX_STREET_LEN: usize = 200;
pub const MAX_CITY_LEN: usize = 100;
pub const MIN_STATE_LEN: usize = 2;
pub const MAX_STATE_LEN: usize = 50;
pub const MIN_ZIP_LEN: usize = 5;
pub const MAX_ZIP_LEN: usize = 10;
pub const MAX_DELIVERY_INSTRUCTIONS_LEN: usize = 500;
pub const MAX_ORDER_NOTES_LEN: usize = 1000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a string is present (non-blank).
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a string length in characters.
///
/// ## Rules
/// - `min == 1` means the field is required: empty gives `Required`
/// - Shorter than `min` gives `TooShort`
/// - Longer than `max` gives `TooLong`
///
/// ## Example
/// ```rust
/// use peercafe_core::validation::validate_length;
///
/// assert!(validate_length("state", "CA", 2, 50).is_ok());
/// assert!(validate_length("state", "C", 2, 50).is_err());
/// ```
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let len = value.chars().count();

    if len == 0 && min > 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an optional free-text field against a maximum length.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<()> {
    match value {
        Some(text) => validate_length(field, text, 0, max),
        None => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount that must be strictly positive (item prices).
pub fn validate_positive_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an amount that may be zero but not negative (tip, discount, fees).
pub fn validate_non_negative_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
