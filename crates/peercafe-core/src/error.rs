//! # Error Types
//!
//! Domain-specific error types for peercafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  peercafe-core errors (this file)                                      │
//! │  ├── CoreError        - Checkout / order rule violations               │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  peercafe-store errors (separate crate)                                │
//! │  └── StorageError     - Storage medium failures (logged, not raised)   │
//! │                                                                         │
//! │  NOT an error: adding an item from another restaurant.                 │
//! │  That is AddOutcome::RestaurantConflict, a normal outcome.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::order::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The order total would not be positive after adjustments.
    ///
    /// ## When This Occurs
    /// - A discount larger than subtotal + tax + delivery fee + tip
    #[error("Order total must be positive, got {total_cents} cents")]
    NonPositiveTotal { total_cents: i64 },

    /// The order is past the point where it can be cancelled.
    #[error("Order is {status}, cannot cancel")]
    NotCancellable { status: OrderStatus },

    /// A status name the backend does not use.
    #[error("Unknown order status '{0}'")]
    UnknownStatus(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value cannot be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
