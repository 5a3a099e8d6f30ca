//! # Error Types
//!
//! Domain-specific error types for niramaya-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  niramaya-core errors (this file)                                      │
//! │  ├── CoreError        - Pricing, cart and catalog failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  niramaya-quote errors (app)                                           │
//! │  └── ConfigError      - Bad environment configuration                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI exit message)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself is total over valid input. Every error here is
//! raised at the boundary, before any result exists.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item failed validation before pricing.
    ///
    /// ## When This Occurs
    /// - Negative unit price
    /// - Discount ceiling above 100%
    /// - Quantity of zero, negative, or above the cart maximum
    #[error("Invalid line item {code}: {reason}")]
    InvalidLineItem { code: String, reason: String },

    /// Discount tier name is not one of standard, negotiated, maximum.
    #[error("Invalid discount tier: {0}")]
    InvalidDiscountTier(String),

    /// No test or package with this code exists in the catalog.
    #[error("Catalog item not found: {0}")]
    CatalogItemNotFound(String),

    /// Cart has no line with this code.
    #[error("Item {0} is not in the cart")]
    ItemNotInCart(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The embedded catalog data could not be parsed.
    #[error("Catalog data is malformed: {0}")]
    CatalogData(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a pincode with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two catalog entries sharing a code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
