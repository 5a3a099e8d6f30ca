//! # Validation Module
//!
//! Boundary checks run before the pricing engine sees any input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Booking site (TypeScript)                                     │
//! │  └── Form field checks, immediate feedback                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization                                               │
//! │  └── Shapes, closed DiscountTier enum                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                   │
//! │  └── Prices, ceilings, quantities, codes, pincodes                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  compute_pricing (assumes everything above passed)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use niramaya_core::validation::{validate_code, validate_quantity};
//!
//! assert!(validate_code("CBC001").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CatalogLineItem, DiscountRate};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog code.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use niramaya_core::validation::validate_code;
///
/// assert!(validate_code("THYROID001").is_ok());
/// assert!(validate_code("").is_err());
/// assert!(validate_code("has space").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 32,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog search query and returns it trimmed.
///
/// Empty is allowed and matches everything.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates an Indian postal pincode.
///
/// ## Rules
/// - Exactly six ASCII digits
/// - First digit is not zero
///
/// ## Example
/// ```rust
/// use niramaya_core::validation::validate_pincode;
///
/// assert!(validate_pincode("110001").is_ok());
/// assert!(validate_pincode("011000").is_err());
/// assert!(validate_pincode("11000").is_err());
/// ```
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    let pincode = pincode.trim();

    if pincode.is_empty() {
        return Err(ValidationError::Required {
            field: "pincode".to_string(),
        });
    }

    if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must be exactly 6 digits".to_string(),
        });
    }

    if pincode.starts_with('0') {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "cannot start with 0".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0); zero is not "unspecified"
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (complimentary tests)
/// - Must not exceed MAX_UNIT_PRICE
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE.paise(),
        });
    }

    Ok(())
}

/// Validates a discount ceiling.
///
/// ## Rules
/// - Between 0 and 10000 bps (0% to 100%)
pub fn validate_discount_rate(rate: DiscountRate) -> ValidationResult<()> {
    if rate > DiscountRate::FULL {
        return Err(ValidationError::OutOfRange {
            field: "max discount".to_string(),
            min: 0,
            max: DiscountRate::FULL.bps() as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a line item.
///
/// ## Example
/// ```rust
/// use niramaya_core::money::Money;
/// use niramaya_core::types::{CatalogLineItem, DiscountRate};
/// use niramaya_core::validation::validate_line_item;
///
/// let item = CatalogLineItem::new("CBC001", "CBC", Money::from_rupees(300), DiscountRate::from_percent(25));
/// assert!(validate_line_item(&item).is_ok());
/// assert!(validate_line_item(&item.with_quantity(0)).is_err());
/// ```
pub fn validate_line_item(item: &CatalogLineItem) -> ValidationResult<()> {
    validate_code(&item.code)?;
    validate_price(item.unit_price)?;
    validate_discount_rate(item.max_discount())?;
    validate_quantity(item.quantity)?;
    Ok(())
}

/// Validates cart size before adding a new line.
///
/// ## Rules
/// - Must stay below MAX_CART_ITEMS
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
