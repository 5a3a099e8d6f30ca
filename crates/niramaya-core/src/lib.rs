//! # niramaya-core: Pure Pricing Logic for NirAmaya Pathlabs
//!
//! Everything the booking site needs to turn a cart of lab tests and health
//! packages into a payable amount, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      NirAmaya Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Booking site (React) / niramaya-quote CLI           │   │
//! │  │    Tests page ──► Cart sidebar ──► Packages page ──► Book Now    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ renders PricingResult as-is           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ niramaya-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │ catalog  │  │   cart   │  │ pricing  │  │  money   │       │   │
//! │  │   │ tests    │  │ lines    │  │ tiers    │  │ paise    │       │   │
//! │  │   │ packages │  │ qty      │  │ slabs    │  │ ₹ format │       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - The pricing engine: discounts, home-collection fee, helpers
//! - [`types`] - Line items, tiers, priced results
//! - [`money`] - Integer paise with Indian-grouped display
//! - [`cart`] - Cart bookkeeping that defers all math to [`pricing`]
//! - [`catalog`] - Embedded test/package catalog and pincode coverage
//! - [`validation`] - Boundary checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use niramaya_core::{compute_pricing, CatalogLineItem, DiscountRate, DiscountTier, Money};
//!
//! let lipid = CatalogLineItem::new("LIPID001", "Lipid Profile", Money::from_rupees(700), DiscountRate::from_percent(30))
//!     .with_quantity(2);
//!
//! let result = compute_pricing(&[lipid], DiscountTier::Negotiated).unwrap();
//! assert_eq!(result.total_discount, Money::from_rupees(350));
//! assert!(result.is_free_collection);
//! assert_eq!(result.final_payable.to_string(), "₹1,050");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{Catalog, CatalogEntry};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_pricing, discount_percentage, fee_for_amount, savings, upsell_message};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single cart.
pub const MAX_CART_ITEMS: usize = 50;

/// Maximum quantity of a single line.
///
/// Prevents a mistyped "100" where "1" was meant on a per-patient test.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Highest unit price a line item may carry (₹1 crore).
///
/// `MAX_UNIT_PRICE × MAX_ITEM_QUANTITY × MAX_CART_ITEMS` stays far inside
/// `i64`, so line and order totals never overflow.
pub const MAX_UNIT_PRICE: Money = Money::from_rupees(10_000_000);
