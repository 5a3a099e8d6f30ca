//! # Domain Types
//!
//! Value types flowing into and out of the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT                                  OUTPUT                          │
//! │  ┌──────────────────────┐               ┌──────────────────────┐        │
//! │  │  CatalogLineItem     │  compute_     │  PricingResult       │        │
//! │  │  ──────────────────  │  pricing()    │  ──────────────────  │        │
//! │  │  code, name          │ ────────────► │  line_items[]        │        │
//! │  │  unit_price          │               │  order_total         │        │
//! │  │  max_discount_bps    │               │  total_discount      │        │
//! │  │  quantity            │               │  home_collection_... │        │
//! │  └──────────────────────┘               │  final_payable       │        │
//! │  ┌──────────────────────┐               └──────────────────────┘        │
//! │  │  DiscountTier        │               ┌──────────────────────┐        │
//! │  │  Standard   20%      │               │  PricedLineItem      │        │
//! │  │  Negotiated 25%      │               │  mrp = discount      │        │
//! │  │  Maximum    ceiling  │               │      + final_price   │        │
//! │  └──────────────────────┘               └──────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount fraction in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%, so 2000 bps = 20% and 10000 bps = 100%.
/// Integer rates keep `Money::apply_rate` exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100%: nothing left to pay.
    pub const FULL: DiscountRate = DiscountRate(10_000);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage (25 → 2500 bps).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        DiscountRate(pct * 100)
    }

    /// Creates a rate from a fractional percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Discount Tier
// =============================================================================

/// A named discount preset chosen by the caller.
///
/// The tier only *proposes* a rate. The item's own ceiling is the hard
/// limit, so the effective rate is always `min(tier rate, ceiling)`.
///
/// Serializes as its snake_case name. Deserializing goes through
/// [`FromStr`], so JSON accepts the same spellings as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTier {
    /// Flat 20% proposal.
    #[default]
    Standard,
    /// Flat 25% proposal.
    Negotiated,
    /// Whatever the catalog allows for each item.
    Maximum,
}

impl DiscountTier {
    /// Every tier, in display order.
    pub const ALL: [DiscountTier; 3] = [
        DiscountTier::Standard,
        DiscountTier::Negotiated,
        DiscountTier::Maximum,
    ];

    /// Base rate the tier proposes before the per-item ceiling applies.
    ///
    /// `Maximum` proposes 100%, which the ceiling always caps.
    pub const fn base_rate(&self) -> DiscountRate {
        match self {
            DiscountTier::Standard => DiscountRate::from_percent(20),
            DiscountTier::Negotiated => DiscountRate::from_percent(25),
            DiscountTier::Maximum => DiscountRate::FULL,
        }
    }

    /// Wire name, as accepted by [`FromStr`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountTier::Standard => "standard",
            DiscountTier::Negotiated => "negotiated",
            DiscountTier::Maximum => "maximum",
        }
    }
}

impl fmt::Display for DiscountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DiscountTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidDiscountTier(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for DiscountTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// Catalog Line Item
// =============================================================================

fn default_quantity() -> i64 {
    1
}

/// One catalog entry plus its quantity within a cart.
///
/// ## Quantity
/// An absent `quantity` in JSON means 1. An explicit `0` is kept as 0 and
/// rejected by validation, so "unspecified" and "zero" never collapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLineItem {
    /// Catalog code ("CBC001").
    pub code: String,

    /// Display label.
    pub name: String,

    /// MRP for one unit.
    pub unit_price: Money,

    /// Discount ceiling the catalog allows, in basis points.
    pub max_discount_bps: u32,

    /// Units ordered.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl CatalogLineItem {
    /// Creates a line item with quantity 1.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        max_discount: DiscountRate,
    ) -> Self {
        CatalogLineItem {
            code: code.into(),
            name: name.into(),
            unit_price,
            max_discount_bps: max_discount.bps(),
            quantity: default_quantity(),
        }
    }

    /// Returns the same item with a different quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Returns the discount ceiling.
    #[inline]
    pub fn max_discount(&self) -> DiscountRate {
        DiscountRate::from_bps(self.max_discount_bps)
    }
}

// =============================================================================
// Pricing Output
// =============================================================================

/// A priced line. Only the engine creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedLineItem {
    pub code: String,
    pub name: String,
    /// Unit price × quantity.
    pub mrp: Money,
    /// Total discount for the line (never negative).
    pub discount_applied: Money,
    /// `mrp - discount_applied`.
    pub final_price: Money,
    pub quantity: i64,
}

/// The priced order returned by [`crate::pricing::compute_pricing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Same order as the input items.
    pub line_items: Vec<PricedLineItem>,
    pub order_total: Money,
    pub total_discount: Money,
    pub home_collection_charge: Money,
    pub final_payable: Money,
    pub is_free_collection: bool,
}

impl PricingResult {
    /// Order total once discounts are taken off, before the collection fee.
    #[inline]
    pub fn order_total_after_discount(&self) -> Money {
        self.order_total - self.total_discount
    }
}

/// What the cart should nudge the customer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpsellHint {
    /// Home collection is already free.
    FreeCollectionReached,
    /// Adding `shortfall` more would make home collection free.
    AddMore { shortfall: Money },
}

impl UpsellHint {
    /// Banner text shown under the cart total, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            UpsellHint::FreeCollectionReached => None,
            UpsellHint::AddMore { shortfall } => {
                Some(format!("Add {} more for FREE home collection!", shortfall))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
