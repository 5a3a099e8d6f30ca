//! Quote assembly.
//!
//! ## Quote Flow
//! ```text
//! CartFile { tier?, pincode?, items: [{ code, quantity? }] }
//!      │
//!      ▼  resolve codes against the catalog
//! Cart (merged lines)
//!      │
//!      ▼  compute_pricing(tier)
//! PricingResult ──► Quote { pricing, upsell, display, coverage }
//! ```
//!
//! Display strings are rendered from the engine's values with
//! `Money`'s formatter; nothing here recomputes a discount or fee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use niramaya_core::{
    discount_percentage, upsell_message, Cart, Catalog, DiscountTier, PricingResult, UpsellHint,
};

use crate::error::QuoteResult;

fn default_quantity() -> i64 {
    1
}

/// One requested catalog code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub code: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// The cart file the CLI reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFile {
    #[serde(default)]
    pub tier: Option<DiscountTier>,
    #[serde(default)]
    pub pincode: Option<String>,
    pub items: Vec<CartLine>,
}

impl CartFile {
    pub fn from_json(json: &str) -> QuoteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Amounts pre-rendered for humans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDisplay {
    pub order_total: String,
    pub total_discount: String,
    pub home_collection_charge: String,
    pub final_payable: String,
    /// Whole-order discount badge ("20").
    pub discount_percent: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upsell_message: Option<String>,
}

/// The document printed to stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub generated_at: DateTime<Utc>,
    pub tier: DiscountTier,
    pub pricing: PricingResult,
    pub upsell: UpsellHint,
    pub display: QuoteDisplay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    /// Present only when the cart file names a pincode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_collection_available: Option<bool>,
}

/// Picks the tier: command line, then cart file, then config default.
pub fn resolve_tier(
    cli: Option<DiscountTier>,
    file: Option<DiscountTier>,
    default: DiscountTier,
) -> DiscountTier {
    cli.or(file).unwrap_or(default)
}

/// Prices a cart file against the catalog.
pub fn build_quote(
    catalog: &Catalog,
    cart_file: &CartFile,
    tier: DiscountTier,
    generated_at: DateTime<Utc>,
) -> QuoteResult<Quote> {
    let mut cart = Cart::new();
    for line in &cart_file.items {
        let item = catalog.line_item(&line.code, line.quantity)?;
        debug!(code = %item.code, quantity = item.quantity, "Adding line");
        cart.add_line(item)?;
    }

    info!(
        lines = cart.item_count(),
        units = cart.total_quantity(),
        %tier,
        "Pricing cart"
    );
    let pricing = cart.price(tier)?;

    let after_discount = pricing.order_total_after_discount();
    let upsell = upsell_message(after_discount);

    let home_collection_available = match cart_file.pincode.as_deref() {
        Some(pincode) => {
            let available = catalog.is_serviceable(pincode)?;
            if !available {
                warn!(pincode, "Home collection not offered at this pincode");
            }
            Some(available)
        }
        None => None,
    };

    let display = QuoteDisplay {
        order_total: pricing.order_total.to_string(),
        total_discount: pricing.total_discount.to_string(),
        home_collection_charge: pricing.home_collection_charge.to_string(),
        final_payable: pricing.final_payable.to_string(),
        discount_percent: discount_percentage(pricing.order_total, after_discount),
        upsell_message: upsell.message(),
    };

    info!(
        final_payable = pricing.final_payable.paise(),
        free_collection = pricing.is_free_collection,
        "Quote ready"
    );

    Ok(Quote {
        generated_at,
        tier,
        pricing,
        upsell,
        display,
        pincode: cart_file.pincode.as_ref().map(|p| p.trim().to_string()),
        home_collection_available,
    })
}
