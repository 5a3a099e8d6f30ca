//! # Cart
//!
//! The booking site's shopping cart: an ordered list of line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action               Cart Method             Cart State Change      │
//! │  ─────────               ───────────             ─────────────────      │
//! │  "Add to Cart" ────────► add()  ───────────────► push, or quantity + 1  │
//! │  Change Quantity ──────► update_quantity() ────► items[i].quantity = n  │
//! │  Click Remove ─────────► remove() ─────────────► items.remove(i)       │
//! │  Any change ───────────► price(tier) ──────────► (read only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart only manages its lines. All money math goes through
//! [`compute_pricing`] so the UI never derives a discount or fee itself.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogEntry;
use crate::error::{CoreError, CoreResult};
use crate::pricing::compute_pricing;
use crate::types::{CatalogLineItem, DiscountTier, PricingResult};
use crate::validation::validate_cart_size;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `code` (adding the same entry bumps its quantity)
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CatalogLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a catalog entry.
    pub fn add(&mut self, entry: &CatalogEntry) -> CoreResult<()> {
        self.add_line(entry.to_line_item())
    }

    /// Adds a line item, merging quantities if the code is already present.
    pub fn add_line(&mut self, line: CatalogLineItem) -> CoreResult<()> {
        if line.quantity <= 0 {
            return Err(CoreError::InvalidLineItem {
                code: line.code,
                reason: "quantity must be positive".to_string(),
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.code == line.code) {
            let new_qty = item.quantity + line.quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if validate_cart_size(self.items.len()).is_err() {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        if line.quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.items.push(line);
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Negative or over-maximum quantities are rejected
    /// - Unknown code returns [`CoreError::ItemNotInCart`]
    pub fn update_quantity(&mut self, code: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove(code);
        }

        if quantity < 0 {
            return Err(CoreError::InvalidLineItem {
                code: code.to_string(),
                reason: "quantity must be positive".to_string(),
            });
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|i| i.code == code) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotInCart(code.to_string())),
        }
    }

    /// Removes a line by code.
    pub fn remove(&mut self, code: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.code != code);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInCart(code.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CatalogLineItem] {
        &self.items
    }

    /// Checks whether a code is in the cart.
    pub fn contains(&self, code: &str) -> bool {
        self.items.iter().any(|i| i.code == code)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Prices the current contents.
    pub fn price(&self, tier: DiscountTier) -> CoreResult<PricingResult> {
        compute_pricing(&self.items, tier)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
