//! # Pricing Engine
//!
//! Turns a cart of catalog line items and a discount tier into a priced,
//! reconciled order.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each CatalogLineItem                                               │
//! │      rate      = min(tier.base_rate, item ceiling)                      │
//! │      unit_disc = unit_price.apply_rate(rate)      (rounded once)        │
//! │      mrp       = unit_price × qty                                       │
//! │      discount  = unit_disc × qty                                        │
//! │      final     = mrp − discount                   (exact)               │
//! │                                                                         │
//! │  order_total     = Σ mrp                                                │
//! │  total_discount  = Σ discount                                           │
//! │  after_discount  = order_total − total_discount                         │
//! │  collection fee  = fee_for_amount(after_discount)                       │
//! │  final_payable   = after_discount + fee                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens only inside `Money::apply_rate`, once per unit. Every
//! other step is integer addition, subtraction or multiplication, so
//! `mrp == discount + final` holds for each line and for the order.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{
    CatalogLineItem, DiscountRate, DiscountTier, PricedLineItem, PricingResult, UpsellHint,
};
use crate::validation::validate_line_item;
use crate::MAX_CART_ITEMS;

// =============================================================================
// Home Collection Slabs
// =============================================================================

/// A home-collection fee bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSlab {
    /// Smallest post-discount order value this slab covers (inclusive).
    pub minimum: Money,
    /// Fee charged for orders in this slab.
    pub charge: Money,
}

/// Fee brackets, highest minimum first.
///
/// The last slab starts at zero so every non-negative amount matches.
pub const HOME_COLLECTION_SLABS: [FeeSlab; 5] = [
    FeeSlab {
        minimum: Money::from_rupees(600),
        charge: Money::zero(),
    },
    FeeSlab {
        minimum: Money::from_rupees(400),
        charge: Money::from_rupees(100),
    },
    FeeSlab {
        minimum: Money::from_rupees(200),
        charge: Money::from_rupees(125),
    },
    FeeSlab {
        minimum: Money::from_rupees(100),
        charge: Money::from_rupees(150),
    },
    FeeSlab {
        minimum: Money::zero(),
        charge: Money::from_rupees(200),
    },
];

/// Post-discount order value at which home collection becomes free.
pub const FREE_COLLECTION_THRESHOLD: Money = HOME_COLLECTION_SLABS[0].minimum;

/// Looks up the home-collection fee for a post-discount order value.
///
/// Negative amounts are clamped to zero first, so they land in the lowest
/// slab like an empty cart does.
///
/// ## Example
/// ```rust
/// use niramaya_core::money::Money;
/// use niramaya_core::pricing::fee_for_amount;
///
/// assert_eq!(fee_for_amount(Money::from_rupees(600)), Money::zero());
/// assert_eq!(fee_for_amount(Money::from_rupees(599)), Money::from_rupees(100));
/// assert_eq!(fee_for_amount(Money::zero()), Money::from_rupees(200));
/// ```
pub fn fee_for_amount(amount: Money) -> Money {
    let amount = amount.clamp_non_negative();
    let lowest = HOME_COLLECTION_SLABS[HOME_COLLECTION_SLABS.len() - 1];

    HOME_COLLECTION_SLABS
        .iter()
        .find(|slab| amount >= slab.minimum)
        .unwrap_or(&lowest)
        .charge
}

// =============================================================================
// Discount Resolution
// =============================================================================

/// Resolves the rate actually applied to an item.
///
/// The tier rate is a proposal, the item ceiling is the hard limit.
/// `Maximum` proposes 100% so it always resolves to the ceiling, itself
/// capped at 100%.
pub fn effective_rate(tier: DiscountTier, ceiling: DiscountRate) -> DiscountRate {
    let ceiling = ceiling.min(DiscountRate::FULL);
    match tier {
        DiscountTier::Maximum => ceiling,
        DiscountTier::Standard | DiscountTier::Negotiated => tier.base_rate().min(ceiling),
    }
}

/// Prices one validated line.
fn price_line(item: &CatalogLineItem, tier: DiscountTier) -> PricedLineItem {
    let rate = effective_rate(tier, item.max_discount());
    let discount_per_unit = item.unit_price.apply_rate(rate);

    let mrp = item.unit_price.multiply_quantity(item.quantity);
    let discount_applied = discount_per_unit.multiply_quantity(item.quantity);

    PricedLineItem {
        code: item.code.clone(),
        name: item.name.clone(),
        mrp,
        discount_applied,
        final_price: mrp - discount_applied,
        quantity: item.quantity,
    }
}

// =============================================================================
// Entry Point
// =============================================================================

/// Prices a cart.
///
/// Every item is validated first; the first invalid one rejects the whole
/// call with [`CoreError::InvalidLineItem`] and no partial result. More than
/// `MAX_CART_ITEMS` lines is rejected with [`CoreError::CartTooLarge`].
///
/// ## Example
/// ```rust
/// use niramaya_core::money::Money;
/// use niramaya_core::pricing::compute_pricing;
/// use niramaya_core::types::{CatalogLineItem, DiscountRate, DiscountTier};
///
/// let cbc = CatalogLineItem::new("CBC001", "CBC", Money::from_rupees(300), DiscountRate::from_percent(25));
/// let result = compute_pricing(&[cbc], DiscountTier::Standard).unwrap();
///
/// assert_eq!(result.total_discount, Money::from_rupees(60));
/// assert_eq!(result.home_collection_charge, Money::from_rupees(125));
/// assert_eq!(result.final_payable, Money::from_rupees(365));
/// ```
pub fn compute_pricing(items: &[CatalogLineItem], tier: DiscountTier) -> CoreResult<PricingResult> {
    if items.len() > MAX_CART_ITEMS {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }

    for item in items {
        validate_line_item(item).map_err(|e| CoreError::InvalidLineItem {
            code: item.code.clone(),
            reason: e.to_string(),
        })?;
    }

    let line_items: Vec<PricedLineItem> = items.iter().map(|item| price_line(item, tier)).collect();

    let order_total: Money = line_items.iter().map(|line| line.mrp).sum();
    let total_discount: Money = line_items.iter().map(|line| line.discount_applied).sum();
    let after_discount = order_total - total_discount;

    let home_collection_charge = fee_for_amount(after_discount);

    Ok(PricingResult {
        line_items,
        order_total,
        total_discount,
        home_collection_charge,
        final_payable: after_discount + home_collection_charge,
        is_free_collection: home_collection_charge.is_zero(),
    })
}

// =============================================================================
// Presentation Helpers
// =============================================================================

/// Amount saved on a line or order.
#[inline]
pub fn savings(mrp: Money, final_price: Money) -> Money {
    mrp - final_price
}

/// Whole-number discount percentage for a badge ("20% OFF").
///
/// Rounds half toward positive infinity. Returns 0 for a zero MRP.
///
/// ## Example
/// ```rust
/// use niramaya_core::money::Money;
/// use niramaya_core::pricing::discount_percentage;
///
/// assert_eq!(discount_percentage(Money::from_rupees(300), Money::from_rupees(240)), 20);
/// assert_eq!(discount_percentage(Money::zero(), Money::zero()), 0);
/// ```
pub fn discount_percentage(mrp: Money, final_price: Money) -> i64 {
    if mrp.is_zero() {
        return 0;
    }

    // round(x) = floor(x + 1/2) = floor((200 × saved + mrp) / (2 × mrp))
    let saved = savings(mrp, final_price).paise() as i128;
    let mut numerator = 200 * saved + mrp.paise() as i128;
    let mut denominator = 2 * mrp.paise() as i128;
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }

    numerator.div_euclid(denominator) as i64
}

/// How far a post-discount total is from free home collection.
///
/// ## Example
/// ```rust
/// use niramaya_core::money::Money;
/// use niramaya_core::pricing::upsell_message;
/// use niramaya_core::types::UpsellHint;
///
/// assert_eq!(
///     upsell_message(Money::from_rupees(240)),
///     UpsellHint::AddMore { shortfall: Money::from_rupees(360) }
/// );
/// assert_eq!(upsell_message(Money::from_rupees(600)), UpsellHint::FreeCollectionReached);
/// ```
pub fn upsell_message(post_discount_total: Money) -> UpsellHint {
    if post_discount_total >= FREE_COLLECTION_THRESHOLD {
        UpsellHint::FreeCollectionReached
    } else {
        UpsellHint::AddMore {
            shortfall: FREE_COLLECTION_THRESHOLD - post_discount_total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

    fn line(code: &str, rupees: i64, ceiling_pct: u32) -> CatalogLineItem {
        CatalogLineItem::new(
            code,
            format!("Test {}", code),
            Money::from_rupees(rupees),
            DiscountRate::from_percent(ceiling_pct),
        )
    }

    fn rupees(r: i64) -> Money {
        Money::from_rupees(r)
    }

    // -------------------------------------------------------------------------
    // Fee slabs
    // -------------------------------------------------------------------------

    #[test]
    fn test_fee_boundaries() {
        assert_eq!(fee_for_amount(rupees(600)), Money::zero());
        assert_eq!(fee_for_amount(rupees(599)), rupees(100));
        assert_eq!(fee_for_amount(rupees(400)), rupees(100));
        assert_eq!(fee_for_amount(rupees(399)), rupees(125));
        assert_eq!(fee_for_amount(rupees(200)), rupees(125));
        assert_eq!(fee_for_amount(rupees(100)), rupees(150));
        assert_eq!(fee_for_amount(rupees(99)), rupees(200));
        assert_eq!(fee_for_amount(Money::zero()), rupees(200));
    }

    #[test]
    fn test_fee_boundary_is_paise_exact() {
        assert_eq!(fee_for_amount(Money::from_paise(59_999)), rupees(100));
        assert_eq!(fee_for_amount(Money::from_paise(60_000)), Money::zero());
    }

    #[test]
    fn test_fee_clamps_negative_amounts() {
        assert_eq!(fee_for_amount(Money::from_paise(-1)), rupees(200));
        assert_eq!(fee_for_amount(rupees(-10_000)), rupees(200));
    }

    #[test]
    fn test_fee_is_non_increasing() {
        let mut previous = fee_for_amount(Money::zero());
        for r in 0..=1_000 {
            let fee = fee_for_amount(rupees(r));
            assert!(fee <= previous, "fee rose at ₹{}", r);
            previous = fee;
        }
    }

    #[test]
    fn test_slab_table_ordered_highest_first() {
        for pair in HOME_COLLECTION_SLABS.windows(2) {
            assert!(pair[0].minimum > pair[1].minimum);
            assert!(pair[0].charge < pair[1].charge);
        }
        assert!(HOME_COLLECTION_SLABS[HOME_COLLECTION_SLABS.len() - 1]
            .minimum
            .is_zero());
        assert_eq!(FREE_COLLECTION_THRESHOLD, rupees(600));
    }

    // -------------------------------------------------------------------------
    // Rate resolution
    // -------------------------------------------------------------------------

    #[test]
    fn test_effective_rate_caps_tier_at_ceiling() {
        let ceiling = DiscountRate::from_percent(25);
        assert_eq!(effective_rate(DiscountTier::Standard, ceiling).bps(), 2000);
        assert_eq!(effective_rate(DiscountTier::Negotiated, ceiling).bps(), 2500);
        assert_eq!(effective_rate(DiscountTier::Maximum, ceiling).bps(), 2500);

        let low = DiscountRate::from_percent(10);
        for tier in DiscountTier::ALL {
            assert_eq!(effective_rate(tier, low), low);
        }
    }

    #[test]
    fn test_effective_rate_never_exceeds_full() {
        let absurd = DiscountRate::from_bps(15_000);
        assert_eq!(effective_rate(DiscountTier::Maximum, absurd), DiscountRate::FULL);
    }

    #[test]
    fn test_discount_cap_invariant() {
        for ceiling_pct in 0..=100 {
            let ceiling = DiscountRate::from_percent(ceiling_pct);
            for tier in DiscountTier::ALL {
                assert!(effective_rate(tier, ceiling) <= ceiling);
            }
        }
    }

    // -------------------------------------------------------------------------
    // compute_pricing scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_cart_is_not_free() {
        for tier in DiscountTier::ALL {
            let result = compute_pricing(&[], tier).unwrap();
            assert!(result.line_items.is_empty());
            assert!(result.order_total.is_zero());
            assert!(result.total_discount.is_zero());
            assert_eq!(result.home_collection_charge, rupees(200));
            assert!(!result.is_free_collection);
            assert_eq!(result.final_payable, rupees(200));
        }
    }

    #[test]
    fn test_single_item_standard_tier() {
        let result = compute_pricing(&[line("CBC001", 300, 25)], DiscountTier::Standard).unwrap();

        let priced = &result.line_items[0];
        assert_eq!(priced.mrp, rupees(300));
        assert_eq!(priced.discount_applied, rupees(60));
        assert_eq!(priced.final_price, rupees(240));
        assert_eq!(result.home_collection_charge, rupees(125));
        assert_eq!(result.final_payable, rupees(365));
        assert!(!result.is_free_collection);
    }

    #[test]
    fn test_maximum_tier_uses_item_ceiling() {
        let result = compute_pricing(&[line("CBC001", 300, 25)], DiscountTier::Maximum).unwrap();

        let priced = &result.line_items[0];
        assert_eq!(priced.discount_applied, rupees(75));
        assert_eq!(priced.final_price, rupees(225));
        // ₹225 sits in the ≥ ₹200 slab
        assert_eq!(result.home_collection_charge, rupees(125));
        assert_eq!(result.final_payable, rupees(350));
    }

    #[test]
    fn test_maximum_tier_with_zero_ceiling() {
        let result = compute_pricing(&[line("NODISC", 450, 0)], DiscountTier::Maximum).unwrap();
        assert!(result.total_discount.is_zero());
        assert_eq!(result.line_items[0].final_price, rupees(450));
    }

    #[test]
    fn test_reaching_free_collection_exactly() {
        // 500 @ 20% → 400, 250 @ 20% → 200, total 600
        let items = [line("A", 500, 20), line("B", 250, 25)];
        let result = compute_pricing(&items, DiscountTier::Standard).unwrap();

        assert_eq!(result.order_total_after_discount(), rupees(600));
        assert!(result.home_collection_charge.is_zero());
        assert!(result.is_free_collection);
        assert_eq!(result.final_payable, rupees(600));
    }

    #[test]
    fn test_quantity_scales_linearly() {
        let item = line("LIPID001", 700, 30).with_quantity(2);
        let result = compute_pricing(&[item], DiscountTier::Negotiated).unwrap();

        let priced = &result.line_items[0];
        assert_eq!(priced.quantity, 2);
        assert_eq!(priced.mrp, rupees(1400));
        assert_eq!(priced.discount_applied, rupees(350));
        assert_eq!(priced.final_price, rupees(1050));
        assert!(result.is_free_collection);
    }

    #[test]
    fn test_line_order_mirrors_input() {
        let items = [line("C", 100, 10), line("A", 200, 10), line("B", 300, 10)];
        let result = compute_pricing(&items, DiscountTier::Standard).unwrap();
        let codes: Vec<&str> = result.line_items.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["C", "A", "B"]);
    }

    #[test]
    fn test_fractional_discount_reconciles() {
        // ₹333 × 2 at 12.5%: 41.625 per unit → ₹41.63 (half-up, per unit)
        let item = CatalogLineItem::new(
            "ODD",
            "Odd price",
            rupees(333),
            DiscountRate::from_bps(1250),
        )
        .with_quantity(2);
        let result = compute_pricing(&[item], DiscountTier::Maximum).unwrap();

        let priced = &result.line_items[0];
        assert_eq!(priced.discount_applied.paise(), 4163 * 2);
        assert_eq!(priced.mrp, priced.discount_applied + priced.final_price);
    }

    #[test]
    fn test_reconciliation_invariants() {
        let items: Vec<CatalogLineItem> = (1..=20)
            .map(|i| {
                CatalogLineItem::new(
                    format!("T{}", i),
                    "Test",
                    Money::from_paise(i * 3_337),
                    DiscountRate::from_bps((i as u32 * 517) % 10_001),
                )
                .with_quantity(i % 4 + 1)
            })
            .collect();

        for tier in DiscountTier::ALL {
            let result = compute_pricing(&items, tier).unwrap();

            for (input, priced) in items.iter().zip(&result.line_items) {
                assert_eq!(priced.mrp, priced.discount_applied + priced.final_price);
                assert!(!priced.discount_applied.is_negative());
                assert!(!priced.final_price.is_negative());
                assert_eq!(priced.mrp, input.unit_price * input.quantity);
            }

            let mrp_sum: Money = result.line_items.iter().map(|l| l.mrp).sum();
            let disc_sum: Money = result.line_items.iter().map(|l| l.discount_applied).sum();
            assert_eq!(result.order_total, mrp_sum);
            assert_eq!(result.total_discount, disc_sum);
            assert_eq!(
                result.final_payable,
                result.order_total - result.total_discount + result.home_collection_charge
            );
            assert_eq!(
                result.is_free_collection,
                result.home_collection_charge.is_zero()
            );
        }
    }

    #[test]
    fn test_invalid_items_reject_whole_call() {
        let bad = line("BAD", 300, 25).with_quantity(0);
        let err = compute_pricing(&[line("OK", 100, 10), bad], DiscountTier::Standard).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLineItem { ref code, .. } if code == "BAD"));

        let mut negative = line("NEG", 300, 25);
        negative.unit_price = Money::from_rupees(-300);
        assert!(compute_pricing(&[negative], DiscountTier::Standard).is_err());
    }

    #[test]
    fn test_oversized_prices_are_rejected_not_overflowed() {
        let mut huge = line("HUGE", 0, 25).with_quantity(3);
        huge.unit_price = Money::from_paise(i64::MAX / 2);
        let err = compute_pricing(&[huge], DiscountTier::Standard).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLineItem { ref code, .. } if code == "HUGE"));

        let mut a = line("A", 0, 25);
        a.unit_price = Money::from_paise(i64::MAX / 2 + 1);
        let mut b = a.clone();
        b.code = "B".to_string();
        assert!(compute_pricing(&[a, b], DiscountTier::Maximum).is_err());
    }

    #[test]
    fn test_largest_allowed_cart_reconciles() {
        let items: Vec<CatalogLineItem> = (0..MAX_CART_ITEMS)
            .map(|i| {
                let mut item = line(&format!("T{:03}", i), 0, 20).with_quantity(MAX_ITEM_QUANTITY);
                item.unit_price = MAX_UNIT_PRICE;
                item
            })
            .collect();

        let result = compute_pricing(&items, DiscountTier::Standard).unwrap();
        let lines = (MAX_CART_ITEMS as i64) * MAX_ITEM_QUANTITY;
        assert_eq!(result.order_total, Money::from_paise(MAX_UNIT_PRICE.paise() * lines));
        assert_eq!(
            result.order_total,
            result.total_discount + result.order_total_after_discount()
        );
        assert!(result.is_free_collection);
        assert_eq!(result.final_payable, result.order_total_after_discount());
    }

    #[test]
    fn test_too_many_lines_rejected() {
        let items: Vec<CatalogLineItem> = (0..=MAX_CART_ITEMS)
            .map(|i| line(&format!("T{:03}", i), 100, 10))
            .collect();
        let err = compute_pricing(&items, DiscountTier::Standard).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { max } if max == MAX_CART_ITEMS));
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    #[test]
    fn test_savings() {
        assert_eq!(savings(rupees(1400), rupees(1050)), rupees(350));
        assert!(savings(rupees(100), rupees(100)).is_zero());
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(discount_percentage(rupees(300), rupees(240)), 20);
        assert_eq!(discount_percentage(rupees(300), rupees(225)), 25);
        assert_eq!(discount_percentage(rupees(100), rupees(100)), 0);
        assert_eq!(discount_percentage(Money::zero(), Money::zero()), 0);
        // 1/3 off = 33.33% → 33; 2/3 off = 66.67% → 67
        assert_eq!(discount_percentage(rupees(3), rupees(2)), 33);
        assert_eq!(discount_percentage(rupees(3), rupees(1)), 67);
        // exactly 12.5% rounds up
        assert_eq!(discount_percentage(rupees(8), rupees(7)), 13);
    }

    #[test]
    fn test_upsell_message() {
        assert_eq!(
            upsell_message(rupees(240)),
            UpsellHint::AddMore {
                shortfall: rupees(360)
            }
        );
        assert_eq!(
            upsell_message(Money::zero()),
            UpsellHint::AddMore {
                shortfall: rupees(600)
            }
        );
        assert_eq!(upsell_message(rupees(600)), UpsellHint::FreeCollectionReached);
        assert_eq!(upsell_message(rupees(4500)), UpsellHint::FreeCollectionReached);
    }
}
