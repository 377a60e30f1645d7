//! Order pricing
//!
//! Subtotals are always recomputed from catalog prices; coupon discounts are
//! percentage-based with an activity window and a minimum-order gate; the
//! final total is clamped to zero.

use rust_decimal::Decimal;

use super::money::{round2, to_decimal};
use crate::db::models::Coupon;

/// Accumulate a subtotal from resolved (catalog price, quantity) pairs
pub fn subtotal(lines: &[(f64, i32)]) -> Decimal {
    lines
        .iter()
        .map(|(price, qty)| to_decimal(*price) * Decimal::from(*qty))
        .sum()
}

/// Compute the discount a coupon yields on a subtotal
///
/// Returns zero when the coupon is inactive, expired, or the subtotal is
/// below its minimum; otherwise `round2(subtotal * pct / 100)` with the
/// percentage clamped to [0, 100].
pub fn compute_discount(subtotal: Decimal, coupon: &Coupon, now: i64) -> Decimal {
    if !coupon.is_active {
        return Decimal::ZERO;
    }
    if coupon.expiration < now {
        return Decimal::ZERO;
    }
    if subtotal < to_decimal(coupon.min_amount) {
        return Decimal::ZERO;
    }

    let pct = to_decimal(coupon.discount)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    round2(subtotal * pct / Decimal::ONE_HUNDRED)
}

/// Final total: `max(0, round2(subtotal - discount))`
pub fn final_total(subtotal: Decimal, discount: Decimal) -> Decimal {
    round2(subtotal - discount).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::money::to_f64;

    fn coupon(discount: f64, min_amount: f64, expiration: i64, is_active: bool) -> Coupon {
        Coupon {
            id: None,
            code: "SAVE10".to_string(),
            discount,
            min_amount,
            expiration,
            is_active,
            created_at: 0,
        }
    }

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_subtotal_from_catalog_prices() {
        // 2 × 25.00
        let sub = subtotal(&[(25.0, 2)]);
        assert_eq!(to_f64(sub), 50.0);
    }

    #[test]
    fn test_ten_percent_coupon() {
        let sub = subtotal(&[(25.0, 2)]);
        let cp = coupon(10.0, 10.0, NOW + 1, true);
        let discount = compute_discount(sub, &cp, NOW);
        assert_eq!(to_f64(discount), 5.0);
        assert_eq!(to_f64(final_total(sub, discount)), 45.0);
    }

    #[test]
    fn test_min_amount_gate() {
        let sub = subtotal(&[(25.0, 2)]);
        let cp = coupon(10.0, 100.0, NOW + 1, true);
        let discount = compute_discount(sub, &cp, NOW);
        assert_eq!(to_f64(discount), 0.0);
        assert_eq!(to_f64(final_total(sub, discount)), 50.0);
    }

    #[test]
    fn test_expired_coupon_yields_zero() {
        let sub = subtotal(&[(25.0, 2)]);
        let cp = coupon(10.0, 0.0, NOW - 1, true);
        assert_eq!(compute_discount(sub, &cp, NOW), Decimal::ZERO);
    }

    #[test]
    fn test_inactive_coupon_yields_zero() {
        let sub = subtotal(&[(25.0, 2)]);
        let cp = coupon(10.0, 0.0, NOW + 1, false);
        assert_eq!(compute_discount(sub, &cp, NOW), Decimal::ZERO);
    }

    #[test]
    fn test_percentage_clamped_to_100() {
        let sub = subtotal(&[(10.0, 1)]);
        let cp = coupon(250.0, 0.0, NOW + 1, true);
        let discount = compute_discount(sub, &cp, NOW);
        assert_eq!(to_f64(discount), 10.0);
        assert_eq!(to_f64(final_total(sub, discount)), 0.0);
    }

    #[test]
    fn test_negative_percentage_clamped_to_zero() {
        let sub = subtotal(&[(10.0, 1)]);
        let cp = coupon(-5.0, 0.0, NOW + 1, true);
        assert_eq!(compute_discount(sub, &cp, NOW), Decimal::ZERO);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // 10.05 × 10% = 1.005 → 1.01
        let sub = subtotal(&[(10.05, 1)]);
        let cp = coupon(10.0, 0.0, NOW + 1, true);
        let discount = compute_discount(sub, &cp, NOW);
        assert_eq!(to_f64(discount), 1.01);
    }

    #[test]
    fn test_total_never_negative() {
        let total = final_total(to_decimal(5.0), to_decimal(10.0));
        assert_eq!(to_f64(total), 0.0);
    }

    #[test]
    fn test_unresolvable_items_do_not_contribute() {
        // The service skips unresolved refs before calling subtotal(); a
        // forged client price on a skipped item never reaches this path.
        let sub = subtotal(&[(25.0, 2)]);
        assert_eq!(to_f64(sub), 50.0);
    }
}
