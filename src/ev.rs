//! Expected value calculation
//!
//! The sharp price is treated as the best available estimate of the true
//! decimal price for an outcome. The edge over the soft book is
//! `sharp / soft - 1`.

use rust_decimal::Decimal;

/// Compute the EV edge of a soft price against the sharp reference.
///
/// Returns `None` when the soft price is not strictly positive, since the
/// division would be meaningless (a non-positive decimal odd is malformed
/// feed data, not a real price).
pub fn compute_ev(soft_price: Decimal, sharp_price: Decimal) -> Option<Decimal> {
    if soft_price <= Decimal::ZERO {
        return None;
    }
    Some(sharp_price / soft_price - Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_edge() {
        assert_eq!(compute_ev(dec!(2.0), dec!(2.2)), Some(dec!(0.1)));
    }

    #[test]
    fn test_negative_edge() {
        let ev = compute_ev(dec!(2.2), dec!(2.0)).unwrap();
        assert!(ev < Decimal::ZERO);
    }

    #[test]
    fn test_equal_prices_zero_edge() {
        for p in [dec!(1.01), dec!(2.5), dec!(10)] {
            assert_eq!(compute_ev(p, p), Some(Decimal::ZERO));
        }
    }

    #[test]
    fn test_non_positive_soft_price_rejected() {
        assert_eq!(compute_ev(Decimal::ZERO, dec!(2.0)), None);
        assert_eq!(compute_ev(dec!(-1.5), dec!(2.0)), None);
    }

    #[test]
    fn test_spec_scenario_values() {
        // soft 2.50 vs sharp 2.40 → -4%
        assert_eq!(compute_ev(dec!(2.50), dec!(2.40)), Some(dec!(-0.04)));
        // soft 2.20 vs sharp 2.40 → ~+9.09%
        let ev = compute_ev(dec!(2.20), dec!(2.40)).unwrap();
        assert!(ev > dec!(0.09) && ev < dec!(0.091));
    }
}
