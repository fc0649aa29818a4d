//! Currency conversion and rounding helpers shared by the pricing stages.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::USD_TO_SAR;
use crate::types::Money;

/// Round `value` up to the nearest multiple of `increment`.
pub fn round_up_to(value: Money, increment: Decimal) -> Money {
    if increment.is_zero() {
        return value;
    }
    (value / increment).ceil() * increment
}

/// Straight USD to SAR conversion, no rounding.
pub fn to_sar(usd: Money) -> Money {
    usd * USD_TO_SAR
}

/// USD to SAR as it appears on an invoice line: converted at the peg and
/// rounded up to the nearest 10 SAR.
pub fn to_sar_invoice(usd: Money) -> Money {
    round_up_to(usd * USD_TO_SAR, dec!(10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_to_increment() {
        assert_eq!(round_up_to(dec!(101), dec!(100)), dec!(200));
        assert_eq!(round_up_to(dec!(200), dec!(100)), dec!(200));
        assert_eq!(round_up_to(dec!(0.01), dec!(1000)), dec!(1000));
        assert_eq!(round_up_to(dec!(0), dec!(100)), dec!(0));
    }

    #[test]
    fn test_round_up_zero_increment_passthrough() {
        assert_eq!(round_up_to(dec!(123.45), dec!(0)), dec!(123.45));
    }

    #[test]
    fn test_invoice_conversion_rounds_up_to_ten() {
        // 1000 USD -> 3760 SAR, already a multiple of 10
        assert_eq!(to_sar_invoice(dec!(1000)), dec!(3760));
        // 1001 USD -> 3763.76 -> 3770
        assert_eq!(to_sar_invoice(dec!(1001)), dec!(3770));
    }

    #[test]
    fn test_straight_conversion_unrounded() {
        assert_eq!(to_sar(dec!(1001)), dec!(3763.76));
    }
}
