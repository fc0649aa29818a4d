//! Multi-year schedule projection.
//!
//! Expands a product's year-1 value into a full-duration schedule. The two
//! pricing methods are deliberately separate folds: forward inflation
//! anchors year 1 and compounds up; reverse price protection anchors the
//! final year and divides back down. Neither fold ever reads entry 0 of
//! the rate array (forward compounds from year 2 on; reverse divides by
//! entries 2..N), so pre-zeroed and un-zeroed year-1 entries behave
//! identically. The entry is forced to zero here to make that explicit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::money::round_up_to;
use crate::pricing::config::{Channel, PricingMethod, ProductSelection, QuoteConfig};
use crate::types::{Money, Rate};
use crate::{QuoteError, QuoteResult};

/// Resolve the effective per-year rate array for one product: the
/// product's own rates when present, the deal-level array otherwise.
/// Missing entries count as 0% (with one warning per product); the
/// year-1 entry is forced to zero since no fold reads it.
fn resolved_rates(
    sel: &ProductSelection,
    config: &QuoteConfig,
    warnings: &mut Vec<String>,
) -> Vec<Rate> {
    let source = sel
        .escalation_rates
        .as_deref()
        .unwrap_or(&config.escalation_rates);

    let years = config.years as usize;
    // both folds read entries 1..years, so a single-year deal needs none
    if years > 1 && source.len() < years {
        warnings.push(format!(
            "{}: escalation rates cover {} of {} years; missing years treated as 0%",
            sel.product,
            source.len(),
            years
        ));
    }

    let mut rates: Vec<Rate> = (0..years)
        .map(|i| source.get(i).copied().unwrap_or(Decimal::ZERO))
        .collect();
    rates[0] = Decimal::ZERO;

    rates
}

fn check_rates(product: &str, rates: &[Rate]) -> QuoteResult<()> {
    for &rate in rates {
        if rate <= dec!(-1) {
            return Err(QuoteError::DegenerateRate {
                context: format!("{product} escalation"),
                rate,
            });
        }
    }
    Ok(())
}

/// Forward fold: year 1 is the anchor, each later year compounds by its
/// stated rate.
fn forward_schedule(year_one: Money, rates: &[Rate]) -> Vec<Money> {
    let mut schedule = Vec::with_capacity(rates.len());
    schedule.push(year_one);
    for i in 1..rates.len() {
        let prev = schedule[i - 1];
        schedule.push(prev * (Decimal::ONE + rates[i]));
    }
    schedule
}

/// Reverse fold: the final year is the anchor, each earlier year is the
/// next year divided by that year's protection rate.
fn reverse_schedule(year_one: Money, rates: &[Rate]) -> Vec<Money> {
    let years = rates.len();
    let mut schedule = vec![Decimal::ZERO; years];
    schedule[years - 1] = year_one;
    for i in (0..years - 1).rev() {
        schedule[i] = schedule[i + 1] / (Decimal::ONE + rates[i + 1]);
    }
    schedule
}

/// Replace the schedule with equal installments of its mean. Total
/// contract value is preserved; only the distribution changes.
fn flatten(schedule: &mut Vec<Money>) {
    let years = schedule.len();
    if years == 0 {
        return;
    }
    let total: Money = schedule.iter().copied().sum();
    let mean = total / Decimal::from(years as u64);
    *schedule = vec![mean; years];
}

/// Round each year up to the channel's increment: nearest 100 USD for
/// direct deals; for indirect deals the SAR figure is rounded up to the
/// nearest 1,000 and converted back so downstream USD figures stay
/// comparable across channels.
fn round_schedule(schedule: &mut [Money], channel: Channel) {
    for value in schedule.iter_mut() {
        *value = match channel {
            Channel::Direct => round_up_to(*value, dec!(100)),
            Channel::Fulfilment | Channel::PartnerSourced => {
                let sar = *value * crate::catalog::USD_TO_SAR;
                round_up_to(sar, dec!(1000)) / crate::catalog::USD_TO_SAR
            }
        };
    }
}

/// Project one product's year-1 value across the contract duration and
/// apply the optional flat-pricing and rounding post-processing.
pub fn project(
    year_one: Money,
    sel: &ProductSelection,
    config: &QuoteConfig,
    warnings: &mut Vec<String>,
) -> QuoteResult<Vec<Money>> {
    let rates = resolved_rates(sel, config, warnings);
    check_rates(sel.product.display_name(), &rates)?;

    let mut schedule = match config.method {
        PricingMethod::ForwardInflation => forward_schedule(year_one, &rates),
        PricingMethod::ReversePriceProtection => reverse_schedule(year_one, &rates),
    };

    if config.flat_pricing {
        flatten(&mut schedule);
    }
    if config.rounding {
        round_schedule(&mut schedule, config.channel);
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PhysicianVariant, ProductId, Variant};
    use crate::pricing::config::DealType;

    fn config(years: u32, method: PricingMethod, rates: Vec<Rate>) -> QuoteConfig {
        QuoteConfig {
            deal_type: DealType::NewLogo,
            channel: Channel::Direct,
            years,
            method,
            products: vec![selection()],
            escalation_rates: rates,
            apply_wht: false,
            flat_pricing: false,
            rounding: false,
        }
    }

    fn selection() -> ProductSelection {
        ProductSelection {
            product: ProductId::PhysicianSuite,
            variant: Variant::Physician(PhysicianVariant::Core),
            count: dec!(10),
            existing_variant: None,
            existing_count: None,
            discount: Decimal::ZERO,
            expiring_amount: Decimal::ZERO,
            stats_changed: false,
            renewal_uplift: Decimal::ZERO,
            escalation_rates: None,
        }
    }

    #[test]
    fn test_forward_compounds_from_year_one() {
        let cfg = config(
            3,
            PricingMethod::ForwardInflation,
            vec![dec!(0), dec!(0.08), dec!(0.08)],
        );
        let mut warnings = vec![];
        let schedule = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();

        assert_eq!(schedule[0], dec!(1000));
        assert_eq!(schedule[1], dec!(1080));
        assert_eq!(schedule[2], dec!(1080) * dec!(1.08));
    }

    #[test]
    fn test_forward_ignores_anchor_rate_entry() {
        // a non-zero entry for year 1 changes nothing
        let cfg = config(
            2,
            PricingMethod::ForwardInflation,
            vec![dec!(0.5), dec!(0.08)],
        );
        let mut warnings = vec![];
        let schedule = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();
        assert_eq!(schedule, vec![dec!(1000), dec!(1080)]);
    }

    #[test]
    fn test_reverse_anchors_final_year() {
        let cfg = config(
            3,
            PricingMethod::ReversePriceProtection,
            vec![dec!(0), dec!(0.05), dec!(0.05)],
        );
        let mut warnings = vec![];
        let schedule = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();

        assert_eq!(schedule[2], dec!(1000));
        assert_eq!(schedule[1], dec!(1000) / dec!(1.05));
        assert_eq!(schedule[0], dec!(1000) / dec!(1.05) / dec!(1.05));
    }

    #[test]
    fn test_reverse_reads_final_year_entry_for_earlier_years() {
        let cfg = config(
            2,
            PricingMethod::ReversePriceProtection,
            vec![dec!(0.05), dec!(0.10)],
        );
        let mut warnings = vec![];
        let schedule = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();
        // year 2 anchors at the computed base; year 1 divides out year 2's
        // protection rate, while entry 0 is never read
        assert_eq!(schedule[1], dec!(1000));
        assert_eq!(schedule[0], dec!(1000) / dec!(1.10));
    }

    #[test]
    fn test_single_year_schedule() {
        let cfg = config(1, PricingMethod::ForwardInflation, vec![]);
        let mut warnings = vec![];
        let schedule = project(dec!(500), &selection(), &cfg, &mut warnings).unwrap();
        assert_eq!(schedule, vec![dec!(500)]);
        // an empty rate array is normal for a one-year deal
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_short_rate_array_warns_and_defaults_to_zero() {
        let cfg = config(4, PricingMethod::ForwardInflation, vec![dec!(0), dec!(0.08)]);
        let mut warnings = vec![];
        let schedule = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();

        assert_eq!(schedule[1], dec!(1080));
        // years 3 and 4 flat at 0%
        assert_eq!(schedule[2], dec!(1080));
        assert_eq!(schedule[3], dec!(1080));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_per_product_rates_override_deal_rates() {
        let cfg = config(2, PricingMethod::ForwardInflation, vec![dec!(0), dec!(0.50)]);
        let mut sel = selection();
        sel.escalation_rates = Some(vec![dec!(0), dec!(0.10)]);
        let mut warnings = vec![];
        let schedule = project(dec!(1000), &sel, &cfg, &mut warnings).unwrap();
        assert_eq!(schedule[1], dec!(1100));
    }

    #[test]
    fn test_degenerate_rate_rejected() {
        // a -100% protection rate on a non-anchor year would divide by zero
        let cfg = config(
            3,
            PricingMethod::ReversePriceProtection,
            vec![dec!(0), dec!(-1), dec!(0.05)],
        );
        let mut warnings = vec![];
        assert!(project(dec!(1000), &selection(), &cfg, &mut warnings).is_err());
    }

    #[test]
    fn test_degenerate_rate_on_anchor_year_is_harmless() {
        // the anchor entry is never read, so even -100% there is ignored
        let cfg = config(
            2,
            PricingMethod::ForwardInflation,
            vec![dec!(-1), dec!(0.08)],
        );
        let mut warnings = vec![];
        let schedule = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();
        assert_eq!(schedule[1], dec!(1080));
    }

    #[test]
    fn test_flat_pricing_preserves_total() {
        let mut cfg = config(
            3,
            PricingMethod::ForwardInflation,
            vec![dec!(0), dec!(0.08), dec!(0.08)],
        );
        let mut warnings = vec![];
        let raw = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();
        let total_before: Decimal = raw.iter().copied().sum();

        cfg.flat_pricing = true;
        let flat = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();
        let total_after: Decimal = flat.iter().copied().sum();

        assert!((total_before - total_after).abs() < dec!(0.000001));
        assert_eq!(flat[0], flat[1]);
        assert_eq!(flat[1], flat[2]);
    }

    #[test]
    fn test_direct_rounding_to_hundred_usd() {
        let mut cfg = config(2, PricingMethod::ForwardInflation, vec![dec!(0), dec!(0.08)]);
        cfg.rounding = true;
        let mut warnings = vec![];
        let schedule = project(dec!(1010), &selection(), &cfg, &mut warnings).unwrap();

        assert_eq!(schedule[0], dec!(1100));
        // 1010 * 1.08 = 1090.8 -> 1100
        assert_eq!(schedule[1], dec!(1100));
    }

    #[test]
    fn test_indirect_rounding_via_sar_thousand() {
        let mut cfg = config(1, PricingMethod::ForwardInflation, vec![]);
        cfg.channel = Channel::Fulfilment;
        cfg.rounding = true;
        let mut warnings = vec![];
        let schedule = project(dec!(1000), &selection(), &cfg, &mut warnings).unwrap();

        // 1000 USD = 3760 SAR -> 4000 SAR -> back to USD
        assert_eq!(schedule[0], dec!(4000) / dec!(3.76));
    }
}
