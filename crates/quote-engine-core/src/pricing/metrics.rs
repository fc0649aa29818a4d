//! Summary metrics: ACV and the renewal-base / upsell split.

use rust_decimal::Decimal;

use crate::pricing::aggregate::net_factor;
use crate::pricing::config::QuoteConfig;
use crate::types::Money;

/// Derived scalar metrics for the quote.
#[derive(Debug, Clone)]
pub struct AcvMetrics {
    pub acv_usd: Money,
    pub net_acv_usd: Money,
    pub renewal_base_acv: Option<Money>,
    pub net_renewal_base_acv: Option<Money>,
    pub upsell_acv: Option<Money>,
    pub net_upsell_acv: Option<Money>,
}

/// Split the aggregated totals into ACV figures.
///
/// The renewal-base/upsell split uses the year-0 net factor uniformly; for
/// renewal deals the factor is constant across years anyway, and the split
/// is an annual summary rather than a year-by-year figure.
pub fn split_metrics(
    config: &QuoteConfig,
    total_gross_usd: Money,
    total_net_usd: Money,
    renewal_base_total: Money,
) -> AcvMetrics {
    let years = Decimal::from(config.years);
    let acv_usd = total_gross_usd / years;
    let net_acv_usd = total_net_usd / years;

    if !config.is_renewal() {
        return AcvMetrics {
            acv_usd,
            net_acv_usd,
            renewal_base_acv: None,
            net_renewal_base_acv: None,
            upsell_acv: None,
            net_upsell_acv: None,
        };
    }

    let factor = net_factor(config.deal_type, config.channel, 0);
    // a base estimate above the realized ACV must not go negative
    let upsell = (acv_usd - renewal_base_total).max(Decimal::ZERO);

    AcvMetrics {
        acv_usd,
        net_acv_usd,
        renewal_base_acv: Some(renewal_base_total),
        net_renewal_base_acv: Some(renewal_base_total * factor),
        upsell_acv: Some(upsell),
        net_upsell_acv: Some(upsell * factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PhysicianVariant, ProductId, Variant};
    use crate::pricing::config::{Channel, DealType, PricingMethod, ProductSelection};
    use rust_decimal_macros::dec;

    fn config(deal_type: DealType, channel: Channel, years: u32) -> QuoteConfig {
        QuoteConfig {
            deal_type,
            channel,
            years,
            method: PricingMethod::ForwardInflation,
            products: vec![ProductSelection {
                product: ProductId::PhysicianSuite,
                variant: Variant::Physician(PhysicianVariant::Core),
                count: dec!(1),
                existing_variant: None,
                existing_count: None,
                discount: Decimal::ZERO,
                expiring_amount: Decimal::ZERO,
                stats_changed: false,
                renewal_uplift: Decimal::ZERO,
                escalation_rates: None,
            }],
            escalation_rates: vec![],
            apply_wht: false,
            flat_pricing: false,
            rounding: false,
        }
    }

    #[test]
    fn test_acv_divides_by_duration() {
        let cfg = config(DealType::NewLogo, Channel::Direct, 3);
        let m = split_metrics(&cfg, dec!(30000), dec!(30000), Decimal::ZERO);

        assert_eq!(m.acv_usd, dec!(10000));
        assert_eq!(m.net_acv_usd, dec!(10000));
        assert!(m.renewal_base_acv.is_none());
        assert!(m.upsell_acv.is_none());
    }

    #[test]
    fn test_renewal_split() {
        let cfg = config(DealType::Renewal, Channel::PartnerSourced, 1);
        let m = split_metrics(&cfg, dec!(12000), dec!(10800), dec!(10000));

        assert_eq!(m.acv_usd, dec!(12000));
        assert_eq!(m.renewal_base_acv, Some(dec!(10000)));
        assert_eq!(m.upsell_acv, Some(dec!(2000)));
        // partner-sourced renewal factor 0.90
        assert_eq!(m.net_renewal_base_acv, Some(dec!(9000)));
        assert_eq!(m.net_upsell_acv, Some(dec!(1800)));
    }

    #[test]
    fn test_upsell_clamped_non_negative() {
        let cfg = config(DealType::Renewal, Channel::Fulfilment, 1);
        let m = split_metrics(&cfg, dec!(9000), dec!(8550), dec!(9500));

        assert_eq!(m.upsell_acv, Some(Decimal::ZERO));
        assert_eq!(m.net_upsell_acv, Some(Decimal::ZERO));
    }
}
