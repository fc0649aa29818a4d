//! Year-level and grand-total aggregation.
//!
//! Sums the per-product schedules into per-year figures, derives the SAR
//! invoice columns and VAT, and applies the channel/deal-type revenue
//! recognition factor.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::{ProductId, VAT_RATE};
use crate::money::{to_sar, to_sar_invoice};
use crate::pricing::config::{Channel, DealType, QuoteConfig};
use crate::pricing::output::{ProductNetTotal, ProductYearBreakdown, YearlyResult};
use crate::types::Money;

/// Fraction of gross revenue recognized after the reseller's margin.
/// Fulfilment and partner-sourced channels keep a larger cut of a
/// new-logo deal's first year.
pub fn net_factor(deal_type: DealType, channel: Channel, year_idx: usize) -> Decimal {
    match channel {
        Channel::Direct => Decimal::ONE,
        Channel::Fulfilment => match deal_type {
            DealType::Renewal => dec!(0.95),
            DealType::NewLogo => {
                if year_idx == 0 {
                    dec!(0.925)
                } else {
                    dec!(0.95)
                }
            }
        },
        Channel::PartnerSourced => match deal_type {
            DealType::Renewal => dec!(0.90),
            DealType::NewLogo => {
                if year_idx == 0 {
                    dec!(0.85)
                } else {
                    dec!(0.90)
                }
            }
        },
    }
}

/// Grand totals accumulated across the schedule.
#[derive(Debug, Clone, Default)]
pub struct Totals {
    pub gross_usd: Money,
    pub gross_sar: Money,
    pub vat_sar: Money,
    pub grand_sar: Money,
    pub net_usd: Money,
    pub net_sar: Money,
}

/// Combine all products' schedules into per-year results and grand totals.
///
/// `schedules` pairs each product with its full-duration schedule; the
/// floor notes and flag land on year 1 only.
pub fn aggregate(
    schedules: &[(ProductId, Vec<Money>)],
    config: &QuoteConfig,
    floor_adjusted: bool,
    notes: &[String],
) -> (Vec<YearlyResult>, Totals, Vec<ProductNetTotal>) {
    let years = config.years as usize;
    let mut yearly = Vec::with_capacity(years);
    let mut totals = Totals::default();
    let mut product_nets: Vec<ProductNetTotal> = schedules
        .iter()
        .map(|(product, _)| ProductNetTotal {
            product: *product,
            net_usd: Decimal::ZERO,
        })
        .collect();

    for year_idx in 0..years {
        let factor = net_factor(config.deal_type, config.channel, year_idx);

        let mut year_gross = Decimal::ZERO;
        let mut breakdown = Vec::with_capacity(schedules.len());
        for (slot, (product, schedule)) in schedules.iter().enumerate() {
            let gross = schedule.get(year_idx).copied().unwrap_or(Decimal::ZERO);
            let net = gross * factor;
            year_gross += gross;
            product_nets[slot].net_usd += net;
            breakdown.push(ProductYearBreakdown {
                product: *product,
                gross_usd: gross,
                gross_sar: to_sar(gross),
                net_usd: net,
            });
        }

        let gross_sar = to_sar_invoice(year_gross);
        let vat_sar = if config.channel.vat_applies() {
            gross_sar * VAT_RATE
        } else {
            Decimal::ZERO
        };
        let grand_total_sar = gross_sar + vat_sar;
        let net_usd = year_gross * factor;
        let net_sar = to_sar(net_usd);

        totals.gross_usd += year_gross;
        totals.gross_sar += gross_sar;
        totals.vat_sar += vat_sar;
        totals.grand_sar += grand_total_sar;
        totals.net_usd += net_usd;
        totals.net_sar += net_sar;

        yearly.push(YearlyResult {
            year: (year_idx + 1) as u32,
            breakdown,
            gross_usd: year_gross,
            gross_sar,
            vat_sar,
            grand_total_sar,
            net_usd,
            net_sar,
            floor_adjusted: year_idx == 0 && floor_adjusted,
            notes: if year_idx == 0 { notes.to_vec() } else { vec![] },
        });
    }

    (yearly, totals, product_nets)
}
