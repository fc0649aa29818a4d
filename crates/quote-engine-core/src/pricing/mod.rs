//! The pricing computation engine.
//!
//! One pure operation, [`compute_schedule`], turns a deal configuration
//! into a complete financial schedule through five stages: year-1 base
//! resolution, floor enforcement, multi-year projection, aggregation, and
//! the ACV metrics split. Callers re-run it in full on any input change;
//! nothing is cached or mutated between calls.

pub mod aggregate;
pub mod base;
pub mod config;
pub mod floors;
pub mod metrics;
pub mod output;
pub mod projection;

use std::time::Instant;

use rust_decimal::Decimal;

use crate::types::{with_metadata, ComputationOutput, Currency, Money};
use crate::{QuoteError, QuoteResult};

pub use config::{Channel, DealType, PricingMethod, ProductSelection, QuoteConfig};
pub use output::{ProductNetTotal, ProductYearBreakdown, QuoteOutput, YearlyResult};

/// Compute the full revenue schedule for one deal configuration.
///
/// Total over any numerically valid input: unresolvable catalog or rate
/// lookups price at zero with a warning. The only hard errors are violated
/// preconditions (zero years, no products, out-of-range discount) and
/// escalation rates at or below -100%.
pub fn compute_schedule(config: &QuoteConfig) -> QuoteResult<ComputationOutput<QuoteOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(config)?;

    // Stage 1: year-1 base values and the renewal-base accumulator.
    let mut resolved: Vec<base::ResolvedProduct> = config
        .products
        .iter()
        .map(|sel| base::resolve_year_one(sel, config, &mut warnings))
        .collect();

    // Stage 2: contractual floors.
    let mut notes: Vec<String> = Vec::new();
    let floor_adjusted = floors::enforce_floors(
        &mut resolved,
        config.is_combo(),
        config.apply_wht,
        &mut notes,
    );

    let renewal_base_total: Money = resolved.iter().map(|rp| rp.renewal_base).sum();

    // Stage 3: per-product multi-year schedules.
    let mut schedules = Vec::with_capacity(resolved.len());
    for (sel, rp) in config.products.iter().zip(&resolved) {
        let schedule = projection::project(rp.year_one, sel, config, &mut warnings)?;
        schedules.push((rp.product, schedule));
    }

    // Stage 4: per-year and grand totals.
    let (yearly_results, totals, product_net_totals) =
        aggregate::aggregate(&schedules, config, floor_adjusted, &notes);

    // Stage 5: ACV metrics.
    let m = metrics::split_metrics(
        config,
        totals.gross_usd,
        totals.net_usd,
        renewal_base_total,
    );

    let output = QuoteOutput {
        yearly_results,
        total_gross_usd: totals.gross_usd,
        total_gross_sar: totals.gross_sar,
        total_vat_sar: totals.vat_sar,
        total_grand_sar: totals.grand_sar,
        total_net_usd: totals.net_usd,
        total_net_sar: totals.net_sar,
        product_net_totals,
        acv_usd: m.acv_usd,
        net_acv_usd: m.net_acv_usd,
        renewal_base_acv: m.renewal_base_acv,
        net_renewal_base_acv: m.net_renewal_base_acv,
        upsell_acv: m.upsell_acv,
        net_upsell_acv: m.net_upsell_acv,
        currency_to_display: if config.channel.is_direct() {
            Currency::USD
        } else {
            Currency::SAR
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Multi-year deal revenue schedule",
        config,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(config: &QuoteConfig) -> QuoteResult<()> {
    if config.years == 0 {
        return Err(QuoteError::InvalidInput {
            field: "years".into(),
            reason: "Contract duration must be at least 1 year".into(),
        });
    }
    if config.products.is_empty() {
        return Err(QuoteError::InvalidInput {
            field: "products".into(),
            reason: "At least one product must be selected".into(),
        });
    }
    for (idx, sel) in config.products.iter().enumerate() {
        if sel.discount < Decimal::ZERO || sel.discount > Decimal::ONE {
            return Err(QuoteError::InvalidInput {
                field: format!("products[{idx}].discount"),
                reason: "Discount must be between 0 and 1".into(),
            });
        }
        if sel.count < Decimal::ZERO {
            return Err(QuoteError::InvalidInput {
                field: format!("products[{idx}].count"),
                reason: "Unit count cannot be negative".into(),
            });
        }
        if sel.expiring_amount < Decimal::ZERO {
            return Err(QuoteError::InvalidInput {
                field: format!("products[{idx}].expiring_amount"),
                reason: "Expiring amount cannot be negative".into(),
            });
        }
        if sel.renewal_uplift <= Decimal::NEGATIVE_ONE {
            return Err(QuoteError::DegenerateRate {
                context: format!("products[{idx}].renewal_uplift"),
                rate: sel.renewal_uplift,
            });
        }
    }
    Ok(())
}
