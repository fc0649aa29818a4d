//! Year-1 base resolver.
//!
//! Produces each selected product's year-1 net USD value. New-logo deals
//! price from list; renewals price from the expiring amount through an
//! explicit upgrade-path table, keeping track of how much of the result is
//! plain renewal base versus upsell.

use rust_decimal::Decimal;

use crate::catalog::{
    bed_upgrade_surcharge, ProductId, PhysicianTier, Variant, DOUBLE_TIER_UPLIFT, TIER_UPLIFT,
    WHT_RETENTION,
};
use crate::pricing::config::{ProductSelection, QuoteConfig};
use crate::types::Money;

/// Named renewal path for a physician-suite variant transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsellPath {
    /// Same tier, below enterprise: plain uplift, no upsell.
    SameTier,
    /// Flat renewal at the enterprise tier: fixed 8% uplift.
    SameTierEnterprise,
    /// Core to Plus: standard uplift plus 8 points.
    CoreToPlus,
    /// Core straight to Enterprise: fixed 11% uplift.
    CoreToEnterprise,
    /// Plus to Enterprise: fixed 8% uplift.
    PlusToEnterprise,
    /// Transition outside the table (downgrade, or missing existing
    /// variant). Falls back to the standard base and is surfaced as a
    /// warning rather than silently absorbed.
    Unmatched,
}

/// One product's resolved year-1 value.
#[derive(Debug, Clone)]
pub struct ResolvedProduct {
    pub product: ProductId,
    /// Year-1 net USD value, pre-floor.
    pub year_one: Money,
    /// Portion of `year_one` attributable to plain uplift of the expiring
    /// amount. Zero on new-logo deals.
    pub renewal_base: Money,
    /// Upgrade path taken, renewal physician lines only.
    pub path: Option<UpsellPath>,
}

/// Classify a physician-suite tier transition.
pub fn classify_transition(existing: PhysicianTier, target: PhysicianTier) -> UpsellPath {
    use PhysicianTier::*;
    match (existing, target) {
        (Core, Core) | (Plus, Plus) => UpsellPath::SameTier,
        (Enterprise, Enterprise) => UpsellPath::SameTierEnterprise,
        (Core, Plus) => UpsellPath::CoreToPlus,
        (Core, Enterprise) => UpsellPath::CoreToEnterprise,
        (Plus, Enterprise) => UpsellPath::PlusToEnterprise,
        _ => UpsellPath::Unmatched,
    }
}

/// Fresh per-unit calculation: list price x count, discounted, and grossed
/// up for WHT when active. Unresolvable catalog lookups price at zero.
fn fresh_net(sel: &ProductSelection, apply_wht: bool, warnings: &mut Vec<String>) -> Money {
    let unit_price = match sel.variant.list_price_for(sel.product) {
        Some(p) => p,
        None => {
            warnings.push(format!(
                "{}: variant '{}' has no list price for this product; pricing at zero",
                sel.product, sel.variant
            ));
            Decimal::ZERO
        }
    };
    let gross = unit_price * sel.count;
    let net = gross * (Decimal::ONE - sel.discount);
    if apply_wht {
        net / WHT_RETENTION
    } else {
        net
    }
}

/// Resolve one selected product to its year-1 net value.
pub fn resolve_year_one(
    sel: &ProductSelection,
    config: &QuoteConfig,
    warnings: &mut Vec<String>,
) -> ResolvedProduct {
    let fresh = fresh_net(sel, config.apply_wht, warnings);

    if !config.is_renewal() {
        return ResolvedProduct {
            product: sel.product,
            year_one: fresh,
            renewal_base: Decimal::ZERO,
            path: None,
        };
    }

    let standard_base = sel.expiring_amount * (Decimal::ONE + sel.renewal_uplift);

    match sel.product {
        ProductId::PhysicianSuite => {
            resolve_physician_renewal(sel, fresh, standard_base, warnings)
        }
        ProductId::BedSuite => resolve_bed_renewal(sel, config.apply_wht, standard_base, warnings),
    }
}

fn resolve_physician_renewal(
    sel: &ProductSelection,
    fresh: Money,
    standard_base: Money,
    warnings: &mut Vec<String>,
) -> ResolvedProduct {
    let expiring = sel.expiring_amount;

    let path = match (physician_tier(sel.existing_variant), physician_tier(Some(sel.variant))) {
        (Some(existing), Some(target)) => classify_transition(existing, target),
        _ => UpsellPath::Unmatched,
    };

    let (mut price, mut renewal_base) = match path {
        UpsellPath::SameTier => (standard_base, standard_base),
        UpsellPath::SameTierEnterprise => {
            let p = expiring * (Decimal::ONE + TIER_UPLIFT);
            (p, p)
        }
        UpsellPath::CoreToPlus => (
            expiring * (Decimal::ONE + sel.renewal_uplift + TIER_UPLIFT),
            standard_base,
        ),
        UpsellPath::CoreToEnterprise => (
            expiring * (Decimal::ONE + DOUBLE_TIER_UPLIFT),
            standard_base,
        ),
        UpsellPath::PlusToEnterprise => {
            (expiring * (Decimal::ONE + TIER_UPLIFT), standard_base)
        }
        UpsellPath::Unmatched => {
            warnings.push(format!(
                "{}: variant transition {} -> {} is outside the renewal table; \
                 using standard uplift base",
                sel.product,
                sel.existing_variant
                    .map(|v| v.name())
                    .unwrap_or("(none)"),
                sel.variant
            ));
            (standard_base, standard_base)
        }
    };

    // Stats changed and the fresh per-head value beats the path price: the
    // head-count growth is real upsell, so the path gives way.
    if sel.stats_changed && fresh > price {
        price = fresh;
        renewal_base = standard_base;
    }

    ResolvedProduct {
        product: sel.product,
        year_one: price,
        renewal_base,
        path: Some(path),
    }
}

fn resolve_bed_renewal(
    sel: &ProductSelection,
    apply_wht: bool,
    standard_base: Money,
    warnings: &mut Vec<String>,
) -> ResolvedProduct {
    let (existing, target) = match (bed_variant(sel.existing_variant), bed_variant(Some(sel.variant)))
    {
        (Some(e), Some(t)) => (e, t),
        _ => {
            warnings.push(format!(
                "{}: renewal is missing a usable existing/target bed variant; \
                 using standard uplift base",
                sel.product
            ));
            return ResolvedProduct {
                product: sel.product,
                year_one: standard_base,
                renewal_base: standard_base,
                path: None,
            };
        }
    };

    // Feature upgrades charge a fixed per-bed surcharge on top of the
    // uplifted base; the surcharge is pure upsell.
    let year_one = match bed_upgrade_surcharge(existing, target) {
        Some(per_bed) => {
            let mut surcharge = per_bed * sel.count;
            if apply_wht {
                surcharge /= WHT_RETENTION;
            }
            standard_base + surcharge
        }
        None => {
            if target.feature_level() < existing.feature_level() {
                warnings.push(format!(
                    "{}: renewal drops features ({:?} -> {:?}); no surcharge applied",
                    sel.product, existing, target
                ));
            }
            standard_base
        }
    };

    ResolvedProduct {
        product: sel.product,
        year_one,
        renewal_base: standard_base,
        path: None,
    }
}

fn physician_tier(variant: Option<Variant>) -> Option<PhysicianTier> {
    match variant {
        Some(Variant::Physician(v)) => Some(v.tier()),
        _ => None,
    }
}

fn bed_variant(variant: Option<Variant>) -> Option<crate::catalog::BedVariant> {
    match variant {
        Some(Variant::Bed(v)) => Some(v),
        _ => None,
    }
}
