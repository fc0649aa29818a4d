//! Contractual price floor enforcement.
//!
//! Raises year-1 net values to the deal's contractual minimums. On a
//! combined deal only the bed suite is floored, against the lower combo
//! floor; a single-family deal is floored against the standalone floor.
//! Each product is checked once, so the pass is idempotent.

use crate::catalog::{
    ProductId, BED_COMBO_FLOOR, BED_STANDALONE_FLOOR, PHYSICIAN_STANDALONE_FLOOR, WHT_RETENTION,
};
use crate::pricing::base::ResolvedProduct;
use crate::types::Money;

/// Applicable floor for `product` on this deal, before WHT adjustment.
/// `None` when the product carries no floor in this combination.
fn raw_floor(product: ProductId, combo: bool) -> Option<Money> {
    match (product, combo) {
        (ProductId::BedSuite, true) => Some(BED_COMBO_FLOOR),
        (ProductId::BedSuite, false) => Some(BED_STANDALONE_FLOOR),
        (ProductId::PhysicianSuite, true) => None,
        (ProductId::PhysicianSuite, false) => Some(PHYSICIAN_STANDALONE_FLOOR),
    }
}

/// Raise each resolved product to its floor. Returns true when any value
/// was adjusted; a note per adjustment is appended for the year-1 row.
///
/// A floored pure renewal (renewal base equal to the pre-floor price) has
/// its base raised with it: a contractual minimum on an unchanged contract
/// is not upsell.
pub fn enforce_floors(
    resolved: &mut [ResolvedProduct],
    combo: bool,
    apply_wht: bool,
    notes: &mut Vec<String>,
) -> bool {
    let mut adjusted = false;

    for rp in resolved.iter_mut() {
        let Some(raw) = raw_floor(rp.product, combo) else {
            continue;
        };
        let floor = if apply_wht { raw / WHT_RETENTION } else { raw };

        if rp.year_one < floor {
            let pure_renewal = rp.renewal_base == rp.year_one;
            notes.push(format!(
                "{}: year-1 price {:.2} raised to contractual minimum {:.2}",
                rp.product, rp.year_one, floor
            ));
            rp.year_one = floor;
            if pure_renewal {
                rp.renewal_base = floor;
            }
            adjusted = true;
        }
    }

    adjusted
}
