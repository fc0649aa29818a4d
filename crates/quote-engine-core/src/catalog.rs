//! Static product reference data.
//!
//! Two product families exist: a per-physician suite and a per-bed suite.
//! Variant editions encode feature tiers; the "combo" editions of the
//! physician suite are only offered when both families are on the deal and
//! carry a lower per-unit list price.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Money;

/// USD to SAR conversion at the riyal peg.
pub const USD_TO_SAR: Decimal = dec!(3.76);

/// VAT charged on SAR-denominated (indirect channel) deals.
pub const VAT_RATE: Decimal = dec!(0.15);

/// Fraction of the invoice the seller keeps after 5% withholding tax.
/// Grossing up divides by this so the intended net survives the deduction.
pub const WHT_RETENTION: Decimal = dec!(0.95);

/// Fixed uplift applied on enterprise-tier flat renewals and single-tier
/// upgrade renewals of the physician suite.
pub const TIER_UPLIFT: Decimal = dec!(0.08);

/// Fixed uplift for a two-tier (core straight to enterprise) upgrade renewal.
pub const DOUBLE_TIER_UPLIFT: Decimal = dec!(0.11);

/// Contractual minimum annual charge, physician suite sold on its own.
pub const PHYSICIAN_STANDALONE_FLOOR: Decimal = dec!(7500);

/// Contractual minimum annual charge, bed suite sold on its own.
pub const BED_STANDALONE_FLOOR: Decimal = dec!(6000);

/// Minimum annual charge for the bed suite when bundled with the
/// physician suite. Lower than standalone; only the bed side is floored
/// on a combined deal.
pub const BED_COMBO_FLOOR: Decimal = dec!(4000);

/// Product family identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductId {
    PhysicianSuite,
    BedSuite,
}

impl ProductId {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductId::PhysicianSuite => "Physician Suite",
            ProductId::BedSuite => "Bed Suite",
        }
    }

    /// Label for the per-unit count in forms and exports.
    pub fn count_label(&self) -> &'static str {
        match self {
            ProductId::PhysicianSuite => "physicians",
            ProductId::BedSuite => "beds",
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Feature tier of a physician-suite edition, used to classify renewal
/// upgrade paths. Combo and standalone editions of the same tier price
/// differently but renew identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhysicianTier {
    Core,
    Plus,
    Enterprise,
}

/// Sellable edition of the physician suite. Priced per physician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicianVariant {
    Core,
    CorePlus,
    Enterprise,
    CoreCombo,
    CorePlusCombo,
    EnterpriseCombo,
}

impl PhysicianVariant {
    pub fn tier(&self) -> PhysicianTier {
        match self {
            PhysicianVariant::Core | PhysicianVariant::CoreCombo => PhysicianTier::Core,
            PhysicianVariant::CorePlus | PhysicianVariant::CorePlusCombo => PhysicianTier::Plus,
            PhysicianVariant::Enterprise | PhysicianVariant::EnterpriseCombo => {
                PhysicianTier::Enterprise
            }
        }
    }

    /// Combo editions exist only on deals carrying both product families.
    pub fn is_combo(&self) -> bool {
        matches!(
            self,
            PhysicianVariant::CoreCombo
                | PhysicianVariant::CorePlusCombo
                | PhysicianVariant::EnterpriseCombo
        )
    }

    /// USD list price per physician per year.
    pub fn list_price(&self) -> Money {
        match self {
            PhysicianVariant::Core => dec!(259),
            PhysicianVariant::CorePlus => dec!(299),
            PhysicianVariant::Enterprise => dec!(349),
            PhysicianVariant::CoreCombo => dec!(229),
            PhysicianVariant::CorePlusCombo => dec!(269),
            PhysicianVariant::EnterpriseCombo => dec!(319),
        }
    }
}

/// Sellable edition of the bed suite. Priced per bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BedVariant {
    Standard,
    MedsManagement,
    Comprehensive,
}

impl BedVariant {
    /// How many named feature modules the edition carries beyond Standard.
    pub fn feature_level(&self) -> u8 {
        match self {
            BedVariant::Standard => 0,
            BedVariant::MedsManagement => 1,
            BedVariant::Comprehensive => 2,
        }
    }

    /// USD list price per bed per year.
    pub fn list_price(&self) -> Money {
        match self {
            BedVariant::Standard => dec!(120),
            BedVariant::MedsManagement => dec!(150),
            BedVariant::Comprehensive => dec!(180),
        }
    }
}

/// Fixed per-bed surcharge charged when a renewal upgrades into `target`
/// from `existing`. Two surcharge levels exist depending on which feature
/// set the upgrade adds. `None` when no feature is added.
pub fn bed_upgrade_surcharge(existing: BedVariant, target: BedVariant) -> Option<Money> {
    if target.feature_level() <= existing.feature_level() {
        return None;
    }
    match target {
        BedVariant::MedsManagement => Some(dec!(15)),
        BedVariant::Comprehensive => Some(dec!(25)),
        BedVariant::Standard => None,
    }
}

/// A variant of either product family. Serialized by edition name, which
/// is unique across families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variant {
    Physician(PhysicianVariant),
    Bed(BedVariant),
}

impl Variant {
    /// List price when the variant belongs to `product`; `None` on a
    /// family mismatch (the resolver substitutes zero for unresolvable
    /// catalog lookups rather than failing).
    pub fn list_price_for(&self, product: ProductId) -> Option<Money> {
        match (product, self) {
            (ProductId::PhysicianSuite, Variant::Physician(v)) => Some(v.list_price()),
            (ProductId::BedSuite, Variant::Bed(v)) => Some(v.list_price()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Physician(PhysicianVariant::Core) => "Core",
            Variant::Physician(PhysicianVariant::CorePlus) => "CorePlus",
            Variant::Physician(PhysicianVariant::Enterprise) => "Enterprise",
            Variant::Physician(PhysicianVariant::CoreCombo) => "CoreCombo",
            Variant::Physician(PhysicianVariant::CorePlusCombo) => "CorePlusCombo",
            Variant::Physician(PhysicianVariant::EnterpriseCombo) => "EnterpriseCombo",
            Variant::Bed(BedVariant::Standard) => "Standard",
            Variant::Bed(BedVariant::MedsManagement) => "MedsManagement",
            Variant::Bed(BedVariant::Comprehensive) => "Comprehensive",
        }
    }

    /// Every catalog variant for a family, in display order.
    pub fn all_for(product: ProductId) -> Vec<Variant> {
        match product {
            ProductId::PhysicianSuite => vec![
                Variant::Physician(PhysicianVariant::Core),
                Variant::Physician(PhysicianVariant::CorePlus),
                Variant::Physician(PhysicianVariant::Enterprise),
                Variant::Physician(PhysicianVariant::CoreCombo),
                Variant::Physician(PhysicianVariant::CorePlusCombo),
                Variant::Physician(PhysicianVariant::EnterpriseCombo),
            ],
            ProductId::BedSuite => vec![
                Variant::Bed(BedVariant::Standard),
                Variant::Bed(BedVariant::MedsManagement),
                Variant::Bed(BedVariant::Comprehensive),
            ],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let all = Variant::all_for(ProductId::PhysicianSuite)
            .into_iter()
            .chain(Variant::all_for(ProductId::BedSuite));
        for v in all {
            if v.name().eq_ignore_ascii_case(s) {
                return Ok(v);
            }
        }
        Err(format!("unknown variant '{s}'"))
    }
}
