//! Input model for one quote computation.
//!
//! A `QuoteConfig` is assembled once per request and never mutated; the
//! engine is a pure function of it. All rates are fractions (0.05 = 5%).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{ProductId, Variant};
use crate::types::{Money, Rate};

/// Whether the deal opens a new account or renews an expiring one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealType {
    NewLogo,
    Renewal,
}

/// Sales channel. Direct deals are USD-invoiced with no VAT; fulfilment
/// and partner-sourced deals are SAR-denominated and VAT-liable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Direct,
    Fulfilment,
    PartnerSourced,
}

impl Channel {
    pub fn is_direct(&self) -> bool {
        matches!(self, Channel::Direct)
    }

    pub fn vat_applies(&self) -> bool {
        !self.is_direct()
    }
}

/// Multi-year pricing method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingMethod {
    /// Year 1 anchors the schedule; later years compound forward by each
    /// year's escalation rate.
    ForwardInflation,
    /// The final year anchors the schedule; earlier years are derived
    /// backward by dividing out each year's protection rate.
    ReversePriceProtection,
}

/// One selected product line on the deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSelection {
    pub product: ProductId,
    pub variant: Variant,
    /// Unit count (physicians or beds).
    pub count: Decimal,
    /// Variant on the expiring contract. Renewals only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_variant: Option<Variant>,
    /// Unit count on the expiring contract. Renewals only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_count: Option<Decimal>,
    /// Base discount off list, as a fraction of gross.
    #[serde(default)]
    pub discount: Rate,
    /// Annual value of the expiring contract. Renewals only.
    #[serde(default)]
    pub expiring_amount: Money,
    /// Set when the customer's unit statistics changed enough that a fresh
    /// per-unit calculation may supersede the renewal uplift path.
    #[serde(default)]
    pub stats_changed: bool,
    /// Standard renewal uplift for this product, as a fraction.
    #[serde(default)]
    pub renewal_uplift: Rate,
    /// Per-product escalation rates, one entry per contract year.
    /// Falls back to the deal-level array when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_rates: Option<Vec<Rate>>,
}

/// Complete configuration for one quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    pub deal_type: DealType,
    pub channel: Channel,
    /// Contract duration in years, at least 1.
    pub years: u32,
    pub method: PricingMethod,
    /// Selected product lines, non-empty, in display order.
    pub products: Vec<ProductSelection>,
    /// Deal-level escalation rates, one entry per contract year. The
    /// anchor year of the chosen method never reads its entry; missing
    /// entries count as 0%.
    #[serde(default)]
    pub escalation_rates: Vec<Rate>,
    /// Gross prices up for the 5% withholding tax.
    #[serde(default)]
    pub apply_wht: bool,
    /// Replace the schedule with equal installments of its mean.
    #[serde(default)]
    pub flat_pricing: bool,
    /// Round each year up to a currency-appropriate increment.
    #[serde(default)]
    pub rounding: bool,
}

impl QuoteConfig {
    pub fn is_renewal(&self) -> bool {
        self.deal_type == DealType::Renewal
    }

    /// True when both product families are on the deal, which activates
    /// combo floors and combo variant pricing.
    pub fn is_combo(&self) -> bool {
        let has_physician = self
            .products
            .iter()
            .any(|p| p.product == ProductId::PhysicianSuite);
        let has_bed = self.products.iter().any(|p| p.product == ProductId::BedSuite);
        has_physician && has_bed
    }
}
