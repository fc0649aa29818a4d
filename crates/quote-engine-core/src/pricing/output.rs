//! Result model for one quote computation.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;
use crate::types::{Currency, Money};

/// One product's figures within one contract year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductYearBreakdown {
    pub product: ProductId,
    pub gross_usd: Money,
    /// Straight conversion at the peg, for display alongside the year
    /// totals (which carry the invoice rounding).
    pub gross_sar: Money,
    pub net_usd: Money,
}

/// One contract year of the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyResult {
    /// 1-based contract year.
    pub year: u32,
    pub breakdown: Vec<ProductYearBreakdown>,
    pub gross_usd: Money,
    /// Invoice SAR: converted at the peg, rounded up to the nearest 10.
    pub gross_sar: Money,
    /// Zero on direct-channel deals; VAT applies to indirect channels only.
    pub vat_sar: Money,
    /// Always gross SAR plus VAT SAR.
    pub grand_total_sar: Money,
    /// Recognized (post channel margin) revenue.
    pub net_usd: Money,
    pub net_sar: Money,
    /// True only on year 1 and only when a contractual floor was applied.
    pub floor_adjusted: bool,
    /// Populated on year 1 only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Recognized revenue accumulated per product across the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductNetTotal {
    pub product: ProductId,
    pub net_usd: Money,
}

/// Complete output of one quote computation. Produced in full by a single
/// pure call; never updated incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteOutput {
    pub yearly_results: Vec<YearlyResult>,

    pub total_gross_usd: Money,
    pub total_gross_sar: Money,
    pub total_vat_sar: Money,
    pub total_grand_sar: Money,
    pub total_net_usd: Money,
    pub total_net_sar: Money,
    pub product_net_totals: Vec<ProductNetTotal>,

    /// Annual contract value: total gross over duration.
    pub acv_usd: Money,
    pub net_acv_usd: Money,
    /// Renewal deals only: annual value attributable to plain uplift of
    /// the expiring contracts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_base_acv: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_renewal_base_acv: Option<Money>,
    /// Renewal deals only: ACV in excess of the renewal base, clamped to
    /// non-negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upsell_acv: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_upsell_acv: Option<Money>,

    pub currency_to_display: Currency,
}
