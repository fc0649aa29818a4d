use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use quote_engine_core::catalog::{ProductId, Variant};
use quote_engine_core::pricing::{
    compute_schedule, Channel, DealType, PricingMethod, ProductSelection, QuoteConfig,
};

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum ChannelArg {
    Direct,
    Fulfilment,
    PartnerSourced,
}

impl From<ChannelArg> for Channel {
    fn from(c: ChannelArg) -> Self {
        match c {
            ChannelArg::Direct => Channel::Direct,
            ChannelArg::Fulfilment => Channel::Fulfilment,
            ChannelArg::PartnerSourced => Channel::PartnerSourced,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum MethodArg {
    /// Forward inflation: year 1 anchors, later years compound up
    Forward,
    /// Reverse price protection: final year anchors, earlier years discount back
    Reverse,
}

impl From<MethodArg> for PricingMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Forward => PricingMethod::ForwardInflation,
            MethodArg::Reverse => PricingMethod::ReversePriceProtection,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ProductArg {
    Physician,
    Bed,
}

impl From<ProductArg> for ProductId {
    fn from(p: ProductArg) -> Self {
        match p {
            ProductArg::Physician => ProductId::PhysicianSuite,
            ProductArg::Bed => ProductId::BedSuite,
        }
    }
}

/// Arguments for the quote command. Full deal configurations come from a
/// JSON file or stdin; the flags cover the quick single-product new-logo
/// case.
#[derive(Args)]
pub struct QuoteArgs {
    /// Path to a JSON deal configuration (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Product family for a quick quote
    #[arg(long, value_enum)]
    pub product: Option<ProductArg>,

    /// Variant edition name (e.g. Core, Enterprise, Standard)
    #[arg(long)]
    pub variant: Option<String>,

    /// Unit count (physicians or beds)
    #[arg(long)]
    pub count: Option<Decimal>,

    /// Base discount as a fraction (0.10 for 10%)
    #[arg(long, default_value = "0")]
    pub discount: Decimal,

    /// Contract duration in years
    #[arg(long, default_value = "1")]
    pub years: u32,

    /// Sales channel
    #[arg(long, value_enum, default_value = "direct")]
    pub channel: ChannelArg,

    /// Multi-year pricing method
    #[arg(long, value_enum, default_value = "forward")]
    pub method: MethodArg,

    /// Per-year escalation rate as a fraction; repeat once per year
    #[arg(long = "rate")]
    pub rates: Vec<Decimal>,

    /// Gross prices up for the 5% withholding tax
    #[arg(long)]
    pub wht: bool,

    /// Average the schedule into equal installments
    #[arg(long)]
    pub flat: bool,

    /// Round each year up to a currency-appropriate increment
    #[arg(long)]
    pub round: bool,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config: QuoteConfig = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        config_from_flags(&args)?
    };

    let result = compute_schedule(&config)?;
    Ok(serde_json::to_value(result)?)
}

/// Quick path: one product, new logo, priced from list.
fn config_from_flags(args: &QuoteArgs) -> Result<QuoteConfig, Box<dyn std::error::Error>> {
    let product: ProductId = args
        .product
        .clone()
        .ok_or("--product is required (or provide --input)")?
        .into();
    let variant: Variant = args
        .variant
        .as_deref()
        .ok_or("--variant is required (or provide --input)")?
        .parse()?;
    let count = args.count.ok_or("--count is required (or provide --input)")?;

    Ok(QuoteConfig {
        deal_type: DealType::NewLogo,
        channel: args.channel.clone().into(),
        years: args.years,
        method: args.method.clone().into(),
        products: vec![ProductSelection {
            product,
            variant,
            count,
            existing_variant: None,
            existing_count: None,
            discount: args.discount,
            expiring_amount: Decimal::ZERO,
            stats_changed: false,
            renewal_uplift: Decimal::ZERO,
            escalation_rates: None,
        }],
        escalation_rates: args.rates.clone(),
        apply_wht: args.wht,
        flat_pricing: args.flat,
        rounding: args.round,
    })
}
