use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use quote_engine_core::catalog::{ProductId, Variant};

#[derive(Debug, Clone, ValueEnum)]
pub enum FamilyFilter {
    Physician,
    Bed,
}

/// Arguments for the catalog listing.
#[derive(Args)]
pub struct CatalogArgs {
    /// Restrict the listing to one product family
    #[arg(long, value_enum)]
    pub product: Option<FamilyFilter>,
}

pub fn run_catalog(args: CatalogArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let families: Vec<ProductId> = match args.product {
        Some(FamilyFilter::Physician) => vec![ProductId::PhysicianSuite],
        Some(FamilyFilter::Bed) => vec![ProductId::BedSuite],
        None => vec![ProductId::PhysicianSuite, ProductId::BedSuite],
    };

    let mut rows = Vec::new();
    for product in families {
        for variant in Variant::all_for(product) {
            let list_price = variant
                .list_price_for(product)
                .unwrap_or_default()
                .to_string();
            rows.push(json!({
                "product": product.display_name(),
                "variant": variant.name(),
                "unit": product.count_label(),
                "list_price_usd": list_price,
            }));
        }
    }

    Ok(json!({ "result": rows }))
}
