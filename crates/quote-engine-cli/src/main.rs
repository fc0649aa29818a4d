mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::CatalogArgs;
use commands::quote::QuoteArgs;

/// Deal quoting: multi-year revenue schedules with decimal precision
#[derive(Parser)]
#[command(
    name = "dqt",
    version,
    about = "Deal quoting tool",
    long_about = "Computes year-by-year revenue schedules for sales deals: \
                  variant-based pricing, renewal upsell paths, contractual \
                  floors, withholding-tax gross-up, VAT and currency \
                  conversion, and ACV/upsell metrics."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full revenue schedule for a deal configuration
    Quote(QuoteArgs),
    /// List catalog products, variants and list prices
    Catalog(CatalogArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::quote::run_quote(args),
        Commands::Catalog(args) => commands::catalog::run_catalog(args),
        Commands::Version => {
            println!("dqt {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
