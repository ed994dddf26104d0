mod error;
mod export;
mod parser;
mod record;
mod rows;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use parser::PassOptions;
use record::Catalog;

#[derive(Parser)]
#[command(
    name = "crawl_parser",
    about = "Normalize product crawl exports into a clean tabular file"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a crawl export and write the product table
    Convert {
        /// Path to the crawl .csv export
        input: PathBuf,
        /// Path to write the normalized table to
        output: PathBuf,
        /// Keep only products in this category
        #[arg(short, long)]
        category: Option<ProductCategory>,
        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
        /// Currency symbol preceding price values
        #[arg(long, default_value = "$")]
        symbol: String,
    },
    /// Run the pass and show aggregate statistics without writing a file
    Stats {
        input: PathBuf,
        #[arg(long, default_value = "$")]
        symbol: String,
    },
    /// Compact console table of normalized products
    Overview {
        input: PathBuf,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
        /// Currency symbol preceding price values
        #[arg(long, default_value = "$")]
        symbol: String,
    },
}

/// Crawl categories the export can be filtered to.
#[derive(Clone, Copy, ValueEnum)]
enum ProductCategory {
    Sinks,
    Faucets,
}

impl ProductCategory {
    fn label(self) -> &'static str {
        match self {
            ProductCategory::Sinks => "Plumbing Sinks",
            ProductCategory::Faucets => "Plumbing Faucets",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Tsv,
    Jsonl,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            category,
            format,
            symbol,
        } => {
            let mut catalog = load_catalog(&input, symbol)?;
            if let Some(category) = category {
                let before = catalog.products.len();
                catalog.retain_category(category.label());
                println!(
                    "Filtered to {}: {} of {} products",
                    category.label(),
                    catalog.products.len(),
                    before
                );
            }
            match format {
                OutputFormat::Csv => export::write_table(&output, &catalog, ',')?,
                OutputFormat::Tsv => export::write_table(&output, &catalog, '\t')?,
                OutputFormat::Jsonl => export::write_jsonl(&output, &catalog)?,
            }
            println!(
                "Saved {} products to {}",
                catalog.products.len(),
                output.display()
            );
            Ok(())
        }
        Commands::Stats { input, symbol } => {
            let catalog = load_catalog(&input, symbol)?;
            println!("Products:        {}", catalog.products.len());
            println!("Distinct labels: {}", catalog.specification_labels.len());
            println!("Max crumb depth: {}", catalog.max_crumb_count);

            let mut by_kind = BTreeMap::new();
            for product in &catalog.products {
                for spec in &product.specifications {
                    *by_kind.entry(spec.kind).or_insert(0usize) += 1;
                }
            }
            if !by_kind.is_empty() {
                println!("\n--- Specifications by kind ---");
                for (kind, count) in &by_kind {
                    println!("  {:<28} {}", kind.display(), count);
                }
            }
            Ok(())
        }
        Commands::Overview { input, limit, symbol } => {
            let catalog = load_catalog(&input, symbol)?;
            if catalog.products.is_empty() {
                println!("No products found.");
                return Ok(());
            }

            println!(
                "{:>4} | {:<16} | {:<24} | {:>9} | {:<32} | {:>5}",
                "#", "SKU", "Category", "Price", "Crumbs", "Specs"
            );
            println!("{}", "-".repeat(106));
            for (i, p) in catalog.products.iter().take(limit).enumerate() {
                println!(
                    "{:>4} | {:<16} | {:<24} | {:>9.2} | {:<32} | {:>5}",
                    i + 1,
                    truncate(&p.sku, 16),
                    truncate(&p.category, 24),
                    p.price,
                    truncate(&p.crumbs.join(" > "), 32),
                    p.specifications.len()
                );
            }
            println!(
                "\n{} of {} products shown",
                catalog.products.len().min(limit),
                catalog.products.len()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn load_catalog(input: &std::path::Path, currency_symbol: String) -> Result<Catalog> {
    let raw_rows = rows::read_rows(input, ',')?;
    println!("Normalizing {} rows...", raw_rows.len());
    let options = PassOptions {
        currency_symbol,
        ..PassOptions::default()
    };
    let catalog = parser::run_pass(&raw_rows, &options)?;
    Ok(catalog)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
