use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use env_logger::Env;
use scout::{
    configuration::{get_configuration, Engine},
    domain::OutputFormat,
    services::{save, ListingScraper},
};

/// Scrape product listings from search results into output/products.{csv,json}
#[derive(Parser, Debug)]
#[command(name = "scout", version)]
struct Cli {
    /// Product keyword to search for
    term: Option<String>,

    /// Number of products to collect across result pages. Without it only
    /// the first page is read.
    count: Option<usize>,

    /// Output format: csv or json
    format: Option<String>,

    /// Page engine, overriding configuration
    #[arg(long, value_enum)]
    engine: Option<Engine>,

    /// Directory for products.csv / products.json
    #[arg(long, env = "SCOUT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let Some(term) = cli.term.clone().filter(|t| !t.trim().is_empty()) else {
        eprintln!("Please provide a search term.");
        eprintln!("Example: scout 'laptops' 20 csv");
        return ExitCode::from(1);
    };

    let format = match cli.format.as_deref().map(str::parse::<OutputFormat>) {
        None => OutputFormat::Csv,
        Some(Ok(format)) => format,
        Some(Err(message)) => {
            eprintln!("{}", message);
            return ExitCode::from(1);
        }
    };

    match scrape(&cli, &term, format).await {
        Ok(path) => {
            println!("Data saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Scrape for '{}' failed: {:?}", term, e);
            eprintln!("Scrape failed: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn scrape(cli: &Cli, term: &str, format: OutputFormat) -> anyhow::Result<PathBuf> {
    let mut configuration = get_configuration()?;
    if let Some(engine) = cli.engine {
        configuration.browser.engine = engine;
    }
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&configuration.scraper.output_dir));

    let scraper = ListingScraper::from_settings(&configuration);

    println!("Searching for {} ...", term);
    let products = match cli.count {
        Some(count) => scraper.collect(term, count).await?,
        None => scraper.search(term).await?,
    };
    log::info!("Found {} products", products.len());

    save(&products, format, &output_dir)
}
