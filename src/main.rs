//! DCF breakeven CLI
//!
//! Analyzes a ticker list and writes one CSV row per ticker

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use dcf_breakeven::config::{normalize_tickers, parse_ticker_list};
use dcf_breakeven::report::{self, PARTIAL_REPORT_FILE};
use dcf_breakeven::source::{FinancialDataSource, FixtureDirectory, FmpClient};
use dcf_breakeven::{AnalysisConfig, TickerAnalyzer};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const DEMO_TICKERS: [&str; 7] = ["abt", "clx", "dgx", "googl", "wec", "ed", "chd"];

#[derive(Parser, Debug)]
#[command(name = "dcf_breakeven", about = "EPS growth DCF and breakeven growth analysis")]
struct Cli {
    /// Tickers to analyze (defaults to the demo list)
    tickers: Vec<String>,

    /// File with tickers separated by commas or whitespace
    #[arg(long)]
    tickers_file: Option<PathBuf>,

    /// Read saved FMP responses from this directory instead of the API
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// NPV discount rate as a decimal (e.g. 0.06)
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Years of earnings discounted after the purchase year
    #[arg(long)]
    years: Option<usize>,

    /// Skip stocks with a smaller estimated market cap
    #[arg(long)]
    min_market_cap: Option<f64>,

    /// Label for the ticker list used in the report name
    #[arg(long)]
    description: Option<String>,

    /// Directory for the report and any failure traces
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = AnalysisConfig::from_env();
    if let Some(rate) = cli.discount_rate {
        config.discount_rate = rate;
    }
    if let Some(years) = cli.years {
        config.years_discounted = years;
    }
    if let Some(floor) = cli.min_market_cap {
        config.min_market_cap = floor;
    }
    if let Some(description) = cli.description {
        config.list_description = description;
    }
    config.validate()?;

    let mut tickers = normalize_tickers(&cli.tickers);
    if let Some(path) = &cli.tickers_file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading ticker file {}", path.display()))?;
        tickers = normalize_tickers(tickers.into_iter().chain(parse_ticker_list(&contents)));
    }
    if tickers.is_empty() {
        tickers = normalize_tickers(DEMO_TICKERS);
    }

    let source: Box<dyn FinancialDataSource> = match &cli.fixtures {
        Some(dir) => Box::new(FixtureDirectory::new(dir)),
        None => Box::new(FmpClient::from_env()?),
    };

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;

    println!("{}", report::DATA_ATTRIBUTION);
    println!("Oldest data are already adjusted in the source for subsequent stock splits (if any).");
    println!("{}", report::DISCLAIMER);

    let analyzer = TickerAnalyzer::new(source, config.clone()).with_diagnostics_dir(&cli.output_dir);
    let outcome = analyzer.run_batch(&tickers, report::print_record);

    if let Some(fault) = &outcome.fatal {
        let path = cli.output_dir.join(PARTIAL_REPORT_FILE);
        report::save_results(&path, report::report_title(PARTIAL_REPORT_FILE), &outcome.records)
            .with_context(|| format!("writing partial results to {}", path.display()))?;
        eprintln!("Fatal error while analyzing {}: {}", fault.ticker, fault.error);
        eprintln!(
            "Results for {} finished tickers written to {}",
            outcome.records.len(),
            path.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    let file_name = report::report_file_name(&config, &tickers, Local::now());
    let path = cli.output_dir.join(&file_name);
    report::save_results(&path, report::report_title(&file_name), &outcome.records)
        .with_context(|| format!("writing results to {}", path.display()))?;

    println!("\nThe results have been saved to {}", path.display());
    Ok(ExitCode::SUCCESS)
}
