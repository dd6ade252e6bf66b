//! Results report and console output

use crate::analysis::ResultRecord;
use crate::config::AnalysisConfig;
use crate::error::DcfError;
use crate::solver::Verdict;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// File written when a fatal fault cuts the run short
pub const PARTIAL_REPORT_FILE: &str = "early end for DCF program.csv";

pub const DATA_ATTRIBUTION: &str =
    "Raw data provided by Financial Modeling Prep (see https://financialmodelingprep.com/developer/docs/). \
     All other data are calculated by program.";

pub const DISCLAIMER: &str =
    "This program is a learning exercise, not to be used for stock trading or financial advice.";

/// Serialize records as CSV, one row per ticker, below a three-line
/// preamble: the report title, the data attribution and the disclaimer.
pub fn write_results<W: Write>(title: &str, records: &[ResultRecord], writer: W) -> Result<(), DcfError> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    for line in [title, DATA_ATTRIBUTION, DISCLAIMER] {
        csv_writer.write_record([line])?;
    }
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_results<P: AsRef<Path>>(path: P, title: &str, records: &[ResultRecord]) -> Result<(), DcfError> {
    let file = File::create(path)?;
    write_results(title, records, file)
}

/// Report name without its file extension, used as the report title
pub fn report_title(file_name: &str) -> &str {
    file_name.strip_suffix(".csv").unwrap_or(file_name)
}

/// Report name describing the run, e.g.
/// `DCF at 0.06 demo list over 15 yrs from ABT to CHD on 19-Oct-2026 (14-03-22).csv`
pub fn report_file_name(config: &AnalysisConfig, tickers: &[String], at: DateTime<Local>) -> String {
    let first = tickers.first().map(String::as_str).unwrap_or("none");
    let last = tickers.last().map(String::as_str).unwrap_or("none");
    format!(
        "DCF at {} {} over {} yrs from {} to {} on {}.csv",
        config.discount_rate,
        config.list_description,
        config.years_discounted,
        first,
        last,
        at.format("%d-%b-%Y (%H-%M-%S)")
    )
}

/// Print the console summary for a finished ticker
pub fn print_record(record: &ResultRecord) {
    println!();
    println!("Ticker = {}", record.ticker);

    if let (Some(newest), Some(oldest)) = (record.newest_year, record.oldest_year) {
        println!("  History {} to {}", oldest, newest);
    }
    if let (Some(ni), Some(eps), Some(shares)) = (
        record.net_income_growth_pct,
        record.eps_growth_pct,
        record.share_growth_pct,
    ) {
        println!(
            "  CAGR: net income {:6.1}%  dil. EPS {:6.1}%  shares {:6.1}%",
            ni, eps, shares
        );
    }
    if let (Some(price), Some(cap)) = (record.price, record.market_cap) {
        println!("  Price ${:.2}, est. market cap ${:.0}", price, cap);
    }
    if let (Some(eps_npv), Some(rate), Some(years)) =
        (record.eps_npv, record.discount_rate_pct, record.years_discounted)
    {
        println!(
            "  NPV of EPS over {} yrs at {:.1}% = ${:.2}",
            years, rate, eps_npv
        );
    }
    match record.irr_pct {
        Some(irr) => println!("  IRR of share purchase = {:.2}%", irr),
        None if record.eps_npv.is_some() => println!("  IRR of share purchase not found"),
        None => {}
    }
    if let (Some(required), Some(verdict)) = (record.breakeven_growth_pct, record.verdict) {
        let label = match verdict {
            Verdict::Favorable => "favorable",
            Verdict::Unfavorable => "unfavorable",
        };
        println!(
            "  Min. required EPS growth for breakeven = {:.1}% ({})",
            required, label
        );
    }
    if let Some(warning) = &record.warning {
        println!("  Warning: {}", warning);
    }
}
