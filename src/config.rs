//! Run configuration and ticker list sanitization
//!
//! Defaults match the demo run: 6% discount rate, 15 years of earnings
//! after the purchase year and a $1B market-cap floor. Each value can be
//! overridden from the environment and again from the command line.

use crate::error::DcfError;
use std::env;

/// Default NPV discount rate (decimal)
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.06;

/// Default number of years discounted after the purchase year
pub const DEFAULT_YEARS_DISCOUNTED: usize = 15;

/// Stocks with a smaller estimated market cap are skipped
pub const DEFAULT_MIN_MARKET_CAP: f64 = 1_000_000_000.0;

/// Tunables for the secant search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of trial columns, seed included
    pub max_trials: usize,

    /// |NPV| below this ends the search
    pub npv_tolerance: f64,

    /// Trial 1 growth = restart_factor * trial 0 growth
    pub restart_factor: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_trials: 20,
            npv_tolerance: 0.01,
            restart_factor: 0.2,
        }
    }
}

/// Immutable settings threaded through every ticker's analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Annual discount rate as a decimal (0.06 = 6%)
    pub discount_rate: f64,

    /// Years of projected earnings after the purchase year
    pub years_discounted: usize,

    /// Market cap floor in dollars
    pub min_market_cap: f64,

    /// Free-text label for the ticker list, used in report file names
    pub list_description: String,

    pub solver: SolverConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            years_discounted: DEFAULT_YEARS_DISCOUNTED,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            list_description: "demo list".to_string(),
            solver: SolverConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Defaults overridden by DCF_DISCOUNT_RATE, DCF_YEARS_DISCOUNTED and
    /// DCF_MIN_MARKET_CAP when those are set and parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let discount_rate: f64 = env::var("DCF_DISCOUNT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.discount_rate);

        let years_discounted: usize = env::var("DCF_YEARS_DISCOUNTED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.years_discounted);

        let min_market_cap: f64 = env::var("DCF_MIN_MARKET_CAP")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.min_market_cap);

        Self {
            discount_rate,
            years_discounted,
            min_market_cap,
            ..defaults
        }
    }

    /// Reject settings the projection cannot work with.
    ///
    /// A discount rate of exactly -1 is left alone: NPV is undefined there
    /// and is not clamped.
    pub fn validate(&self) -> Result<(), DcfError> {
        if self.years_discounted == 0 {
            return Err(DcfError::Config {
                reason: "years discounted must be at least 1".to_string(),
            });
        }
        if !self.discount_rate.is_finite() {
            return Err(DcfError::Config {
                reason: format!("discount rate {} is not finite", self.discount_rate),
            });
        }
        if !self.min_market_cap.is_finite() {
            return Err(DcfError::Config {
                reason: format!("market cap floor {} is not finite", self.min_market_cap),
            });
        }
        if self.solver.max_trials < 2 {
            return Err(DcfError::Config {
                reason: "solver needs at least two trials".to_string(),
            });
        }
        Ok(())
    }

    /// Discount rate as a percentage, as shown in reports
    pub fn discount_rate_pct(&self) -> f64 {
        self.discount_rate * 100.0
    }
}

/// Uppercase, trim and de-duplicate a ticker list, keeping first-seen order.
pub fn normalize_tickers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tickers: Vec<String> = Vec::new();
    for entry in raw {
        let ticker = entry.as_ref().trim().to_uppercase();
        if ticker.is_empty() || tickers.contains(&ticker) {
            continue;
        }
        tickers.push(ticker);
    }
    tickers
}

/// Split a ticker file's contents on commas and whitespace.
pub fn parse_ticker_list(contents: &str) -> Vec<String> {
    normalize_tickers(
        contents
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty()),
    )
}
