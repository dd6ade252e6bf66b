//! Ticker analyzer
//!
//! Runs growth validation, the quote and market-cap checks, the headline
//! DCF numbers and the breakeven search for one ticker at a time. Nothing
//! is shared between tickers except the immutable configuration.

use super::ResultRecord;
use crate::config::AnalysisConfig;
use crate::error::DcfError;
use crate::financials::{evaluate_growth, Rejection};
use crate::projection::{calculate_irr, npv, project_eps, with_outlay};
use crate::solver::{failure_trace_path, BreakevenSolver, TrialColumn};
use crate::source::FinancialDataSource;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Fatal fault that stopped a batch
#[derive(Debug)]
pub struct BatchFault {
    pub ticker: String,
    pub error: DcfError,
}

/// Records produced by a batch, in input order
#[derive(Debug)]
pub struct BatchOutcome {
    pub records: Vec<ResultRecord>,
    /// Set when the run was cut short; `records` then holds the tickers
    /// finished before the fault
    pub fatal: Option<BatchFault>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.fatal.is_none()
    }
}

pub struct TickerAnalyzer<S> {
    source: S,
    config: AnalysisConfig,
    solver: BreakevenSolver,
    diagnostics_dir: PathBuf,
}

impl<S: FinancialDataSource> TickerAnalyzer<S> {
    /// Failure traces go to the working directory unless redirected
    pub fn new(source: S, config: AnalysisConfig) -> Self {
        let solver = BreakevenSolver::from_config(&config);
        Self {
            source,
            config,
            solver,
            diagnostics_dir: PathBuf::from("."),
        }
    }

    pub fn with_diagnostics_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.diagnostics_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Analyze one ticker.
    ///
    /// Recoverable conditions come back as a record with a warning; only
    /// data-source and I/O faults are errors.
    pub fn analyze(&self, ticker: &str) -> Result<ResultRecord, DcfError> {
        let mut record = ResultRecord::new(ticker);

        let statements = self.source.fetch_income_statements(ticker)?;
        let growth = match evaluate_growth(&statements) {
            Ok(growth) => growth,
            Err(rejection) => {
                if let Rejection::NegativeEpsGrowth(growth) = &rejection {
                    record.apply_growth(growth);
                }
                return Ok(reject(record, rejection));
            }
        };
        record.apply_growth(&growth);

        let Some(quote) = self.source.fetch_quote(ticker)? else {
            return Ok(reject(record, Rejection::NoQuote));
        };
        let price = quote.price;
        let market_cap = price * growth.shares_outstanding;
        record.price = Some(price);
        record.market_cap = Some(market_cap);

        if !(market_cap >= self.config.min_market_cap) {
            return Ok(reject(
                record,
                Rejection::MarketCapBelowFloor {
                    market_cap,
                    floor: self.config.min_market_cap,
                },
            ));
        }

        let eps_projection = project_eps(
            growth.eps_newest,
            growth.eps_growth_pct,
            self.config.years_discounted,
        );
        let eps_npv = npv(self.config.discount_rate, &eps_projection);
        let purchase = with_outlay(eps_projection, price);
        let purchase_npv = npv(self.config.discount_rate, &purchase);
        let irr = calculate_irr(&purchase);

        record.eps_npv = Some(eps_npv);
        record.purchase_npv = Some(purchase_npv);
        record.discount_rate_pct = Some(self.config.discount_rate_pct());
        record.years_discounted = Some(self.config.years_discounted);
        record.irr_pct = irr.map(|r| r * 100.0);

        info!(
            "{}: EPS NPV {:.2} over {} yrs at {:.1}%, purchase IRR {:?}",
            ticker,
            eps_npv,
            self.config.years_discounted,
            self.config.discount_rate_pct(),
            irr
        );

        let seed = TrialColumn {
            trial: 0,
            growth_pct: growth.eps_growth_pct,
            cashflows: purchase,
            npv: purchase_npv,
            slope: None,
        };
        let solution = self.solver.solve_seeded(growth.eps_newest, price, seed);
        record.breakeven_growth_pct = solution.breakeven_growth_pct();
        record.verdict = solution.verdict();

        if let Some(warning) = solution.outcome.warning() {
            let path = failure_trace_path(&self.diagnostics_dir, ticker);
            warn!("{}: {} (trace written to {})", ticker, warning, path.display());
            solution.trace.save(&path)?;
            record.warning = Some(warning);
        }

        Ok(record)
    }

    /// Analyze tickers in order, calling `on_record` as each one finishes.
    ///
    /// Stops at the first fatal fault and returns what was finished so far.
    pub fn run_batch<F>(&self, tickers: &[String], mut on_record: F) -> BatchOutcome
    where
        F: FnMut(&ResultRecord),
    {
        let mut records = Vec::with_capacity(tickers.len());

        for ticker in tickers {
            match self.analyze(ticker) {
                Ok(record) => {
                    on_record(&record);
                    records.push(record);
                }
                Err(error) => {
                    warn!("{}: aborting run: {}", ticker, error);
                    return BatchOutcome {
                        records,
                        fatal: Some(BatchFault {
                            ticker: ticker.clone(),
                            error,
                        }),
                    };
                }
            }
        }

        BatchOutcome {
            records,
            fatal: None,
        }
    }
}

fn reject(mut record: ResultRecord, rejection: Rejection) -> ResultRecord {
    warn!("{}: {}", record.ticker, rejection);
    record.warning = Some(rejection.to_string());
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financials::IncomeStatement;
    use crate::solver::Verdict;
    use crate::source::InMemorySource;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn statement(year: i32, net_income: f64, eps: f64) -> IncomeStatement {
        IncomeStatement::new(NaiveDate::from_ymd_opt(year, 12, 31).unwrap(), net_income, eps)
    }

    /// Newest EPS 5.00 with 10% yearly EPS growth, 1B shares
    fn growing_history() -> Vec<IncomeStatement> {
        (0..5)
            .map(|age| {
                let eps = 5.0 / 1.1_f64.powi(age);
                statement(2023 - age, eps * 1.0e9, eps)
            })
            .collect()
    }

    fn analyzer(source: InMemorySource, dir: &Path) -> TickerAnalyzer<InMemorySource> {
        TickerAnalyzer::new(source, AnalysisConfig::default()).with_diagnostics_dir(dir)
    }

    #[test]
    fn test_full_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new()
            .with_statements("ABT", growing_history())
            .with_quote("ABT", 100.0);

        let record = analyzer(source, dir.path()).analyze("ABT").unwrap();

        assert_eq!(record.warning, None);
        assert_eq!(record.newest_year, Some(2023));
        assert_eq!(record.oldest_year, Some(2019));
        assert_relative_eq!(record.eps_growth_pct.unwrap(), 10.0, max_relative = 1e-9);
        assert_relative_eq!(record.market_cap.unwrap(), 1.0e11, max_relative = 1e-9);
        assert_relative_eq!(record.purchase_npv.unwrap(), record.eps_npv.unwrap() - 100.0, epsilon = 1e-9);
        assert_eq!(record.years_discounted, Some(15));
        assert!(record.irr_pct.unwrap() > 6.0);

        let breakeven = record.breakeven_growth_pct.expect("breakeven found");
        assert!(breakeven < 10.0);
        assert_eq!(record.verdict, Some(Verdict::Favorable));
        assert!(!failure_trace_path(dir.path(), "ABT").exists());
    }

    #[test]
    fn test_short_history_skips_numeric_stages() {
        let dir = tempfile::tempdir().unwrap();
        let mut statements = growing_history();
        statements.truncate(4);
        let source = InMemorySource::new()
            .with_statements("CLX", statements)
            .with_quote("CLX", 100.0);

        let record = analyzer(source, dir.path()).analyze("CLX").unwrap();

        assert_eq!(record.warning.as_deref(), Some("Less than 5 years of data"));
        assert!(record.has_warning());
        assert_eq!(record.eps_npv, None);
        assert_eq!(record.irr_pct, None);
        assert_eq!(record.price, None);
        assert_eq!(record.eps_growth_pct, None);
    }

    #[test]
    fn test_missing_quote_and_small_cap() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new()
            .with_statements("DGX", growing_history())
            .with_statements("WEC", growing_history())
            .with_quote("WEC", 0.5);
        let analyzer = analyzer(source, dir.path());

        let no_quote = analyzer.analyze("DGX").unwrap();
        assert_eq!(no_quote.warning.as_deref(), Some("No share price found"));
        assert!(no_quote.eps_growth_pct.is_some());
        assert_eq!(no_quote.price, None);

        let small = analyzer.analyze("WEC").unwrap();
        assert_eq!(small.warning.as_deref(), Some("Market cap is less than $1000000000."));
        assert_eq!(small.price, Some(0.5));
        assert_eq!(small.eps_npv, None);
    }

    #[test]
    fn test_solver_failure_writes_trace() {
        let dir = tempfile::tempdir().unwrap();
        // Flat EPS: historical growth 0 makes trial 1 repeat trial 0
        let flat: Vec<_> = (0..5).map(|age| statement(2023 - age, 5.0e9, 5.0)).collect();
        let source = InMemorySource::new()
            .with_statements("ED", flat)
            .with_quote("ED", 60.0);

        let record = analyzer(source, dir.path()).analyze("ED").unwrap();

        assert_eq!(
            record.warning.as_deref(),
            Some("Required growth not found. Slope denom. = 0")
        );
        assert!(record.eps_npv.is_some());
        assert_eq!(record.breakeven_growth_pct, None);
        let trace = std::fs::read_to_string(failure_trace_path(dir.path(), "ED")).unwrap();
        assert!(trace.starts_with("row,0,1"));
    }

    #[test]
    fn test_exhausted_search_writes_trace() {
        let dir = tempfile::tempdir().unwrap();
        // 30% EPS growth against a $500 price overshoots on every secant step
        let steep: Vec<_> = (0..5)
            .map(|age| {
                let eps = 1.0 / 1.3_f64.powi(age);
                statement(2023 - age, eps * 1.0e9, eps)
            })
            .collect();
        let source = InMemorySource::new()
            .with_statements("CHD", steep)
            .with_quote("CHD", 500.0);

        let record = analyzer(source, dir.path()).analyze("CHD").unwrap();

        assert_relative_eq!(record.eps_growth_pct.unwrap(), 30.0, max_relative = 1e-9);
        assert_eq!(
            record.warning.as_deref(),
            Some("Minimum required growth not found after 20th iteration.")
        );
        assert_eq!(record.breakeven_growth_pct, None);
        assert!(record.eps_npv.is_some());

        let trace = std::fs::read_to_string(failure_trace_path(dir.path(), "CHD")).unwrap();
        let header = trace.lines().next().unwrap();
        assert!(header.ends_with(",18,19"));
    }

    #[test]
    fn test_batch_stops_on_fatal_fault() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new()
            .with_statements("ABT", growing_history())
            .with_quote("ABT", 100.0)
            .with_fault("GOOGL", "unexpected payload");
        let analyzer = analyzer(source, dir.path());

        let tickers: Vec<String> = ["ABT", "ZZZZ", "GOOGL", "CHD"].iter().map(|s| s.to_string()).collect();
        let mut seen = Vec::new();
        let outcome = analyzer.run_batch(&tickers, |record| seen.push(record.ticker.clone()));

        assert!(!outcome.is_complete());
        assert_eq!(seen, vec!["ABT", "ZZZZ"]);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(
            outcome.records[1].warning.as_deref(),
            Some("No income statement found.")
        );
        let fault = outcome.fatal.unwrap();
        assert_eq!(fault.ticker, "GOOGL");
        assert!(matches!(fault.error, DcfError::MalformedResponse { .. }));
    }
}
