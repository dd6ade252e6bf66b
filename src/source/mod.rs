//! Where statements and quotes come from
//!
//! The analysis only needs two calls per ticker. `FmpClient` answers them
//! over HTTP, `FixtureDirectory` from saved JSON responses and
//! `InMemorySource` from values built in code.

mod payload;
mod fmp;
mod fixtures;
mod memory;

pub use payload::{parse_income_statements, parse_quote};
pub use fmp::{FmpClient, DEFAULT_FMP_BASE_URL};
pub use fixtures::FixtureDirectory;
pub use memory::InMemorySource;

use crate::error::DcfError;
use crate::financials::{IncomeStatement, Quote};

/// Synchronous source of per-ticker financial data
pub trait FinancialDataSource {
    /// Annual income statements, newest first. Empty when the ticker is unknown.
    fn fetch_income_statements(&self, ticker: &str) -> Result<Vec<IncomeStatement>, DcfError>;

    /// Latest quote, or None when no price is available
    fn fetch_quote(&self, ticker: &str) -> Result<Option<Quote>, DcfError>;
}

impl<S: FinancialDataSource + ?Sized> FinancialDataSource for Box<S> {
    fn fetch_income_statements(&self, ticker: &str) -> Result<Vec<IncomeStatement>, DcfError> {
        (**self).fetch_income_statements(ticker)
    }

    fn fetch_quote(&self, ticker: &str) -> Result<Option<Quote>, DcfError> {
        (**self).fetch_quote(ticker)
    }
}
