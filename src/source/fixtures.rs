//! Offline source reading saved FMP responses from a directory
//!
//! Layout: `<dir>/<TICKER>.income.json` and `<dir>/<TICKER>.quote.json`.
//! A missing file means the API had nothing for that ticker.

use super::{parse_income_statements, parse_quote, FinancialDataSource};
use crate::error::DcfError;
use crate::financials::{IncomeStatement, Quote};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FixtureDirectory {
    root: PathBuf,
}

impl FixtureDirectory {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read(&self, ticker: &str, kind: &str) -> Result<Option<String>, DcfError> {
        let path = self.root.join(format!("{}.{}.json", ticker, kind));
        match fs::read_to_string(&path) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl FinancialDataSource for FixtureDirectory {
    fn fetch_income_statements(&self, ticker: &str) -> Result<Vec<IncomeStatement>, DcfError> {
        match self.read(ticker, "income")? {
            Some(body) => parse_income_statements(ticker, &body),
            None => Ok(Vec::new()),
        }
    }

    fn fetch_quote(&self, ticker: &str) -> Result<Option<Quote>, DcfError> {
        match self.read(ticker, "quote")? {
            Some(body) => parse_quote(ticker, &body),
            None => Ok(None),
        }
    }
}
