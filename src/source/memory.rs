//! Source backed by values built in code

use super::FinancialDataSource;
use crate::error::DcfError;
use crate::financials::{IncomeStatement, Quote};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    statements: HashMap<String, Vec<IncomeStatement>>,
    quotes: HashMap<String, Quote>,
    faults: HashMap<String, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statements(mut self, ticker: &str, statements: Vec<IncomeStatement>) -> Self {
        self.statements.insert(ticker.to_string(), statements);
        self
    }

    pub fn with_quote(mut self, ticker: &str, price: f64) -> Self {
        self.quotes.insert(ticker.to_string(), Quote { price });
        self
    }

    /// Make every fetch for `ticker` fail as a malformed response
    pub fn with_fault(mut self, ticker: &str, reason: &str) -> Self {
        self.faults.insert(ticker.to_string(), reason.to_string());
        self
    }

    fn check_fault(&self, ticker: &str) -> Result<(), DcfError> {
        match self.faults.get(ticker) {
            Some(reason) => Err(DcfError::malformed(ticker, reason.clone())),
            None => Ok(()),
        }
    }
}

impl FinancialDataSource for InMemorySource {
    fn fetch_income_statements(&self, ticker: &str) -> Result<Vec<IncomeStatement>, DcfError> {
        self.check_fault(ticker)?;
        Ok(self.statements.get(ticker).cloned().unwrap_or_default())
    }

    fn fetch_quote(&self, ticker: &str) -> Result<Option<Quote>, DcfError> {
        self.check_fault(ticker)?;
        Ok(self.quotes.get(ticker).copied())
    }
}
