//! Annual income statement and quote records as used by the analysis

use chrono::{Datelike, NaiveDate};

/// One annual income statement, newest first in any list of them
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeStatement {
    /// Fiscal period end date
    pub date: NaiveDate,

    /// Net income attributable to common shareholders
    pub net_income: f64,

    /// Diluted earnings per share (0 when the source left it blank)
    pub eps_diluted: f64,
}

impl IncomeStatement {
    pub fn new(date: NaiveDate, net_income: f64, eps_diluted: f64) -> Self {
        Self {
            date,
            net_income,
            eps_diluted,
        }
    }

    /// Fiscal year label
    pub fn fiscal_year(&self) -> i32 {
        self.date.year()
    }

    /// Shares outstanding implied by net income / EPS
    pub fn implied_shares(&self) -> f64 {
        self.net_income / self.eps_diluted
    }
}

/// Current share price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: f64,
}
