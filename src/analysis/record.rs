//! One output row per ticker

use crate::financials::GrowthHistory;
use crate::solver::Verdict;
use serde::Serialize;

/// Everything computed for a ticker. Fields stay `None` when an early exit
/// happened before they were reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub ticker: String,
    pub newest_year: Option<i32>,
    pub oldest_year: Option<i32>,
    pub eps_newest: Option<f64>,
    pub net_income_growth_pct: Option<f64>,
    pub eps_growth_pct: Option<f64>,
    pub breakeven_growth_pct: Option<f64>,
    pub share_growth_pct: Option<f64>,
    pub price: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub market_cap: Option<f64>,
    /// NPV of projected EPS alone
    pub eps_npv: Option<f64>,
    /// NPV of projected EPS net of the share price
    pub purchase_npv: Option<f64>,
    pub discount_rate_pct: Option<f64>,
    pub irr_pct: Option<f64>,
    pub verdict: Option<Verdict>,
    pub warning: Option<String>,
    pub years_discounted: Option<usize>,
}

impl ResultRecord {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            newest_year: None,
            oldest_year: None,
            eps_newest: None,
            net_income_growth_pct: None,
            eps_growth_pct: None,
            breakeven_growth_pct: None,
            share_growth_pct: None,
            price: None,
            shares_outstanding: None,
            market_cap: None,
            eps_npv: None,
            purchase_npv: None,
            discount_rate_pct: None,
            irr_pct: None,
            verdict: None,
            warning: None,
            years_discounted: None,
        }
    }

    pub fn apply_growth(&mut self, growth: &GrowthHistory) {
        self.newest_year = Some(growth.newest_year);
        self.oldest_year = Some(growth.oldest_year);
        self.eps_newest = Some(growth.eps_newest);
        self.net_income_growth_pct = Some(growth.net_income_growth_pct);
        self.eps_growth_pct = Some(growth.eps_growth_pct);
        self.share_growth_pct = Some(growth.share_growth_pct);
        self.shares_outstanding = Some(growth.shares_outstanding);
    }

    pub fn has_warning(&self) -> bool {
        self.warning.as_deref().is_some_and(|w| !w.is_empty())
    }
}
