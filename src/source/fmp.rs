//! Blocking HTTP client for Financial Modeling Prep

use super::{parse_income_statements, parse_quote, FinancialDataSource};
use crate::error::DcfError;
use crate::financials::{IncomeStatement, Quote};
use log::debug;
use reqwest::blocking::Client;
use std::env;
use std::time::Duration;

pub const DEFAULT_FMP_BASE_URL: &str = "https://financialmodelingprep.com";

/// Financial Modeling Prep API client
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FmpClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DcfError> {
        Self::with_base_url(api_key, DEFAULT_FMP_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, DcfError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DcfError::Config {
                reason: "an FMP API key is required (https://site.financialmodelingprep.com/developer)"
                    .to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("dcf_breakeven/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build from FMP_API_KEY and an optional FMP_BASE_URL
    pub fn from_env() -> Result<Self, DcfError> {
        let api_key = env::var("FMP_API_KEY").unwrap_or_default();
        let base_url = env::var("FMP_BASE_URL").unwrap_or_else(|_| DEFAULT_FMP_BASE_URL.to_string());
        Self::with_base_url(api_key, base_url)
    }

    fn get_text(&self, path: &str) -> Result<String, DcfError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }
}

impl FinancialDataSource for FmpClient {
    fn fetch_income_statements(&self, ticker: &str) -> Result<Vec<IncomeStatement>, DcfError> {
        let body = self.get_text(&format!("/api/v3/financials/income-statement/{}", ticker))?;
        parse_income_statements(ticker, &body)
    }

    fn fetch_quote(&self, ticker: &str) -> Result<Option<Quote>, DcfError> {
        let body = self.get_text(&format!("/api/v3/quote-short/{}", ticker))?;
        parse_quote(ticker, &body)
    }
}
