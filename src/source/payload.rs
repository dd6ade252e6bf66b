//! Financial Modeling Prep response bodies
//!
//! Statement values arrive as strings or numbers. Blank strings and nulls
//! read as 0 so the growth guards can report them; anything else that does
//! not parse is a malformed response.

use crate::error::DcfError;
use crate::financials::{IncomeStatement, Quote};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct IncomeStatementsPayload {
    #[serde(default)]
    financials: Vec<RawStatement>,
}

#[derive(Debug, Deserialize)]
struct RawStatement {
    date: String,
    #[serde(rename = "Net Income Com", default)]
    net_income: Value,
    #[serde(rename = "EPS Diluted", default)]
    eps_diluted: Value,
}

impl RawStatement {
    fn into_statement(self, ticker: &str) -> Result<IncomeStatement, DcfError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| DcfError::malformed(ticker, format!("bad statement date {:?}: {}", self.date, e)))?;

        Ok(IncomeStatement {
            date,
            net_income: lenient_number(ticker, "Net Income Com", &self.net_income)?,
            eps_diluted: lenient_number(ticker, "EPS Diluted", &self.eps_diluted)?,
        })
    }
}

fn lenient_number(ticker: &str, field: &str, value: &Value) -> Result<f64, DcfError> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DcfError::malformed(ticker, format!("{} out of range", field))),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| DcfError::malformed(ticker, format!("{} is not a number: {:?}", field, s))),
        other => Err(DcfError::malformed(ticker, format!("{} has unexpected type: {}", field, other))),
    }
}

/// Parse an income-statement body. `{}` means the ticker has no statements.
pub fn parse_income_statements(ticker: &str, body: &str) -> Result<Vec<IncomeStatement>, DcfError> {
    let payload: IncomeStatementsPayload = serde_json::from_str(body)?;
    payload
        .financials
        .into_iter()
        .map(|raw| raw.into_statement(ticker))
        .collect()
}

/// Parse a quote-short body: `[{"symbol", "price", "volume"}]`.
pub fn parse_quote(ticker: &str, body: &str) -> Result<Option<Quote>, DcfError> {
    let value: Value = serde_json::from_str(body)?;

    let entry = match &value {
        Value::Array(entries) => match entries.first() {
            Some(entry) => entry,
            None => return Ok(None),
        },
        Value::Object(map) if map.is_empty() => return Ok(None),
        other => return Err(DcfError::malformed(ticker, format!("unexpected quote body: {}", other))),
    };

    match entry.get("price") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64().map(|price| Quote { price })),
        Some(other) => Err(DcfError::malformed(ticker, format!("price has unexpected type: {}", other))),
    }
}
