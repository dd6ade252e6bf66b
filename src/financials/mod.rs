//! Reported financials and the historical growth derived from them

mod statements;
mod growth;

pub use statements::{IncomeStatement, Quote};
pub use growth::{cagr_pct, evaluate_growth, GrowthHistory, Rejection, MIN_STATEMENTS, OLDEST_INDEX};
