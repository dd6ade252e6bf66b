//! Historical growth validation pipeline
//!
//! The newest statement and the one four records older are compared. Each
//! guard either passes or rejects the ticker with the warning text shown on
//! its result record; nothing numeric runs after a rejection.

use super::IncomeStatement;

/// Statements required before growth is computed
pub const MIN_STATEMENTS: usize = 5;

/// Index of the oldest statement compared against the newest
pub const OLDEST_INDEX: usize = MIN_STATEMENTS - 1;

/// Why a ticker was skipped. `Display` is the record's warning text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("No income statement found.")]
    NoIncomeStatement,

    #[error("Less than 5 years of data")]
    InsufficientHistory { statements: usize },

    #[error("NI negative in newest year")]
    NewestNetIncomeNotPositive,

    #[error("Newest yr history EPS not found or blank or zero")]
    NewestEpsMissing,

    #[error("Oldest yr history EPS not found")]
    OldestEpsMissing,

    #[error("Oldest or newest net income was non-positive.")]
    NetIncomeNotPositive,

    #[error("Estimate of shares outstanding is negative.")]
    SharesOutstandingInvalid,

    #[error("Compared fiscal years are not in chronological order.")]
    FiscalYearsOutOfOrder { newest: i32, oldest: i32 },

    /// Growth was computed and stays on the record
    #[error("EPS growth during past 5 years was negative.")]
    NegativeEpsGrowth(GrowthHistory),

    #[error("No share price found")]
    NoQuote,

    #[error("Market cap is less than ${floor:.0}.")]
    MarketCapBelowFloor { market_cap: f64, floor: f64 },
}

/// Growth between the newest and oldest compared statements
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthHistory {
    pub newest_year: i32,
    pub oldest_year: i32,
    pub eps_newest: f64,
    pub net_income_growth_pct: f64,
    pub eps_growth_pct: f64,
    pub share_growth_pct: f64,
    pub shares_outstanding: f64,
}

/// Compound annual growth in percent: `(end/start)^(1/years) * 100 - 100`
pub fn cagr_pct(end: f64, start: f64, years: f64) -> f64 {
    (end / start).powf(1.0 / years) * 100.0 - 100.0
}

/// Run the guard chain over statements ordered newest first.
pub fn evaluate_growth(statements: &[IncomeStatement]) -> Result<GrowthHistory, Rejection> {
    if statements.is_empty() {
        return Err(Rejection::NoIncomeStatement);
    }
    if statements.len() < MIN_STATEMENTS {
        return Err(Rejection::InsufficientHistory {
            statements: statements.len(),
        });
    }

    let newest = &statements[0];
    let oldest = &statements[OLDEST_INDEX];

    // Guards are negated so NaN fails them
    if !(newest.net_income > 0.0) {
        return Err(Rejection::NewestNetIncomeNotPositive);
    }
    if newest.eps_diluted == 0.0 {
        return Err(Rejection::NewestEpsMissing);
    }
    if oldest.eps_diluted == 0.0 {
        return Err(Rejection::OldestEpsMissing);
    }
    if !(newest.net_income > 0.0 && oldest.net_income > 0.0) {
        return Err(Rejection::NetIncomeNotPositive);
    }

    let shares_newest = newest.implied_shares();
    let shares_oldest = oldest.implied_shares();
    let valid_shares = |shares: f64| shares >= 1.0 && shares.is_finite();
    if !(valid_shares(shares_newest) && valid_shares(shares_oldest)) {
        return Err(Rejection::SharesOutstandingInvalid);
    }

    let newest_year = newest.fiscal_year();
    let oldest_year = oldest.fiscal_year();
    let years = newest_year - oldest_year;
    if years <= 0 {
        return Err(Rejection::FiscalYearsOutOfOrder {
            newest: newest_year,
            oldest: oldest_year,
        });
    }
    let years = years as f64;

    let history = GrowthHistory {
        newest_year,
        oldest_year,
        eps_newest: newest.eps_diluted,
        net_income_growth_pct: cagr_pct(newest.net_income, oldest.net_income, years),
        eps_growth_pct: cagr_pct(newest.eps_diluted, oldest.eps_diluted, years),
        share_growth_pct: cagr_pct(shares_newest, shares_oldest, years),
        shares_outstanding: shares_newest,
    };

    if !(history.eps_growth_pct >= 0.0) {
        return Err(Rejection::NegativeEpsGrowth(history));
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn statement(year: i32, net_income: f64, eps: f64) -> IncomeStatement {
        IncomeStatement::new(NaiveDate::from_ymd_opt(year, 12, 31).unwrap(), net_income, eps)
    }

    /// Five years, newest first, EPS doubling over the four-year span
    fn history(newest: IncomeStatement, oldest: IncomeStatement) -> Vec<IncomeStatement> {
        vec![
            newest,
            statement(2022, 900.0, 1.8),
            statement(2021, 800.0, 1.6),
            statement(2020, 700.0, 1.4),
            oldest,
        ]
    }

    #[test]
    fn test_growth_rates() {
        let statements = history(statement(2023, 2000.0, 4.0), statement(2019, 1000.0, 2.0));
        let growth = evaluate_growth(&statements).unwrap();

        assert_eq!(growth.newest_year, 2023);
        assert_eq!(growth.oldest_year, 2019);
        assert_eq!(growth.eps_newest, 4.0);
        let expected = (2.0_f64.powf(0.25) - 1.0) * 100.0;
        assert_relative_eq!(growth.eps_growth_pct, expected, max_relative = 1e-12);
        assert_relative_eq!(growth.net_income_growth_pct, expected, max_relative = 1e-12);
        assert_relative_eq!(growth.share_growth_pct, 0.0, epsilon = 1e-12);
        assert_relative_eq!(growth.shares_outstanding, 500.0);
    }

    #[test]
    fn test_empty_and_short_history() {
        assert_eq!(evaluate_growth(&[]), Err(Rejection::NoIncomeStatement));

        let short = vec![statement(2023, 10.0, 1.0); 4];
        let rejection = evaluate_growth(&short).unwrap_err();
        assert_eq!(rejection, Rejection::InsufficientHistory { statements: 4 });
        assert_eq!(rejection.to_string(), "Less than 5 years of data");
    }

    #[test]
    fn test_guard_order() {
        let cases = [
            (statement(2023, -5.0, 0.0), statement(2019, 1000.0, 2.0), "NI negative in newest year"),
            (
                statement(2023, 2000.0, 0.0),
                statement(2019, 1000.0, 0.0),
                "Newest yr history EPS not found or blank or zero",
            ),
            (statement(2023, 2000.0, 4.0), statement(2019, 1000.0, 0.0), "Oldest yr history EPS not found"),
            (
                statement(2023, 2000.0, 4.0),
                statement(2019, -1000.0, 2.0),
                "Oldest or newest net income was non-positive.",
            ),
            (
                statement(2023, 2000.0, -4.0),
                statement(2019, 1000.0, 2.0),
                "Estimate of shares outstanding is negative.",
            ),
            (
                statement(2023, 2000.0, 4.0),
                statement(2023, 1000.0, 2.0),
                "Compared fiscal years are not in chronological order.",
            ),
        ];

        for (newest, oldest, warning) in cases {
            let rejection = evaluate_growth(&history(newest, oldest)).unwrap_err();
            assert_eq!(rejection.to_string(), warning);
        }
    }

    #[test]
    fn test_negative_eps_growth_keeps_history() {
        let statements = history(statement(2023, 1000.0, 2.0), statement(2019, 2000.0, 4.0));
        match evaluate_growth(&statements) {
            Err(Rejection::NegativeEpsGrowth(growth)) => {
                assert!(growth.eps_growth_pct < 0.0);
                assert_eq!(growth.newest_year, 2023);
            }
            other => panic!("expected negative growth rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let nan_income = history(statement(2023, f64::NAN, 4.0), statement(2019, 1000.0, 2.0));
        assert_eq!(
            evaluate_growth(&nan_income),
            Err(Rejection::NewestNetIncomeNotPositive)
        );

        let nan_oldest_income = history(statement(2023, 2000.0, 4.0), statement(2019, f64::NAN, 2.0));
        assert_eq!(
            evaluate_growth(&nan_oldest_income),
            Err(Rejection::NetIncomeNotPositive)
        );

        let nan_eps = history(statement(2023, 2000.0, f64::NAN), statement(2019, 1000.0, 2.0));
        assert_eq!(
            evaluate_growth(&nan_eps),
            Err(Rejection::SharesOutstandingInvalid)
        );

        let infinite_income = history(statement(2023, f64::INFINITY, 4.0), statement(2019, 1000.0, 2.0));
        assert_eq!(
            evaluate_growth(&infinite_income),
            Err(Rejection::SharesOutstandingInvalid)
        );
    }

    #[test]
    fn test_market_cap_message() {
        let rejection = Rejection::MarketCapBelowFloor {
            market_cap: 5.0e8,
            floor: 1.0e9,
        };
        assert_eq!(rejection.to_string(), "Market cap is less than $1000000000.");
    }
}
