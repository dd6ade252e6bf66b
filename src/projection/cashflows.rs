//! Year-indexed EPS projections
//!
//! Index 0 is the purchase year. Earnings in the purchase year are ignored
//! (shares are assumed bought late in the year), so the EPS-only projection
//! carries 0 there and the buyer's view carries the negative price.

/// Convert a growth percentage (7.5 = 7.5%) into a yearly multiplier
pub fn growth_factor(growth_pct: f64) -> f64 {
    1.0 + growth_pct / 100.0
}

/// Project EPS for `horizon` years after the purchase year.
///
/// Returns `horizon + 1` values: index 0 is 0, index 1 is
/// `base_eps * (1 + g/100)` and every later year compounds the prior one.
pub fn project_eps(base_eps: f64, growth_pct: f64, horizon: usize) -> Vec<f64> {
    let factor = growth_factor(growth_pct);
    let mut projection = Vec::with_capacity(horizon + 1);
    projection.push(0.0);

    let mut eps = base_eps;
    for _year in 1..=horizon {
        eps *= factor;
        projection.push(eps);
    }

    projection
}

/// Replace the purchase-year value with a negative outlay
pub fn with_outlay(mut cashflows: Vec<f64>, outlay: f64) -> Vec<f64> {
    if let Some(first) = cashflows.first_mut() {
        *first = -outlay;
    }
    cashflows
}

/// Share buyer's cashflow: pay `price` in year 0, receive projected EPS after
pub fn purchase_cashflows(base_eps: f64, growth_pct: f64, horizon: usize, price: f64) -> Vec<f64> {
    with_outlay(project_eps(base_eps, growth_pct, horizon), price)
}

/// Net present value with the first value undiscounted
///
/// `Σ cf[t] / (1 + rate)^t`. A rate of exactly -1 divides by zero and is
/// not guarded.
pub fn npv(rate: f64, cashflows: &[f64]) -> f64 {
    let base = 1.0 + rate;
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / base.powi(t as i32))
        .sum()
}
