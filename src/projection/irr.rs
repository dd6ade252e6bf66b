//! Internal Rate of Return (IRR) calculation
//!
//! Used to report the annual return of buying one share at the current price

/// Calculate the annual IRR of a yearly cashflow sequence using
/// Newton-Raphson, falling back to bisection.
///
/// # Arguments
/// * `cashflows` - Yearly cash flows, index 0 is the purchase year
///
/// # Returns
/// * `Option<f64>` - IRR as a decimal (e.g., 0.05 for 5%), or None if no solution found
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    // An IRR needs at least one sign change
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.05;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            return calculate_irr_bisection(cashflows);
        }

        let new_rate = (rate - npv / dnpv).max(-0.99).min(10.0);

        if (new_rate - rate).abs() < tolerance {
            return Some(new_rate);
        }

        rate = new_rate;
    }

    calculate_irr_bisection(cashflows)
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

fn calculate_irr_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    let npv_low = super::npv(low, cashflows);
    let npv_high = super::npv(high, cashflows);

    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = super::npv(mid, cashflows);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * super::npv(low, cashflows) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{npv, purchase_cashflows};

    #[test]
    fn test_simple_irr() {
        // Pay $1000, receive $1100 a year later
        let irr = calculate_irr(&[-1000.0, 1100.0]).unwrap();
        assert!((irr - 0.10).abs() < 1e-8, "Expected 10% IRR, got {}", irr);
    }

    #[test]
    fn test_share_purchase_irr_zeroes_npv() {
        let cashflows = purchase_cashflows(5.0, 10.0, 15, 100.0);
        let irr = calculate_irr(&cashflows).unwrap();
        assert!(irr > 0.06 && irr < 0.10, "unexpected IRR {}", irr);
        assert!(npv(irr, &cashflows).abs() < 1e-6);
    }

    #[test]
    fn test_no_sign_change() {
        assert!(calculate_irr(&[0.0, 1.0, 2.0]).is_none());
        assert!(calculate_irr(&[]).is_none());
        assert_eq!(calculate_irr(&[0.0, 0.0]), Some(0.0));
    }
}
