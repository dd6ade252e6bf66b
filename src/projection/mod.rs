//! Earnings projection, discounting and IRR for a single-share purchase

mod cashflows;
mod irr;

pub use cashflows::{growth_factor, npv, project_eps, purchase_cashflows, with_outlay};
pub use irr::calculate_irr;
