//! Secant iteration over (growth, NPV) pairs
//!
//! Trial 0 is the historical growth rate, trial 1 is a damped restart at a
//! fifth of it, and every later trial follows the secant line through the
//! two most recent points. There is no bracketing: a zero slope or a
//! repeated growth rate ends the search as a failure.

use super::trace::{IterationTrace, TrialColumn};
use crate::config::{AnalysisConfig, SolverConfig};
use crate::projection::{npv, project_eps, with_outlay};
use log::debug;
use serde::Serialize;

/// Why the search stopped without a breakeven rate
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SolverFailure {
    /// Two consecutive trials used the same growth rate
    #[error("Required growth not found. Slope denom. = 0")]
    ZeroGrowthDelta { trial: usize },

    /// NPV did not change between two consecutive trials
    #[error("Required growth not found. Slope = 0")]
    ZeroSlope { trial: usize },
}

/// Terminal state of one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverOutcome {
    Converged { growth_pct: f64, trial: usize },
    Failed(SolverFailure),
    Exhausted { trials: usize },
}

impl SolverOutcome {
    /// Warning text for the result record, None on convergence
    pub fn warning(&self) -> Option<String> {
        match self {
            SolverOutcome::Converged { .. } => None,
            SolverOutcome::Failed(failure) => Some(failure.to_string()),
            SolverOutcome::Exhausted { trials } => Some(format!(
                "Minimum required growth not found after {} iteration.",
                ordinal(*trials)
            )),
        }
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Whether historical growth already clears the breakeven requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Favorable,
    Unfavorable,
}

/// Outcome of a search together with every trial it ran
#[derive(Debug, Clone, PartialEq)]
pub struct BreakevenSolution {
    pub outcome: SolverOutcome,
    pub trace: IterationTrace,
    pub historical_growth_pct: f64,
}

impl BreakevenSolution {
    pub fn breakeven_growth_pct(&self) -> Option<f64> {
        match self.outcome {
            SolverOutcome::Converged { growth_pct, .. } => Some(growth_pct),
            _ => None,
        }
    }

    /// Favorable when the breakeven rate is at or below historical growth
    pub fn verdict(&self) -> Option<Verdict> {
        self.breakeven_growth_pct().map(|g| {
            if g <= self.historical_growth_pct {
                Verdict::Favorable
            } else {
                Verdict::Unfavorable
            }
        })
    }

    pub fn is_converged(&self) -> bool {
        matches!(self.outcome, SolverOutcome::Converged { .. })
    }
}

/// Breakeven growth solver for a fixed discount rate and horizon
#[derive(Debug, Clone)]
pub struct BreakevenSolver {
    discount_rate: f64,
    horizon: usize,
    config: SolverConfig,
}

impl BreakevenSolver {
    pub fn new(discount_rate: f64, horizon: usize, config: SolverConfig) -> Self {
        Self {
            discount_rate,
            horizon,
            config,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.discount_rate, config.years_discounted, config.solver)
    }

    /// Projected cashflow and its NPV at one growth rate
    fn evaluate(&self, base_eps: f64, growth_pct: f64, outlay: f64) -> (Vec<f64>, f64) {
        let cashflows = with_outlay(project_eps(base_eps, growth_pct, self.horizon), outlay);
        let value = npv(self.discount_rate, &cashflows);
        (cashflows, value)
    }

    /// Build the trial 0 column for a growth rate
    pub fn seed(&self, base_eps: f64, growth_pct: f64, outlay: f64) -> TrialColumn {
        let (cashflows, npv) = self.evaluate(base_eps, growth_pct, outlay);
        TrialColumn {
            trial: 0,
            growth_pct,
            cashflows,
            npv,
            slope: None,
        }
    }

    /// Search from the historical growth rate.
    ///
    /// `outlay` is paid in year 0; pass the share price for the buyer's
    /// breakeven or 0 to solve on the EPS stream alone.
    pub fn solve(&self, base_eps: f64, historical_growth_pct: f64, outlay: f64) -> BreakevenSolution {
        let seed = self.seed(base_eps, historical_growth_pct, outlay);
        self.solve_seeded(base_eps, outlay, seed)
    }

    /// Search reusing an already evaluated trial 0
    pub fn solve_seeded(&self, base_eps: f64, outlay: f64, seed: TrialColumn) -> BreakevenSolution {
        let historical_growth_pct = seed.growth_pct;
        let mut trace = IterationTrace::new();
        trace.push(TrialColumn { trial: 0, slope: None, ..seed });

        let outcome = self.iterate(base_eps, outlay, &mut trace);
        debug!("breakeven search ended after {} trials: {:?}", trace.len(), outcome);

        BreakevenSolution {
            outcome,
            trace,
            historical_growth_pct,
        }
    }

    fn iterate(&self, base_eps: f64, outlay: f64, trace: &mut IterationTrace) -> SolverOutcome {
        let Some(seed) = trace.last() else {
            return SolverOutcome::Exhausted { trials: 0 };
        };
        let mut prev_growth = seed.growth_pct;
        let mut prev_npv = seed.npv;
        let mut prev_slope = 0.0;

        for trial in 1..self.config.max_trials {
            let growth = if trial == 1 {
                self.config.restart_factor * prev_growth
            } else {
                prev_growth - prev_npv / prev_slope
            };

            let (cashflows, value) = self.evaluate(base_eps, growth, outlay);
            let delta = growth - prev_growth;

            if delta == 0.0 {
                trace.push(TrialColumn {
                    trial,
                    growth_pct: growth,
                    cashflows,
                    npv: value,
                    slope: None,
                });
                return SolverOutcome::Failed(SolverFailure::ZeroGrowthDelta { trial });
            }

            let slope = (value - prev_npv) / delta;
            trace.push(TrialColumn {
                trial,
                growth_pct: growth,
                cashflows,
                npv: value,
                slope: Some(slope),
            });

            if trial >= 2 && value.abs() < self.config.npv_tolerance {
                return SolverOutcome::Converged {
                    growth_pct: growth,
                    trial,
                };
            }

            if slope == 0.0 {
                return SolverOutcome::Failed(SolverFailure::ZeroSlope { trial });
            }

            prev_growth = growth;
            prev_npv = value;
            prev_slope = slope;
        }

        SolverOutcome::Exhausted {
            trials: self.config.max_trials,
        }
    }
}
