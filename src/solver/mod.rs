//! Breakeven EPS growth search
//!
//! Finds the growth rate at which a share's discounted earnings exactly pay
//! back its price, using a secant iteration seeded with the historical rate.
//! Every trial is kept so a failed search can be replayed from disk.

mod trace;
mod breakeven;

pub use trace::{failure_trace_path, IterationTrace, TrialColumn};
pub use breakeven::{BreakevenSolution, BreakevenSolver, SolverFailure, SolverOutcome, Verdict};
