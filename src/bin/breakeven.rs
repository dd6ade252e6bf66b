//! Solve the breakeven growth rate for one set of inputs
//!
//! Usage: cargo run --bin breakeven -- --eps 5 --growth 10 --price 100

use clap::Parser;
use dcf_breakeven::config::{DEFAULT_DISCOUNT_RATE, DEFAULT_YEARS_DISCOUNTED};
use dcf_breakeven::projection::{calculate_irr, purchase_cashflows};
use dcf_breakeven::{BreakevenSolver, SolverConfig, SolverOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "breakeven", about = "Secant search for the breakeven EPS growth rate")]
struct Args {
    /// Latest diluted EPS
    #[arg(long)]
    eps: f64,

    /// Historical EPS growth in percent, used as the first trial
    #[arg(long, allow_hyphen_values = true)]
    growth: f64,

    /// Share price paid in the purchase year (0 solves on EPS alone)
    #[arg(long, default_value_t = 0.0)]
    price: f64,

    #[arg(long, default_value_t = DEFAULT_DISCOUNT_RATE)]
    discount_rate: f64,

    #[arg(long, default_value_t = DEFAULT_YEARS_DISCOUNTED)]
    years: usize,

    /// Write the iteration trace here as CSV
    #[arg(long)]
    trace_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let solver = BreakevenSolver::new(args.discount_rate, args.years, SolverConfig::default());
    let solution = solver.solve(args.eps, args.growth, args.price);

    println!("{:>5} {:>14} {:>16} {:>16}", "Trial", "Growth %", "NPV", "Slope");
    println!("{}", "-".repeat(54));
    for column in solution.trace.columns() {
        let slope = column
            .slope
            .map(|s| format!("{:16.6}", s))
            .unwrap_or_else(|| format!("{:>16}", "-"));
        println!(
            "{:>5} {:>14.6} {:>16.6} {}",
            column.trial, column.growth_pct, column.npv, slope
        );
    }

    if args.price > 0.0 {
        match calculate_irr(&purchase_cashflows(args.eps, args.growth, args.years, args.price)) {
            Some(irr) => println!("\nIRR at historical growth: {:.2}%", irr * 100.0),
            None => println!("\nIRR at historical growth not found"),
        }
    }

    if let Some(path) = &args.trace_out {
        solution.trace.save(path)?;
        println!("Trace written to {}", path.display());
    }

    match solution.outcome {
        SolverOutcome::Converged { growth_pct, trial } => {
            println!(
                "Breakeven EPS growth {:.4}% found at trial {} ({:?})",
                growth_pct,
                trial,
                solution.verdict()
            );
            Ok(ExitCode::SUCCESS)
        }
        outcome => {
            println!("{}", outcome.warning().unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }
    }
}
