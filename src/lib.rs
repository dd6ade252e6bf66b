//! DCF breakeven analysis for equity tickers
//!
//! This library provides:
//! - Historical EPS, net income and share-count growth from annual statements
//! - EPS projections, NPV and IRR for a single-share purchase
//! - A secant search for the EPS growth rate at which the purchase breaks even
//! - Financial Modeling Prep and offline fixture data sources
//! - CSV reports and diagnostic traces for failed searches

pub mod error;
pub mod config;
pub mod financials;
pub mod projection;
pub mod solver;
pub mod source;
pub mod analysis;
pub mod report;

// Re-export commonly used types
pub use error::DcfError;
pub use config::{AnalysisConfig, SolverConfig};
pub use analysis::{ResultRecord, TickerAnalyzer};
pub use solver::{BreakevenSolver, BreakevenSolution, SolverOutcome};
pub use source::FinancialDataSource;
