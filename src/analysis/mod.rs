//! Per-ticker analysis pipeline and the sequential batch loop

mod record;
mod analyzer;

pub use record::ResultRecord;
pub use analyzer::{BatchFault, BatchOutcome, TickerAnalyzer};
