//! Per-ticker record of solver trials

use crate::error::DcfError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One trial growth rate and what it produced
#[derive(Debug, Clone, PartialEq)]
pub struct TrialColumn {
    /// Trial number (0-indexed)
    pub trial: usize,

    /// Trial EPS growth in percent
    pub growth_pct: f64,

    /// Year-indexed cashflow, index 0 carries the purchase outlay
    pub cashflows: Vec<f64>,

    /// NPV of `cashflows` at the run's discount rate
    pub npv: f64,

    /// Secant slope against the previous trial; None for the seed
    pub slope: Option<f64>,
}

/// Append-only list of trials, indexed by trial number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationTrace {
    columns: Vec<TrialColumn>,
}

impl IterationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: TrialColumn) {
        debug_assert_eq!(column.trial, self.columns.len());
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[TrialColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn last(&self) -> Option<&TrialColumn> {
        self.columns.last()
    }

    /// Write the trace with one column per trial.
    ///
    /// Rows: `purchase price`, projection years `1..=h`, `trial growth`,
    /// `trial npv`, `slope` (blank for the seed trial).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DcfError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["row".to_string()];
        header.extend(self.columns.iter().map(|c| c.trial.to_string()));
        csv_writer.write_record(&header)?;

        let years = self.columns.iter().map(|c| c.cashflows.len()).max().unwrap_or(0);
        for year in 0..years {
            let label = if year == 0 {
                "purchase price".to_string()
            } else {
                year.to_string()
            };
            let mut record = vec![label];
            record.extend(
                self.columns
                    .iter()
                    .map(|c| c.cashflows.get(year).map(|v| v.to_string()).unwrap_or_default()),
            );
            csv_writer.write_record(&record)?;
        }

        let mut growth = vec!["trial growth".to_string()];
        growth.extend(self.columns.iter().map(|c| c.growth_pct.to_string()));
        csv_writer.write_record(&growth)?;

        let mut npv = vec!["trial npv".to_string()];
        npv.extend(self.columns.iter().map(|c| c.npv.to_string()));
        csv_writer.write_record(&npv)?;

        let mut slope = vec!["slope".to_string()];
        slope.extend(
            self.columns
                .iter()
                .map(|c| c.slope.map(|s| s.to_string()).unwrap_or_default()),
        );
        csv_writer.write_record(&slope)?;

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the trace to `path`, replacing any earlier file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DcfError> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}

/// Deterministic diagnostic file name for a ticker's failed search
pub fn failure_trace_path(dir: &Path, ticker: &str) -> PathBuf {
    dir.join(format!("breakeven_failure_{}.csv", ticker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> IterationTrace {
        let mut trace = IterationTrace::new();
        trace.push(TrialColumn {
            trial: 0,
            growth_pct: 10.0,
            cashflows: vec![-100.0, 5.5, 6.05],
            npv: -10.0,
            slope: None,
        });
        trace.push(TrialColumn {
            trial: 1,
            growth_pct: 2.0,
            cashflows: vec![-100.0, 5.1, 5.202],
            npv: -20.0,
            slope: Some(1.25),
        });
        trace
    }

    #[test]
    fn test_csv_layout() {
        let mut buffer = Vec::new();
        sample_trace().write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "row,0,1",
                "purchase price,-100,-100",
                "1,5.5,5.1",
                "2,6.05,5.202",
                "trial growth,10,2",
                "trial npv,-10,-20",
                "slope,,1.25",
            ]
        );
    }

    #[test]
    fn test_save_to_failure_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = failure_trace_path(dir.path(), "DGX");
        assert!(path.ends_with("breakeven_failure_DGX.csv"));

        sample_trace().save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("row,0,1"));
    }
}
