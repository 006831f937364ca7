//! Run counters and the end-of-run report.

use std::fmt;
use std::time::Duration;

/// Row counts for one run.
///
/// Every processed row lands in exactly one of `eligible`, `invalid`, or
/// `below_threshold`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub processed: u64,
    pub eligible: u64,
    pub invalid: u64,
    pub below_threshold: u64,
}

impl RunStats {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every processed row was counted exactly once.
    pub fn is_balanced(&self) -> bool {
        self.processed == self.eligible + self.invalid + self.below_threshold
    }

    /// Summary lines printed after a run.
    pub fn report(&self, elapsed: Duration) -> Report<'_> {
        Report {
            stats: self,
            elapsed,
        }
    }
}

/// Display adapter for the summary block.
pub struct Report<'a> {
    stats: &'a RunStats,
    elapsed: Duration,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total processed: {} records", self.stats.processed)?;
        writeln!(f, "Eligible: {} records", self.stats.eligible)?;
        writeln!(f, "Invalid/Skipped: {} records", self.stats.invalid)?;
        write!(
            f,
            "ETL completed in {:.2} seconds",
            self.elapsed.as_secs_f64()
        )
    }
}
