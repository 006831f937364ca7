//! Run configuration.

/// Name of the column the default filter reads.
pub const DEFAULT_COLUMN: &str = "Electric Range";

/// Rows must exceed this range to be kept.
pub const DEFAULT_MIN_RANGE: i64 = 200;

/// How often a progress line is printed, in processed rows.
pub const DEFAULT_PROGRESS_EVERY: u64 = 100_000;

/// Settings for one filter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Header name of the filter column, matched exactly.
    pub column: String,
    /// Exclusive lower bound: a row is eligible when its value is greater.
    pub min_range: i64,
    /// Print a progress line every this many rows; `0` disables it.
    pub progress_every: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            min_range: DEFAULT_MIN_RANGE,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

impl FilterConfig {
    /// Same as [`FilterConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the column with this header name.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Keep rows whose value is strictly greater than `min_range`.
    pub fn with_min_range(mut self, min_range: i64) -> Self {
        self.min_range = min_range;
        self
    }

    /// Report progress every `rows` processed rows; `0` turns it off.
    pub fn with_progress_every(mut self, rows: u64) -> Self {
        self.progress_every = rows;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.column, "Electric Range");
        assert_eq!(config.min_range, 200);
        assert_eq!(config.progress_every, 100_000);
    }

    #[test]
    fn test_builders_override() {
        let config = FilterConfig::new()
            .with_column("Range")
            .with_min_range(50)
            .with_progress_every(0);
        assert_eq!(config.column, "Range");
        assert_eq!(config.min_range, 50);
        assert_eq!(config.progress_every, 0);
    }
}
