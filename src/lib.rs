//! # ev-etl
//!
//! Streaming CSV filter for vehicle registration records.
//!
//! The input is read one row at a time. Each row's `Electric Range` field
//! (or another configured column) is parsed as an integer, and rows whose
//! value exceeds the threshold are written unchanged to the output. Rows
//! that are short, empty in that field, or not an integer are counted as
//! invalid and skipped; an empty line counts as a short row.
//!
//! ## Example
//!
//! ```
//! use ev_etl::{FilterConfig, filter_stream};
//!
//! let input = "Make,Electric Range\nTesla,250\nNissan,150\nFord,\nKia,abc\n";
//! let mut output = Vec::new();
//!
//! let stats = filter_stream(input.as_bytes(), &mut output, &FilterConfig::default(), |_| {})
//!     .unwrap();
//!
//! assert_eq!(output, b"Make,Electric Range\nTesla,250\n");
//! assert_eq!((stats.processed, stats.eligible, stats.invalid), (4, 1, 2));
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod record;
pub mod source;
pub mod stats;

pub use config::{DEFAULT_COLUMN, DEFAULT_MIN_RANGE, DEFAULT_PROGRESS_EVERY, FilterConfig};
pub use error::{EtlError, RowError};
pub use executor::{filter_stream, run_files};
pub use record::{Header, RangeFilter, Verdict};
pub use source::{RowSource, UTF8_BOM};
pub use stats::{Report, RunStats};
