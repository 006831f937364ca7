//! Error types for the filter pipeline.
//!
//! `EtlError` is fatal and ends the run. `RowError` describes why a single
//! data row could not be classified; the executor counts it as invalid and
//! moves on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a run.
#[derive(Debug, Error)]
pub enum EtlError {
    /// A file could not be opened, created, or flushed.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing CSV failed outside of a single row.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// The input has no header record.
    #[error("{0}")]
    Format(String),

    /// The filter column is absent from the header.
    #[error("Column '{column}' not found")]
    MissingColumn { column: String },
}

impl EtlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EtlError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a data row was counted as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row has {len} fields, filter column is at index {index}")]
    ShortRow { len: usize, index: usize },

    #[error("filter field is empty")]
    EmptyField,

    #[error("'{value}' is not an integer")]
    NotAnInteger { value: String },

    /// The CSV reader rejected the record itself (e.g. invalid UTF-8).
    #[error("malformed record: {0}")]
    Malformed(String),
}
