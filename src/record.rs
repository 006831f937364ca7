//! Header lookup and per-row classification.
//!
//! A row is classified by reading one field, the filter column, as a
//! base-10 integer and comparing it against an exclusive lower bound.

use std::num::IntErrorKind;

use csv::StringRecord;

use crate::error::{EtlError, RowError};

/// Outcome of classifying a well-formed row.
///
/// Values beyond the `i64` range are carried saturated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Value exceeds the threshold; the row is written.
    Eligible(i64),
    /// Value is at or below the threshold; the row is dropped.
    BelowThreshold(i64),
}

/// The header record of the input, kept for column lookup.
#[derive(Debug, Clone)]
pub struct Header {
    record: StringRecord,
}

impl Header {
    /// Wrap a header record. An empty record means the input had no header.
    pub fn new(record: StringRecord) -> Result<Self, EtlError> {
        if record.is_empty() {
            return Err(EtlError::Format("Empty file: no header row".to_string()));
        }
        Ok(Self { record })
    }

    /// The header fields as read.
    pub fn record(&self) -> &StringRecord {
        &self.record
    }

    /// Zero-based position of the column named exactly `name`.
    pub fn position(&self, name: &str) -> Result<usize, EtlError> {
        self.record
            .iter()
            .position(|field| field == name)
            .ok_or_else(|| EtlError::MissingColumn {
                column: name.to_string(),
            })
    }
}

/// Keeps rows whose filter field is an integer greater than `min_range`.
#[derive(Debug, Clone, Copy)]
pub struct RangeFilter {
    index: usize,
    min_range: i64,
}

impl RangeFilter {
    /// Filter on the field at `index`, keeping values above `min_range`.
    pub fn new(index: usize, min_range: i64) -> Self {
        Self { index, min_range }
    }

    /// Position of the filter field in each row.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Decide whether `row` is kept, dropped, or invalid.
    pub fn classify(&self, row: &StringRecord) -> Result<Verdict, RowError> {
        let raw = row.get(self.index).ok_or(RowError::ShortRow {
            len: row.len(),
            index: self.index,
        })?;
        let verdict = match parse_range(raw)? {
            Range::Value(value) if value > self.min_range => Verdict::Eligible(value),
            Range::Value(value) => Verdict::BelowThreshold(value),
            Range::AboveAll => Verdict::Eligible(i64::MAX),
            Range::BelowAll => Verdict::BelowThreshold(i64::MIN),
        };
        Ok(verdict)
    }
}

/// A parsed filter field.
enum Range {
    Value(i64),
    /// Digits only, but larger than any `i64`.
    AboveAll,
    /// Digits only, but smaller than any `i64`.
    BelowAll,
}

/// Parse a trimmed field as an optionally signed decimal integer.
fn parse_range(raw: &str) -> Result<Range, RowError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RowError::EmptyField);
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Ok(Range::Value(value)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(Range::AboveAll),
            IntErrorKind::NegOverflow => Ok(Range::BelowAll),
            _ => Err(RowError::NotAnInteger {
                value: trimmed.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_header_position_exact_match() {
        let header = Header::new(row(&["Make", "Model", "Electric Range"])).unwrap();
        assert_eq!(header.position("Electric Range").unwrap(), 2);
    }

    #[test]
    fn test_header_position_is_case_and_space_sensitive() {
        let header = Header::new(row(&["Make", "electric range", " Electric Range"])).unwrap();
        let err = header.position("Electric Range").unwrap_err();
        assert!(matches!(err, EtlError::MissingColumn { .. }));
    }

    #[test]
    fn test_empty_header_is_format_error() {
        let err = Header::new(StringRecord::new()).unwrap_err();
        assert!(matches!(err, EtlError::Format(_)));
    }

    #[test]
    fn test_classify_eligible() {
        let filter = RangeFilter::new(1, 200);
        assert_eq!(
            filter.classify(&row(&["Tesla", "250"])),
            Ok(Verdict::Eligible(250))
        );
    }

    #[test]
    fn test_classify_threshold_is_exclusive() {
        let filter = RangeFilter::new(1, 200);
        assert_eq!(
            filter.classify(&row(&["Tesla", "200"])),
            Ok(Verdict::BelowThreshold(200))
        );
        assert_eq!(
            filter.classify(&row(&["Tesla", "201"])),
            Ok(Verdict::Eligible(201))
        );
    }

    #[test]
    fn test_classify_trims_whitespace() {
        let filter = RangeFilter::new(0, 200);
        assert_eq!(filter.classify(&row(&["  330 "])), Ok(Verdict::Eligible(330)));
    }

    #[test]
    fn test_classify_accepts_sign() {
        let filter = RangeFilter::new(0, 200);
        assert_eq!(filter.classify(&row(&["+210"])), Ok(Verdict::Eligible(210)));
        assert_eq!(
            filter.classify(&row(&["-5"])),
            Ok(Verdict::BelowThreshold(-5))
        );
    }

    #[test]
    fn test_classify_short_row() {
        let filter = RangeFilter::new(3, 200);
        assert_eq!(
            filter.classify(&row(&["Ford", "F-150"])),
            Err(RowError::ShortRow { len: 2, index: 3 })
        );
    }

    #[test]
    fn test_classify_empty_field() {
        let filter = RangeFilter::new(1, 200);
        assert_eq!(filter.classify(&row(&["Ford", ""])), Err(RowError::EmptyField));
        assert_eq!(filter.classify(&row(&["Ford", "   "])), Err(RowError::EmptyField));
    }

    #[test]
    fn test_classify_rejects_non_integers() {
        let filter = RangeFilter::new(0, 200);
        for bad in ["abc", "250.0", "1,000", "1_000", "0x10", "2 50", "+"] {
            assert_eq!(
                filter.classify(&row(&[bad])),
                Err(RowError::NotAnInteger {
                    value: bad.trim().to_string()
                }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_classify_oversized_values_keep_their_sign() {
        let filter = RangeFilter::new(0, i64::MAX);
        assert_eq!(
            filter.classify(&row(&["99999999999999999999"])),
            Ok(Verdict::Eligible(i64::MAX))
        );
        assert_eq!(
            filter.classify(&row(&["-99999999999999999999"])),
            Ok(Verdict::BelowThreshold(i64::MIN))
        );
        assert_eq!(
            filter.classify(&row(&["+99999999999999999999"])),
            Ok(Verdict::Eligible(i64::MAX))
        );
    }
}
