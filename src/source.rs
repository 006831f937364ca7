//! Row source that accounts for empty lines.
//!
//! The CSV parser drops empty lines between records. Every line of the
//! input is a row for counting purposes, so the source keeps the bytes the
//! parser consumed and counts the empty lines it skipped before each record.

use std::io::{self, Read};

use csv::{Reader, ReaderBuilder, StringRecord};

/// UTF-8 byte order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read adapter that remembers bytes pulled from `inner` until released.
struct TrackedInput<R> {
    inner: R,
    window: Vec<u8>,
    window_start: u64,
}

impl<R> TrackedInput<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            window: Vec::new(),
            window_start: 0,
        }
    }

    /// Bytes at input offsets `from..to` that are still held.
    fn span(&self, from: u64, to: u64) -> &[u8] {
        let lo = from.saturating_sub(self.window_start) as usize;
        let hi = (to.saturating_sub(self.window_start) as usize).min(self.window.len());
        self.window.get(lo..hi).unwrap_or(&[])
    }

    fn release_before(&mut self, offset: u64) {
        let n = (offset.saturating_sub(self.window_start) as usize).min(self.window.len());
        self.window.drain(..n);
        self.window_start += n as u64;
    }
}

impl<R: Read> Read for TrackedInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.window.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

/// Count the empty lines in the run of terminators that opens `span`.
///
/// When the previous record ended on `\r`, a `\n` right after it finishes
/// that record's CRLF and is not an empty line.
fn leading_blank_lines(span: &[u8], after_cr: bool) -> u64 {
    let mut bytes = span
        .iter()
        .copied()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .peekable();
    if after_cr && bytes.peek() == Some(&b'\n') {
        bytes.next();
    }
    let mut count = 0;
    while let Some(b) = bytes.next() {
        if b == b'\r' && bytes.peek() == Some(&b'\n') {
            bytes.next();
        }
        count += 1;
    }
    count
}

/// Flexible, header-less CSV reader that also reports skipped empty lines.
pub struct RowSource<R> {
    reader: Reader<TrackedInput<R>>,
    after_cr: bool,
    bom: bool,
}

impl<R: Read> RowSource<R> {
    /// Wrap `input` for reading comma-separated rows.
    pub fn new(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(TrackedInput::new(input));
        Self {
            reader,
            after_cr: false,
            bom: false,
        }
    }

    /// Read the next record into `row`.
    ///
    /// Returns how many empty lines preceded the record, along with the
    /// parser's result. Empty lines at the end of the input come back with
    /// `Ok(false)`.
    pub fn read_row(&mut self, row: &mut StringRecord) -> (u64, csv::Result<bool>) {
        let from = self.reader.position().byte();
        let result = self.reader.read_record(row);
        let to = self.reader.position().byte();

        let input = self.reader.get_mut();
        let mut span = input.span(from, to);
        if from == 0
            && let Some(rest) = span.strip_prefix(UTF8_BOM)
        {
            self.bom = true;
            span = rest;
        }
        let blank = leading_blank_lines(span, self.after_cr);
        if let Some(&last) = span.last() {
            self.after_cr = last == b'\r';
        }
        input.release_before(to);

        (blank, result)
    }

    /// Whether the input opened with a UTF-8 byte order mark.
    pub fn has_bom(&self) -> bool {
        self.bom
    }
}
