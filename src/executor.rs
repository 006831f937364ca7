//! Streaming filter executor.
//!
//! Each data row is read, classified, and written (or dropped) before the
//! next row is read, so memory use does not grow with the input size.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use csv::{StringRecord, WriterBuilder};
use tracing::{debug, info, instrument, warn};

use crate::config::FilterConfig;
use crate::error::{EtlError, RowError};
use crate::record::{Header, RangeFilter, Verdict};
use crate::source::{RowSource, UTF8_BOM};
use crate::stats::RunStats;

/// Filter CSV from `input` into `output`.
///
/// The header is copied first, then every data row whose filter column
/// exceeds `config.min_range` is written unchanged. Empty lines count as
/// invalid rows. `on_progress` is called with the processed count every
/// `config.progress_every` rows.
pub fn filter_stream<R, W, F>(
    input: R,
    mut output: W,
    config: &FilterConfig,
    mut on_progress: F,
) -> Result<RunStats, EtlError>
where
    R: Read,
    W: Write,
    F: FnMut(u64),
{
    let mut source = RowSource::new(input);

    let mut first = StringRecord::new();
    let (blank_before_header, read) = source.read_row(&mut first);
    read?;
    if blank_before_header > 0 {
        // An empty first line is a header with no columns.
        return Err(EtlError::MissingColumn {
            column: config.column.clone(),
        });
    }
    let header = Header::new(first)?;

    if source.has_bom() {
        output.write_all(UTF8_BOM).map_err(csv::Error::from)?;
    }
    let mut writer = WriterBuilder::new().flexible(true).from_writer(output);
    writer.write_record(header.record())?;

    let filter = RangeFilter::new(header.position(&config.column)?, config.min_range);
    info!(column = %config.column, index = filter.index(), "located filter column");

    let mut stats = RunStats::new();
    let mut row = StringRecord::new();
    loop {
        let (blank_lines, read) = source.read_row(&mut row);
        for _ in 0..blank_lines {
            let reason = RowError::ShortRow {
                len: 0,
                index: filter.index(),
            };
            stats.processed += 1;
            stats.invalid += 1;
            debug!(row = stats.processed, %reason, "invalid row");
            report_progress(&stats, config, &mut on_progress);
        }

        let outcome = match read {
            Ok(false) => break,
            Ok(true) => filter.classify(&row),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("Skipping malformed record: {e}");
                Err(RowError::Malformed(e.to_string()))
            }
        };

        stats.processed += 1;
        match outcome {
            Ok(Verdict::Eligible(_)) => {
                writer.write_record(&row)?;
                stats.eligible += 1;
            }
            Ok(Verdict::BelowThreshold(_)) => stats.below_threshold += 1,
            Err(reason) => {
                debug!(row = stats.processed, %reason, "invalid row");
                stats.invalid += 1;
            }
        }
        report_progress(&stats, config, &mut on_progress);
    }

    writer.flush().map_err(csv::Error::from)?;
    info!(
        processed = stats.processed,
        eligible = stats.eligible,
        invalid = stats.invalid,
        below_threshold = stats.below_threshold,
        "filter finished"
    );
    Ok(stats)
}

fn report_progress<F: FnMut(u64)>(stats: &RunStats, config: &FilterConfig, on_progress: &mut F) {
    if config.progress_every > 0 && stats.processed % config.progress_every == 0 {
        on_progress(stats.processed);
    }
}

/// Open `input_path`, create `output_path`, and run [`filter_stream`].
///
/// Missing parent directories of the output are created. Both files are
/// closed when this returns, on success or failure.
#[instrument(level = "info", skip_all, fields(input = %input_path.display(), output = %output_path.display()))]
pub fn run_files<F>(
    input_path: &Path,
    output_path: &Path,
    config: &FilterConfig,
    on_progress: F,
) -> Result<RunStats, EtlError>
where
    F: FnMut(u64),
{
    let input = File::open(input_path).map_err(|e| EtlError::io(input_path, e))?;

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| EtlError::io(parent, e))?;
    }
    let output = File::create(output_path).map_err(|e| EtlError::io(output_path, e))?;

    filter_stream(input, output, config, on_progress)
}
