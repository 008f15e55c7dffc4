use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::counting::PositionSeries;
use crate::scoring::{ScoringConfig, WindowExtractor};
use crate::wiggle::{Precision, WiggleReader, WiggleWriter};
use crate::{Result, RiboMethSeqError};

/// Decode a wiggle track into a series, requiring every entry to be on `chrom`.
///
/// Gaps in the track are kept as gaps.
pub fn decode_series<R: BufRead>(input: R, chrom: &str) -> Result<PositionSeries> {
    let mut series = PositionSeries::new();
    for entry in WiggleReader::new(input) {
        let entry = entry?;
        if entry.chrom.as_ref() != chrom {
            return Err(RiboMethSeqError::ChromosomeMismatch {
                expected: chrom.to_string(),
                found: entry.chrom.to_string(),
            });
        }
        for (position, value) in entry.positions() {
            series.push(position, value)?;
        }
    }
    Ok(series)
}

/// Score every point of a series with the configured window and formula.
pub fn score_series(series: &PositionSeries, config: &ScoringConfig) -> Result<PositionSeries> {
    let extractor = WindowExtractor::with_flank_width(series, config.flank_width);
    let mut scores = PositionSeries::with_capacity(series.len());
    for (position, window) in extractor.windows() {
        scores.push(position, config.method.score(&window)?)?;
    }
    Ok(scores)
}

/// Turn one chromosome's count track into a score track.
///
/// Returns the number of positions scored. `output` is owned for the duration
/// of the call and dropped on every exit path; lines already written before an
/// error must be discarded by the caller.
#[instrument(skip(input, output, config), fields(method = ?config.method))]
pub fn score_chromosome<R: BufRead, W: Write>(
    input: R,
    output: W,
    chrom: &str,
    config: &ScoringConfig,
) -> Result<usize> {
    let counts = decode_series(input, chrom)?;
    debug!(positions = counts.len(), "decoded count track");

    let scores = score_series(&counts, config)?;
    let precision = if config.round_output {
        Precision::Fixed4
    } else {
        Precision::Exact
    };

    let mut writer = WiggleWriter::new(output, chrom, 1)?;
    writer.write_series(&scores, precision)?;
    writer.finish()?;

    info!(positions = scores.len(), "scored chromosome");
    Ok(scores.len())
}

/// File-level wrapper around [`score_chromosome`].
pub fn score_wiggle_file(
    count_path: &Path,
    score_path: &Path,
    chrom: &str,
    config: &ScoringConfig,
) -> Result<usize> {
    let input = BufReader::new(File::open(count_path)?);
    let output = BufWriter::new(File::create(score_path)?);
    score_chromosome(input, output, chrom, config)
}
