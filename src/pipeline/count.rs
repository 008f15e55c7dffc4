use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::alignment::{AlignmentRecord, BamAlignmentSource};
use crate::counting::{EndCounter, EndSeries, PositionSeries};
use crate::wiggle::{Precision, WiggleWriter};
use crate::Result;

/// Count read ends for one chromosome and expand them into dense series.
#[instrument(skip(alignments))]
pub fn count_chromosome<I, R>(chrom: &str, alignments: I) -> Result<EndSeries>
where
    I: IntoIterator<Item = Result<R>>,
    R: AlignmentRecord,
{
    let (counts, stats) = EndCounter::new(chrom).ingest(alignments)?;
    info!(
        records = stats.records_seen,
        ineligible = stats.ineligible,
        wrong_orientation = stats.wrong_orientation,
        five_prime = stats.five_prime_ends,
        three_prime = stats.three_prime_ends,
        "counted read ends"
    );

    let series = counts.into_dense(chrom);
    if series.total.is_empty() {
        warn!(records = stats.records_seen, "no read ends counted; tracks will be header-only");
    }
    info!(
        five_prime = series.five_prime.len(),
        three_prime = series.three_prime.len(),
        total = series.total.len(),
        "materialized dense series"
    );
    Ok(series)
}

/// Write one dense count series as an unrounded wiggle track.
pub fn write_end_series<W: Write>(output: W, chrom: &str, series: &PositionSeries) -> Result<W> {
    let mut writer = WiggleWriter::new(output, chrom, 1)?;
    writer.write_series(series, Precision::Exact)?;
    writer.finish()
}

/// Output paths for the 5', 3' and total tracks written under `prefix`.
pub fn end_count_paths(prefix: &Path) -> [PathBuf; 3] {
    let with_suffix = |suffix: &str| {
        let mut name = prefix.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    };
    [
        with_suffix(".5prime.wig"),
        with_suffix(".3prime.wig"),
        with_suffix(".total.wig"),
    ]
}

/// Count one chromosome of an indexed BAM file into three wiggle tracks.
pub fn count_bam_to_wiggles(bam_path: &Path, chrom: &str, prefix: &Path) -> Result<EndSeries> {
    let mut source = BamAlignmentSource::open(bam_path)?;
    let series = count_chromosome(chrom, source.fetch_chromosome(chrom)?)?;

    let [five_path, three_path, total_path] = end_count_paths(prefix);
    for (path, track) in [
        (&five_path, &series.five_prime),
        (&three_path, &series.three_prime),
        (&total_path, &series.total),
    ] {
        write_end_series(BufWriter::new(File::create(path)?), chrom, track)?;
        info!(path = %path.display(), positions = track.len(), "wrote end counts");
    }
    Ok(series)
}
