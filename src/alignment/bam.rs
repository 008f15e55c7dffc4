use std::path::Path;
use std::sync::Arc;

use rust_htslib::bam::{self, ext::BamRecordExtensions, Read as BamRead};
use tracing::{debug, info};

use super::AlignmentRecord;
use crate::{Result, RiboMethSeqError};

/// BAM record paired with the name of the chromosome it was fetched from.
#[derive(Debug)]
pub struct BamAlignment {
    chrom: Arc<str>,
    record: bam::Record,
}

impl BamAlignment {
    /// Underlying htslib record.
    pub fn record(&self) -> &bam::Record {
        &self.record
    }
}

impl AlignmentRecord for BamAlignment {
    fn chromosome_name(&self) -> &str {
        &self.chrom
    }

    fn start(&self) -> i64 {
        self.record.pos()
    }

    fn end(&self) -> i64 {
        self.record.reference_end()
    }

    fn is_proper_pair(&self) -> bool {
        self.record.is_proper_pair()
    }

    fn is_qc_fail(&self) -> bool {
        self.record.is_quality_check_failed()
    }

    fn is_unmapped(&self) -> bool {
        self.record.is_unmapped()
    }

    fn mate_is_unmapped(&self) -> bool {
        self.record.is_mate_unmapped()
    }

    fn is_supplementary(&self) -> bool {
        self.record.is_supplementary()
    }

    fn is_duplicate(&self) -> bool {
        self.record.is_duplicate()
    }

    fn is_first_in_pair(&self) -> bool {
        self.record.is_first_in_template()
    }

    fn is_second_in_pair(&self) -> bool {
        self.record.is_last_in_template()
    }

    fn is_reverse_strand(&self) -> bool {
        self.record.is_reverse()
    }
}

/// Indexed, coordinate-sorted BAM file read one chromosome at a time.
pub struct BamAlignmentSource {
    reader: bam::IndexedReader,
}

impl std::fmt::Debug for BamAlignmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BamAlignmentSource")
            .field("chromosomes", &self.reader.header().target_count())
            .finish()
    }
}

impl BamAlignmentSource {
    /// Open an indexed BAM file. Paths without a `.bam` extension are rejected.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_bam = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("bam"))
            .unwrap_or(false);
        if !is_bam {
            return Err(RiboMethSeqError::InvalidInputFormat(format!(
                "must provide a BAM file input, got {}",
                path.display()
            )));
        }

        let reader = bam::IndexedReader::from_path(path)?;
        info!(path = %path.display(), "opened alignment source");
        Ok(Self { reader })
    }

    /// Chromosome names in header order.
    pub fn chromosomes(&self) -> Vec<String> {
        self.reader
            .header()
            .target_names()
            .into_iter()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect()
    }

    /// Single-pass stream over every alignment on `chrom`.
    ///
    /// The stream borrows the source mutably, so only one chromosome can be
    /// consumed at a time; reading a chromosome again requires a new call.
    pub fn fetch_chromosome(&mut self, chrom: &str) -> Result<ChromosomeAlignments<'_>> {
        let tid = self
            .reader
            .header()
            .tid(chrom.as_bytes())
            .ok_or_else(|| RiboMethSeqError::UnknownChromosome(chrom.to_string()))?;
        self.reader.fetch(bam::FetchDefinition::CompleteTid(tid as i32))?;
        debug!(chrom, tid, "fetching chromosome");

        Ok(ChromosomeAlignments {
            chrom: Arc::from(chrom),
            tid: tid as i32,
            previous_start: None,
            records: self.reader.records(),
        })
    }
}

/// Finite, ascending stream of the alignments on one chromosome.
pub struct ChromosomeAlignments<'a> {
    chrom: Arc<str>,
    tid: i32,
    previous_start: Option<i64>,
    records: bam::Records<'a, bam::IndexedReader>,
}

impl std::fmt::Debug for ChromosomeAlignments<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromosomeAlignments")
            .field("chrom", &self.chrom)
            .field("tid", &self.tid)
            .field("previous_start", &self.previous_start)
            .finish()
    }
}

impl ChromosomeAlignments<'_> {
    /// Chromosome this stream is bound to.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }
}

impl Iterator for ChromosomeAlignments<'_> {
    type Item = Result<BamAlignment>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(err) => return Some(Err(err.into())),
        };

        if record.tid() != self.tid {
            return Some(Err(RiboMethSeqError::ChromosomeMismatch {
                expected: self.chrom.to_string(),
                found: format!("tid {}", record.tid()),
            }));
        }

        let start = record.pos();
        if let Some(previous) = self.previous_start {
            if start < previous {
                return Some(Err(RiboMethSeqError::UnsortedAlignments {
                    chrom: self.chrom.to_string(),
                    previous,
                    current: start,
                }));
            }
        }
        self.previous_start = Some(start);

        Some(Ok(BamAlignment {
            chrom: Arc::clone(&self.chrom),
            record,
        }))
    }
}
