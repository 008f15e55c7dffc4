use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::{EndSeries, PositionSeries};
use crate::alignment::{count_decision, AlignmentRecord, CountDecision, MateRole};
use crate::{Result, RiboMethSeqError};

/// Sparse end counts for one chromosome, keyed by 0-based position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromosomeCounts {
    /// 5' end counts.
    pub five_prime: HashMap<u64, u64>,
    /// 3' end counts.
    pub three_prime: HashMap<u64, u64>,
    /// Combined 5' and 3' end counts.
    pub total: HashMap<u64, u64>,
}

impl ChromosomeCounts {
    /// Create empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_five_prime(&mut self, position: u64) {
        *self.five_prime.entry(position).or_insert(0) += 1;
        *self.total.entry(position).or_insert(0) += 1;
    }

    fn record_three_prime(&mut self, position: u64) {
        *self.three_prime.entry(position).or_insert(0) += 1;
        *self.total.entry(position).or_insert(0) += 1;
    }

    /// Expand each counter into a dense series.
    pub fn into_dense(self, chrom: impl Into<String>) -> EndSeries {
        EndSeries {
            chrom: chrom.into(),
            five_prime: materialize(&self.five_prime),
            three_prime: materialize(&self.three_prime),
            total: materialize(&self.total),
        }
    }
}

/// Dense series over positions `0..=max(counts)`; absent positions read 0.
///
/// An empty counter yields an empty series.
pub fn materialize(counts: &HashMap<u64, u64>) -> PositionSeries {
    let Some(&max) = counts.keys().max() else {
        return PositionSeries::new();
    };

    let points = (0..=max)
        .map(|position| (position, counts.get(&position).copied().unwrap_or(0) as f64))
        .collect();
    PositionSeries::from_sorted(points)
}

/// Tally of what happened to the records offered to an [`EndCounter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountingStats {
    /// Records offered.
    pub records_seen: u64,
    /// Records rejected by the eligibility filter.
    pub ineligible: u64,
    /// Eligible records from reverse-orientation templates.
    pub wrong_orientation: u64,
    /// 5' ends counted.
    pub five_prime_ends: u64,
    /// 3' ends counted.
    pub three_prime_ends: u64,
}

/// Accumulates read-end counts for one chromosome in a single pass.
#[derive(Debug)]
pub struct EndCounter {
    chrom: Arc<str>,
    counts: ChromosomeCounts,
    stats: CountingStats,
}

impl EndCounter {
    /// Create a counter bound to `chrom`.
    pub fn new(chrom: impl Into<Arc<str>>) -> Self {
        Self {
            chrom: chrom.into(),
            counts: ChromosomeCounts::new(),
            stats: CountingStats::default(),
        }
    }

    /// Chromosome this counter accepts.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Running statistics.
    pub fn stats(&self) -> CountingStats {
        self.stats
    }

    /// Count the ends contributed by one record.
    ///
    /// Records from another chromosome fail with `ChromosomeMismatch`.
    pub fn observe<R: AlignmentRecord + ?Sized>(&mut self, record: &R) -> Result<()> {
        self.stats.records_seen += 1;

        if record.chromosome_name() != &*self.chrom {
            return Err(RiboMethSeqError::ChromosomeMismatch {
                expected: self.chrom.to_string(),
                found: record.chromosome_name().to_string(),
            });
        }
        let role = match count_decision(record) {
            CountDecision::Ineligible => {
                self.stats.ineligible += 1;
                return Ok(());
            }
            CountDecision::WrongOrientation => {
                self.stats.wrong_orientation += 1;
                return Ok(());
            }
            CountDecision::Count(role) => role,
        };

        // 0-based half-open BAM start to 1-based closed.
        let mut start = record.start() + 1;
        // Fragmentation leaves the cleaved base one upstream of the read's first base.
        start -= 1;
        // 0-based exclusive end is already the 1-based inclusive end.
        let stop = record.end();

        match role {
            MateRole::Upstream => {
                self.counts.record_five_prime(to_position(start)?);
                self.stats.five_prime_ends += 1;
            }
            MateRole::Downstream => {
                self.counts.record_three_prime(to_position(stop)?);
                self.stats.three_prime_ends += 1;
            }
        }
        Ok(())
    }

    /// Consume a chromosome's alignment stream and return the filled counters.
    pub fn ingest<I, R>(mut self, records: I) -> Result<(ChromosomeCounts, CountingStats)>
    where
        I: IntoIterator<Item = Result<R>>,
        R: AlignmentRecord,
    {
        for record in records {
            self.observe(&record?)?;
        }
        debug!(chrom = %self.chrom, stats = ?self.stats, "ingested alignments");
        Ok(self.finish())
    }

    /// Hand over the accumulated counters.
    pub fn finish(self) -> (ChromosomeCounts, CountingStats) {
        (self.counts, self.stats)
    }
}

fn to_position(coordinate: i64) -> Result<u64> {
    u64::try_from(coordinate).map_err(|_| {
        RiboMethSeqError::InvalidInputFormat(format!(
            "negative alignment coordinate {}",
            coordinate
        ))
    })
}
