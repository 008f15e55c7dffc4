//! # RiboMethSeq end counting and scoring
//!
//! This library computes per-nucleotide 2'-O-methylation scores from
//! paired-end RiboMethSeq alignments.
//!
//! ## Core Algorithm
//!
//! 1. **End counting**: eligible, correctly oriented read pairs contribute their
//!    fragment 5' ends (read 1) and 3' ends (read 2) to per-position counters
//! 2. **Dense materialization**: each counter becomes a gap-free series from
//!    position 0 through the last observed end
//! 3. **Windowing**: every position of a (possibly gapped) series is surrounded
//!    by a fixed flank on both sides, missing neighbours read as [`EMPTY_VALUE`]
//! 4. **Scoring**: one of three flank-vs-center formulas turns each window into
//!    a score
//!
//! Series cross stage boundaries as `variableStep` wiggle text.
//!
//! ## Usage Example
//!
//! ```ignore
//! use ribomethseq::{count_chromosome, score_chromosome, ScoreMethod, ScoringConfig};
//!
//! let ends = count_chromosome("chr1", alignments)?;
//! let config = ScoringConfig::new(ScoreMethod::A);
//! score_chromosome(count_wig.as_bytes(), &mut score_wig, "chr1", &config)?;
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod alignment; // Alignment records, read classification, BAM source
pub mod counting;  // End counters and dense series
pub mod scoring;   // Flank windows and score formulas
pub mod wiggle;    // variableStep reader/writer
pub mod pipeline;  // Per-chromosome orchestration

// Re-exports for convenience
pub use alignment::{is_eligible, upstream_role, AlignmentRecord, MateRole};
pub use counting::{ChromosomeCounts, EndCounter, EndSeries, PositionSeries};
pub use pipeline::{count_chromosome, score_chromosome};
pub use scoring::{ScoreMethod, ScoringConfig, Window, WindowExtractor, EMPTY_VALUE};

use thiserror::Error;

/// Errors that can occur while counting or scoring
#[derive(Error, Debug)]
pub enum RiboMethSeqError {
    /// Wrong container type, malformed header, or unrecognized line
    #[error("invalid input format: {0}")]
    InvalidInputFormat(String),

    /// A window of even length cannot be split around a center
    #[error("malformed window: length {len} is not odd")]
    MalformedWindow {
        /// Length of the offending window
        len: usize,
    },

    /// A record belongs to a different chromosome than the one being processed
    #[error("chromosome mismatch: expected {expected}, found {found}")]
    ChromosomeMismatch {
        /// Chromosome declared for this run
        expected: String,
        /// Chromosome carried by the record
        found: String,
    },

    /// Alignments for a chromosome were not sorted by start position
    #[error("alignments on {chrom} are not sorted: start {current} follows {previous}")]
    UnsortedAlignments {
        /// Chromosome being streamed
        chrom: String,
        /// Start of the previous record
        previous: i64,
        /// Start of the offending record
        current: i64,
    },

    /// Requested chromosome is absent from the alignment header
    #[error("unknown chromosome: {0}")]
    UnknownChromosome(String),

    /// Scoring configuration out of range
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by htslib while reading alignments
    #[error("alignment source error: {0}")]
    Alignment(#[from] rust_htslib::errors::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RiboMethSeqError>;
