//! Per-chromosome orchestration.
//!
//! Two entry points, each bound to a single chromosome:
//!
//! - [`count_chromosome`]: alignments to dense 5', 3' and total end counts
//! - [`score_chromosome`]: a count track in wiggle text to a score track
//!
//! Scoring holds the whole decoded chromosome in memory, since every window
//! needs both flanks. Memory is proportional to chromosome length.

mod count;
mod score;

pub use count::{count_bam_to_wiggles, count_chromosome, end_count_paths, write_end_series};
pub use score::{decode_series, score_chromosome, score_series, score_wiggle_file};
