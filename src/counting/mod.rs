//! Read-end counting for a single chromosome.
//!
//! [`EndCounter`] consumes a chromosome's alignments once, accumulating 5',
//! 3' and combined end counts into a [`ChromosomeCounts`]. The counts are then
//! moved into dense [`PositionSeries`] covering position 0 through the last
//! observed end.

mod end_counter;
mod series;

pub use end_counter::{materialize, ChromosomeCounts, CountingStats, EndCounter};
pub use series::{EndSeries, PositionSeries};
