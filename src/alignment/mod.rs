//! Alignment records as consumed by the end counter.
//!
//! The counter only needs a handful of coordinates and SAM flags from each
//! record, so records are seen through the [`AlignmentRecord`] capability
//! trait. [`PairedRead`] is a plain in-memory implementation; BAM input is
//! adapted through [`BamAlignmentSource`].

mod bam;
mod classify;
mod record;

pub use bam::{BamAlignment, BamAlignmentSource, ChromosomeAlignments};
pub use classify::{
    count_decision, counting_role, is_eligible, upstream_role, CountDecision, MateRole,
};
pub use record::{sam_flags, AlignmentRecord, PairedRead};
