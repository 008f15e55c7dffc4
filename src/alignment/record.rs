use std::sync::Arc;

/// SAM flag bit masks (SAM specification v1.6).
pub mod sam_flags {
    /// Template having multiple segments in sequencing
    pub const PAIRED: u16 = 0x1;
    /// Each segment properly aligned according to the aligner
    pub const PROPER_PAIR: u16 = 0x2;
    /// Segment unmapped
    pub const UNMAPPED: u16 = 0x4;
    /// Next segment in the template unmapped
    pub const MATE_UNMAPPED: u16 = 0x8;
    /// SEQ being reverse complemented
    pub const REVERSE: u16 = 0x10;
    /// SEQ of the next segment reverse complemented
    pub const MATE_REVERSE: u16 = 0x20;
    /// The first segment in the template
    pub const FIRST_IN_PAIR: u16 = 0x40;
    /// The last segment in the template
    pub const SECOND_IN_PAIR: u16 = 0x80;
    /// Secondary alignment
    pub const SECONDARY: u16 = 0x100;
    /// Not passing filters
    pub const QCFAIL: u16 = 0x200;
    /// PCR or optical duplicate
    pub const DUPLICATE: u16 = 0x400;
    /// Supplementary alignment
    pub const SUPPLEMENTARY: u16 = 0x800;
}

/// Capabilities the end counter needs from one aligned read.
///
/// Coordinates follow BAM conventions: `start` is 0-based inclusive and `end`
/// is 0-based exclusive.
pub trait AlignmentRecord {
    /// Reference sequence the read is aligned to.
    fn chromosome_name(&self) -> &str;
    /// 0-based leftmost aligned reference position.
    fn start(&self) -> i64;
    /// 0-based exclusive end of the aligned reference span.
    fn end(&self) -> i64;
    /// Both mates aligned as the aligner expects.
    fn is_proper_pair(&self) -> bool;
    /// Read failed platform/vendor quality checks.
    fn is_qc_fail(&self) -> bool;
    /// Read itself is unmapped.
    fn is_unmapped(&self) -> bool;
    /// Mate is unmapped.
    fn mate_is_unmapped(&self) -> bool;
    /// Supplementary (chimeric) alignment.
    fn is_supplementary(&self) -> bool;
    /// PCR or optical duplicate.
    fn is_duplicate(&self) -> bool;
    /// Read 1 of the template.
    fn is_first_in_pair(&self) -> bool;
    /// Read 2 of the template.
    fn is_second_in_pair(&self) -> bool;
    /// Read aligned to the reverse strand.
    fn is_reverse_strand(&self) -> bool;
}

/// In-memory paired read carrying raw SAM flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedRead {
    /// Reference contig/chromosome name.
    pub chrom: Arc<str>,
    /// 0-based leftmost reference coordinate.
    pub start: i64,
    /// 0-based exclusive end coordinate.
    pub end: i64,
    /// SAM flag word.
    pub flags: u16,
}

impl PairedRead {
    /// Construct a read from coordinates and a raw flag word.
    pub fn new(chrom: impl Into<Arc<str>>, start: i64, end: i64, flags: u16) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            flags,
        }
    }

    /// Read 1 of a properly paired, forward-strand template.
    pub fn upstream_mate(chrom: impl Into<Arc<str>>, start: i64, end: i64) -> Self {
        Self::new(
            chrom,
            start,
            end,
            sam_flags::PAIRED
                | sam_flags::PROPER_PAIR
                | sam_flags::FIRST_IN_PAIR
                | sam_flags::MATE_REVERSE,
        )
    }

    /// Read 2 of a properly paired, forward-strand template (aligned reverse).
    pub fn downstream_mate(chrom: impl Into<Arc<str>>, start: i64, end: i64) -> Self {
        Self::new(
            chrom,
            start,
            end,
            sam_flags::PAIRED
                | sam_flags::PROPER_PAIR
                | sam_flags::SECOND_IN_PAIR
                | sam_flags::REVERSE,
        )
    }

    /// Copy of this read with additional flag bits set.
    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags |= flags;
        self
    }

    /// Copy of this read with flag bits cleared.
    pub fn without_flags(mut self, flags: u16) -> Self {
        self.flags &= !flags;
        self
    }

    fn has(&self, mask: u16) -> bool {
        self.flags & mask != 0
    }
}

impl AlignmentRecord for PairedRead {
    fn chromosome_name(&self) -> &str {
        &self.chrom
    }

    fn start(&self) -> i64 {
        self.start
    }

    fn end(&self) -> i64 {
        self.end
    }

    fn is_proper_pair(&self) -> bool {
        self.has(sam_flags::PROPER_PAIR)
    }

    fn is_qc_fail(&self) -> bool {
        self.has(sam_flags::QCFAIL)
    }

    fn is_unmapped(&self) -> bool {
        self.has(sam_flags::UNMAPPED)
    }

    fn mate_is_unmapped(&self) -> bool {
        self.has(sam_flags::MATE_UNMAPPED)
    }

    fn is_supplementary(&self) -> bool {
        self.has(sam_flags::SUPPLEMENTARY)
    }

    fn is_duplicate(&self) -> bool {
        self.has(sam_flags::DUPLICATE)
    }

    fn is_first_in_pair(&self) -> bool {
        self.has(sam_flags::FIRST_IN_PAIR)
    }

    fn is_second_in_pair(&self) -> bool {
        self.has(sam_flags::SECOND_IN_PAIR)
    }

    fn is_reverse_strand(&self) -> bool {
        self.has(sam_flags::REVERSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mate_constructors_set_orientation() {
        let up = PairedRead::upstream_mate("chr1", 10, 40);
        assert!(up.is_first_in_pair());
        assert!(!up.is_reverse_strand());
        assert!(up.is_proper_pair());

        let down = PairedRead::downstream_mate("chr1", 30, 60);
        assert!(down.is_second_in_pair());
        assert!(down.is_reverse_strand());
        assert_eq!(down.chromosome_name(), "chr1");
    }

    #[test]
    fn flag_helpers_toggle_bits() {
        let read = PairedRead::upstream_mate("chr1", 0, 10)
            .with_flags(sam_flags::DUPLICATE)
            .without_flags(sam_flags::PROPER_PAIR);
        assert!(read.is_duplicate());
        assert!(!read.is_proper_pair());
    }
}
