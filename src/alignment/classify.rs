use super::AlignmentRecord;

/// Which fragment boundary a mate reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MateRole {
    /// Mate whose start is the fragment's 5' end.
    Upstream,
    /// Mate whose end is the fragment's 3' end.
    Downstream,
}

/// Whether a record is a usable, uniquely placed member of a mapped pair.
pub fn is_eligible<R: AlignmentRecord + ?Sized>(record: &R) -> bool {
    record.is_proper_pair()
        && !record.is_qc_fail()
        && !record.is_unmapped()
        && !record.mate_is_unmapped()
        && !record.is_supplementary()
        && !record.is_duplicate()
}

/// Orientation of a mate within its template.
///
/// Read 1 on the forward strand and read 2 on the reverse strand belong to a
/// fragment sequenced in the forward orientation; both are `Upstream`.
pub fn upstream_role<R: AlignmentRecord + ?Sized>(record: &R) -> MateRole {
    if (record.is_first_in_pair() && !record.is_reverse_strand())
        || (record.is_second_in_pair() && record.is_reverse_strand())
    {
        MateRole::Upstream
    } else {
        MateRole::Downstream
    }
}

/// Boundary a counted record contributes: read 1 gives the 5' end, read 2 the 3' end.
pub fn counting_role<R: AlignmentRecord + ?Sized>(record: &R) -> MateRole {
    if record.is_first_in_pair() {
        MateRole::Upstream
    } else {
        MateRole::Downstream
    }
}

/// Outcome of the counting gate for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountDecision {
    /// Failed [`is_eligible`].
    Ineligible,
    /// Eligible, but from a reverse-orientation template.
    WrongOrientation,
    /// Counted; the role names the boundary it contributes.
    Count(MateRole),
}

/// Gate applied before counting: eligible and in forward template orientation,
/// then the boundary chosen by [`counting_role`].
pub fn count_decision<R: AlignmentRecord + ?Sized>(record: &R) -> CountDecision {
    if !is_eligible(record) {
        CountDecision::Ineligible
    } else if upstream_role(record) != MateRole::Upstream {
        CountDecision::WrongOrientation
    } else {
        CountDecision::Count(counting_role(record))
    }
}
