#[path = "common/mod.rs"]
mod common;
use std::fs;

use common::scratch_path;
use ribomethseq::pipeline::{decode_series, score_wiggle_file, write_end_series};
use ribomethseq::{
    count_chromosome, score_chromosome, RiboMethSeqError, ScoreMethod, ScoringConfig,
};
use ribomethseq::alignment::PairedRead;

#[test]
fn counts_flow_through_the_wiggle_boundary() {
    let alignments: Vec<ribomethseq::Result<PairedRead>> = (0..40)
        .filter(|start| start % 7 != 3)
        .map(|start| Ok(PairedRead::upstream_mate("chr1", start, start + 25)))
        .collect();
    let ends = count_chromosome("chr1", alignments).unwrap();

    let counts = write_end_series(Vec::new(), "chr1", &ends.five_prime).unwrap();
    let mut out = Vec::new();
    let scored = score_chromosome(
        counts.as_slice(),
        &mut out,
        "chr1",
        &ScoringConfig::new(ScoreMethod::C),
    )
    .unwrap();
    assert_eq!(scored, ends.five_prime.len());

    let scores = decode_series(out.as_slice(), "chr1").unwrap();
    assert_eq!(scores.len(), scored);
    // Positions missing a 5' end sit in a uniform background.
    assert_eq!(scores.value_at(10), Some(1.0));
    assert_eq!(scores.value_at(12), Some(0.0));
}

#[test]
fn mismatched_chromosome_is_rejected() {
    let counts = "variableStep chrom=chr2 span=1\n1\t4\n2\t0\n";
    let mut out = Vec::new();
    let err = score_chromosome(counts.as_bytes(), &mut out, "chr1", &ScoringConfig::default())
        .unwrap_err();
    assert!(matches!(err, RiboMethSeqError::ChromosomeMismatch { .. }));
    assert!(out.is_empty(), "nothing is written before decoding succeeds");
}

#[test]
fn unrounded_output_keeps_full_precision() {
    let counts = "variableStep chrom=chr1 span=1\n1\t1\n2\t2\n3\t0\n4\t5\n";
    let mut out = Vec::new();
    let config = ScoringConfig::new(ScoreMethod::B)
        .with_flank_width(2)
        .unwrap()
        .with_rounding(false);
    score_chromosome(counts.as_bytes(), &mut out, "chr1", &config).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.lines().skip(1).any(|line| {
        line.split('\t')
            .nth(1)
            .map_or(false, |score| score.len() > 6)
    }));
}

#[test]
fn file_wrapper_writes_score_track() {
    let count_path = scratch_path("file_wrapper.counts.wig");
    let score_path = scratch_path("file_wrapper.scores.wig");
    fs::write(&count_path, "variableStep chrom=chrF span=1\n1\t5\n2\t0\n3\t5\n").unwrap();

    let scored = score_wiggle_file(
        &count_path,
        &score_path,
        "chrF",
        &ScoringConfig::new(ScoreMethod::C).with_flank_width(2).unwrap(),
    )
    .unwrap();
    assert_eq!(scored, 3);

    let written = fs::read_to_string(&score_path).unwrap();
    assert_eq!(
        written,
        "variableStep chrom=chrF span=1\n1\t0.0000\n2\t1.0000\n3\t0.0000\n"
    );
}

#[test]
fn missing_count_file_is_an_io_error() {
    let err = score_wiggle_file(
        &scratch_path("does-not-exist.wig"),
        &scratch_path("never-written.wig"),
        "chr1",
        &ScoringConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RiboMethSeqError::Io(_)));
}

#[test]
fn failed_scoring_leaves_a_closed_file_without_data() {
    let count_path = scratch_path("foreign_chrom.counts.wig");
    let score_path = scratch_path("foreign_chrom.scores.wig");
    fs::write(&count_path, "variableStep chrom=chr2 span=1\n1\t5\n2\t0\n").unwrap();

    let err = score_wiggle_file(&count_path, &score_path, "chr1", &ScoringConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        RiboMethSeqError::ChromosomeMismatch { ref expected, ref found }
            if expected == "chr1" && found == "chr2"
    ));

    // Decoding fails before the header is written, and the handle is released.
    assert_eq!(fs::read_to_string(&score_path).unwrap(), "");
    fs::remove_file(&score_path).unwrap();
}

#[test]
fn out_of_range_positions_fail_without_panicking() {
    let counts = format!("variableStep chrom=chr1 span=2\n{}\t1\n", u64::MAX);
    let mut out = Vec::new();
    let err = score_chromosome(counts.as_bytes(), &mut out, "chr1", &ScoringConfig::default())
        .unwrap_err();
    assert!(matches!(err, RiboMethSeqError::InvalidInputFormat(_)));
    assert!(out.is_empty());
}
