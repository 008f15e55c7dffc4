#[path = "common/mod.rs"]
mod common;
use common::{assert_snapshot, read_fixture};
use ribomethseq::{score_chromosome, ScoreMethod, ScoringConfig};
use test_case::test_case;

fn score_fixture(method: ScoreMethod) -> String {
    let counts = read_fixture("counts/chrTest.wig");
    let mut out = Vec::new();
    let config = ScoringConfig::new(method);
    score_chromosome(counts.as_bytes(), &mut out, "chrTest", &config)
        .expect("scoring should succeed");
    String::from_utf8(out).expect("score track is UTF-8")
}

#[test_case(ScoreMethod::A, "scores/method_a.wig" ; "method a")]
#[test_case(ScoreMethod::B, "scores/method_b.wig" ; "method b")]
#[test_case(ScoreMethod::C, "scores/method_c.wig" ; "method c")]
fn score_track_matches_golden(method: ScoreMethod, snapshot: &str) {
    assert_snapshot(snapshot, &score_fixture(method));
}
