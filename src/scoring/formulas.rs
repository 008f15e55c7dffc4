use super::Window;
use crate::Result;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64]) -> f64 {
    let mu = mean(values);
    let ss: f64 = values.iter().map(|v| (v - mu).powi(2)).sum();
    (ss / (values.len() as f64 - 1.0)).sqrt()
}

/// Linear weights `1.0, 0.9, ...` from the center outwards, normalized so they sum to 1.
fn flank_weighted_sums(left: &[f64], right: &[f64]) -> (f64, f64) {
    let weights: Vec<f64> = (0..right.len()).map(|i| 1.0 - 0.1 * i as f64).collect();
    let total: f64 = weights.iter().sum();

    // Left flank runs farthest-to-nearest, so its weights run in reverse.
    let left_weighted = left
        .iter()
        .zip(weights.iter().rev())
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / total;
    let right_weighted = right
        .iter()
        .zip(weights.iter())
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / total;
    (left_weighted, right_weighted)
}

/// Score A: center depletion relative to a mean-minus-std flank background.
///
/// Always within `[0, 1]`.
pub fn score_a(window: &Window) -> Result<f64> {
    let (left, center, right) = window.split()?;
    let numerator = 2.0 * center + 1.0;
    let denominator = (mean(left) - sample_std(left)).abs() / 2.0
        + center
        + (mean(right) - sample_std(right)).abs() / 2.0
        + 1.0;
    Ok((1.0 - numerator / denominator).max(0.0))
}

/// Score B: absolute deviation of the center from the weighted flank average.
pub fn score_b(window: &Window) -> Result<f64> {
    let (left, center, right) = window.split()?;
    let (left_weighted, right_weighted) = flank_weighted_sums(left, right);
    Ok((center - left_weighted / 2.0 - right_weighted / 2.0).abs() / (center + 1.0))
}

/// Score C: center depletion relative to the weighted flank sum.
///
/// With both weighted flanks at zero the ratio is not finite; `max` then
/// resolves the score to 0.
pub fn score_c(window: &Window) -> Result<f64> {
    let (left, center, right) = window.split()?;
    let (left_weighted, right_weighted) = flank_weighted_sums(left, right);
    Ok((1.0 - 2.0 * center / (left_weighted + right_weighted)).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RiboMethSeqError;
    use test_case::test_case;

    const TOL: f64 = 1e-9;

    fn window(values: &[f64]) -> Window {
        Window::from_values(values.to_vec())
    }

    fn flat(flank: f64, center: f64) -> Window {
        let mut values = vec![flank; 13];
        values[6] = center;
        Window::from_values(values)
    }

    #[test]
    fn sample_std_uses_unbiased_estimator() {
        assert!((sample_std(&[1.0, 2.0, 3.0, 4.0]) - 1.290_994_448_735_805_6).abs() < TOL);
        assert_eq!(sample_std(&[5.0; 6]), 0.0);
    }

    #[test]
    fn weights_favour_positions_next_to_center() {
        let mut left = [0.0; 6];
        left[5] = 1.0;
        let mut right = [0.0; 6];
        right[5] = 1.0;
        let (lw, rw) = flank_weighted_sums(&left, &right);
        assert!((lw - 1.0 / 4.5).abs() < TOL);
        assert!((rw - 0.5 / 4.5).abs() < TOL);
    }

    #[test_case(0.0, 0.0, 0.0 ; "all zero window")]
    #[test_case(10.0, 0.0, 1.0 - 1.0 / 11.0 ; "empty center")]
    #[test_case(10.0, 10.0, 0.0 ; "center matches flanks")]
    fn score_a_on_flat_flanks(flank: f64, center: f64, expected: f64) {
        let score = score_a(&flat(flank, center)).unwrap();
        assert!((score - expected).abs() < TOL, "got {}", score);
    }

    #[test]
    fn score_a_with_varying_flanks() {
        let w = window(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 2.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0,
        ]);
        // mean 3.5, std sqrt(3.5) on each side
        let background = (3.5f64 - 3.5f64.sqrt()).abs() / 2.0;
        let expected = 1.0 - 5.0 / (2.0 * background + 2.0 + 1.0);
        assert!((score_a(&w).unwrap() - expected.max(0.0)).abs() < TOL);
    }

    #[test_case(0.0, 0.0, 0.0 ; "all zero window")]
    #[test_case(10.0, 0.0, 10.0 ; "empty center")]
    #[test_case(4.0, 4.0, 0.0 ; "center matches flanks")]
    #[test_case(2.0, 7.0, 5.0 / 8.0 ; "peak center")]
    fn score_b_on_flat_flanks(flank: f64, center: f64, expected: f64) {
        let score = score_b(&flat(flank, center)).unwrap();
        assert!((score - expected).abs() < TOL, "got {}", score);
    }

    #[test_case(10.0, 0.0, 1.0 ; "empty center")]
    #[test_case(10.0, 5.0, 0.5 ; "half depleted")]
    #[test_case(10.0, 20.0, 0.0 ; "clipped at zero")]
    #[test_case(0.0, 0.0, 0.0 ; "zero flanks and center")]
    #[test_case(0.0, 3.0, 0.0 ; "zero flanks")]
    fn score_c_on_flat_flanks(flank: f64, center: f64, expected: f64) {
        let score = score_c(&flat(flank, center)).unwrap();
        assert!((score - expected).abs() < TOL, "got {}", score);
    }

    #[test]
    fn formulas_reject_even_windows() {
        let w = window(&[1.0; 12]);
        for result in [score_a(&w), score_b(&w), score_c(&w)] {
            assert!(matches!(
                result,
                Err(RiboMethSeqError::MalformedWindow { len: 12 })
            ));
        }
    }
}
