//! Flank windows and RiboMethSeq score formulas.
//!
//! Every position of a count series is scored from a window of its
//! neighbours: [`WindowExtractor`] rebuilds the window even when the series
//! has gaps, and a [`ScoreMethod`] maps it to a single value.

mod formulas;
mod window;

pub use formulas::{score_a, score_b, score_c};
pub use window::{Window, WindowExtractor, EMPTY_VALUE, FLANK_WIDTH};

use crate::{Result, RiboMethSeqError};

/// Smallest flank width for which the flank standard deviation is defined.
pub const MIN_FLANK_WIDTH: usize = 2;
/// Largest flank width for which the linear flank weights stay positive.
pub const MAX_FLANK_WIDTH: usize = 10;

/// Score formula applied to each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreMethod {
    /// `max(1 - (2c + 1) / D, 0)` with a mean-minus-std flank background.
    #[default]
    A,
    /// Absolute deviation of the center from the weighted flank average.
    B,
    /// `max(0, 1 - 2c / (left + right))` over weighted flanks.
    C,
}

impl ScoreMethod {
    /// Score one window.
    pub fn score(self, window: &Window) -> Result<f64> {
        match self {
            ScoreMethod::A => score_a(window),
            ScoreMethod::B => score_b(window),
            ScoreMethod::C => score_c(window),
        }
    }
}

/// Parameters for scoring one chromosome.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringConfig {
    /// Formula to apply.
    pub method: ScoreMethod,
    /// Positions on each side of the center.
    pub flank_width: usize,
    /// Write scores with four decimal places.
    pub round_output: bool,
}

impl ScoringConfig {
    /// Default configuration for `method`: six-position flanks, rounded output.
    pub fn new(method: ScoreMethod) -> Self {
        Self {
            method,
            flank_width: FLANK_WIDTH,
            round_output: true,
        }
    }

    /// Override the flank width.
    pub fn with_flank_width(mut self, flank_width: usize) -> Result<Self> {
        if !(MIN_FLANK_WIDTH..=MAX_FLANK_WIDTH).contains(&flank_width) {
            return Err(RiboMethSeqError::InvalidConfiguration(format!(
                "flank width must be between {} and {}, got {}",
                MIN_FLANK_WIDTH, MAX_FLANK_WIDTH, flank_width
            )));
        }
        self.flank_width = flank_width;
        Ok(self)
    }

    /// Toggle four-decimal rounding of written scores.
    pub fn with_rounding(mut self, round_output: bool) -> Self {
        self.round_output = round_output;
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::new(ScoreMethod::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_published_method() {
        let config = ScoringConfig::default();
        assert_eq!(config.method, ScoreMethod::A);
        assert_eq!(config.flank_width, 6);
        assert!(config.round_output);
    }

    #[test]
    fn flank_width_is_validated() {
        assert!(ScoringConfig::new(ScoreMethod::B).with_flank_width(1).is_err());
        assert!(ScoringConfig::new(ScoreMethod::B).with_flank_width(11).is_err());
        let config = ScoringConfig::new(ScoreMethod::C)
            .with_flank_width(3)
            .unwrap()
            .with_rounding(false);
        assert_eq!(config.flank_width, 3);
        assert!(!config.round_output);
    }

    #[test]
    fn methods_dispatch_to_formulas() {
        let mut values = vec![10.0; 13];
        values[6] = 0.0;
        let window = Window::from_values(values);
        assert_eq!(ScoreMethod::B.score(&window).unwrap(), score_b(&window).unwrap());
        assert_eq!(ScoreMethod::C.score(&window).unwrap(), 1.0);
    }
}
