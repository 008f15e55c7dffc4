use crate::counting::PositionSeries;
use crate::{Result, RiboMethSeqError};

/// Value substituted for flank positions missing from the series.
///
/// Indistinguishable from a genuine zero count; the score formulas are defined
/// against this conflation.
pub const EMPTY_VALUE: f64 = 0.0;

/// Default number of positions on each side of the center.
pub const FLANK_WIDTH: usize = 6;

/// Odd-length neighbourhood of values around a scored position.
///
/// Layout: left flank farthest-to-nearest, the center, right flank
/// nearest-to-farthest.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    values: Vec<f64>,
}

impl Window {
    /// Wrap raw values. Length is only checked when the window is split.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Raw values in window order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Split into `(left, center, right)`; fails unless the length is odd.
    pub fn split(&self) -> Result<(&[f64], f64, &[f64])> {
        let len = self.values.len();
        if len % 2 != 1 {
            return Err(RiboMethSeqError::MalformedWindow { len });
        }
        let mid = len / 2;
        Ok((&self.values[..mid], self.values[mid], &self.values[mid + 1..]))
    }
}

/// Rebuilds fixed-width windows over an ascending, possibly gapped series.
#[derive(Debug, Clone, Copy)]
pub struct WindowExtractor<'a> {
    series: &'a PositionSeries,
    flank_width: usize,
}

impl<'a> WindowExtractor<'a> {
    /// Extractor with the default flank width.
    pub fn new(series: &'a PositionSeries) -> Self {
        Self::with_flank_width(series, FLANK_WIDTH)
    }

    /// Extractor with `flank_width` positions on each side.
    pub fn with_flank_width(series: &'a PositionSeries, flank_width: usize) -> Self {
        Self {
            series,
            flank_width,
        }
    }

    /// Flank width on each side.
    pub fn flank_width(&self) -> usize {
        self.flank_width
    }

    /// Window centered on the point at `index`, or `None` past the end.
    pub fn extract(&self, index: usize) -> Option<Window> {
        let points = self.series.points();
        let (center_pos, center_value) = *points.get(index)?;

        let mut values = Vec::with_capacity(2 * self.flank_width + 1);

        // Walk left with a cursor that only ever moves backwards. A miss leaves
        // the cursor in place: a farther offset may still land on it.
        let mut cursor = index.checked_sub(1);
        for offset in 1..=self.flank_width as u64 {
            let mut value = EMPTY_VALUE;
            if let Some(expected) = center_pos.checked_sub(offset) {
                while let Some(idx) = cursor {
                    let (pos, found) = points[idx];
                    if pos == expected {
                        value = found;
                        break;
                    } else if pos > expected {
                        cursor = idx.checked_sub(1);
                    } else {
                        break;
                    }
                }
            }
            values.push(value);
        }
        values.reverse();

        values.push(center_value);

        let mut cursor = index + 1;
        for offset in 1..=self.flank_width as u64 {
            let mut value = EMPTY_VALUE;
            if let Some(expected) = center_pos.checked_add(offset) {
                while let Some(&(pos, found)) = points.get(cursor) {
                    if pos == expected {
                        value = found;
                        break;
                    } else if pos < expected {
                        cursor += 1;
                    } else {
                        break;
                    }
                }
            }
            values.push(value);
        }

        Some(Window::from_values(values))
    }

    /// Every `(position, window)` pair in series order.
    pub fn windows(&self) -> impl Iterator<Item = (u64, Window)> + '_ {
        (0..self.series.len()).filter_map(move |index| {
            let position = self.series.get(index)?.0;
            Some((position, self.extract(index)?))
        })
    }
}
