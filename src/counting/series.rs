use crate::{Result, RiboMethSeqError};

/// Ordered `(position, value)` pairs with strictly ascending 0-based positions.
///
/// Series built from end counts are dense; series decoded from wiggle text may
/// skip positions.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionSeries {
    points: Vec<(u64, f64)>,
}

impl PositionSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create an empty series with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Build a series from points, rejecting unsorted or repeated positions.
    pub fn from_points(points: Vec<(u64, f64)>) -> Result<Self> {
        if let Some(pair) = points.windows(2).find(|pair| pair[1].0 <= pair[0].0) {
            return Err(RiboMethSeqError::InvalidInputFormat(format!(
                "positions must be strictly ascending: {} follows {}",
                pair[1].0, pair[0].0
            )));
        }
        Ok(Self { points })
    }

    pub(crate) fn from_sorted(points: Vec<(u64, f64)>) -> Self {
        debug_assert!(points.windows(2).all(|pair| pair[0].0 < pair[1].0));
        Self { points }
    }

    /// Append a point after the current last position.
    pub fn push(&mut self, position: u64, value: f64) -> Result<()> {
        if let Some(&(last, _)) = self.points.last() {
            if position <= last {
                return Err(RiboMethSeqError::InvalidInputFormat(format!(
                    "positions must be strictly ascending: {} follows {}",
                    position, last
                )));
            }
        }
        self.points.push((position, value));
        Ok(())
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`.
    pub fn get(&self, index: usize) -> Option<(u64, f64)> {
        self.points.get(index).copied()
    }

    /// All points in position order.
    pub fn points(&self) -> &[(u64, f64)] {
        &self.points
    }

    /// Iterate over points in position order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.points.iter().copied()
    }

    /// Value stored at `position`, if present.
    pub fn value_at(&self, position: u64) -> Option<f64> {
        self.points
            .binary_search_by_key(&position, |&(pos, _)| pos)
            .ok()
            .map(|idx| self.points[idx].1)
    }

    /// Consume the series, returning its points.
    pub fn into_points(self) -> Vec<(u64, f64)> {
        self.points
    }
}

/// Dense 5', 3' and combined end-count series for one chromosome.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndSeries {
    /// Chromosome the counts belong to.
    pub chrom: String,
    /// Fragment 5' ends reported by upstream mates.
    pub five_prime: PositionSeries,
    /// Fragment 3' ends reported by downstream mates.
    pub three_prime: PositionSeries,
    /// 5' and 3' ends combined.
    pub total: PositionSeries,
}
