use std::ops::RangeInclusive;
use thiserror::Error;

/// Physical width of one bin for the fixed-width layout, in simulation length units.
///
/// This width does not depend on the box length; only the number of bins does, through
/// [`bin_count`].
pub const BIN_WIDTH: f64 = 150.0 / 32.0;

/// Which bin edges count as inside a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// `lower <= x <= upper`. A point exactly on a shared edge belongs to both neighbours.
    Closed,
    /// `lower <= x < upper`. Every point belongs to at most one bin.
    HalfOpen,
}

/// Boundary rule used by every grid built through [`BinGrid::from_layout`].
///
/// Both edges are inclusive, so a particle sitting exactly on `h * i` is counted in bin
/// `i - 1` and in bin `i`.
pub const BOUNDARY_POLICY: BoundaryPolicy = BoundaryPolicy::Closed;

/// Upper limit on the number of bins in one grid. Each bin costs one accumulator per frame, so
/// a corrupt box length must not turn into an allocation of that size.
pub const MAX_BINS: usize = 1 << 20;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GridError {
    #[error("box length {length} needs {requested} bins, more than the limit of {max}")]
    TooManyBins {
        length: f64,
        requested: f64,
        max: usize,
    },
}

/// Number of fixed-width bins laid along an axis of length `length`:
/// `floor((length - width / 2) / width)`, clamped at zero.
pub fn bin_count(length: f64, width: f64) -> usize {
    let n = ((length - width / 2.0) / width).floor();
    if n.is_finite() && n > 0.0 { n as usize } else { 0 }
}

/// How the x axis is partitioned into bins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BinLayout {
    /// Bins of [`BIN_WIDTH`]; the count follows from the box length via [`bin_count`].
    #[default]
    FixedWidth,
    /// The box length split into this many equal bins.
    Divisions(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinGrid {
    width: f64,
    count: usize,
    policy: BoundaryPolicy,
}

impl BinGrid {
    pub fn new(width: f64, count: usize, policy: BoundaryPolicy) -> Self {
        Self {
            width,
            count,
            policy,
        }
    }

    pub fn fixed_width(lx: f64) -> Self {
        Self::new(BIN_WIDTH, bin_count(lx, BIN_WIDTH), BOUNDARY_POLICY)
    }

    pub fn divisions(lx: f64, divisions: usize) -> Self {
        if divisions == 0 {
            return Self::new(lx, 0, BOUNDARY_POLICY);
        }
        Self::new(lx / divisions as f64, divisions, BOUNDARY_POLICY)
    }

    /// Builds the grid for a box of length `lx`, refusing layouts with more than
    /// [`MAX_BINS`] bins.
    pub fn from_layout(layout: BinLayout, lx: f64) -> Result<Self, GridError> {
        let requested = match layout {
            BinLayout::FixedWidth => ((lx - BIN_WIDTH / 2.0) / BIN_WIDTH).floor(),
            BinLayout::Divisions(m) => m as f64,
        };
        if requested > MAX_BINS as f64 {
            return Err(GridError::TooManyBins {
                length: lx,
                requested,
                max: MAX_BINS,
            });
        }
        Ok(match layout {
            BinLayout::FixedWidth => Self::fixed_width(lx),
            BinLayout::Divisions(m) => Self::divisions(lx, m),
        })
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn lower_edge(&self, index: usize) -> f64 {
        self.width * index as f64
    }

    pub fn upper_edge(&self, index: usize) -> f64 {
        self.width * (index + 1) as f64
    }

    pub fn center(&self, index: usize) -> f64 {
        index as f64 * self.width + self.width / 2.0
    }

    /// Applies the boundary policy to decide whether `x` falls in bin `index`.
    #[inline]
    pub fn contains(&self, index: usize, x: f64) -> bool {
        let lower = self.lower_edge(index);
        let upper = self.upper_edge(index);
        match self.policy {
            BoundaryPolicy::Closed => lower <= x && x <= upper,
            BoundaryPolicy::HalfOpen => lower <= x && x < upper,
        }
    }

    /// Every bin index that `x` is assigned to, in increasing order.
    ///
    /// Only the bins adjacent to `floor(x / width)` can satisfy [`BinGrid::contains`], so those
    /// are the only candidates tested.
    pub fn bins_containing(&self, x: f64) -> impl Iterator<Item = usize> + '_ {
        self.candidates(x)
            .into_iter()
            .flatten()
            .filter(move |&i| self.contains(i, x))
    }

    fn candidates(&self, x: f64) -> Option<RangeInclusive<usize>> {
        if self.count == 0 || self.width <= 0.0 {
            return None;
        }
        let guess = (x / self.width).floor();
        let start = (guess - 1.0).max(0.0);
        let end = (guess + 1.0).min((self.count - 1) as f64);
        (start <= end).then(|| start as usize..=end as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_width_is_150_over_32() {
        assert_eq!(BIN_WIDTH, 4.6875);
    }

    #[test]
    fn bin_count_follows_floor_formula() {
        assert_eq!(bin_count(150.0, BIN_WIDTH), 31);
        assert_eq!(bin_count(300.0, BIN_WIDTH), 63);
        assert_eq!(bin_count(BIN_WIDTH * 1.5, BIN_WIDTH), 1);
        assert_eq!(bin_count(BIN_WIDTH * 1.49, BIN_WIDTH), 0);
    }

    #[test]
    fn bin_count_is_zero_for_small_or_invalid_lengths() {
        assert_eq!(bin_count(1.0, BIN_WIDTH), 0);
        assert_eq!(bin_count(-10.0, BIN_WIDTH), 0);
        assert_eq!(bin_count(f64::NAN, BIN_WIDTH), 0);
    }

    #[test]
    fn fixed_width_grid_uses_global_width_regardless_of_box() {
        let grid = BinGrid::fixed_width(200.0);
        assert_eq!(grid.width(), BIN_WIDTH);
        assert_eq!(grid.count(), bin_count(200.0, BIN_WIDTH));
        assert_eq!(grid.policy(), BOUNDARY_POLICY);
    }

    #[test]
    fn centers_sit_half_a_width_into_each_bin() {
        let grid = BinGrid::fixed_width(150.0);
        assert_eq!(grid.center(0), 2.34375);
        assert_eq!(grid.center(15), 72.65625);
    }

    #[test]
    fn point_strictly_inside_a_bin_maps_to_that_bin_only() {
        let grid = BinGrid::fixed_width(150.0);
        let bins: Vec<_> = grid.bins_containing(10.0).collect();
        assert_eq!(bins, vec![2]);
    }

    #[test]
    fn point_on_shared_edge_is_assigned_to_both_neighbours_under_closed_policy() {
        let grid = BinGrid::fixed_width(150.0);
        let bins: Vec<_> = grid.bins_containing(75.0).collect();
        assert_eq!(bins, vec![15, 16]);
    }

    #[test]
    fn point_on_shared_edge_is_assigned_once_under_half_open_policy() {
        let grid = BinGrid::fixed_width(150.0).with_policy(BoundaryPolicy::HalfOpen);
        let bins: Vec<_> = grid.bins_containing(75.0).collect();
        assert_eq!(bins, vec![16]);
    }

    #[test]
    fn point_at_origin_belongs_to_first_bin() {
        let grid = BinGrid::fixed_width(150.0);
        let bins: Vec<_> = grid.bins_containing(0.0).collect();
        assert_eq!(bins, vec![0]);
    }

    #[test]
    fn points_beyond_last_bin_are_not_assigned() {
        let grid = BinGrid::fixed_width(150.0);
        // 31 bins cover [0, 145.3125]; the remainder of the box is not binned.
        assert_eq!(grid.bins_containing(145.3125).collect::<Vec<_>>(), vec![30]);
        assert_eq!(grid.bins_containing(146.0).count(), 0);
        assert_eq!(grid.bins_containing(-0.1).count(), 0);
    }

    #[test]
    fn nan_coordinate_is_never_assigned() {
        let grid = BinGrid::fixed_width(150.0);
        assert_eq!(grid.bins_containing(f64::NAN).count(), 0);
    }

    #[test]
    fn empty_grid_assigns_nothing() {
        let grid = BinGrid::fixed_width(2.0);
        assert_eq!(grid.count(), 0);
        assert_eq!(grid.bins_containing(1.0).count(), 0);
    }

    #[test]
    fn divisions_layout_splits_box_evenly_and_covers_upper_edge() {
        let grid = BinGrid::from_layout(BinLayout::Divisions(256), 128.0).unwrap();
        assert_eq!(grid.count(), 256);
        assert_eq!(grid.width(), 0.5);
        assert_eq!(grid.bins_containing(128.0).collect::<Vec<_>>(), vec![255]);
    }

    #[test]
    fn divisions_layout_with_zero_divisions_is_empty() {
        let grid = BinGrid::from_layout(BinLayout::Divisions(0), 128.0).unwrap();
        assert_eq!(grid.count(), 0);
        assert_eq!(grid.bins_containing(3.0).count(), 0);
    }

    #[test]
    fn from_layout_refuses_grids_beyond_the_bin_limit() {
        assert!(matches!(
            BinGrid::from_layout(BinLayout::FixedWidth, 1e20),
            Err(GridError::TooManyBins { max: MAX_BINS, .. })
        ));
        assert!(matches!(
            BinGrid::from_layout(BinLayout::FixedWidth, 1e12),
            Err(GridError::TooManyBins { .. })
        ));
        assert!(matches!(
            BinGrid::from_layout(BinLayout::Divisions(MAX_BINS + 1), 150.0),
            Err(GridError::TooManyBins { .. })
        ));
    }

    #[test]
    fn from_layout_accepts_grids_up_to_the_limit() {
        let grid = BinGrid::from_layout(BinLayout::Divisions(MAX_BINS), 150.0).unwrap();
        assert_eq!(grid.count(), MAX_BINS);
        let grid = BinGrid::from_layout(BinLayout::FixedWidth, 150.0).unwrap();
        assert_eq!(grid.count(), 31);
    }
}
