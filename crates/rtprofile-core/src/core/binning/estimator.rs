use super::grid::BinGrid;
use crate::core::models::frame::Frame;

/// Outcome of averaging one bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinValue {
    /// Arithmetic mean of the y coordinates of the particles in the bin.
    Mean(f64),
    /// No particle fell in the bin this frame.
    Empty,
}

impl BinValue {
    pub fn mean(&self) -> Option<f64> {
        match self {
            BinValue::Mean(v) => Some(*v),
            BinValue::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinEstimate {
    pub index: usize,
    pub center: f64,
    pub value: BinValue,
    pub count: usize,
}

/// The interface height sampled along x for a single frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterfaceProfile {
    pub frame: usize,
    pub bins: Vec<BinEstimate>,
}

impl InterfaceProfile {
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn empty_bins(&self) -> usize {
        self.bins
            .iter()
            .filter(|b| b.value == BinValue::Empty)
            .count()
    }
}

/// Averages the y coordinate of the frame's points per x bin.
///
/// Every bin of `grid` is emitted, in index order, whether or not it received points.
pub fn estimate_interface(frame: &Frame, grid: &BinGrid) -> InterfaceProfile {
    let mut sums = vec![(0.0_f64, 0_usize); grid.count()];

    for point in &frame.points {
        for i in grid.bins_containing(point.x) {
            sums[i].0 += point.y;
            sums[i].1 += 1;
        }
    }

    let bins = sums
        .into_iter()
        .enumerate()
        .map(|(index, (sum, count))| BinEstimate {
            index,
            center: grid.center(index),
            value: if count > 0 {
                BinValue::Mean(sum / count as f64)
            } else {
                BinValue::Empty
            },
            count,
        })
        .collect();

    InterfaceProfile {
        frame: frame.index,
        bins,
    }
}
