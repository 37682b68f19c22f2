use nalgebra::Point3;

/// Physical size of the periodic simulation box along each axis.
///
/// The lower bound of every axis is taken to be zero, so each extent equals the upper bound
/// written in the `ITEM: BOX BOUNDS` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxExtent {
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
}

impl BoxExtent {
    pub fn new(lx: f64, ly: f64, lz: f64) -> Self {
        Self { lx, ly, lz }
    }
}

/// Constants read once from the head of a trajectory and reused for every frame.
///
/// The dump format repeats the atom count and box bounds in each frame; the reader only
/// looks at the first occurrence. Keeping these values apart from [`Frame`] means a
/// trajectory with a varying box only has to refresh this struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryHeader {
    /// Number of atom lines following each `ITEM: ATOMS` marker.
    pub num_atoms: usize,
    pub extent: BoxExtent,
}

/// The filtered point set of one frame: physical positions of every atom of the target
/// species, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    /// Zero-based position of the frame in the trajectory.
    pub index: usize,
    pub points: Vec<Point3<f64>>,
}

impl Frame {
    pub fn new(index: usize, points: Vec<Point3<f64>>) -> Self {
        Self { index, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
