use super::frame::BoxExtent;
use nalgebra::Point3;

/// Particle type whose y coordinates trace the interface in the standard two-species setup.
pub const DEFAULT_TARGET_SPECIES: u32 = 2;

/// A single row of a LAMMPS `ITEM: ATOMS id type xs ys zs` block.
///
/// Coordinates are kept exactly as written in the dump, i.e. normalized to the box
/// (`xs`, `ys`, `zs` in `[0, 1)` for wrapped atoms). Use [`AtomRecord::physical_position`]
/// to obtain lengths in simulation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomRecord {
    /// The atom id assigned by the simulation engine.
    pub id: u64,
    /// The particle type (species) tag, starting at 1.
    pub type_id: u32,
    /// Box-normalized coordinates.
    pub scaled_position: Point3<f64>,
}

impl AtomRecord {
    pub fn new(id: u64, type_id: u32, scaled_position: Point3<f64>) -> Self {
        Self {
            id,
            type_id,
            scaled_position,
        }
    }

    /// Converts the normalized coordinates to physical units by scaling each axis with the
    /// corresponding box extent.
    pub fn physical_position(&self, extent: &BoxExtent) -> Point3<f64> {
        Point3::new(
            self.scaled_position.x * extent.lx,
            self.scaled_position.y * extent.ly,
            self.scaled_position.z * extent.lz,
        )
    }

    #[inline]
    pub fn is_species(&self, species: u32) -> bool {
        self.type_id == species
    }
}
