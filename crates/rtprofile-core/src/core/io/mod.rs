//! Provides input/output for the trajectory and profile formats.
//!
//! [`dump`] reads the multi-frame LAMMPS text dump through a single sequential cursor, and
//! [`profile`] writes one two-column interface file per frame.

pub mod dump;
pub mod profile;
