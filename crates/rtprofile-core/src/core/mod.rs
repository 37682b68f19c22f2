//! # Core Module
//!
//! Fundamental building blocks of the interface analysis.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Trajectory-level constants, atom records and filtered frames
//! - **File I/O** ([`io`]) - The sequential LAMMPS dump reader and the profile writer
//! - **Spatial Binning** ([`binning`]) - Bin layout, bin assignment and the per-bin estimator
//!
//! Data flows strictly downstream: the reader produces frames, the binning step reduces them
//! to profiles, and the writer serializes the profiles.

pub mod binning;
pub mod io;
pub mod models;
