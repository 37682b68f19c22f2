//! # rtprofile Core Library
//!
//! Post-processing for Rayleigh-Taylor style molecular-dynamics runs: reads LAMMPS text
//! trajectories, keeps one particle species, and reduces every frame to a one-dimensional
//! interface profile binned along the x axis.
//!
//! ## Architectural Philosophy
//!
//! The library follows a layered layout so each stage of the pipeline can be tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`TrajectoryHeader`, `Frame`), the
//!   trajectory reader, the profile writer and the binning arithmetic.
//!
//! - **[`engine`]: Run Plumbing.** Analysis configuration, the error taxonomy shared by every
//!   stage, and progress reporting hooks for front ends.
//!
//! - **[`setup`]: Run Preparation.** Simulation parameters, run identifiers and the templated
//!   LAMMPS input deck and job script that produce the trajectory in the first place.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into the frame-by-frame
//!   interface extraction.

pub mod core;
pub mod engine;
pub mod setup;
pub mod workflows;
