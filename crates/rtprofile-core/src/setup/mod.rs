//! # Setup Module
//!
//! Preparation of a Rayleigh-Taylor run: the parameter record, the run identifier derived from
//! it, and the templated files the simulation engine and the batch scheduler consume.
//!
//! - **Parameters** ([`params`]) - `RunParameters` and identifier/path derivation
//! - **Templates** ([`templates`]) - LAMMPS input deck, job script and parameter echo

pub mod params;
pub mod templates;
