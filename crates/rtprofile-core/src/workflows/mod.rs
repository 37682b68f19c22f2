//! # Workflows Module
//!
//! High-level entry points that run a complete analysis.
//!
//! - **Interface Extraction** ([`interface`]) - Reads a trajectory once and writes one
//!   interface profile per frame.

pub mod interface;
