//! Spatial binning of a frame's point set along the x axis.
//!
//! [`grid`] defines the bin layout and the bin-assignment rule; [`estimator`] reduces a
//! [`Frame`](crate::core::models::frame::Frame) to an
//! [`InterfaceProfile`](estimator::InterfaceProfile) holding the mean y coordinate per bin.

pub mod estimator;
pub mod grid;
