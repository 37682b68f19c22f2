//! # Engine Module
//!
//! Run-level plumbing shared by the workflows.
//!
//! - **Configuration** ([`config`]) - `AnalysisConfig` and its builder
//! - **Error Handling** ([`error`]) - The engine error type, tagged with frame index and stage
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends

pub mod config;
pub mod error;
pub mod progress;
