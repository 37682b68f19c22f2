pub mod analyze;
pub mod setup;
