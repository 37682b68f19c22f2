//! Data models shared by the reader, the binning step and the writer.

pub mod atom;
pub mod frame;
