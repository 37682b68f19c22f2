use super::config::ConfigError;
use crate::core::binning::grid::GridError;
use crate::core::io::dump::DumpError;
use crate::core::io::profile::ProfileWriteError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage in which a frame failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extraction,
    Writing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extraction => f.write_str("atom extraction"),
            Stage::Writing => f.write_str("profile writing"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Dump(#[from] DumpError),
    #[error(transparent)]
    Profile(#[from] ProfileWriteError),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to open trajectory '{path}': {source}", path = path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create output directory '{path}': {source}", path = path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read trajectory header (frame 0, header scan): {source}")]
    Header {
        #[source]
        source: DumpError,
    },

    #[error("Cannot bin the trajectory: {0}")]
    Grid(#[from] GridError),

    #[error("Frame {frame} failed during {stage}: {source}")]
    Frame {
        frame: usize,
        stage: Stage,
        #[source]
        source: StageError,
    },
}

impl EngineError {
    pub(crate) fn frame(frame: usize, stage: Stage, source: impl Into<StageError>) -> Self {
        EngineError::Frame {
            frame,
            stage,
            source: source.into(),
        }
    }

    /// Index of the frame that failed, if the error is tied to one.
    pub fn frame_index(&self) -> Option<usize> {
        match self {
            EngineError::Header { .. } => Some(0),
            EngineError::Frame { frame, .. } => Some(*frame),
            _ => None,
        }
    }
}
