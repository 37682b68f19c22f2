use crate::core::binning::grid::{BinLayout, MAX_BINS};
use crate::core::io::profile::{EmptyBinPolicy, ProfileFormat};
use crate::core::models::atom::DEFAULT_TARGET_SPECIES;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub trajectory_path: PathBuf,
    pub output_dir: PathBuf,
    pub target_species: u32,
    pub bin_layout: BinLayout,
    pub profile_format: ProfileFormat,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    trajectory_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    target_species: Option<u32>,
    bin_layout: Option<BinLayout>,
    empty_bins: Option<EmptyBinPolicy>,
    precision: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trajectory_path(mut self, path: PathBuf) -> Self {
        self.trajectory_path = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn target_species(mut self, species: u32) -> Self {
        self.target_species = Some(species);
        self
    }
    pub fn bin_layout(mut self, layout: BinLayout) -> Self {
        self.bin_layout = Some(layout);
        self
    }
    pub fn empty_bins(mut self, policy: EmptyBinPolicy) -> Self {
        self.empty_bins = Some(policy);
        self
    }
    pub fn precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let target_species = self.target_species.unwrap_or(DEFAULT_TARGET_SPECIES);
        if target_species == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "target_species",
                reason: "particle types start at 1".to_string(),
            });
        }
        let bin_layout = self.bin_layout.unwrap_or_default();
        match bin_layout {
            BinLayout::Divisions(0) => {
                return Err(ConfigError::InvalidParameter {
                    name: "bin_layout",
                    reason: "number of divisions must be positive".to_string(),
                });
            }
            BinLayout::Divisions(m) if m > MAX_BINS => {
                return Err(ConfigError::InvalidParameter {
                    name: "bin_layout",
                    reason: format!("{} divisions exceed the limit of {}", m, MAX_BINS),
                });
            }
            _ => {}
        }

        Ok(AnalysisConfig {
            trajectory_path: self
                .trajectory_path
                .ok_or(ConfigError::MissingParameter("trajectory_path"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            target_species,
            bin_layout,
            profile_format: ProfileFormat {
                empty_bins: self.empty_bins.unwrap_or_default(),
                precision: self.precision,
            },
        })
    }
}
