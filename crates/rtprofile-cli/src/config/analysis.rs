use super::defaults::DefaultsConfig;
use super::load_toml;
use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use rtprofile::core::binning::grid::BinLayout;
use rtprofile::core::io::profile::EmptyBinPolicy;
use rtprofile::engine::config::{AnalysisConfig, AnalysisConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialAnalysisSection {
    species: Option<u32>,
    #[serde(rename = "empty-bins")]
    empty_bins: Option<String>,
    divisions: Option<usize>,
    precision: Option<usize>,
}

/// Analysis settings read from a TOML file, every key optional.
///
/// ```toml
/// [analysis]
/// species = 2
/// empty-bins = "nan"
/// divisions = 256
/// precision = 2
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialAnalysisConfig {
    analysis: Option<PartialAnalysisSection>,
}

impl PartialAnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        load_toml(path)
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Combines the file with the command line. Command-line flags win over `-S` overrides,
    /// which win over the file.
    ///
    /// `trajectory_path` and `output_dir` are resolved by the caller.
    pub fn merge_with_cli(
        mut self,
        args: &AnalyzeArgs,
        trajectory_path: PathBuf,
        output_dir: PathBuf,
    ) -> Result<AnalysisConfig> {
        self.apply_set_values(&args.set_values)?;
        let section = self.analysis.take().unwrap_or_default();
        let defaults = DefaultsConfig::default();

        let file_policy = section
            .empty_bins
            .as_deref()
            .map(EmptyBinPolicy::from_str)
            .transpose()
            .map_err(CliError::Config)?;

        let bin_layout = match args.divisions.or(section.divisions) {
            Some(m) => BinLayout::Divisions(m),
            None => BinLayout::FixedWidth,
        };

        let config = AnalysisConfigBuilder::new()
            .trajectory_path(trajectory_path)
            .output_dir(output_dir)
            .target_species(
                args.species
                    .or(section.species)
                    .unwrap_or(defaults.target_species),
            )
            .bin_layout(bin_layout)
            .empty_bins(args.empty_bins.or(file_policy).unwrap_or(defaults.empty_bins))
            .precision(args.precision.or(section.precision).or(defaults.precision))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        debug!("Resolved analysis configuration: {:?}", config);
        Ok(config)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
            self.apply_one(key, value)
                .map_err(|e| CliError::Config(e.to_string()))?;
        }
        Ok(())
    }

    fn apply_one(&mut self, key: &str, value: &str) -> std::result::Result<(), ParseError> {
        let section = self.analysis.get_or_insert_with(Default::default);
        match key {
            "analysis.species" => {
                section.species = Some(parser::parse_value(key, value, "integer")?);
            }
            "analysis.empty-bins" => {
                EmptyBinPolicy::from_str(value).map_err(|_| ParseError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    expected: "policy",
                })?;
                section.empty_bins = Some(value.to_string());
            }
            "analysis.divisions" => {
                section.divisions = Some(parser::parse_value(key, value, "integer")?);
            }
            "analysis.precision" => {
                section.precision = Some(parser::parse_value(key, value, "integer")?);
            }
            _ => {
                return Err(ParseError::UnsupportedKey(key.to_string()));
            }
        }
        Ok(())
    }
}
