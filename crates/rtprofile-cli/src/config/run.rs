use super::load_toml;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use rtprofile::setup::params::RunParameters;
use serde::Deserialize;
use std::path::Path;

/// Run parameters as read from disk, before `-S` overrides are applied.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialRunParameters {
    rx: Option<u32>,
    ry: Option<u32>,
    rz: Option<u32>,
    density: Option<f64>,
    #[serde(alias = "tempreture")]
    temperature: Option<f64>,
    #[serde(rename = "A")]
    amplitude: Option<u32>,
    num_waves: Option<u32>,
    #[serde(rename = "F")]
    force: Option<f64>,
    step: Option<u64>,
}

fn require<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| {
        CliError::Config(format!(
            "Run parameter '{}' is required either in the parameter file or via --set.",
            key
        ))
    })
}

impl PartialRunParameters {
    pub fn from_file(path: &Path) -> Result<Self> {
        load_toml(path)
    }

    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
            self.apply_one(key, value)
                .map_err(|e| CliError::Config(e.to_string()))?;
        }
        Ok(())
    }

    fn apply_one(&mut self, key: &str, value: &str) -> std::result::Result<(), ParseError> {
        match key {
            "rx" => self.rx = Some(parser::parse_value(key, value, "integer")?),
            "ry" => self.ry = Some(parser::parse_value(key, value, "integer")?),
            "rz" => self.rz = Some(parser::parse_value(key, value, "integer")?),
            "density" => self.density = Some(parser::parse_value(key, value, "float")?),
            "temperature" | "tempreture" => {
                self.temperature = Some(parser::parse_value(key, value, "float")?)
            }
            "A" => self.amplitude = Some(parser::parse_value(key, value, "integer")?),
            "num_waves" => self.num_waves = Some(parser::parse_value(key, value, "integer")?),
            "F" => self.force = Some(parser::parse_value(key, value, "float")?),
            "step" => self.step = Some(parser::parse_value(key, value, "integer")?),
            _ => return Err(ParseError::UnsupportedKey(key.to_string())),
        }
        Ok(())
    }

    pub fn into_run_parameters(self) -> Result<RunParameters> {
        Ok(RunParameters {
            rx: require(self.rx, "rx")?,
            ry: require(self.ry, "ry")?,
            rz: require(self.rz, "rz")?,
            density: require(self.density, "density")?,
            temperature: require(self.temperature, "temperature")?,
            amplitude: require(self.amplitude, "A")?,
            num_waves: require(self.num_waves, "num_waves")?,
            force: require(self.force, "F")?,
            step: require(self.step, "step")?,
        })
    }

    /// Loads `path`, applies the overrides and checks that every parameter is present.
    pub fn resolve(path: &Path, set_values: &[String]) -> Result<RunParameters> {
        let mut partial = Self::from_file(path)?;
        partial.apply_set_values(set_values)?;
        partial.into_run_parameters()
    }
}
