use crate::core::binning::estimator::{BinValue, InterfaceProfile};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// What the writer does with a bin that received no particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyBinPolicy {
    /// Leave the bin's line out of the file.
    #[default]
    Omit,
    /// Write the bin with `NaN` as its mean.
    NaN,
    /// Abort the run.
    Fail,
}

impl FromStr for EmptyBinPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "omit" | "skip" => Ok(EmptyBinPolicy::Omit),
            "nan" => Ok(EmptyBinPolicy::NaN),
            "fail" | "error" => Ok(EmptyBinPolicy::Fail),
            _ => Err(format!(
                "Unknown empty-bin policy '{}'. Expected 'omit', 'nan' or 'fail'.",
                s
            )),
        }
    }
}

impl fmt::Display for EmptyBinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmptyBinPolicy::Omit => "omit",
            EmptyBinPolicy::NaN => "nan",
            EmptyBinPolicy::Fail => "fail",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileFormat {
    pub empty_bins: EmptyBinPolicy,
    /// Fixed number of decimals for both columns. `None` writes the shortest representation
    /// that round-trips, always with a decimal point (`75.0`, `2.34375`).
    pub precision: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ProfileWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Bin {bin} (center {center}) has no particles")]
    EmptyBin { bin: usize, center: f64 },
}

/// File name of the profile for frame `index`: `interface_000.dat`, `interface_001.dat`, ...
pub fn output_file_name(index: usize) -> String {
    format!("interface_{:03}.dat", index)
}

fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => format!("{:?}", value),
    }
}

/// Serializes profiles as `<bin_center> <mean_y>` rows, one per bin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileWriter {
    format: ProfileFormat,
}

impl ProfileWriter {
    pub fn new(format: ProfileFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &ProfileFormat {
        &self.format
    }

    fn check(&self, profile: &InterfaceProfile) -> Result<(), ProfileWriteError> {
        if self.format.empty_bins != EmptyBinPolicy::Fail {
            return Ok(());
        }
        match profile.bins.iter().find(|b| b.value == BinValue::Empty) {
            Some(bin) => Err(ProfileWriteError::EmptyBin {
                bin: bin.index,
                center: bin.center,
            }),
            None => Ok(()),
        }
    }

    /// Writes `profile` and returns the number of lines written.
    ///
    /// With [`EmptyBinPolicy::Fail`] nothing is written when any bin is empty.
    pub fn write_to(
        &self,
        profile: &InterfaceProfile,
        writer: &mut impl Write,
    ) -> Result<usize, ProfileWriteError> {
        self.check(profile)?;

        let mut lines = 0;
        for bin in &profile.bins {
            let mean = match (bin.value, self.format.empty_bins) {
                (BinValue::Mean(v), _) => v,
                (BinValue::Empty, EmptyBinPolicy::NaN) => f64::NAN,
                (BinValue::Empty, _) => continue,
            };
            writeln!(
                writer,
                "{} {}",
                format_value(bin.center, self.format.precision),
                format_value(mean, self.format.precision)
            )?;
            lines += 1;
        }
        Ok(lines)
    }

    /// Writes `profile` to `path`, replacing any existing file.
    pub fn write_to_path<P: AsRef<Path>>(
        &self,
        profile: &InterfaceProfile,
        path: P,
    ) -> Result<usize, ProfileWriteError> {
        self.check(profile)?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let lines = self.write_to(profile, &mut writer)?;
        writer.flush()?;
        Ok(lines)
    }
}
