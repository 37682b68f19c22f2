use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Timesteps between two dumped frames in the generated input deck.
pub const DUMP_INTERVAL: u64 = 2000;

/// Parameter record describing one Rayleigh-Taylor run.
///
/// Field names on disk follow the historical configuration keys (`A`, `F`, `num_waves`), and
/// `tempreture` is still accepted for `temperature`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunParameters {
    /// Lattice repetitions along x.
    pub rx: u32,
    /// Lattice repetitions along y.
    pub ry: u32,
    /// Lattice repetitions along z.
    pub rz: u32,
    /// Number density in Lennard-Jones units.
    pub density: f64,
    /// Initial temperature in Lennard-Jones units.
    #[serde(alias = "tempreture")]
    pub temperature: f64,
    /// Amplitude of the initial interface perturbation.
    #[serde(rename = "A")]
    pub amplitude: u32,
    /// Number of perturbation wavelengths across the box.
    pub num_waves: u32,
    /// Magnitude of the opposing body force applied to the two species.
    #[serde(rename = "F")]
    pub force: f64,
    /// Number of frames to produce; the run lasts `step * DUMP_INTERVAL` timesteps.
    pub step: u64,
}

/// Renders a float the way run identifiers expect it: shortest form, always with a decimal
/// point (`0.8`, `1.0`).
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

impl RunParameters {
    fn lattice_tag(&self) -> String {
        format!(
            "rho{}_{}x{}x{}_T{}_N{}_A{}",
            format_float(self.density),
            self.rx,
            self.ry,
            self.rz,
            format_float(self.temperature),
            self.num_waves,
            self.amplitude
        )
    }

    /// Identifier naming the run directory and the trajectory, e.g.
    /// `rho0.8_32x64x8_T1.0_N2_A4_F0.1`.
    pub fn identifier(&self) -> String {
        format!("{}_F{}", self.lattice_tag(), format_float(self.force))
    }

    /// File name of the initial configuration shared by every forcing strength.
    pub fn data_file_name(&self) -> String {
        format!("{}.atoms", self.lattice_tag())
    }

    pub fn run_dir(&self, root: &Path) -> PathBuf {
        root.join(self.identifier())
    }

    /// Default trajectory location: `<root>/<id>/<id>.lammpstrj`.
    pub fn trajectory_path(&self, root: &Path) -> PathBuf {
        let id = self.identifier();
        root.join(&id).join(format!("{}.lammpstrj", id))
    }

    pub fn total_timesteps(&self) -> u64 {
        self.step.saturating_mul(DUMP_INTERVAL)
    }
}
