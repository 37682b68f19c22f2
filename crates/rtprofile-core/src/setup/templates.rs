use super::params::{DUMP_INTERVAL, RunParameters, format_float};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const INPUT_DECK_NAME: &str = "RT.input";
pub const JOB_SCRIPT_NAME: &str = "job_rt.sh";
pub const PARAMETER_ECHO_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to write '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize run parameters: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Batch system the job script is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheduler {
    #[default]
    Slurm,
    Pbs,
}

impl FromStr for Scheduler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slurm" => Ok(Scheduler::Slurm),
            "pbs" | "torque" => Ok(Scheduler::Pbs),
            _ => Err(format!(
                "Unknown scheduler '{}'. Expected 'slurm' or 'pbs'.",
                s
            )),
        }
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheduler::Slurm => f.write_str("slurm"),
            Scheduler::Pbs => f.write_str("pbs"),
        }
    }
}

/// LAMMPS input deck: two LJ species pushed in opposite y directions by a constant force.
pub fn render_input_deck(params: &RunParameters) -> String {
    let id = params.identifier();
    let force = format_float(params.force);
    format!(
        "units lj
atom_style atomic
boundary p p p
timestep 0.001

read_data ../confs/{data_file}

mass 1 1.0
mass 2 1.0

pair_style lj/cut 2.5

pair_coeff 1 1 1.0 1.0 2.5
pair_coeff 1 2 1.0 1.0 1.122462048309373
pair_coeff 2 2 1.0 1.0 2.5

group type1 type 1
group type2 type 2

neighbor 0.3 bin
neigh_modify every 20 delay 0 check no

fix 1 all nve
fix 2 type1 addforce 0.0 -{force} 0.0
fix 3 type2 addforce 0.0 {force} 0.0

dump id all atom {interval} {id}.lammpstrj
thermo 10000
run {steps}
",
        data_file = params.data_file_name(),
        force = force,
        interval = DUMP_INTERVAL,
        id = id,
        steps = params.total_timesteps(),
    )
}

pub fn render_job_script(scheduler: Scheduler) -> String {
    match scheduler {
        Scheduler::Slurm => "#!/bin/bash
#SBATCH -p F72cpu
#SBATCH -N 72
#SBATCH -n 144

source /home/issp/materiapps/intel/lammps/lammpsvars.sh

srun lammps < RT.input
"
        .to_string(),
        Scheduler::Pbs => "#!/bin/bash
#PBS -l nodes=1:ppn=20

cd $PBS_O_WORKDIR

mpirun -np 20 lmp_mpi < RT.input
"
        .to_string(),
    }
}

/// Copy of the parameters stored next to the run so it can be analysed or regenerated later.
pub fn render_parameter_echo(params: &RunParameters) -> Result<String, SetupError> {
    Ok(toml::to_string(params)?)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetupFiles {
    pub run_dir: PathBuf,
    pub input_deck: PathBuf,
    pub job_script: PathBuf,
    pub parameter_echo: PathBuf,
}

fn write_file(path: PathBuf, content: &str) -> Result<PathBuf, SetupError> {
    fs::write(&path, content).map_err(|source| SetupError::Io {
        path: path.clone(),
        source,
    })?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

/// Writes the parameter echo, job script and input deck into `<root>/<identifier>/`,
/// creating the directory when needed. Existing files are overwritten.
pub fn generate(
    params: &RunParameters,
    root: &Path,
    scheduler: Scheduler,
) -> Result<SetupFiles, SetupError> {
    let run_dir = params.run_dir(root);
    fs::create_dir_all(&run_dir).map_err(|source| SetupError::Io {
        path: run_dir.clone(),
        source,
    })?;

    let parameter_echo = write_file(
        run_dir.join(PARAMETER_ECHO_NAME),
        &render_parameter_echo(params)?,
    )?;
    let job_script = write_file(run_dir.join(JOB_SCRIPT_NAME), &render_job_script(scheduler))?;
    let input_deck = write_file(run_dir.join(INPUT_DECK_NAME), &render_input_deck(params))?;

    info!("Generated {}/", run_dir.display());
    Ok(SetupFiles {
        run_dir,
        input_deck,
        job_script,
        parameter_echo,
    })
}
