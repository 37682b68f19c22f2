use clap::{ArgGroup, Args, Parser, Subcommand};
use rtprofile::core::io::profile::EmptyBinPolicy;
use rtprofile::setup::templates::Scheduler;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "rtprofile - prepares Rayleigh-Taylor LAMMPS runs and extracts the interface profile between the two particle species from their trajectories.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one interface profile per frame from a LAMMPS trajectory.
    Analyze(AnalyzeArgs),
    /// Generate the input deck, job script and parameter echo for a run.
    Setup(SetupArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .multiple(true)
        .args(["input", "params"]),
))]
pub struct AnalyzeArgs {
    // --- Input Selection ---
    /// Path to the trajectory file (LAMMPS text dump).
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Run parameter file (TOML). Without --input, the trajectory is read from
    /// <ROOT>/<run-id>/<run-id>.lammpstrj.
    #[arg(short, long, value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Directory holding the run directories when --params is used.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Directory receiving the interface_NNN.dat files.
    /// Defaults to the run directory, or to the trajectory's directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to an analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Analysis Overrides ---
    /// Particle type that traces the interface.
    #[arg(long, value_name = "TYPE")]
    pub species: Option<u32>,

    /// How bins without particles are written: omit, nan or fail.
    #[arg(long, value_name = "POLICY")]
    pub empty_bins: Option<EmptyBinPolicy>,

    /// Split the box into this many equal bins instead of the fixed bin width.
    #[arg(long, value_name = "INT")]
    pub divisions: Option<usize>,

    /// Write both columns with this many decimals.
    #[arg(long, value_name = "INT")]
    pub precision: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S analysis.empty-bins=nan
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `setup` subcommand.
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Run parameter file (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub params: PathBuf,

    /// Directory in which the run directory is created.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Batch system for the job script: slurm or pbs.
    #[arg(long, value_name = "NAME")]
    pub scheduler: Option<Scheduler>,

    /// Override a run parameter from the file. Can be used multiple times.
    /// Example: -S F=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
