use crate::cli::SetupArgs;
use crate::config::PartialRunParameters;
use crate::config::defaults::DefaultsConfig;
use crate::error::Result;
use rtprofile::setup::templates;
use tracing::info;

pub fn run(args: SetupArgs) -> Result<()> {
    let params = PartialRunParameters::resolve(&args.params, &args.set_values)?;
    let scheduler = args
        .scheduler
        .unwrap_or(DefaultsConfig::default().scheduler);
    info!(
        "Preparing run {} for {} in {}",
        params.identifier(),
        scheduler,
        args.root.display()
    );

    let files = templates::generate(&params, &args.root, scheduler)?;

    println!("✓ Run directory prepared: {}", files.run_dir.display());
    println!("  Input deck:      {}", files.input_deck.display());
    println!("  Job script:      {}", files.job_script.display());
    println!("  Parameter echo:  {}", files.parameter_echo.display());
    println!(
        "  Trajectory will be written to {}",
        params.trajectory_path(&args.root).display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::error::CliError;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const PARAMS: &str = "rx = 32\nry = 64\nrz = 8\ndensity = 0.8\ntempreture = 1.0\nA = 4\nnum_waves = 2\nF = 0.1\nstep = 100\n";

    fn setup_args(argv: &[&str]) -> SetupArgs {
        let mut full = vec!["rtprofile", "setup"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Setup(args) => args,
            _ => panic!("Expected 'setup' subcommand"),
        }
    }

    #[test]
    fn generates_run_directory_with_overrides() {
        let dir = tempdir().unwrap();
        let params_path = dir.path().join("params.toml");
        fs::write(&params_path, PARAMS).unwrap();

        let args = setup_args(&[
            "-p",
            params_path.to_str().unwrap(),
            "-r",
            dir.path().to_str().unwrap(),
            "--scheduler",
            "pbs",
            "-S",
            "F=0.2",
        ]);
        run(args).unwrap();

        let run_dir = dir.path().join("rho0.8_32x64x8_T1.0_N2_A4_F0.2");
        let deck = fs::read_to_string(run_dir.join("RT.input")).unwrap();
        assert!(deck.contains("fix 3 type2 addforce 0.0 0.2 0.0"));
        let script = fs::read_to_string(run_dir.join("job_rt.sh")).unwrap();
        assert!(script.contains("#PBS"));
        let echo = fs::read_to_string(run_dir.join("config.toml")).unwrap();
        assert!(echo.contains("F = 0.2"));
    }

    #[test]
    fn defaults_to_slurm() {
        let dir = tempdir().unwrap();
        let params_path = dir.path().join("params.toml");
        fs::write(&params_path, PARAMS).unwrap();

        let args = setup_args(&[
            "-p",
            params_path.to_str().unwrap(),
            "-r",
            dir.path().to_str().unwrap(),
        ]);
        run(args).unwrap();

        let script = fs::read_to_string(
            dir.path()
                .join("rho0.8_32x64x8_T1.0_N2_A4_F0.1")
                .join("job_rt.sh"),
        )
        .unwrap();
        assert!(script.contains("#SBATCH"));
    }

    #[test]
    fn incomplete_parameters_fail_before_writing() {
        let dir = tempdir().unwrap();
        let params_path = dir.path().join("params.toml");
        fs::write(&params_path, "rx = 32\n").unwrap();

        let args = setup_args(&[
            "-p",
            params_path.to_str().unwrap(),
            "-r",
            dir.path().to_str().unwrap(),
        ]);
        let result = run(args);
        assert!(matches!(result, Err(CliError::Config(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
