use crate::cli::AnalyzeArgs;
use crate::config::{PartialAnalysisConfig, PartialRunParameters};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use rtprofile::{engine::progress::ProgressReporter, workflows};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let (trajectory_path, output_dir) = resolve_paths(&args)?;

    let partial_config = PartialAnalysisConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args, trajectory_path, output_dir)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Extracting interface profiles from {}...",
        config.trajectory_path.display()
    );
    let summary = workflows::interface::run(&config, &reporter)?;

    if summary.outputs.is_empty() {
        warn!("Trajectory contained no frames.");
        println!("Warning: no frames found; nothing was written.");
    } else {
        println!(
            "✓ Wrote {} profile(s) with {} bin(s) each to {}",
            summary.frames_written(),
            summary.grid.count(),
            config.output_dir.display()
        );
    }
    Ok(())
}

/// Works out the trajectory and output directory from `--input`, `--params` and `--output-dir`.
///
/// An explicit `--input` always wins. With `--params`, the trajectory defaults to
/// `<root>/<id>/<id>.lammpstrj` and the output to the run directory; otherwise profiles are
/// written next to the trajectory.
fn resolve_paths(args: &AnalyzeArgs) -> Result<(PathBuf, PathBuf)> {
    let run_params = match &args.params {
        Some(path) => Some(PartialRunParameters::resolve(path, &[])?),
        None => None,
    };

    let trajectory_path = match (&args.input, &run_params) {
        (Some(input), _) => input.clone(),
        (None, Some(params)) => params.trajectory_path(&args.root),
        (None, None) => {
            return Err(CliError::Argument(
                "either --input or --params is required".to_string(),
            ));
        }
    };

    let output_dir = match (&args.output_dir, &run_params) {
        (Some(dir), _) => dir.clone(),
        (None, Some(params)) => params.run_dir(&args.root),
        (None, None) => parent_or_current(&trajectory_path),
    };

    info!(
        "Trajectory: {}, output directory: {}",
        trajectory_path.display(),
        output_dir.display()
    );
    Ok((trajectory_path, output_dir))
}

fn parent_or_current(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const PARAMS: &str = "rx = 32\nry = 64\nrz = 8\ndensity = 0.8\ntemperature = 1.0\nA = 4\nnum_waves = 2\nF = 0.1\nstep = 100\n";
    const RUN_ID: &str = "rho0.8_32x64x8_T1.0_N2_A4_F0.1";

    fn analyze_args(argv: &[&str]) -> AnalyzeArgs {
        let mut full = vec!["rtprofile", "analyze"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Analyze(args) => args,
            _ => panic!("Expected 'analyze' subcommand"),
        }
    }

    fn trajectory(frames: usize) -> String {
        let mut text = String::new();
        for _ in 0..frames {
            text.push_str(
                "ITEM: TIMESTEP\n0\nITEM: NUMBER OF ATOMS\n2\nITEM: BOX BOUNDS pp pp pp\n0.0 150.0\n0.0 100.0\n0.0 10.0\nITEM: ATOMS id type xs ys zs\n1 2 0.5 0.1 0.5\n2 1 0.2 0.9 0.5\n",
            );
        }
        text
    }

    #[test]
    fn input_only_writes_next_to_trajectory() {
        let args = analyze_args(&["-i", "/data/run/traj.lammpstrj"]);
        let (traj, out) = resolve_paths(&args).unwrap();
        assert_eq!(traj, PathBuf::from("/data/run/traj.lammpstrj"));
        assert_eq!(out, PathBuf::from("/data/run"));
    }

    #[test]
    fn bare_file_name_writes_to_current_directory() {
        let args = analyze_args(&["-i", "traj.lammpstrj"]);
        let (_, out) = resolve_paths(&args).unwrap();
        assert_eq!(out, PathBuf::from("."));
    }

    #[test]
    fn params_derive_trajectory_and_output_from_run_identifier() {
        let dir = tempdir().unwrap();
        let params_path = dir.path().join("params.toml");
        fs::write(&params_path, PARAMS).unwrap();

        let args = analyze_args(&[
            "-p",
            params_path.to_str().unwrap(),
            "-r",
            dir.path().to_str().unwrap(),
        ]);
        let (traj, out) = resolve_paths(&args).unwrap();
        assert_eq!(out, dir.path().join(RUN_ID));
        assert_eq!(traj, dir.path().join(RUN_ID).join(format!("{}.lammpstrj", RUN_ID)));
    }

    #[test]
    fn explicit_paths_win_over_params() {
        let dir = tempdir().unwrap();
        let params_path = dir.path().join("params.toml");
        fs::write(&params_path, PARAMS).unwrap();

        let args = analyze_args(&[
            "-p",
            params_path.to_str().unwrap(),
            "-i",
            "other.lammpstrj",
            "-o",
            "profiles",
        ]);
        let (traj, out) = resolve_paths(&args).unwrap();
        assert_eq!(traj, PathBuf::from("other.lammpstrj"));
        assert_eq!(out, PathBuf::from("profiles"));
    }

    #[test]
    fn run_writes_one_profile_per_frame() {
        let dir = tempdir().unwrap();
        let traj = dir.path().join("traj.lammpstrj");
        fs::write(&traj, trajectory(2)).unwrap();
        let out = dir.path().join("out");

        let args = analyze_args(&[
            "-i",
            traj.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]);
        run(args).unwrap();

        assert!(out.join("interface_000.dat").is_file());
        assert!(out.join("interface_001.dat").is_file());
        assert!(!out.join("interface_002.dat").exists());
        let content = fs::read_to_string(out.join("interface_000.dat")).unwrap();
        assert_eq!(content, "72.65625 10.0\n77.34375 10.0\n");
    }

    #[test]
    fn run_surfaces_engine_errors() {
        let dir = tempdir().unwrap();
        let args = analyze_args(&["-i", dir.path().join("missing").to_str().unwrap()]);
        let result = run(args);
        assert!(matches!(result, Err(CliError::Engine(_))));
    }
}
