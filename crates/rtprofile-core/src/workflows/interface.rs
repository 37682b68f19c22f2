use crate::core::binning::estimator::estimate_interface;
use crate::core::binning::grid::BinGrid;
use crate::core::io::dump::DumpReader;
use crate::core::io::profile::{ProfileWriter, output_file_name};
use crate::core::models::frame::TrajectoryHeader;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::{EngineError, Stage};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub header: TrajectoryHeader,
    pub grid: BinGrid,
    /// Written profile files, in frame order.
    pub outputs: Vec<PathBuf>,
}

impl AnalysisSummary {
    pub fn frames_written(&self) -> usize {
        self.outputs.len()
    }
}

/// Extracts the interface profile of every frame in `config.trajectory_path`.
#[instrument(skip_all, name = "interface_workflow")]
pub fn run(
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisSummary, EngineError> {
    info!(
        "Opening trajectory {}",
        config.trajectory_path.display()
    );
    let file = File::open(&config.trajectory_path).map_err(|source| EngineError::Open {
        path: config.trajectory_path.clone(),
        source,
    })?;
    run_with_reader(BufReader::new(file), config, reporter)
}

/// Same as [`run`], reading the trajectory from an already opened source.
///
/// `config.trajectory_path` is not consulted.
pub fn run_with_reader<R: BufRead>(
    source: R,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisSummary, EngineError> {
    let mut reader = DumpReader::new(source);

    reporter.report(Progress::PhaseStart {
        name: "Reading trajectory header",
    });
    let header = reader
        .read_header()
        .map_err(|source| EngineError::Header { source })?;
    info!("Number of atoms: {}", header.num_atoms);
    info!(
        "System size: LX = {}, LY = {}, LZ = {}",
        header.extent.lx, header.extent.ly, header.extent.lz
    );
    reporter.report(Progress::PhaseFinish);

    let grid = BinGrid::from_layout(config.bin_layout, header.extent.lx)?;
    debug!(
        "Bin grid: {} bins of width {} ({:?} boundaries)",
        grid.count(),
        grid.width(),
        grid.policy()
    );
    if grid.count() == 0 {
        let msg = format!(
            "Box length {} is too short for a single bin; profiles will be empty.",
            header.extent.lx
        );
        warn!("{}", msg);
        reporter.report(Progress::Message(msg));
    }

    fs::create_dir_all(&config.output_dir).map_err(|source| EngineError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let writer = ProfileWriter::new(config.profile_format);
    let mut outputs = Vec::new();

    reporter.report(Progress::PhaseStart {
        name: "Extracting interface profiles",
    });
    loop {
        let index = reader.frames_read();
        let frame = match reader
            .next_frame(&header, config.target_species)
            .map_err(|e| EngineError::frame(index, Stage::Extraction, e))?
        {
            Some(frame) => frame,
            None => break,
        };
        debug!(
            "Frame {}: {} atoms of type {}",
            frame.index,
            frame.len(),
            config.target_species
        );

        let profile = estimate_interface(&frame, &grid);
        let path = config.output_dir.join(output_file_name(frame.index));
        let bins_written = writer
            .write_to_path(&profile, &path)
            .map_err(|e| EngineError::frame(frame.index, Stage::Writing, e))?;
        info!("Generated {}", path.display());

        reporter.report(Progress::FrameFinish {
            index: frame.index,
            bins_written,
            empty_bins: profile.empty_bins(),
        });
        outputs.push(path);
    }
    reporter.report(Progress::PhaseFinish);

    if outputs.is_empty() {
        let msg = "No 'ITEM: ATOMS' block found; no profiles were written.";
        warn!("{}", msg);
        reporter.report(Progress::Message(msg.to_string()));
    }
    info!("Processed {} frame(s).", outputs.len());

    Ok(AnalysisSummary {
        header,
        grid,
        outputs,
    })
}
